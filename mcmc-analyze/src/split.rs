//! Cutting chains in half.
//!
//! Chains may be jagged; every chain is cut to the shortest declared
//! size `m` first. With `h = ⌈m / 2⌉` the first half of a chain is
//! `[0, h)` and the second half `[h, m)`, so for odd `m` the first half
//! holds the extra draw.

use crate::error::{Result, SplitError};
use tracing::trace;

/// Splits each chain in half.
///
/// `draws[k]` holds the draws of chain `k` and `sizes[k]` its declared
/// length. The result holds `2 × draws.len()` slices ordered
/// `[chain 0 first half, chain 0 second half, chain 1 first half, ...]`.
///
/// # Errors
///
/// - [`SplitError::NoChains`] if `draws` is empty
/// - [`SplitError::SizeCountMismatch`] if `sizes` and `draws` differ in length
/// - [`SplitError::ShortChain`] if a chain holds fewer draws than declared
///
/// # Example
///
/// ```rust
/// use mcmc_analyze::split_chains;
///
/// // Jagged chains are cut to the shortest: m = 5, h = 3.
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let b = [7.0, 8.0, 9.0, 10.0, 11.0];
///
/// let halves = split_chains(&[&a[..], &b[..]], &[6, 5]).unwrap();
/// assert_eq!(halves[0], &[1.0, 2.0, 3.0]);
/// assert_eq!(halves[1], &[4.0, 5.0]);
/// assert_eq!(halves[2], &[7.0, 8.0, 9.0]);
/// assert_eq!(halves[3], &[10.0, 11.0]);
/// ```
pub fn split_chains<'a>(draws: &[&'a [f64]], sizes: &[usize]) -> Result<Vec<&'a [f64]>> {
    if draws.is_empty() {
        return Err(SplitError::NoChains);
    }
    if sizes.len() != draws.len() {
        return Err(SplitError::SizeCountMismatch {
            chains: draws.len(),
            sizes: sizes.len(),
        });
    }
    for (chain, (d, &declared)) in draws.iter().zip(sizes).enumerate() {
        if d.len() < declared {
            return Err(SplitError::ShortChain {
                chain,
                len: d.len(),
                declared,
            });
        }
    }

    let num_draws = sizes.iter().copied().min().unwrap_or(0);
    let half = num_draws.div_ceil(2);
    trace!(chains = draws.len(), num_draws, half, "splitting chains");

    Ok(draws
        .iter()
        .flat_map(|&d| [&d[..half], &d[half..num_draws]])
        .collect())
}

/// Splits each chain in half, every chain having `size` draws.
///
/// # Errors
///
/// As [`split_chains`], with `size` applied to every chain.
///
/// # Example
///
/// ```rust
/// use mcmc_analyze::split_chains_uniform;
///
/// let a = [1.0, 2.0, 3.0];
/// let halves = split_chains_uniform(&[&a[..]], 3).unwrap();
/// assert_eq!(halves, vec![&a[..2], &a[2..]]);
/// ```
pub fn split_chains_uniform<'a>(draws: &[&'a [f64]], size: usize) -> Result<Vec<&'a [f64]>> {
    split_chains(draws, &vec![size; draws.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_chains_split_evenly() {
        let a: Vec<f64> = (0..10).map(f64::from).collect();
        let b: Vec<f64> = (10..20).map(f64::from).collect();

        let halves = split_chains(&[&a[..], &b[..]], &[10, 10]).unwrap();
        assert_eq!(halves.len(), 4);
        assert_eq!(halves[0], &a[..5]);
        assert_eq!(halves[1], &a[5..]);
        assert_eq!(halves[2], &b[..5]);
        assert_eq!(halves[3], &b[5..]);
    }

    #[test]
    fn odd_length_gives_first_half_the_extra_draw() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let halves = split_chains_uniform(&[&a[..]], 5).unwrap();
        assert_eq!(halves, vec![&a[..3], &a[3..]]);
    }

    #[test]
    fn halves_borrow_the_input() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let halves = split_chains_uniform(&[&a[..]], 4).unwrap();
        assert!(std::ptr::eq(halves[0].as_ptr(), a.as_ptr()));
        assert!(std::ptr::eq(halves[1].as_ptr(), a[2..].as_ptr()));
    }

    #[test]
    fn extra_buffer_beyond_declared_size_is_ignored() {
        let a = [1.0, 2.0, 3.0, 4.0, 99.0, 99.0];
        let halves = split_chains(&[&a[..]], &[4]).unwrap();
        assert_eq!(halves, vec![&a[..2], &a[2..4]]);
    }

    #[test]
    fn empty_and_single_draw_chains() {
        let none: [f64; 0] = [];
        assert_eq!(
            split_chains_uniform(&[&none[..]], 0).unwrap(),
            vec![&none[..], &none[..]]
        );

        let one = [4.2];
        let halves = split_chains_uniform(&[&one[..]], 1).unwrap();
        assert_eq!(halves[0], &[4.2]);
        assert!(halves[1].is_empty());
    }

    #[test]
    fn rejects_bad_input() {
        let a = [1.0, 2.0];
        assert_eq!(split_chains(&[], &[]), Err(SplitError::NoChains));
        assert_eq!(split_chains_uniform(&[], 3), Err(SplitError::NoChains));
        assert_eq!(
            split_chains(&[&a[..]], &[2, 2]),
            Err(SplitError::SizeCountMismatch { chains: 1, sizes: 2 })
        );
        assert_eq!(
            split_chains(&[&a[..], &a[..]], &[2, 3]),
            Err(SplitError::ShortChain {
                chain: 1,
                len: 2,
                declared: 3
            })
        );
    }

    #[test]
    fn error_messages() {
        let err = SplitError::ShortChain {
            chain: 0,
            len: 3,
            declared: 8,
        };
        assert_eq!(err.to_string(), "chain 0 holds 3 draws but was declared with 8");
    }
}
