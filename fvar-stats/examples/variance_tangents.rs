//! Tangents of container statistics in one forward pass.
//!
//! Run with: `cargo run -p fvar-stats --example variance_tangents`

use fvar_core::Fvar;
use fvar_stats::{mean, sd, sum, variance, StatsError};
use nalgebra::{DMatrix, DVector};

fn seeded(values: &[f64], tangents: &[f64]) -> Vec<Fvar<f64>> {
    values
        .iter()
        .zip(tangents)
        .map(|(&x, &d)| Fvar::new(x, d))
        .collect()
}

fn main() -> Result<(), StatsError> {
    println!("=== Container Statistics with Tangents ===\n");

    let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    // Example 1: a column vector
    println!("Example 1: x = [1..6], dx = [1, 2, 2, 2, 2, 2]");
    let v = DVector::from_vec(seeded(&values, &[1.0, 2.0, 2.0, 2.0, 2.0, 2.0]));
    let s = sum(&v);
    let m = mean(&v)?;
    let var = variance(&v)?;
    let dev = sd(&v)?;
    println!("  sum = {} (tangent {})", s.value, s.deriv);
    println!("  mean = {} (tangent {})", m.value, m.deriv);
    println!("  variance = {} (tangent {}, expected 1.0)", var.value, var.deriv);
    println!("  sd = {} (tangent {})", dev.value, dev.deriv);
    println!();

    // Example 2: moving one point moves the mean too
    println!("Example 2: dx = [11, 2, 2, 2, 2, 2]");
    let v = DVector::from_vec(seeded(&values, &[11.0, 2.0, 2.0, 2.0, 2.0, 2.0]));
    println!("  variance tangent = {} (expected: -9.0)", variance(&v)?.deriv);
    println!();

    // Example 3: shape does not matter
    println!("Example 3: the same data as a 2x3 matrix");
    let m = DMatrix::from_vec(2, 3, seeded(&values, &[1.0, 2.0, 2.0, 2.0, 2.0, 2.0]));
    println!("  variance = {:?}", variance(&m)?);
    println!();

    // Example 4: second order
    println!("Example 4: nested duals give the second directional derivative");
    let v: Vec<Fvar<Fvar<f64>>> = values
        .iter()
        .map(|&x| Fvar::new(Fvar::variable(x), Fvar::new(1.0, 0.0)))
        .collect();
    let var = variance(&v)?;
    println!("  variance = {}", var.value.value);
    println!("  d²var along a uniform shift = {} (expected: 0)", var.deriv.deriv);
    println!();

    // Example 5: degenerate sizes
    println!("Example 5: degenerate sizes");
    let single = vec![Fvar::new(12.9, 5.0)];
    println!("  variance of one element = {:?}", variance(&single)?);
    let empty: Vec<Fvar<f64>> = Vec::new();
    println!("  sum of nothing = {:?}", sum(&empty));
    if let Err(e) = variance(&empty) {
        println!("  variance of nothing: {}", e);
    }

    Ok(())
}
