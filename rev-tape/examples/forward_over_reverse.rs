//! Second derivatives by running a forward tangent over a reverse tape.
//!
//! Each input is an `Fvar<Var<f64>>`: the value is recorded on the tape,
//! the tangent seeds a direction. After one forward evaluation the
//! tangent holds a directional derivative, and a backward pass from it
//! yields a Hessian-vector product.
//!
//! Run with: `cargo run -p rev-tape --example forward_over_reverse`

use fvar_core::{Fvar, Scalar};
use rev_tape::Var;

fn main() {
    println!("=== Forward over Reverse ===\n");

    // Example 1: f(x) = x³ at x = 2
    println!("Example 1: f(x) = x³ at x=2");
    let x = Var::variable_on(Var::tape(), 2.0);
    let fx = Fvar::new(x.clone(), Var::constant(1.0));
    let y = fx.clone() * fx.clone() * fx;
    println!("  f(2) = {}", y.value.value());
    println!("  f'(2) = {} (expected: 3x² = 12)", y.deriv.value());
    y.deriv.backward();
    println!("  f''(2) = {} (expected: 6x = 12)", x.grad());
    println!();

    // Example 2: Hessian-vector product of f(x, y) = x²y + sin(y)
    // at (1, π/2) along v = (1, 0)
    println!("Example 2: H·v for f(x, y) = x²y + sin(y) at (1, π/2), v = (1, 0)");
    let tape = Var::tape();
    let x = Var::variable_on(tape.clone(), 1.0);
    let y = Var::variable_on(tape, std::f64::consts::FRAC_PI_2);
    let fx = Fvar::new(x.clone(), Var::constant(1.0));
    let fy = Fvar::new(y.clone(), Var::constant(0.0));
    let f = fx.clone() * fx * fy.clone() + fy.sin();
    println!("  f = {}", f.value.value());
    println!("  ∇f·v = {} (expected: 2xy = π)", f.deriv.value());
    f.deriv.backward();
    println!("  H·v = [{}, {}] (expected: [2y, 2x] = [π, 2])", x.grad(), y.grad());
    println!();

    // Example 3: the primal looks through every layer
    println!("Example 3: primal of a nested value");
    let z = Fvar::new(Var::constant(4.5), Var::constant(1.0)).sqrt();
    println!("  √4.5 = {}", z.primal());
    println!("  d√x/dx = {} (expected: 1/(2√4.5))", z.deriv.value());
}
