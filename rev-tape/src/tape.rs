use fvar_core::Scalar;
use num_traits::{Float, NumCast, One, Zero};
use std::cell::RefCell;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

/// A differentiable variable for reverse-mode automatic
/// differentiation.
///
/// A `Var` is either a constant that lives on no tape, or a node
/// recorded on a [`Tape`]. Constants are what [`Scalar::from_f64`],
/// `zero()` and `one()` produce, so a `Var` can sit inside a
/// forward-mode `Fvar` without any tape in scope; the first operation
/// that meets a tracked operand moves the constant onto that tape.
///
/// # Examples
///
/// Using [`reverse_diff`] for reusable functions:
///
/// ```
/// use rev_tape::{reverse_diff, Var};
///
/// // Define f(x) = (x+1)(x-1) = x² - 1
/// let f = |x: Var<f64>| (x.clone() + 1.0) * (x - 1.0);
///
/// let (val, deriv) = reverse_diff(f, 3.0);
/// assert_eq!(val, 8.0);    // f(3) = 8
/// assert_eq!(deriv, 6.0);  // f'(3) = 2x = 6
/// ```
///
/// Constants never touch a tape:
///
/// ```
/// use rev_tape::Var;
///
/// let c = Var::constant(2.0) * Var::constant(4.0);
/// assert_eq!(c.value(), 8.0);
/// assert!(!c.is_tracked());
/// ```
#[derive(Clone)]
pub struct Var<T: Float> {
    node: Node<T>,
}

#[derive(Clone)]
enum Node<T: Float> {
    Constant(T),
    Tracked { tape: Rc<RefCell<Tape<T>>>, idx: usize },
}

impl<T: Float> Var<T> {
    /// Creates an empty tape to record variables on.
    pub fn tape() -> Rc<RefCell<Tape<T>>> {
        Rc::new(RefCell::new(Tape::new()))
    }

    /// Records an input variable on `tape`.
    pub fn variable_on(tape: Rc<RefCell<Tape<T>>>, value: T) -> Self {
        let idx = tape.borrow_mut().push_value(value);
        Self {
            node: Node::Tracked { tape, idx },
        }
    }

    /// A constant that lives on no tape.
    pub fn constant(value: T) -> Self {
        Self {
            node: Node::Constant(value),
        }
    }

    /// Whether this value is recorded on a tape.
    pub fn is_tracked(&self) -> bool {
        matches!(self.node, Node::Tracked { .. })
    }

    /// The primal value.
    pub fn value(&self) -> T {
        match &self.node {
            Node::Constant(v) => *v,
            Node::Tracked { tape, idx } => tape.borrow().vals[*idx],
        }
    }

    /// The adjoint accumulated by the last [`backward`](Self::backward)
    /// pass on this variable's tape. Constants always report zero.
    pub fn grad(&self) -> T {
        match &self.node {
            Node::Constant(_) => T::zero(),
            Node::Tracked { tape, idx } => tape.borrow().grads[*idx],
        }
    }

    /// Propagates adjoints from this node back to every node recorded
    /// before it. A no-op on constants.
    pub fn backward(&self) {
        if let Node::Tracked { tape, idx } = &self.node {
            tape.borrow_mut().backward_from(*idx)
        }
    }

    /// Computes the reciprocal `1/self`.
    pub fn recip(self) -> Self {
        unary(self, OpKind::Recip, |a| T::one() / a)
    }

    /// Computes `e^self`.
    pub fn exp(self) -> Self {
        unary(self, OpKind::Exp, |a| a.exp())
    }

    /// Computes `sin(self)`.
    pub fn sin(self) -> Self {
        unary(self, OpKind::Sin, |a| a.sin())
    }

    /// Computes `cos(self)`.
    pub fn cos(self) -> Self {
        unary(self, OpKind::Cos, |a| a.cos())
    }

    /// Computes `ln(self)`.
    pub fn ln(self) -> Self {
        unary(self, OpKind::Ln, |a| a.ln())
    }

    /// Computes `sqrt(self)`.
    pub fn sqrt(self) -> Self {
        unary(self, OpKind::Sqrt, |a| a.sqrt())
    }
}

impl<T: Float + fmt::Debug> fmt::Debug for Var<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Node::Constant(v) => f.debug_tuple("Var::Constant").field(v).finish(),
            Node::Tracked { idx, .. } => f
                .debug_struct("Var")
                .field("idx", idx)
                .field("value", &self.value())
                .finish(),
        }
    }
}

/// Vars compare by value, regardless of which tape (if any) they are on.
impl<T: Float> PartialEq for Var<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

/// The computation tape that records operations for reverse-mode AD.
pub struct Tape<T: Float> {
    vals: Vec<T>,
    grads: Vec<T>,
    ops: Vec<Op>,
}

impl<T: Float> Tape<T> {
    fn new() -> Self {
        Self {
            vals: Vec::new(),
            grads: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// Number of nodes recorded so far.
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    fn push_value(&mut self, v: T) -> usize {
        let idx = self.vals.len();
        self.vals.push(v);
        self.grads.push(T::zero());
        idx
    }

    fn push_op(&mut self, op: Op) {
        self.ops.push(op)
    }

    fn backward_from(&mut self, out: usize) {
        for g in &mut self.grads {
            *g = T::zero();
        }
        self.grads[out] = T::one();

        for op in self.ops.iter().rev() {
            let go = self.grads[op.out];
            if go.is_zero() {
                // Nothing flows back through a node off the output's path.
                continue;
            }

            match op.kind {
                OpKind::Add => {
                    self.grads[op.a] = self.grads[op.a] + go;
                    self.grads[op.b] = self.grads[op.b] + go;
                }
                OpKind::Sub => {
                    self.grads[op.a] = self.grads[op.a] + go;
                    self.grads[op.b] = self.grads[op.b] - go;
                }
                OpKind::Mul => {
                    let a = self.vals[op.a];
                    let b = self.vals[op.b];
                    self.grads[op.a] = self.grads[op.a] + go * b;
                    self.grads[op.b] = self.grads[op.b] + go * a;
                }
                OpKind::Div => {
                    let a = self.vals[op.a];
                    let b = self.vals[op.b];
                    self.grads[op.a] = self.grads[op.a] + go / b;
                    self.grads[op.b] = self.grads[op.b] + go * (-(a) / (b * b));
                }
                OpKind::Neg => {
                    self.grads[op.a] = self.grads[op.a] - go;
                }
                OpKind::Recip => {
                    let a = self.vals[op.a];
                    self.grads[op.a] = self.grads[op.a] + go * (-(T::one()) / (a * a));
                }
                OpKind::Exp => {
                    let out = self.vals[op.out];
                    self.grads[op.a] = self.grads[op.a] + go * out;
                }
                OpKind::Sin => {
                    let a = self.vals[op.a];
                    self.grads[op.a] = self.grads[op.a] + go * a.cos();
                }
                OpKind::Cos => {
                    let a = self.vals[op.a];
                    self.grads[op.a] = self.grads[op.a] - go * a.sin();
                }
                OpKind::Ln => {
                    let a = self.vals[op.a];
                    self.grads[op.a] = self.grads[op.a] + go / a;
                }
                OpKind::Sqrt => {
                    let out = self.vals[op.out];
                    self.grads[op.a] = self.grads[op.a] + go / (out + out);
                }
            }
        }
    }
}

struct Op {
    kind: OpKind,
    out: usize,
    a: usize,
    b: usize,
}

#[derive(Clone, Copy)]
enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Recip,
    Exp,
    Sin,
    Cos,
    Ln,
    Sqrt,
}

fn unary<T: Float>(x: Var<T>, kind: OpKind, f: impl FnOnce(T) -> T) -> Var<T> {
    let (tape, a) = match x.node {
        Node::Constant(v) => return Var::constant(f(v)),
        Node::Tracked { tape, idx } => (tape, idx),
    };

    let out = {
        let mut t = tape.borrow_mut();
        let outv = f(t.vals[a]);
        let out = t.push_value(outv);
        t.push_op(Op { kind, out, a, b: 0 });
        out
    };

    Var {
        node: Node::Tracked { tape, idx: out },
    }
}

fn binary<T: Float>(lhs: Var<T>, rhs: Var<T>, kind: OpKind, f: impl FnOnce(T, T) -> T) -> Var<T> {
    let (tape, a, b) = match (lhs.node, rhs.node) {
        (Node::Constant(a), Node::Constant(b)) => return Var::constant(f(a, b)),
        (Node::Tracked { tape, idx }, Node::Constant(b)) => {
            let b = tape.borrow_mut().push_value(b);
            (tape, idx, b)
        }
        (Node::Constant(a), Node::Tracked { tape, idx }) => {
            let a = tape.borrow_mut().push_value(a);
            (tape, a, idx)
        }
        (Node::Tracked { tape, idx: a }, Node::Tracked { tape: other, idx: b }) => {
            assert!(Rc::ptr_eq(&tape, &other), "Vars must share a tape");
            (tape, a, b)
        }
    };

    let out = {
        let mut t = tape.borrow_mut();
        let outv = f(t.vals[a], t.vals[b]);
        let out = t.push_value(outv);
        t.push_op(Op { kind, out, a, b });
        out
    };

    Var {
        node: Node::Tracked { tape, idx: out },
    }
}

impl<T: Float> Add for Var<T> {
    type Output = Var<T>;
    fn add(self, rhs: Self) -> Self::Output {
        binary(self, rhs, OpKind::Add, |a, b| a + b)
    }
}

impl<T: Float> Sub for Var<T> {
    type Output = Var<T>;
    fn sub(self, rhs: Self) -> Self::Output {
        binary(self, rhs, OpKind::Sub, |a, b| a - b)
    }
}

impl<T: Float> Mul for Var<T> {
    type Output = Var<T>;
    fn mul(self, rhs: Self) -> Self::Output {
        binary(self, rhs, OpKind::Mul, |a, b| a * b)
    }
}

impl<T: Float> Div for Var<T> {
    type Output = Var<T>;
    fn div(self, rhs: Self) -> Self::Output {
        binary(self, rhs, OpKind::Div, |a, b| a / b)
    }
}

impl<T: Float> Neg for Var<T> {
    type Output = Var<T>;
    fn neg(self) -> Self::Output {
        unary(self, OpKind::Neg, |a| -a)
    }
}

impl<T: Float> Add<T> for Var<T> {
    type Output = Var<T>;
    fn add(self, c: T) -> Self::Output {
        self + Var::constant(c)
    }
}

impl<T: Float> Sub<T> for Var<T> {
    type Output = Var<T>;
    fn sub(self, c: T) -> Self::Output {
        self - Var::constant(c)
    }
}

impl<T: Float> Mul<T> for Var<T> {
    type Output = Var<T>;
    fn mul(self, c: T) -> Self::Output {
        self * Var::constant(c)
    }
}

impl<T: Float> Div<T> for Var<T> {
    type Output = Var<T>;
    fn div(self, c: T) -> Self::Output {
        self / Var::constant(c)
    }
}

impl<T: Float> Zero for Var<T> {
    fn zero() -> Self {
        Var::constant(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.value().is_zero()
    }
}

impl<T: Float> One for Var<T> {
    fn one() -> Self {
        Var::constant(T::one())
    }
}

impl<T: Float + fmt::Debug> Scalar for Var<T> {
    fn from_f64(v: f64) -> Self {
        Var::constant(<T as NumCast>::from(v).unwrap_or_else(T::nan))
    }

    fn primal(&self) -> f64 {
        self.value().to_f64().unwrap_or(f64::NAN)
    }

    fn sqrt(self) -> Self {
        Var::sqrt(self)
    }

    fn exp(self) -> Self {
        Var::exp(self)
    }

    fn ln(self) -> Self {
        Var::ln(self)
    }

    fn sin(self) -> Self {
        Var::sin(self)
    }

    fn cos(self) -> Self {
        Var::cos(self)
    }
}

/// Computes the value and derivative of a function using reverse-mode
/// AD.
///
/// The function `f` is evaluated at `x`, and both the value and
/// derivative are returned.
///
/// # Examples
///
/// ```
/// use rev_tape::reverse_diff;
///
/// // f(x) = x² at x = 3
/// let (val, deriv) = reverse_diff(|x| x.clone() * x, 3.0);
/// assert_eq!(val, 9.0);    // f(3) = 9
/// assert_eq!(deriv, 6.0);  // f'(3) = 2x = 6
/// ```
pub fn reverse_diff<T, F>(f: F, x: T) -> (T, T)
where
    T: Float,
    F: FnOnce(Var<T>) -> Var<T>,
{
    let tape = Var::<T>::tape();
    let var = Var::variable_on(tape, x);
    let var_clone = var.clone();
    let result = f(var);
    result.backward();
    (result.value(), var_clone.grad())
}

/// Computes the value and gradient of a multivariable function using
/// reverse-mode AD.
///
/// # Examples
///
/// ```
/// use rev_tape::{reverse_gradient, Var};
///
/// // f(x, y) = x² + x*y at (3, 4)
/// let f = |[x, y]: [Var<f64>; 2]| x.clone() * x.clone() + x * y;
///
/// let (val, grad) = reverse_gradient(f, [3.0, 4.0]);
/// assert_eq!(val, 21.0);       // f(3, 4) = 9 + 12 = 21
/// assert_eq!(grad[0], 10.0);   // ∂f/∂x = 2x + y = 10
/// assert_eq!(grad[1], 3.0);    // ∂f/∂y = x = 3
/// ```
pub fn reverse_gradient<T, F, const N: usize>(f: F, point: [T; N]) -> (T, [T; N])
where
    T: Float,
    F: FnOnce([Var<T>; N]) -> Var<T>,
{
    let tape = Var::<T>::tape();
    let vars: [Var<T>; N] = std::array::from_fn(|i| Var::variable_on(tape.clone(), point[i]));
    let vars_clone = vars.clone();
    let result = f(vars);
    result.backward();
    (
        result.value(),
        std::array::from_fn(|i| vars_clone[i].grad()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fvar_core::Fvar;

    #[test]
    fn constants_stay_off_tape() {
        let c = Var::constant(3.0) + Var::constant(4.0);
        assert!(!c.is_tracked());
        assert_eq!(c.value(), 7.0);
        assert_eq!(c.grad(), 0.0);
        c.backward();
    }

    #[test]
    fn constant_joins_tracked_operand_tape() {
        let tape = Var::<f64>::tape();
        let x = Var::variable_on(tape.clone(), 2.0);
        let y = Var::constant(5.0) * x.clone();

        assert!(y.is_tracked());
        assert_eq!(tape.borrow().len(), 3); // x, the lifted 5, the product

        y.backward();
        assert_eq!(y.value(), 10.0);
        assert_eq!(x.grad(), 5.0);
    }

    #[test]
    fn nodes_off_the_output_path_get_no_gradient() {
        let tape = Var::<f64>::tape();
        let x = Var::variable_on(tape.clone(), 3.0);
        let y = Var::variable_on(tape, 4.0);
        let unused = y.clone().exp() * y.clone();
        let f = x.clone() * x.clone();

        f.backward();
        assert_eq!(x.grad(), 6.0);
        assert_eq!(y.grad(), 0.0);
        assert_eq!(unused.grad(), 0.0);

        unused.backward();
        assert_eq!(x.grad(), 0.0);
        assert_abs_diff_eq!(y.grad(), 5.0 * 4.0_f64.exp(), epsilon = 1e-9);
    }

    #[test]
    fn division_and_negation_backprop() {
        // f(x, y) = -x / y at (6, 2): ∂f/∂x = -1/y, ∂f/∂y = x/y²
        let (val, grad) = reverse_gradient(|[x, y]: [Var<f64>; 2]| -x / y, [6.0, 2.0]);
        assert_eq!(val, -3.0);
        assert_eq!(grad[0], -0.5);
        assert_eq!(grad[1], 1.5);
    }

    #[test]
    fn transcendental_backprop() {
        // f(x) = sin(x)·e^x + ln(x) + √x at x = 1
        let f = |x: Var<f64>| x.clone().sin() * x.clone().exp() + x.clone().ln() + x.sqrt();
        let (val, deriv) = reverse_diff(f, 1.0);

        let e = 1.0_f64.exp();
        let (s, c) = (1.0_f64.sin(), 1.0_f64.cos());
        assert_abs_diff_eq!(val, s * e + 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(deriv, (c + s) * e + 1.0 + 0.5, epsilon = 1e-12);
    }

    #[test]
    fn recip_and_cos_backprop() {
        let (val, deriv) = reverse_diff(|x: Var<f64>| x.clone().recip() + x.cos(), 2.0);
        assert_abs_diff_eq!(val, 0.5 + 2.0_f64.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(deriv, -0.25 - 2.0_f64.sin(), epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "Vars must share a tape")]
    fn vars_on_different_tapes_panic() {
        let a = Var::variable_on(Var::<f64>::tape(), 1.0);
        let b = Var::variable_on(Var::<f64>::tape(), 2.0);
        let _ = a + b;
    }

    #[test]
    fn scalar_identities_are_constants() {
        let z = <Var<f64> as Zero>::zero();
        let o = <Var<f64> as One>::one();
        let h = <Var<f64> as Scalar>::from_f64(0.5);

        assert!(z.is_zero());
        assert!(!z.is_tracked() && !o.is_tracked() && !h.is_tracked());
        assert_eq!(o.value(), 1.0);
        assert_eq!(h.primal(), 0.5);
    }

    #[test]
    fn forward_over_reverse_gives_second_derivative() {
        // f(x) = x³ at x = 2: the tangent is f'(x) = 3x² = 12, and
        // backpropagating the tangent yields f''(x) = 6x = 12.
        let tape = Var::<f64>::tape();
        let x = Var::variable_on(tape, 2.0);
        let fx = Fvar::new(x.clone(), Var::one());

        let y = fx.clone() * fx.clone() * fx;
        assert_eq!(y.value.value(), 8.0);
        assert_eq!(y.deriv.value(), 12.0);

        y.deriv.backward();
        assert_eq!(x.grad(), 12.0);

        y.value.backward();
        assert_eq!(x.grad(), 12.0); // f'(2) = 3·4
    }
}
