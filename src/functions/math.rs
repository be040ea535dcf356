use crate::functions::traits::{MathFunction, Primitive};

// Arithmetic follows IEEE-754: division by zero yields +/-inf or NaN.

pub struct Add;
impl Primitive for Add {
    fn symbol(&self) -> &'static str { "+" }
    fn arity(&self) -> usize { 2 }
}
impl MathFunction for Add {
    fn float64_function(&self, a: f64, b: f64, _c: f64, _d: f64) -> f64 {
        a + b
    }
}

pub struct Sub;
impl Primitive for Sub {
    fn symbol(&self) -> &'static str { "-" }
    fn arity(&self) -> usize { 2 }
}
impl MathFunction for Sub {
    fn float64_function(&self, a: f64, b: f64, _c: f64, _d: f64) -> f64 {
        a - b
    }
}

pub struct Mul;
impl Primitive for Mul {
    fn symbol(&self) -> &'static str { "*" }
    fn arity(&self) -> usize { 2 }
}
impl MathFunction for Mul {
    fn float64_function(&self, a: f64, b: f64, _c: f64, _d: f64) -> f64 {
        a * b
    }
}

pub struct Div;
impl Primitive for Div {
    fn symbol(&self) -> &'static str { "/" }
    fn arity(&self) -> usize { 2 }
}
impl MathFunction for Div {
    fn float64_function(&self, a: f64, b: f64, _c: f64, _d: f64) -> f64 {
        a / b
    }
}

pub struct Min;
impl Primitive for Min {
    fn symbol(&self) -> &'static str { "Min" }
    fn arity(&self) -> usize { 2 }
}
impl MathFunction for Min {
    fn float64_function(&self, a: f64, b: f64, _c: f64, _d: f64) -> f64 {
        a.min(b)
    }
}

pub struct Max;
impl Primitive for Max {
    fn symbol(&self) -> &'static str { "Max" }
    fn arity(&self) -> usize { 2 }
}
impl MathFunction for Max {
    fn float64_function(&self, a: f64, b: f64, _c: f64, _d: f64) -> f64 {
        a.max(b)
    }
}

pub struct Neg;
impl Primitive for Neg {
    fn symbol(&self) -> &'static str { "Neg" }
    fn arity(&self) -> usize { 1 }
}
impl MathFunction for Neg {
    fn float64_function(&self, a: f64, _b: f64, _c: f64, _d: f64) -> f64 {
        -a
    }
}

pub struct Abs;
impl Primitive for Abs {
    fn symbol(&self) -> &'static str { "Abs" }
    fn arity(&self) -> usize { 1 }
}
impl MathFunction for Abs {
    fn float64_function(&self, a: f64, _b: f64, _c: f64, _d: f64) -> f64 {
        a.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        assert_eq!(Add.float64_function(2.0, 3.0, 0.0, 0.0), 5.0);
        assert_eq!(Sub.float64_function(2.0, 3.0, 0.0, 0.0), -1.0);
        assert_eq!(Mul.float64_function(2.0, 3.0, 0.0, 0.0), 6.0);
        assert_eq!(Div.float64_function(3.0, 2.0, 0.0, 0.0), 1.5);
    }

    #[test]
    fn test_division_by_zero_is_not_protected() {
        assert!(Div.float64_function(1.0, 0.0, 0.0, 0.0).is_infinite());
        assert!(Div.float64_function(0.0, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_unary_and_extrema() {
        assert_eq!(Neg.float64_function(4.0, 9.0, 0.0, 0.0), -4.0);
        assert_eq!(Abs.float64_function(-4.0, 9.0, 0.0, 0.0), 4.0);
        assert_eq!(Min.float64_function(4.0, 9.0, 0.0, 0.0), 4.0);
        assert_eq!(Max.float64_function(4.0, 9.0, 0.0, 0.0), 9.0);
    }
}
