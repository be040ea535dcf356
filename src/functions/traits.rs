/// A named symbol usable inside a gene or as a genome's linking function.
pub trait Primitive: Send + Sync {
    /// Symbol as it appears in Karva notation
    fn symbol(&self) -> &'static str;

    /// Number of operands consumed (0..=4)
    fn arity(&self) -> usize;
}

/// Boolean combination behaviour.
///
/// Every function takes four operands regardless of its arity so that
/// gene-internal nodes and genome-level linking share one calling
/// convention. Unused trailing operands are supplied as `false`.
pub trait BoolFunction: Primitive {
    fn bool_function(&self, a: bool, b: bool, c: bool, d: bool) -> bool;
}

/// Floating-point combination behaviour, same 4-ary convention as
/// [`BoolFunction`] with unused operands supplied as `0.0`.
pub trait MathFunction: Primitive {
    fn float64_function(&self, a: f64, b: f64, c: f64, d: f64) -> f64;
}
