pub mod karva;

pub use karva::KarvaGene;

use crate::functions::{BoolFuncMap, MathFuncMap};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// Capabilities a genome needs from each of its genes.
///
/// A genome never looks inside a gene; it only evaluates, counts, mutates,
/// copies and renders it through this trait.
pub trait Gene: Clone + fmt::Display + Send {
    /// Evaluate the gene as a boolean expression.
    fn eval_bool(&self, inputs: &[bool], fm: &BoolFuncMap) -> bool;

    /// Evaluate the gene as a floating-point expression.
    fn eval_math(&self, inputs: &[f64], fm: &MathFuncMap) -> f64;

    /// Per-symbol usage counts, computed on first access.
    ///
    /// Only symbols that take part in evaluation are counted, which is
    /// usually fewer than appear in the Karva string.
    fn symbol_map(&self) -> &HashMap<String, usize>;

    fn symbol_count(&self, sym: &str) -> usize {
        self.symbol_map().get(sym).copied().unwrap_or(0)
    }

    /// Random in-place symbol exchange. The gene must stay well-formed.
    fn mutate<R: Rng>(&mut self, rng: &mut R);

    /// Structurally independent deep copy
    fn dup(&self) -> Self {
        self.clone()
    }
}
