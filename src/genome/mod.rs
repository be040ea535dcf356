//! A GEP genome: an ordered set of genes combined by one linking function.
//!
//! Evaluating a genome evaluates gene 0, then folds every following gene
//! into the running result with the linking function, strictly left to
//! right. The linking function need not be commutative or associative, so
//! gene order is part of the program.

pub mod mutation;
pub mod scoring;
pub mod symbols;

pub use scoring::{GenomeSink, ScoringFunc, Undelivered};

use crate::config::GenomeConfig;
use crate::error::{GepError, Result};
use crate::functions::{math_functions, BoolFuncMap, MathFuncMap};
use crate::gene::{Gene, KarvaGene};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct Genome<G: Gene = KarvaGene> {
    pub genes: Vec<G>,
    /// Symbol of the function that links gene results together
    pub link_func: String,
    /// Fitness written by [`Genome::evaluate`]; 0.0 until then
    pub score: f64,

    // Filled once by `symbol_count`, never invalidated.
    symbol_map: OnceLock<HashMap<String, usize>>,
}

impl<G: Gene> Genome<G> {
    /// Create a genome from its genes and linking function.
    ///
    /// The linking function is not looked up here; an unknown symbol only
    /// shows up when the genome is evaluated.
    pub fn new(genes: Vec<G>, link_func: impl Into<String>) -> Result<Self> {
        if genes.is_empty() {
            return Err(GepError::EmptyGenome);
        }
        Ok(Self {
            genes,
            link_func: link_func.into(),
            score: 0.0,
            symbol_map: OnceLock::new(),
        })
    }

    /// Create a genome linked by the configured default linking function
    pub fn with_config(genes: Vec<G>, config: &GenomeConfig) -> Result<Self> {
        Self::new(genes, config.link_func.clone())
    }

    /// Evaluate the genome as a boolean expression.
    ///
    /// An unresolvable linking function is logged and yields `false`, which
    /// callers cannot tell apart from a genuine `false` result.
    pub fn eval_bool(&self, inputs: &[bool], fm: &BoolFuncMap) -> bool {
        self.try_eval_bool(inputs, fm).unwrap_or_else(|e| {
            log::warn!("{}", e);
            false
        })
    }

    /// Evaluate the genome as a floating-point expression using the built-in
    /// numeric functions.
    ///
    /// An unresolvable linking function is logged and yields `0.0`.
    pub fn eval_math(&self, inputs: &[f64]) -> f64 {
        self.eval_math_with(inputs, math_functions())
    }

    /// Same as [`Genome::eval_math`] against a caller-supplied registry
    pub fn eval_math_with(&self, inputs: &[f64], fm: &MathFuncMap) -> f64 {
        self.try_eval_math(inputs, fm).unwrap_or_else(|e| {
            log::warn!("{}", e);
            0.0
        })
    }

    pub(crate) fn try_eval_bool(&self, inputs: &[bool], fm: &BoolFuncMap) -> Result<bool> {
        let link = fm
            .get(&self.link_func)
            .ok_or_else(|| GepError::LinkFunctionNotFound(self.link_func.clone()))?;

        let mut genes = self.genes.iter();
        let first = genes.next().ok_or(GepError::EmptyGenome)?;
        Ok(genes.fold(first.eval_bool(inputs, fm), |result, gene| {
            link.bool_function(result, gene.eval_bool(inputs, fm), false, false)
        }))
    }

    pub(crate) fn try_eval_math(&self, inputs: &[f64], fm: &MathFuncMap) -> Result<f64> {
        let link = fm
            .get(&self.link_func)
            .ok_or_else(|| GepError::LinkFunctionNotFound(self.link_func.clone()))?;

        let mut genes = self.genes.iter();
        let first = genes.next().ok_or(GepError::EmptyGenome)?;
        Ok(genes.fold(first.eval_math(inputs, fm), |result, gene| {
            link.float64_function(result, gene.eval_math(inputs, fm), 0.0, 0.0)
        }))
    }
}

/// Karva representation: gene renderings joined by `|<link_func>|`.
impl<G: Gene> fmt::Display for Genome<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!("|{}|", self.link_func);
        let rendered: Vec<String> = self.genes.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(&separator))
    }
}
