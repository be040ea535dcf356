//! Evaluation and mutation core of a Gene Expression Programming genome.
//!
//! A [`Genome`] owns an ordered list of [`Gene`]s and folds their results
//! together with a single linking function looked up by symbol in a
//! [`FunctionRegistry`]. Scoring hands the finished genome to a
//! [`GenomeSink`], typically the sending half of a channel read by a
//! population driver.

pub mod config;
pub mod error;
pub mod functions;
pub mod gene;
pub mod genome;

pub use error::{GepError, Result};
pub use functions::{bool_functions, math_functions, BoolFuncMap, FunctionRegistry, MathFuncMap};
pub use gene::{Gene, KarvaGene};
pub use genome::{Genome, GenomeSink, ScoringFunc, Undelivered};
