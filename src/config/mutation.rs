use super::traits::ConfigSection;
use crate::error::GepError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Upper bound on exchanges per `mutate` call
pub const MAX_MUTATIONS: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub num_mutations: usize,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            num_mutations: 1,
            seed: None,
        }
    }
}

impl MutationConfig {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<(), GepError> {
        if self.num_mutations > MAX_MUTATIONS {
            return Err(GepError::Configuration(format!(
                "Mutation count must be at most {}",
                MAX_MUTATIONS
            )));
        }
        Ok(())
    }
}
