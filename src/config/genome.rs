use super::traits::ConfigSection;
use crate::error::GepError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenomeConfig {
    /// Linking function given to genomes built from this config
    pub link_func: String,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            link_func: "+".to_string(),
        }
    }
}

impl ConfigSection for GenomeConfig {
    fn section_name() -> &'static str {
        "genome"
    }

    fn validate(&self) -> Result<(), GepError> {
        if self.link_func.trim().is_empty() {
            return Err(GepError::Configuration(
                "Linking function must not be empty".to_string(),
            ));
        }
        // '|' and '.' are the Karva separators
        if self.link_func.contains(['|', '.']) {
            return Err(GepError::Configuration(format!(
                "Linking function '{}' must not contain '|' or '.'",
                self.link_func
            )));
        }
        Ok(())
    }
}
