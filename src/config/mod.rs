pub mod traits;
pub mod genome;
pub mod mutation;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use genome::GenomeConfig;
pub use mutation::MutationConfig;
pub use traits::ConfigSection;
