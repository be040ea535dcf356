use thiserror::Error;

#[derive(Error, Debug)]
pub enum GepError {
    #[error("Genome must contain at least one gene")]
    EmptyGenome,

    #[error("Unable to find linking function: {0}")]
    LinkFunctionNotFound(String),

    #[error("Unknown symbol '{symbol}' at position {position}")]
    UnknownSymbol { symbol: String, position: usize },

    #[error("Function '{symbol}' at position {position} lies in the gene tail (head length {head_len})")]
    FunctionInTail {
        symbol: String,
        position: usize,
        head_len: usize,
    },

    #[error("Gene '{0}' ends before its expression is complete")]
    TruncatedGene(String),

    #[error("Result sink disconnected before the scored genome could be delivered")]
    SinkDisconnected,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Config source error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, GepError>;
