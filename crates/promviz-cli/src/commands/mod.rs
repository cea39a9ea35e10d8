pub mod add_label;
pub mod check;
pub mod cst;
pub mod modify;
pub mod parse;
pub mod query_loader;
pub mod render;

#[cfg(test)]
mod modify_tests;

/// Errors reported by a command before exiting with status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("query is required: use a positional file, `-` for stdin, or -q/--query")]
    MissingQuery,

    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(std::io::Error),

    #[error("invalid JSON in '{path}': {source}")]
    InvalidJson {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to write JSON: {0}")]
    Output(#[from] serde_json::Error),

    #[error("{action} requires --{option}")]
    MissingOption {
        action: &'static str,
        option: &'static str,
    },

    #[error("query has {0} problem(s)")]
    Invalid(usize),

    #[error(transparent)]
    Query(#[from] promviz_lib::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
