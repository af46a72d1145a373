use thiserror::Error;

/// Errors the dashboard can produce.
///
/// Everything under `EmptyInput`/`InvalidData`/`Io` happens during
/// initialization and is fatal; `UnknownCategory` and `EmptyFilter` are
/// per-update errors scoped to a single panel.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Unknown category for {panel} panel: {category}")]
    UnknownCategory {
        panel: &'static str,
        category: String,
    },

    #[error("No rows matched category {category} in the {panel} panel")]
    EmptyFilter {
        panel: &'static str,
        category: String,
    },

    #[error("Invalid dataset: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
