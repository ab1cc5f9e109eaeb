use thiserror::Error;

/// Requests the store refuses. I/O failures travel as `anyhow::Error`
/// alongside these.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("name required")]
    NameRequired,

    #[error("Title required")]
    TitleRequired,

    #[error("Not found: {0}")]
    NotFound(String),
}
