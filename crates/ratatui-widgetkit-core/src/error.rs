use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Rejected widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("page size options must not be empty")]
    EmptyPageSizeOptions,

    #[error("page size option must be at least 1")]
    ZeroPageSizeOption,

    #[error("page size {page_size} is not one of the offered options {options:?}")]
    PageSizeNotOffered {
        page_size: usize,
        options: Vec<usize>,
    },

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<PaginationError> for ConfigError {
    fn from(err: PaginationError) -> Self {
        match err {
            PaginationError::ZeroPageSize => ConfigError::ZeroPageSize,
        }
    }
}
