//! Error types for the Libris domain core

use thiserror::Error;

/// Main application error type
///
/// Domain variants display their message verbatim so the presentation
/// layer can show them to the user unchanged.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    OutOfStock(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {}.", field),
                })
            })
            .collect();
        AppError::Validation(messages.join(" "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
