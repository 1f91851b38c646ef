use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum StoryServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for StoryServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => StoryServiceError::Invalid(msg),
            AppError::NotFound(msg) => StoryServiceError::NotFound(msg),
            _ => StoryServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<StoryServiceError> for AppError {
    fn from(err: StoryServiceError) -> Self {
        match err {
            StoryServiceError::Invalid(msg) => AppError::BadRequest(msg),
            StoryServiceError::NotFound(msg) => AppError::NotFound(msg),
            StoryServiceError::Dependency(msg) => AppError::Internal(msg),
            StoryServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
