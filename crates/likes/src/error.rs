use thiserror::Error;

pub type LikeResult<T> = Result<T, LikeError>;

#[derive(Error, Debug)]
pub enum LikeError {
    /// Remove was called for a pair that has no like relation. Terminal,
    /// not retryable; distinct from a storage failure.
    #[error("Like not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
