use async_trait::async_trait;

pub mod validation;

pub type PipeResult<T> = Result<T, PipeError>;

/// Failure raised by a [`Pipe`].
///
/// The built-in validation pipe only raises `Validation` (answered 400).
/// `Transformation` and `Internal` belong to the contract for user pipes
/// that reshape input or touch external state; both answer 500.
#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Transformation failed: {0}")]
    Transformation(String),

    #[error("Internal pipe error: {0}")]
    Internal(String),
}

/// The Pipe trait for transformation and validation
///
/// A pipe receives a value extracted from the request, transforms or
/// validates it, and either passes it on to the route handler or rejects
/// the request.
#[async_trait]
pub trait Pipe: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    async fn transform(&self, input: Self::Input) -> PipeResult<Self::Output>;
}
