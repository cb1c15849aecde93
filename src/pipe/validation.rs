use crate::dto::{CrudDto, ValidationGroup};
use crate::options::ValidationMode;
use crate::pipe::{Pipe, PipeResult};
use async_trait::async_trait;
use std::marker::PhantomData;

/// A pipe that runs a DTO's group-scoped validation rules.
///
/// With `ValidationMode::Disabled` the pipe is a pass-through: the body is
/// handed to the service untouched. Disabling is an explicit configuration
/// decision on `CrudOptions`, never an implicit fallback.
pub struct ValidationPipe<T> {
    group: ValidationGroup,
    mode: ValidationMode,
    _marker: PhantomData<T>,
}

impl<T> ValidationPipe<T> {
    pub fn new(group: ValidationGroup, mode: ValidationMode) -> Self {
        Self {
            group,
            mode,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T: CrudDto> Pipe for ValidationPipe<T> {
    type Input = T;
    type Output = T;

    async fn transform(&self, input: T) -> PipeResult<T> {
        if self.mode.is_enabled() {
            input.validate(self.group)?;
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::PipeError;

    struct Rejecting;

    impl CrudDto for Rejecting {
        fn name() -> &'static str {
            "Rejecting"
        }

        fn validate(&self, _group: ValidationGroup) -> Result<(), PipeError> {
            Err(PipeError::Validation("always invalid".to_string()))
        }
    }

    #[tokio::test]
    async fn enabled_pipe_rejects_invalid_input() {
        let pipe = ValidationPipe::<Rejecting>::new(ValidationGroup::Create, ValidationMode::Enabled);
        assert!(pipe.transform(Rejecting).await.is_err());
    }

    #[tokio::test]
    async fn disabled_pipe_passes_everything_through() {
        let pipe =
            ValidationPipe::<Rejecting>::new(ValidationGroup::Create, ValidationMode::Disabled);
        assert!(pipe.transform(Rejecting).await.is_ok());
    }
}
