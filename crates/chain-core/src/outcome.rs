//! Resultado de una etapa.

use std::error::Error;

use crate::errors::StageError;

/// Resultado de un nodo: éxito con valor `T` o fallo con un `StageError`.
///
/// Se produce exactamente una vez por nodo y no cambia después.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Success(T),
    Failure(StageError),
}

impl<T> Outcome<T> {
    /// Convierte el `Result` de un handler falible.
    pub fn from_result<E>(result: Result<T, E>) -> Self
        where E: Error + Send + Sync + 'static
    {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(StageError::new(error)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn error(&self) -> Option<&StageError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Aplica `f` al valor; un fallo pasa sin tocar.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    pub fn into_result(self) -> Result<T, StageError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }

    /// Descarta el error.
    pub fn ok(self) -> Option<T> {
        self.into_result().ok()
    }
}

impl<T> From<Result<T, StageError>> for Outcome<T> {
    fn from(result: Result<T, StageError>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }
}
