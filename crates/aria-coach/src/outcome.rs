use serde::Serialize;

use crate::error::CoachError;

/// Result of a coaching operation.
///
/// Operations never fail outright: on error they yield a canned value together
/// with the reason. Callers that don't care use [`CoachOutcome::into_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum CoachOutcome<T> {
    Success(T),
    Fallback { value: T, error: CoachError },
}

impl<T> CoachOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Success(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Success(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn error(&self) -> Option<&CoachError> {
        match self {
            Self::Success(_) => None,
            Self::Fallback { error, .. } => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CoachOutcome<U> {
        match self {
            Self::Success(value) => CoachOutcome::Success(f(value)),
            Self::Fallback { value, error } => CoachOutcome::Fallback {
                value: f(value),
                error,
            },
        }
    }

    /// Wire shape: `{ "value": .., "fallback": bool, "error": {kind, message}? }`
    pub fn to_response(&self) -> OutcomeResponse<'_, T> {
        OutcomeResponse {
            value: self.value(),
            fallback: self.is_fallback(),
            error: self.error().map(|e| OutcomeError {
                kind: e.kind(),
                message: e.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutcomeResponse<'a, T> {
    pub value: &'a T,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OutcomeError>,
}

#[derive(Debug, Serialize)]
pub struct OutcomeError {
    pub kind: &'static str,
    pub message: String,
}
