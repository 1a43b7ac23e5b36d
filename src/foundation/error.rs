/// Convenience result type used across Cosmatesque.
pub type CosmatesqueResult<T> = Result<T, CosmatesqueError>;

/// Top-level error taxonomy used by the recurrence and rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum CosmatesqueError {
    /// Malformed recurrence parameters (coefficient shape, modulus, preset name).
    #[error("parameter error: {0}")]
    Parameter(String),

    /// Requested grid size cannot be evaluated.
    #[error("size error: {0}")]
    Size(String),

    /// Errors when serializing or deserializing parameter documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CosmatesqueError {
    /// Build a [`CosmatesqueError::Parameter`] value.
    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::Parameter(msg.into())
    }

    /// Build a [`CosmatesqueError::Size`] value.
    pub fn size(msg: impl Into<String>) -> Self {
        Self::Size(msg.into())
    }

    /// Build a [`CosmatesqueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CosmatesqueError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
