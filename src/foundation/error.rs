pub type BoardResult<T> = Result<T, BoardError>;

#[derive(thiserror::Error, Debug)]
pub enum BoardError {
    #[error("invalid anchor: {0}")]
    InvalidAnchor(String),

    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error("empty axis: {0}")]
    EmptyAxis(String),

    #[error("invalid weight: {0}")]
    InvalidWeight(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("departure source error: {0}")]
    Source(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoardError {
    pub fn invalid_anchor(msg: impl Into<String>) -> Self {
        Self::InvalidAnchor(msg.into())
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    pub fn empty_axis(msg: impl Into<String>) -> Self {
        Self::EmptyAxis(msg.into())
    }

    pub fn invalid_weight(msg: impl Into<String>) -> Self {
        Self::InvalidWeight(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for the errors raised by an inconsistent layout (bad anchor, index, axis or weight).
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            Self::InvalidAnchor(_) | Self::OutOfRange(_) | Self::EmptyAxis(_) | Self::InvalidWeight(_)
        )
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
