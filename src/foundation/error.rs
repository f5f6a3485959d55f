/// Crate-wide result alias.
pub type DocvizResult<T> = Result<T, DocvizError>;

/// Error taxonomy for diagram generation.
///
/// Filesystem and encoder failures propagate unchanged; there is no local
/// recovery because every output is independent and idempotent.
#[derive(thiserror::Error, Debug)]
pub enum DocvizError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocvizError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            DocvizError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(DocvizError::render("x").to_string().contains("render error:"));
    }

    #[test]
    fn io_preserves_source() {
        let base = std::io::Error::other("disk full");
        let err = DocvizError::from(base);
        assert!(err.to_string().contains("disk full"));
    }
}
