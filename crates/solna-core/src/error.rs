#![forbid(unsafe_code)]

/// Boxed low-level cause attached to [`Error::CorruptKey`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the Solna keystore reader.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad magic, version or entry tag, malformed length field, truncated buffer.
    #[error("keystore format error: {0}")]
    Format(String),

    /// The keystore checksum did not match the password-seeded digest.
    #[error("keystore checksum mismatch (wrong password or tampered file)")]
    Authentication,

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A recovered private key failed its digest check.
    #[error("key integrity check failed: {0}")]
    Integrity(String),

    #[error("corrupt key: {context}")]
    CorruptKey {
        context: String,
        #[source]
        source: BoxedCause,
    },

    #[error("private key info version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: i64, found: i64 },

    #[error("certificate error: {0}")]
    Certificate(String),

    /// No entry of the requested kind under the given alias.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Authentication,
    UnsupportedAlgorithm,
    Integrity,
    CorruptKey,
    VersionMismatch,
    Certificate,
    KeyNotFound,
    Io,
}

impl Error {
    /// Build a [`Error::CorruptKey`] keeping `source` as the error cause.
    pub fn corrupt_key(context: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::CorruptKey {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format(_) => ErrorKind::Format,
            Self::Authentication => ErrorKind::Authentication,
            Self::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Self::Integrity(_) => ErrorKind::Integrity,
            Self::CorruptKey { .. } => ErrorKind::CorruptKey,
            Self::VersionMismatch { .. } => ErrorKind::VersionMismatch,
            Self::Certificate(_) => ErrorKind::Certificate,
            Self::KeyNotFound(_) => ErrorKind::KeyNotFound,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// True for the failures a wrong store or key password produces.
    ///
    /// Everything else indicates a damaged or unsupported file.
    pub fn is_wrong_password(&self) -> bool {
        matches!(self.kind(), ErrorKind::Authentication | ErrorKind::Integrity)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_corrupt_key_keeps_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad length octet");
        let err = Error::corrupt_key("failed to decode RSA private key", cause);
        assert_eq!(err.kind(), ErrorKind::CorruptKey);
        assert_eq!(err.to_string(), "corrupt key: failed to decode RSA private key");
        let source = err.source().expect("cause attached");
        assert_eq!(source.to_string(), "bad length octet");
    }

    #[test]
    fn test_corrupt_key_wraps_own_error() {
        let err = Error::corrupt_key(
            "cannot unwrap key",
            Error::UnsupportedAlgorithm("1.2.3.4".into()),
        );
        let source = err.source().unwrap();
        assert!(source.to_string().contains("1.2.3.4"));
    }

    #[test]
    fn test_wrong_password_classification() {
        assert!(Error::Authentication.is_wrong_password());
        assert!(Error::Integrity("alias".into()).is_wrong_password());
        assert!(!Error::Format("bad magic".into()).is_wrong_password());
        assert!(!Error::KeyNotFound("server".into()).is_wrong_password());
        assert!(!Error::VersionMismatch {
            expected: 0,
            found: 1
        }
        .is_wrong_password());
    }
}
