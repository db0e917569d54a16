//! Error type shared by every stage of the border pipeline.
//!
//! Each variant maps to exactly one stage so the CLI can tell the user where
//! a run stopped: decoding the upload, validating the percentage, or encoding
//! the result.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BorderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {name}: {reason}")]
    Decode { name: String, reason: String },
    #[error("Unsupported file type for {name}: expected one of jpg, jpeg, png")]
    UnsupportedType { name: String },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

impl BorderError {
    /// Name of the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            BorderError::Io(_) => "io",
            BorderError::Decode { .. } | BorderError::UnsupportedType { .. } => "decode",
            BorderError::InvalidParameter(_) => "parameter",
            BorderError::Encode(_) => "encode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_distinct_per_failure_kind() {
        let decode = BorderError::Decode {
            name: "a.png".into(),
            reason: "truncated".into(),
        };
        let unsupported = BorderError::UnsupportedType {
            name: "a.gif".into(),
        };
        assert_eq!(decode.stage(), "decode");
        assert_eq!(unsupported.stage(), "decode");
        assert_eq!(
            BorderError::InvalidParameter("x".into()).stage(),
            "parameter"
        );
        assert_eq!(BorderError::Encode("x".into()).stage(), "encode");
    }

    #[test]
    fn decode_message_names_the_file() {
        let err = BorderError::Decode {
            name: "holiday.jpg".into(),
            reason: "unexpected end of file".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode holiday.jpg: unexpected end of file"
        );
    }
}
