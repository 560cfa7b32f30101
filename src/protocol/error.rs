//! The runtime call-boundary error and the rules for building it from the
//! library's last-error queries.

use super::enums::{EnumDecodeError, ErrorCode};
use thiserror::Error;

/// Value every native call returns on success.
pub const RESULT_SUCCESS: i32 = 1;

pub const LAST_ERROR_FAILED: &str = "FDwfGetLastError() failed";
pub const LAST_ERROR_MSG_FAILED: &str = "FDwfGetLastErrorMsg() failed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DwfError {
    /// A native call returned something other than [`RESULT_SUCCESS`].
    #[error("native call failed ({}): {message}", code_label(.code))]
    NativeCall {
        code: Option<ErrorCode>,
        message: String,
    },

    #[error("function `{function}` is not available in the loaded library")]
    Unbound { function: String },

    #[error("function `{function}` has signature {found}, not {expected}")]
    SignatureMismatch {
        function: String,
        expected: String,
        found: String,
    },

    #[error("parameter {index} of `{function}` is not a fixed-size buffer")]
    NotABuffer { function: String, index: usize },

    #[error(transparent)]
    Decode(#[from] EnumDecodeError),
}

fn code_label(code: &Option<ErrorCode>) -> &'static str {
    code.map_or("unknown code", ErrorCode::name)
}

impl DwfError {
    /// The error for a failed call whose error code could not be queried.
    #[must_use]
    pub fn last_error_unavailable() -> Self {
        DwfError::NativeCall {
            code: None,
            message: LAST_ERROR_FAILED.to_string(),
        }
    }

    /// The error for a failed call, given the raw code and the message query
    /// outcome (`None` when the message query itself failed).
    ///
    /// The message is never empty: a blank message falls back to the code's
    /// name, and a code outside [`ErrorCode`] is reported as `code: None`
    /// with the raw value in front of the message.
    #[must_use]
    pub fn from_last_error(raw_code: i32, message: Option<String>) -> Self {
        let code = ErrorCode::from_raw(raw_code).ok();
        let message = match message {
            None => LAST_ERROR_MSG_FAILED.to_string(),
            Some(text) if text.trim().is_empty() => match code {
                Some(code) => code.name().to_string(),
                None => "no message".to_string(),
            },
            Some(text) => text.trim_end().to_string(),
        };

        match code {
            Some(code) => DwfError::NativeCall {
                code: Some(code),
                message,
            },
            None => DwfError::NativeCall {
                code: None,
                message: format!("[error code {raw_code}] {message}"),
            },
        }
    }

    /// The native error code, for [`DwfError::NativeCall`].
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            DwfError::NativeCall { code, .. } => *code,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_kept_without_trailing_newline() {
        let error = DwfError::from_last_error(3, Some("Device already opened.\n".to_string()));
        assert_eq!(
            error,
            DwfError::NativeCall {
                code: Some(ErrorCode::AlreadyOpened),
                message: "Device already opened.".to_string(),
            }
        );
        assert_eq!(
            error.to_string(),
            "native call failed (AlreadyOpened): Device already opened."
        );
    }

    #[test]
    fn test_blank_message_falls_back_to_code_name() {
        let error = DwfError::from_last_error(0x10, Some("  \n".to_string()));
        assert_eq!(
            error,
            DwfError::NativeCall {
                code: Some(ErrorCode::InvalidParameter0),
                message: "InvalidParameter0".to_string(),
            }
        );
    }

    #[test]
    fn test_failed_message_query() {
        let error = DwfError::from_last_error(1, None);
        assert_eq!(error.code(), Some(ErrorCode::UnknownError));
        assert_eq!(
            error,
            DwfError::NativeCall {
                code: Some(ErrorCode::UnknownError),
                message: LAST_ERROR_MSG_FAILED.to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_code_prefixes_raw_value() {
        let error = DwfError::from_last_error(99, Some("odd".to_string()));
        assert_eq!(
            error,
            DwfError::NativeCall {
                code: None,
                message: "[error code 99] odd".to_string(),
            }
        );
        assert_eq!(
            error.to_string(),
            "native call failed (unknown code): [error code 99] odd"
        );
    }

    #[test]
    fn test_unavailable_code() {
        assert_eq!(
            DwfError::last_error_unavailable().to_string(),
            "native call failed (unknown code): FDwfGetLastError() failed"
        );
    }
}
