//! Error types for locating, loading and reading environment files

use std::fmt;
use std::path::PathBuf;

/// Stable numeric classification of an [`EnvError`].
///
/// The discriminants are part of the public contract and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    CwdFailure = 1,
    CantAccessFile = 2,
    NoEnvFile = 3,
    CantLoadFile = 4,
    NoSuchVar = 5,
}

impl ErrorCode {
    /// Numeric value of the code.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_u8())
    }
}

/// Errors that can occur while bootstrapping or reading the environment.
///
/// The set is closed: each variant corresponds to exactly one [`ErrorCode`]
/// and carries the context of the failure (path, filename or key).
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// The current working directory could not be determined.
    #[error("can not determine current working directory")]
    CwdFailure {
        /// Underlying I/O error from `std::env::current_dir`
        source: std::io::Error,
    },

    /// Probing a candidate path failed for a reason other than absence.
    ///
    /// Typically a permission error on one of the ancestor directories.
    #[error("error accessing an existing env file '{}'", path.display())]
    CantAccessFile {
        /// Candidate path whose metadata could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file was not found in the starting directory or any ancestor.
    #[error("no {filename} file exists in any of parent directories")]
    NoEnvFile {
        /// Filename that was searched for
        filename: String,
    },

    /// The file was found but the dotenv loader rejected it.
    ///
    /// Malformed content and read failures are not distinguished; the
    /// loader's error is available through [`std::error::Error::source`].
    #[error("can't load {filename} file")]
    CantLoadFile {
        /// Filename as requested by the caller
        filename: String,
        /// Error reported by the dotenv loader
        source: dotenvy::Error,
    },

    /// The requested variable is not set.
    #[error("non-existing ENV variable {key} requested")]
    NoSuchVar {
        /// Name of the missing variable
        key: String,
    },
}

impl EnvError {
    /// Classification of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::CwdFailure { .. } => ErrorCode::CwdFailure,
            Self::CantAccessFile { .. } => ErrorCode::CantAccessFile,
            Self::NoEnvFile { .. } => ErrorCode::NoEnvFile,
            Self::CantLoadFile { .. } => ErrorCode::CantLoadFile,
            Self::NoSuchVar { .. } => ErrorCode::NoSuchVar,
        }
    }

    pub(crate) fn no_env_file(filename: impl Into<String>) -> Self {
        Self::NoEnvFile {
            filename: filename.into(),
        }
    }

    pub(crate) fn no_such_var(key: impl Into<String>) -> Self {
        Self::NoSuchVar { key: key.into() }
    }
}
