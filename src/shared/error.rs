use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// A partial report (some descriptors could not be resolved) is still a
/// success; only failures to read the workspace or write the report are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report produced (possibly partial)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable workspace, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for release report generation.
#[derive(Debug, Error)]
pub enum ReleaseHelperError {
    #[error("pom.xml not found: {path}\n\n💡 Hint: {suggestion}")]
    DescriptorNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse module descriptor: {location}\nDetails: {details}\n\n💡 Hint: Please verify that the pom.xml is well-formed XML")]
    DescriptorParseError { location: String, details: String },

    #[error("Invalid dependency version for {dependency} in {module}: {reason}")]
    InvalidDependencyVersion {
        module: String,
        dependency: String,
        reason: String,
    },

    #[error("Unable to resolve module {coordinates}: {details}")]
    ModuleResolutionError { coordinates: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a directory containing a pom.xml")]
    InvalidProjectPath { path: PathBuf, reason: String },

    /// Validation error for builder patterns and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
