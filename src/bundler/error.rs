//! Error types for Info.plist assembly and asset verification.
//!
//! Provides contextual error chaining, filesystem errors that carry the
//! offending path, and the pipeline-specific failures (missing template keys,
//! missing executables, malformed documents, asset compiler failures).
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_infoplist::bundler::{Context, ErrorExt, Result};
//! use std::path::Path;
//!
//! fn read_template(path: &Path) -> Result<Vec<u8>> {
//!     let bytes = std::fs::read(path).fs_context("reading template", path)?;
//!     if bytes.is_empty() {
//!         kodegen_bundler_infoplist::bail!("template {} is empty", path.display());
//!     }
//!     Ok(bytes)
//! }
//! ```

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned by the Info.plist pipeline.
///
/// Every fatal variant names the file or key that caused it, so the message
/// alone is enough to fix the project layout.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system failure naming the path.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "reading template")
        context: &'static str,
        /// Offending path
        path: PathBuf,
        /// Source error
        error: io::Error,
    },

    /// Child process could not be spawned.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// A required command line tool is not on `PATH`.
    #[error("{tool} not found in PATH: {hint}")]
    ToolNotFound {
        /// Tool name (e.g. `xcrun`)
        tool: String,
        /// How to make the tool available
        hint: String,
    },

    /// A template exists but lacks a mandatory key.
    #[error(
        "{key} key was not found in plist file {path}. \
         Please check the file and make sure the {key} key exists"
    )]
    MissingKey {
        /// The missing key
        key: String,
        /// Template that was read
        path: PathBuf,
    },

    /// The executable named by the resolved `CFBundleExecutable` does not exist.
    #[error(
        "The executable {path} doesn't exist.\n\
         Please check that the value of {key} in {template} matches the executable name{}",
        describe_suggestion(.suggestion)
    )]
    MissingExecutable {
        /// Expected executable path
        path: PathBuf,
        /// Template the executable name was read from
        template: PathBuf,
        /// Template key holding the executable name
        key: String,
        /// Name of a file that does exist in the executable directory
        suggestion: Option<String>,
    },

    /// The executable exists but lacks execute permission.
    #[error("The file {path} is not executable")]
    NotExecutable {
        /// Path of the file
        path: PathBuf,
    },

    /// A property list document or partial fragment could not be parsed.
    #[error("failed to parse property list {path}: {reason}")]
    Parse {
        /// Document path
        path: PathBuf,
        /// Parser diagnostic
        reason: String,
    },

    /// The asset catalog compiler exited unsuccessfully.
    #[error("asset catalog verification failed for {catalog} (exit code {}): {stderr}", describe_exit(.exit_code))]
    Verification {
        /// Catalog passed to the compiler
        catalog: PathBuf,
        /// Exit code, `None` when terminated by a signal
        exit_code: Option<i32>,
        /// Captured diagnostic output
        stderr: String,
    },

    /// The assets directory next to a template does not exist.
    #[error("Error: invalid assets path {path}")]
    MissingAssets {
        /// Directory that was expected
        path: PathBuf,
    },

    /// I/O failure without a known path.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking directory (catalog discovery, fragment discovery).
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Staged asset outside its assets directory.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Property list serialization error.
    #[error("{0}")]
    Plist(#[from] plist::Error),

    /// Free-form message, produced by [`bail!`](crate::bail).
    #[error("{0}")]
    GenericError(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

fn describe_suggestion(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean \"{name}\"?)"),
        None => String::new(),
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Attaches a message to a failure, the way `anyhow::Context` does.
///
/// On `Option`, `None` becomes an [`Error::GenericError`] carrying the message.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Tags an I/O failure with the operation and the path involved.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// `context` reads as a present participle: "reading template",
    /// "creating directory".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

impl Error {
    /// Unwraps [`Error::Context`] layers and returns the innermost error.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context(_, inner) => inner.root(),
            other => other,
        }
    }
}

/// Returns early with a formatted `bundler::Error::GenericError`.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
