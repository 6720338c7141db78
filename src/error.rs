//! Error types for the command line tool.
//!
//! Wraps pipeline, configuration and argument errors and attaches recovery
//! suggestions that the binary prints after a failure.

use crate::bundler;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for command line operations
pub type Result<T> = std::result::Result<T, InfoPlistError>;

/// Main error type for the command line tool
#[derive(Error, Debug)]
pub enum InfoPlistError {
    /// Pipeline errors
    #[error("Info.plist error: {0}")]
    Bundler(#[from] bundler::Error),

    /// Configuration file errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file given with `--config` does not exist
    #[error("Config file not found: {path}")]
    NotFound {
        /// Path that was given
        path: PathBuf,
    },

    /// The file is not valid TOML or has unknown fields
    #[error("Invalid config file {path}: {source}")]
    Invalid {
        /// Config file path
        path: PathBuf,
        /// Parser error
        source: toml::de::Error,
    },
}

/// Command line errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl InfoPlistError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            InfoPlistError::Bundler(e) => bundler_suggestions(e.root()),
            InfoPlistError::Config(ConfigError::NotFound { path }) => vec![format!(
                "Create {} or drop the --config flag",
                path.display()
            )],
            InfoPlistError::Cli(CliError::MissingArgument { argument }) => vec![
                format!("Pass --{argument} on the command line"),
                format!("Or set `{}` in the config file", argument.replace('-', "_")),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

fn bundler_suggestions(error: &bundler::Error) -> Vec<String> {
    use bundler::Error as E;

    match error {
        E::MissingKey { key, path } => vec![
            format!("Add a {key} entry to {}", path.display()),
            "Or delete the template to regenerate the defaults".to_string(),
        ],
        E::MissingExecutable {
            key,
            template,
            suggestion: Some(name),
            ..
        } => vec![format!("Set {key} in {} to: {name}", template.display())],
        E::MissingExecutable { .. } => vec![
            "Build and link the application before processing Info.plist".to_string(),
        ],
        E::NotExecutable { path } => vec![format!("chmod +x {}", path.display())],
        E::ToolNotFound { .. } => vec![
            "Install Xcode from the App Store".to_string(),
            "Select it with: sudo xcode-select -s /Applications/Xcode.app".to_string(),
        ],
        E::Verification { catalog, .. } => vec![
            format!("Open {} in Xcode and fix the reported issues", catalog.display()),
            "Check that every image referenced by Contents.json exists".to_string(),
        ],
        E::MissingAssets { path } => vec![format!(
            "Create {} (it may be empty) next to Default-Info.plist",
            path.display()
        )],
        _ => vec!["Check the error message above for specific details".to_string()],
    }
}
