//! External process execution.
//!
//! Every external tool (`xcrun`, `actool`, `xcodebuild`, `sw_vers`) is run to
//! completion and reported as a [`ProcessOutput`]. The exit code is the only
//! success signal; there is no retry and no timeout.

use crate::bundler::error::{Error, Result};
use std::future::Future;

/// Captured result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output (lossy UTF-8)
    pub stdout: String,
    /// Captured standard error (lossy UTF-8)
    pub stderr: String,
}

impl ProcessOutput {
    /// Returns `true` for a zero exit code.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs `program` with `args` and captures its output.
///
/// Only a failure to spawn is an error here; callers decide what a non-zero
/// exit code means.
pub async fn run<S: AsRef<str>>(program: &str, args: &[S]) -> Result<ProcessOutput> {
    let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
    log::debug!("Running {} {}", program, args.join(" "));

    let output = tokio::process::Command::new(program)
        .args(&args)
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: program.to_string(),
            error,
        })?;

    Ok(ProcessOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// The asset catalog compiler.
///
/// Receives the full argument list of one invocation (see
/// [`AssetCatalogRequest::compiler_args`](crate::bundler::AssetCatalogRequest::compiler_args))
/// and reports how the process ended.
pub trait AssetCompiler {
    /// Runs one compilation.
    fn compile(&self, args: &[String]) -> impl Future<Output = Result<ProcessOutput>> + Send;
}

/// `actool` resolved through `xcrun` for a given SDK.
#[derive(Debug, Clone)]
pub struct Actool {
    sdk: String,
}

impl Actool {
    /// Creates a compiler bound to `sdk` (e.g. `iphoneos`).
    pub fn new(sdk: impl Into<String>) -> Self {
        Self { sdk: sdk.into() }
    }
}

impl AssetCompiler for Actool {
    async fn compile(&self, args: &[String]) -> Result<ProcessOutput> {
        let mut full = vec!["--sdk".to_string(), self.sdk.clone(), "actool".to_string()];
        full.extend_from_slice(args);
        let output = run("xcrun", &full).await?;
        if !output.stdout.trim().is_empty() {
            log::debug!("actool: {}", output.stdout.trim());
        }
        Ok(output)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_exit_code_and_output() {
        let output = run("sh", &["-c", "echo out; echo err >&2; exit 3"])
            .await
            .unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[tokio::test]
    async fn test_run_missing_program_is_command_failed() {
        let err = run::<&str>("definitely-not-a-real-tool-xyz", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
