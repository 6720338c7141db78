//! TOML configuration file and its merge with command line flags.
//!
//! ```toml
//! target = "ios"
//! app_name = "Demo"
//! main_class = "com/example/Main"
//! source_dir = "src"
//! build_root = "target/ios"
//! ```
//!
//! Relative paths in the file are resolved against the file's directory;
//! relative paths on the command line against the working directory.

use super::Args;
use crate::bundler::{Platform, ResourceRoot, Sdk, Settings, SettingsBuilder};
use crate::error::{CliError, ConfigError, Result};
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Values accepted in the configuration file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Target platform
    pub target: Option<String>,
    /// Application name
    pub app_name: Option<String>,
    /// Main entry point
    pub main_class: Option<String>,
    /// SDK to probe
    pub sdk: Option<String>,
    /// User sources
    pub source_dir: Option<PathBuf>,
    /// Generated sources
    pub gen_dir: Option<PathBuf>,
    /// Directory containing the bundle
    pub app_dir: Option<PathBuf>,
    /// Scratch directory
    pub tmp_dir: Option<PathBuf>,
    /// Default root for generated, app and scratch directories
    pub build_root: Option<PathBuf>,
    /// Built-in resources override
    pub resources: Option<PathBuf>,
}

impl FileConfig {
    /// Reads and parses `path`, resolving its relative paths against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|_| ConfigError::NotFound {
            path: path.to_path_buf(),
        })?;
        let mut config: FileConfig = toml::from_str(&text).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for dir in [
            &mut config.source_dir,
            &mut config.gen_dir,
            &mut config.app_dir,
            &mut config.tmp_dir,
            &mut config.build_root,
            &mut config.resources,
        ]
        .into_iter()
        .flatten()
        {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        Ok(config)
    }
}

/// Builds [`Settings`] from flags, falling back to `file` for anything unset.
pub fn resolve_settings(args: &Args, file: FileConfig) -> Result<Settings> {
    let target = required(args.target.clone().or(file.target), "target")?;
    let platform: Platform = target
        .parse()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let mut builder = SettingsBuilder::new()
        .platform(platform)
        .app_name(required(args.app_name.clone().or(file.app_name), "app-name")?)
        .main_class_name(required(
            args.main_class.clone().or(file.main_class),
            "main-class",
        )?)
        .source_dir(absolute(&required(
            args.source_dir.clone().or(file.source_dir),
            "source-dir",
        )?)?);

    if let Some(sdk) = args.sdk.clone().or(file.sdk) {
        let sdk: Sdk = sdk
            .parse()
            .map_err(|reason| CliError::InvalidArguments { reason })?;
        builder = builder.sdk(sdk);
    }
    if let Some(dir) = args.gen_dir.clone().or(file.gen_dir) {
        builder = builder.gen_dir(absolute(&dir)?);
    }
    if let Some(dir) = args.app_dir.clone().or(file.app_dir) {
        builder = builder.app_dir(absolute(&dir)?);
    }
    if let Some(dir) = args.tmp_dir.clone().or(file.tmp_dir) {
        builder = builder.tmp_dir(absolute(&dir)?);
    }
    if let Some(root) = args.build_root.clone().or(file.build_root) {
        builder = builder.build_root(absolute(&root)?);
    }
    if let Some(dir) = args.resources.clone().or(file.resources) {
        builder = builder.resources(ResourceRoot::new(absolute(&dir)?));
    }

    Ok(builder.build()?)
}

fn required<T>(value: Option<T>, argument: &str) -> Result<T> {
    value.ok_or_else(|| {
        CliError::MissingArgument {
            argument: argument.to_string(),
        }
        .into()
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path.absolutize()?.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InfoPlistError;

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("infoplist.toml");
        std::fs::write(
            &config_path,
            "target = \"macos\"\napp_name = \"FromFile\"\nmain_class = \"a/B\"\n\
             source_dir = \"src\"\nbuild_root = \"out\"\n",
        )
        .unwrap();

        let file = FileConfig::load(&config_path).unwrap();
        assert_eq!(file.source_dir, Some(dir.path().join("src")));

        let args = Args {
            target: Some("ios".into()),
            app_name: Some("FromFlag".into()),
            ..Default::default()
        };
        let settings = resolve_settings(&args, file).unwrap();
        assert_eq!(settings.platform(), Platform::Ios);
        assert_eq!(settings.app_name(), "FromFlag");
        assert_eq!(settings.main_class_name(), "a/B");
        assert_eq!(settings.paths().tmp, dir.path().join("out/tmp"));
    }

    #[test]
    fn test_missing_argument_is_named() {
        let args = Args {
            target: Some("ios".into()),
            ..Default::default()
        };
        let err = resolve_settings(&args, FileConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            InfoPlistError::Cli(CliError::MissingArgument { ref argument }) if argument == "app-name"
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("bad.toml");
        std::fs::write(&config_path, "bundle_id = \"x\"\n").unwrap();
        assert!(matches!(
            FileConfig::load(&config_path).unwrap_err(),
            InfoPlistError::Config(ConfigError::Invalid { .. })
        ));
    }
}
