//! Configuration for one Info.plist run.
//!
//! [`Settings`] carries the application identity, the target platform and SDK,
//! and the four project directories the pipeline reads from and writes to.
//! Build it with [`SettingsBuilder`], which validates every required field.
//!
//! # Examples
//!
//! ```no_run
//! use kodegen_bundler_infoplist::bundler::{Platform, SettingsBuilder};
//!
//! let settings = SettingsBuilder::new()
//!     .app_name("Demo")
//!     .main_class_name("com/example/Main")
//!     .platform(Platform::Ios)
//!     .source_dir("src")
//!     .build_root("target/ios")
//!     .build()?;
//!
//! assert_eq!(settings.bundle_root(), std::path::Path::new("target/ios/Demo.app"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::bundler::{
    error::{Context, Result},
    info_plist::derive_bundle_identifier,
    platform::{BundleLayout, Platform, PlatformDescriptor, Sdk},
    resources::ResourceRoot,
};
use std::path::{Path, PathBuf};

/// Template file name under the source and generated platform folders.
pub const TEMPLATE_FILE: &str = "Default-Info.plist";

/// Directories the pipeline works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// User sources; the template lives in `<source>/<os>/`
    pub source: PathBuf,
    /// Generated sources; defaults are written to `<generated>/<os>/`
    pub generated: PathBuf,
    /// Directory containing `<app_name>.app`
    pub app: PathBuf,
    /// Scratch area for the XML mirror and partial plists
    pub tmp: PathBuf,
}

impl ProjectPaths {
    /// Fragment scratch directory, reset on every run.
    pub fn partial_plists_dir(&self) -> PathBuf {
        self.tmp.join("partial-plists")
    }
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    app_name: String,
    main_class_name: String,
    platform: Platform,
    sdk: Sdk,
    paths: ProjectPaths,
    resources: ResourceRoot,
}

impl Settings {
    /// Application name; also the default executable name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Main entry point, e.g. `com/example/Main`.
    pub fn main_class_name(&self) -> &str {
        &self.main_class_name
    }

    /// Target platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Descriptor of the target platform.
    pub fn descriptor(&self) -> &'static PlatformDescriptor {
        self.platform.descriptor()
    }

    /// SDK probed for toolchain fields.
    pub fn sdk(&self) -> Sdk {
        self.sdk
    }

    /// Project directories.
    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Built-in resource root.
    pub fn resources(&self) -> &ResourceRoot {
        &self.resources
    }

    /// `<app>/<app_name>.app`
    pub fn bundle_root(&self) -> PathBuf {
        self.paths.app.join(format!("{}.app", self.app_name))
    }

    /// Layout of the bundle being assembled.
    pub fn layout(&self) -> BundleLayout {
        self.descriptor().layout(&self.bundle_root())
    }

    /// `<source>/<os>`
    pub fn source_platform_dir(&self) -> PathBuf {
        self.paths.source.join(self.descriptor().os)
    }

    /// `<generated>/<os>`
    pub fn gen_platform_dir(&self) -> PathBuf {
        self.paths.generated.join(self.descriptor().os)
    }

    /// Template the user maintains, whether or not it exists.
    pub fn user_template(&self) -> PathBuf {
        self.source_platform_dir().join(TEMPLATE_FILE)
    }

    /// Template generated from the built-in defaults, whether or not it exists.
    pub fn generated_template(&self) -> PathBuf {
        self.gen_platform_dir().join(TEMPLATE_FILE)
    }

    /// Existing template, user one first.
    pub fn existing_template(&self) -> Option<PathBuf> {
        [self.user_template(), self.generated_template()]
            .into_iter()
            .find(|p| p.is_file())
    }
}

/// Builder for [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    app_name: Option<String>,
    main_class_name: Option<String>,
    platform: Option<Platform>,
    sdk: Option<Sdk>,
    source_dir: Option<PathBuf>,
    gen_dir: Option<PathBuf>,
    app_dir: Option<PathBuf>,
    tmp_dir: Option<PathBuf>,
    resources: Option<ResourceRoot>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the application name.
    ///
    /// # Required
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Sets the main entry point used to derive a default bundle identifier.
    ///
    /// # Required
    pub fn main_class_name(mut self, name: impl Into<String>) -> Self {
        self.main_class_name = Some(name.into());
        self
    }

    /// Sets the target platform.
    ///
    /// # Required
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the SDK. Default: the platform's default SDK.
    pub fn sdk(mut self, sdk: Sdk) -> Self {
        self.sdk = Some(sdk);
        self
    }

    /// Sets the user source directory.
    ///
    /// # Required
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the generated sources directory.
    pub fn gen_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.gen_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory containing the `.app` bundle.
    pub fn app_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.app_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the scratch directory.
    pub fn tmp_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.tmp_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Fills unset generated, app and scratch directories below `root`
    /// (`gensrc/`, the root itself, `tmp/`).
    pub fn build_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        let root = root.as_ref();
        self.gen_dir.get_or_insert_with(|| root.join("gensrc"));
        self.app_dir.get_or_insert_with(|| root.to_path_buf());
        self.tmp_dir.get_or_insert_with(|| root.join("tmp"));
        self
    }

    /// Sets the built-in resource root. Default: [`ResourceRoot::bundled`].
    pub fn resources(mut self, resources: ResourceRoot) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or the application name
    /// cannot name a bundle.
    pub fn build(self) -> Result<Settings> {
        let app_name = self.app_name.context("app_name is required")?;
        if app_name.trim().is_empty() || app_name.contains('/') {
            crate::bail!("invalid app name '{}'", app_name);
        }
        let main_class_name = self.main_class_name.context("main_class_name is required")?;
        if main_class_name.trim().is_empty() {
            crate::bail!("main_class_name must not be empty");
        }
        if derive_bundle_identifier(&main_class_name).trim().is_empty() {
            crate::bail!(
                "main_class_name '{}' yields an empty bundle identifier",
                main_class_name
            );
        }
        let platform = self.platform.context("platform is required")?;

        Ok(Settings {
            app_name,
            main_class_name,
            platform,
            sdk: self.sdk.unwrap_or_else(|| platform.default_sdk()),
            paths: ProjectPaths {
                source: self.source_dir.context("source_dir is required")?,
                generated: self.gen_dir.context("gen_dir is required")?,
                app: self.app_dir.context("app_dir is required")?,
                tmp: self.tmp_dir.context("tmp_dir is required")?,
            },
            resources: self.resources.unwrap_or_default(),
        })
    }
}
