//! Built-in resources shipped with the crate.
//!
//! Default templates, the `PkgInfo` file and asset catalog skeletons live under
//! `resources/native/<platform>/` in the crate. A [`ResourceRoot`] resolves a
//! resource name (e.g. `native/ios/Default-Info.plist`) against that directory,
//! or against a user-provided override passed with `--resources`.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Directory that resource names are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoot {
    root: PathBuf,
}

impl ResourceRoot {
    /// Resources bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"))
    }

    /// Resources under a custom directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the resource `name`.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Copies the resource `name` to `dest`, creating parent directories.
    ///
    /// A missing resource is an [`Error::Fs`] naming the resource path.
    pub async fn copy_resource(&self, name: &str, dest: &Path) -> Result<u64> {
        let source = self.resolve(name);
        let mut file = tokio::fs::File::open(&source)
            .await
            .fs_context("opening resource", &source)?;
        let written = fs::copy_stream(&mut file, dest).await?;
        log::debug!("Copied resource {} to {}", name, dest.display());
        Ok(written)
    }
}

impl Default for ResourceRoot {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Returns `true` when `err` means the resource simply was not shipped.
pub(crate) fn is_missing(err: &Error) -> bool {
    matches!(
        err.root(),
        Error::Fs { error, .. } if error.kind() == std::io::ErrorKind::NotFound
    )
}
