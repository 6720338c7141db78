//! Asset catalog verification.
//!
//! Every `*.xcassets` catalog staged into a bundle is compiled once by the
//! asset compiler (`actool`). Besides the compiled `Assets.car`, each run
//! emits a partial Info.plist fragment (icon names, launch image names) into
//! the per-run scratch directory. [`merge::merge_fragments`] later folds those
//! fragments into the final document.
//!
//! The scratch directory is owned by one [`AssetCatalogVerifier`]: creating
//! the verifier clears it, so fragments from a previous run can never leak
//! into the current one.

pub mod merge;

use crate::bundler::{
    error::{Error, Result},
    process::AssetCompiler,
    utils::fs,
};
use std::path::{Path, PathBuf};

const APP_ICON_SET: &str = ".appiconset";
const LAUNCH_IMAGE: &str = ".launchimage";

/// Named set inside a catalog that the compiler must be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSet {
    /// `<name>.appiconset`, passed as `--app-icon <name>`
    AppIcon(String),
    /// `<name>.launchimage`, passed as `--launch-image <name>`
    LaunchImage(String),
}

/// One compiler invocation for one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCatalogRequest {
    /// The `*.xcassets` directory
    pub catalog_path: PathBuf,
    /// `--platform` value (e.g. `iphoneos`)
    pub platform_name: String,
    /// `--minimum-deployment-target` value
    pub min_os_version: String,
    /// `--target-device` values
    pub target_devices: Vec<String>,
    /// `--compile` destination
    pub output_dir: PathBuf,
    /// `--output-partial-info-plist` destination
    pub fragment_output_path: PathBuf,
    /// Icon sets and launch images in discovery order
    pub sets: Vec<CatalogSet>,
}

impl AssetCatalogRequest {
    /// Command line passed to the asset compiler.
    pub fn compiler_args(&self) -> Vec<String> {
        let mut args = vec![
            "--output-format".to_string(),
            "human-readable-text".to_string(),
        ];
        for set in &self.sets {
            match set {
                CatalogSet::AppIcon(name) => args.extend(["--app-icon".to_string(), name.clone()]),
                CatalogSet::LaunchImage(name) => {
                    args.extend(["--launch-image".to_string(), name.clone()])
                }
            }
        }
        args.extend([
            "--output-partial-info-plist".to_string(),
            self.fragment_output_path.display().to_string(),
            "--platform".to_string(),
            self.platform_name.clone(),
            "--minimum-deployment-target".to_string(),
            self.min_os_version.clone(),
        ]);
        for device in &self.target_devices {
            args.extend(["--target-device".to_string(), device.clone()]);
        }
        args.extend([
            "--compress-pngs".to_string(),
            "--compile".to_string(),
            self.output_dir.display().to_string(),
            self.catalog_path.display().to_string(),
        ]);
        args
    }
}

/// Finds icon sets and launch images anywhere below `catalog`, in sorted
/// discovery order.
pub fn discover_sets(catalog: &Path) -> Result<Vec<CatalogSet>> {
    let mut sets = Vec::new();
    for entry in fs::walk(catalog, usize::MAX)? {
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if let Some(icon) = name.strip_suffix(APP_ICON_SET) {
            sets.push(CatalogSet::AppIcon(icon.to_string()));
        } else if let Some(launch) = name.strip_suffix(LAUNCH_IMAGE) {
            sets.push(CatalogSet::LaunchImage(launch.to_string()));
        }
    }
    Ok(sets)
}

/// Runs the asset compiler over catalogs and collects fragments in one
/// scratch directory.
#[derive(Debug)]
pub struct AssetCatalogVerifier {
    scratch_dir: PathBuf,
}

impl AssetCatalogVerifier {
    /// Creates a verifier, clearing and recreating `scratch_dir`.
    pub async fn new(scratch_dir: impl Into<PathBuf>) -> Result<Self> {
        let scratch_dir = scratch_dir.into();
        fs::create_dir_all(&scratch_dir, true).await?;
        log::debug!("Partial plist directory reset: {}", scratch_dir.display());
        Ok(Self { scratch_dir })
    }

    /// Directory receiving the fragments.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Compiles `catalog` into `output_dir` and writes its fragment into the
    /// scratch directory.
    ///
    /// A non-zero exit (or termination by signal) is an
    /// [`Error::Verification`]; the fragment of a failed run must not be merged.
    /// A successful run that leaves no fragment behind is an [`Error::Parse`].
    pub async fn verify<C: AssetCompiler>(
        &self,
        compiler: &C,
        catalog: &Path,
        platform_name: &str,
        min_os_version: &str,
        target_devices: &[&str],
        output_dir: &Path,
    ) -> Result<AssetCatalogRequest> {
        fs::create_dir_all(output_dir, false).await?;

        let catalog_name = catalog
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "catalog".to_string());
        let fragment_output_path = self
            .scratch_dir
            .join(format!("{}_{}.plist", catalog_name, uuid::Uuid::new_v4()));

        let request = AssetCatalogRequest {
            catalog_path: catalog.to_path_buf(),
            platform_name: platform_name.to_string(),
            min_os_version: min_os_version.to_string(),
            target_devices: target_devices.iter().map(|d| d.to_string()).collect(),
            output_dir: output_dir.to_path_buf(),
            fragment_output_path,
            sets: discover_sets(catalog)?,
        };

        log::debug!("Verifying asset catalog {}", catalog.display());
        let output = compiler.compile(&request.compiler_args()).await?;
        if !output.success() {
            return Err(Error::Verification {
                catalog: catalog.to_path_buf(),
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        if !request.fragment_output_path.is_file() {
            return Err(Error::Parse {
                path: request.fragment_output_path,
                reason: "asset compiler produced no partial Info.plist".to_string(),
            });
        }

        log::info!("✓ Verified asset catalog {}", catalog_name);
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(sets: Vec<CatalogSet>) -> AssetCatalogRequest {
        AssetCatalogRequest {
            catalog_path: PathBuf::from("/src/ios/assets/Assets.xcassets"),
            platform_name: "iphoneos".into(),
            min_os_version: "11.0".into(),
            target_devices: vec!["iphone".into(), "ipad".into()],
            output_dir: PathBuf::from("/out/Demo.app"),
            fragment_output_path: PathBuf::from("/tmp/partial-plists/Assets.xcassets_1.plist"),
            sets,
        }
    }

    #[test]
    fn test_compiler_args_follow_contract() {
        let args = request(vec![CatalogSet::AppIcon("AppIcon".into())]).compiler_args();
        assert_eq!(
            args,
            [
                "--output-format",
                "human-readable-text",
                "--app-icon",
                "AppIcon",
                "--output-partial-info-plist",
                "/tmp/partial-plists/Assets.xcassets_1.plist",
                "--platform",
                "iphoneos",
                "--minimum-deployment-target",
                "11.0",
                "--target-device",
                "iphone",
                "--target-device",
                "ipad",
                "--compress-pngs",
                "--compile",
                "/out/Demo.app",
                "/src/ios/assets/Assets.xcassets",
            ]
        );
    }

    #[test]
    fn test_discover_sets_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("Assets.xcassets");
        std::fs::create_dir_all(catalog.join("LaunchImage.launchimage")).unwrap();
        std::fs::create_dir_all(catalog.join("AppIcon.appiconset")).unwrap();
        std::fs::create_dir_all(catalog.join("Colors.colorset")).unwrap();
        // a file with a matching suffix is not a set
        std::fs::write(catalog.join("Stray.appiconset"), "").unwrap();

        assert_eq!(
            discover_sets(&catalog).unwrap(),
            [
                CatalogSet::AppIcon("AppIcon".into()),
                CatalogSet::LaunchImage("LaunchImage".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_new_clears_scratch_dir() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("partial-plists");
        std::fs::create_dir_all(&scratch).unwrap();
        std::fs::write(scratch.join("old_1.plist"), "stale").unwrap();

        let verifier = AssetCatalogVerifier::new(&scratch).await.unwrap();
        assert_eq!(verifier.scratch_dir(), scratch);
        assert!(scratch.is_dir());
        assert!(!scratch.join("old_1.plist").exists());
    }
}
