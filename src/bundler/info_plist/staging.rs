//! Default resource generation and asset staging into the bundle.

use crate::bundler::{
    assets::{AssetCatalogRequest, AssetCatalogVerifier},
    error::{Error, Result},
    platform::{BundleLayout, PlatformDescriptor},
    process::AssetCompiler,
    resources::{self, ResourceRoot},
    settings::TEMPLATE_FILE,
    utils::fs,
};
use std::path::Path;

const CATALOG_SUFFIX: &str = ".xcassets";

/// Writes the built-in template and default assets into `gen_dir`.
///
/// The template copy is fatal; every other missing or failing resource is
/// logged and skipped.
pub(super) async fn materialize_defaults(
    resources: &ResourceRoot,
    platform: &PlatformDescriptor,
    gen_dir: &Path,
) -> Result<()> {
    let folder = platform.resource_folder;
    let template = gen_dir.join(TEMPLATE_FILE);
    log::debug!("Copy {} to {}", TEMPLATE_FILE, template.display());
    resources
        .copy_resource(&format!("{folder}{TEMPLATE_FILE}"), &template)
        .await?;

    let assets = gen_dir.join("assets");
    let icon_set = assets.join("Assets.xcassets").join("AppIcon.appiconset");

    let mut copies: Vec<(String, std::path::PathBuf)> = Vec::new();
    for asset in platform.assets {
        copies.push((format!("{folder}assets/{asset}"), assets.join(asset)));
    }
    for file in platform.other_files {
        copies.push((format!("{folder}{file}"), gen_dir.join(file)));
    }
    for icon in platform.icon_assets {
        copies.push((
            format!("{folder}assets/Assets.xcassets/AppIcon.appiconset/{icon}"),
            icon_set.join(icon),
        ));
    }
    copies.push((
        format!("{folder}assets/Assets.xcassets/Contents.json"),
        assets.join("Assets.xcassets").join("Contents.json"),
    ));

    for (name, dest) in copies {
        if let Err(e) = resources.copy_resource(&name, &dest).await {
            if resources::is_missing(&e) {
                log::debug!("Resource {name} not shipped, skipping");
            } else {
                log::warn!("Error copying resource {name}: {e}");
            }
        }
    }
    Ok(())
}

/// Copies top-level files of `assets_dir` into the bundle contents and
/// verifies every top-level `*.xcassets` catalog.
///
/// A missing `assets_dir` is an [`Error::MissingAssets`]; a failed catalog
/// verification aborts; a failed file copy is logged and skipped.
pub(super) async fn stage_assets<C: AssetCompiler>(
    assets_dir: &Path,
    layout: &BundleLayout,
    platform: &PlatformDescriptor,
    platform_name: &str,
    verifier: &AssetCatalogVerifier,
    compiler: &C,
) -> Result<Vec<AssetCatalogRequest>> {
    if !assets_dir.is_dir() {
        return Err(Error::MissingAssets {
            path: assets_dir.to_path_buf(),
        });
    }

    let mut requests = Vec::new();
    for entry in fs::walk(assets_dir, 1)? {
        let path = entry.path();
        if entry.file_type().is_dir() {
            if entry.file_name().to_string_lossy().ends_with(CATALOG_SUFFIX) {
                let request = verifier
                    .verify(
                        compiler,
                        path,
                        platform_name,
                        platform.min_os_version,
                        platform.target_devices,
                        &layout.resources_dir,
                    )
                    .await?;
                requests.push(request);
            }
        } else {
            let target = layout.contents.join(path.strip_prefix(assets_dir)?);
            if let Err(e) = fs::copy_file(path, &target).await {
                log::warn!("Error copying asset {}: {e}", path.display());
            }
        }
    }
    Ok(requests)
}

/// Replaces every top-level directory of `assets_dir` that is not a catalog
/// in the bundle contents.
///
/// Only a missing `assets_dir` is fatal; a directory that cannot be replaced
/// is logged and skipped.
pub(super) async fn replace_other_assets(assets_dir: &Path, layout: &BundleLayout) -> Result<()> {
    if !assets_dir.is_dir() {
        return Err(Error::MissingAssets {
            path: assets_dir.to_path_buf(),
        });
    }

    for entry in fs::walk(assets_dir, 1)? {
        if !entry.file_type().is_dir()
            || entry.file_name().to_string_lossy().ends_with(CATALOG_SUFFIX)
        {
            continue;
        }
        let target = layout.contents.join(entry.file_name());
        if let Err(e) = fs::remove_dir_all(&target).await {
            log::warn!("Error removing directory {}: {e}", target.display());
            continue;
        }
        log::debug!("Copying directory {}", entry.path().display());
        if let Err(e) = fs::copy_dir(entry.path(), &target).await {
            log::warn!("Error copying directory {}: {e}", entry.path().display());
        }
    }
    Ok(())
}

/// Copies auxiliary files (e.g. `PkgInfo`) from `template_dir` into the
/// bundle contents. Failures are logged and skipped.
pub(super) async fn copy_auxiliary_files(
    platform: &PlatformDescriptor,
    template_dir: &Path,
    layout: &BundleLayout,
) {
    for file in platform.other_files {
        let from = template_dir.join(file);
        if let Err(e) = fs::copy_file(&from, &layout.contents.join(file)).await {
            log::warn!("Error copying {file}: {e}");
        }
    }
}
