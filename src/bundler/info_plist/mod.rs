//! Info.plist assembly for Apple `.app` bundles.
//!
//! [`InfoPlistAssembler`] turns a user-maintained (or freshly generated)
//! `Default-Info.plist` template into the bundle's final `Info.plist`:
//!
//! 1. Resolve the executable name and bundle identifier from the template,
//!    falling back to the application name and main entry point.
//! 2. Without a user template, generate the built-in defaults under
//!    `<generated>/<os>/` and stamp the resolved identity into them.
//! 3. Check that the executable exists in the bundle and is executable.
//! 4. Load the template and stamp the toolchain keys (`DTSDKName`,
//!    `MinimumOSVersion`, ...). A template without `CFBundleVersion` is rejected.
//! 5. Stage assets into the bundle and verify every asset catalog.
//! 6. Move `CFBundleVersion` to the front.
//! 7. Merge the partial plists produced by the asset compiler.
//! 8. Write the binary `Info.plist`, an XML mirror in the scratch directory,
//!    and the platform's auxiliary files.
//!
//! Steps 1 to 4 only read the bundle, so every identity, template or
//! executable error is reported before the bundle is modified.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_infoplist::bundler::{Platform, SettingsBuilder, process_info_plist};
//!
//! # async fn run() -> kodegen_bundler_infoplist::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .app_name("Demo")
//!     .main_class_name("com/example/Main")
//!     .platform(Platform::Ios)
//!     .source_dir("src")
//!     .build_root("target/ios")
//!     .build()?;
//!
//! let processed = process_info_plist(&settings).await?;
//! println!("Bundle ID: {}", processed.bundle_identifier);
//! # Ok(())
//! # }
//! ```

mod identity;
mod staging;

pub use identity::{
    BundleDescriptor, derive_bundle_identifier, resolve_bundle_identifier, resolve_executable_name,
};

use crate::bundler::{
    assets::{AssetCatalogRequest, AssetCatalogVerifier, merge::merge_fragments},
    error::{Error, Result},
    platform::BundleLayout,
    plist::OrderedDictionary,
    process::{Actool, AssetCompiler},
    settings::Settings,
    toolchain::{ToolchainInfo, XcodeToolchain},
};
use identity::{EXECUTABLE_KEY, IDENTIFIER_KEY};
use std::path::{Path, PathBuf};

/// File name of the final document.
pub const INFO_PLIST: &str = "Info.plist";

/// Key that always comes first in the final document.
pub const VERSION_KEY: &str = "CFBundleVersion";

/// Outcome of one successful run.
#[derive(Debug, Clone)]
pub struct ProcessedInfoPlist {
    /// Template the document was built from
    pub template: PathBuf,
    /// Final `CFBundleIdentifier`
    pub bundle_identifier: String,
    /// `true` when the template was generated during this run
    pub freshly_initialized: bool,
    /// Binary `Info.plist` inside the bundle
    pub info_plist: PathBuf,
    /// XML copy in the scratch directory
    pub xml_mirror: PathBuf,
    /// Catalogs compiled during this run
    pub catalogs: Vec<AssetCatalogRequest>,
    /// Number of partial plists merged
    pub fragments_merged: usize,
}

/// Probes Xcode for `settings.sdk()` and runs the pipeline with `actool`.
pub async fn process_info_plist(settings: &Settings) -> Result<ProcessedInfoPlist> {
    let toolchain = XcodeToolchain::new(settings.sdk()).probe().await?;
    let compiler = Actool::new(settings.sdk().id());
    InfoPlistAssembler::new(settings, toolchain, compiler)
        .process()
        .await
}

/// Runs the Info.plist pipeline for one bundle.
#[derive(Debug)]
pub struct InfoPlistAssembler<'a, C> {
    settings: &'a Settings,
    toolchain: ToolchainInfo,
    compiler: C,
}

impl<'a, C: AssetCompiler> InfoPlistAssembler<'a, C> {
    /// Creates an assembler with an already probed toolchain.
    pub fn new(settings: &'a Settings, toolchain: ToolchainInfo, compiler: C) -> Self {
        Self {
            settings,
            toolchain,
            compiler,
        }
    }

    /// Runs every step and returns where the results went.
    pub async fn process(&self) -> Result<ProcessedInfoPlist> {
        let settings = self.settings;
        let platform = settings.descriptor();
        let layout = settings.layout();
        log::info!("Processing Info.plist for {}", layout.root.display());

        let descriptor = BundleDescriptor::resolve(
            settings.existing_template().as_deref(),
            settings.app_name(),
            settings.main_class_name(),
            platform.min_os_version,
            self.toolchain.clone(),
        )?;

        let user_template = settings.user_template();
        let freshly_initialized = !user_template.is_file();
        let template = if freshly_initialized {
            self.generate_template(&descriptor).await?
        } else {
            user_template
        };
        let template_dir = template
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        locate_executable(&layout, &descriptor, &template)?;
        let working = build_working_document(&template, &descriptor, freshly_initialized)?;

        let verifier = AssetCatalogVerifier::new(settings.paths().partial_plists_dir()).await?;
        let assets_dir = template_dir.join("assets");
        let catalogs = staging::stage_assets(
            &assets_dir,
            &layout,
            platform,
            &self.toolchain.platform_name,
            &verifier,
            &self.compiler,
        )
        .await?;
        if !freshly_initialized {
            staging::replace_other_assets(&assets_dir, &layout).await?;
        }

        let mut document = reorder_for_output(working);
        let fragments_merged = merge_fragments(verifier.scratch_dir(), &mut document)?;

        let info_plist = layout.contents.join(INFO_PLIST);
        let xml_mirror = settings.paths().tmp.join(INFO_PLIST);
        document.save_as_binary(&info_plist)?;
        document.save_as_xml(&xml_mirror)?;
        for (key, value) in document.iter() {
            log::debug!("Info.plist Entry: {key} = {value}");
        }
        let bundle_identifier = document
            .get_string(IDENTIFIER_KEY)
            .unwrap_or(descriptor.bundle_identifier())
            .to_string();

        staging::copy_auxiliary_files(platform, &template_dir, &layout).await;

        log::info!("✓ Wrote {}", info_plist.display());
        Ok(ProcessedInfoPlist {
            template,
            bundle_identifier,
            freshly_initialized,
            info_plist,
            xml_mirror,
            catalogs,
            fragments_merged,
        })
    }

    async fn generate_template(&self, descriptor: &BundleDescriptor) -> Result<PathBuf> {
        let settings = self.settings;
        let gen_dir = settings.gen_platform_dir();
        staging::materialize_defaults(settings.resources(), settings.descriptor(), &gen_dir)
            .await?;

        let template = settings.generated_template();
        let mut document = OrderedDictionary::open(&template)?;
        descriptor.stamp_identity(&mut document);
        document.save_as_xml(&template)?;

        log::info!(
            "Default {} resources generated in {}.\n\
             Consider copying them to {} before performing any modification",
            settings.descriptor().resource_folder,
            gen_dir.display(),
            settings.source_platform_dir().display()
        );
        Ok(template)
    }
}

/// Checks that the resolved executable exists and can be executed.
pub fn locate_executable(
    layout: &BundleLayout,
    descriptor: &BundleDescriptor,
    template: &Path,
) -> Result<PathBuf> {
    let executable = layout.executable_dir.join(descriptor.executable_name());
    if !executable.is_file() {
        let app_name = descriptor.app_name();
        let suggestion = (descriptor.executable_name() != app_name
            && layout.executable_dir.join(app_name).is_file())
        .then(|| app_name.to_string());
        return Err(Error::MissingExecutable {
            path: executable,
            template: template.to_path_buf(),
            key: EXECUTABLE_KEY.to_string(),
            suggestion,
        });
    }
    if !is_executable(&executable) {
        return Err(Error::NotExecutable { path: executable });
    }
    log::debug!("Executable found at {}", executable.display());
    Ok(executable)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Loads `template` and stamps identity (unless freshly initialized, where the
/// generated template already carries it) and toolchain keys.
pub fn build_working_document(
    template: &Path,
    descriptor: &BundleDescriptor,
    freshly_initialized: bool,
) -> Result<OrderedDictionary> {
    let mut document = OrderedDictionary::open(template)?;
    if !document.contains_key(VERSION_KEY) {
        return Err(Error::MissingKey {
            key: VERSION_KEY.to_string(),
            path: template.to_path_buf(),
        });
    }
    if !freshly_initialized {
        descriptor.stamp_identity(&mut document);
    }
    descriptor.stamp_toolchain(&mut document);
    Ok(document)
}

/// Returns a document with `CFBundleVersion` first and every other key in its
/// original relative order.
pub fn reorder_for_output(mut working: OrderedDictionary) -> OrderedDictionary {
    let mut ordered = OrderedDictionary::new();
    if let Some(version) = working.remove(VERSION_KEY) {
        ordered.put(VERSION_KEY, version);
    }
    for (key, value) in working {
        ordered.put(key, value);
    }
    ordered
}
