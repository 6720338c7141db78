//! Info.plist assembly and asset catalog verification for Apple bundles.
//!
//! This module builds the `Info.plist` of a macOS or iOS `.app` bundle from a
//! project template, stamps it with the installed Xcode toolchain, compiles the
//! bundle's asset catalogs with `actool`, and merges the partial plists the
//! compiler emits.
//!
//! # Project Layout
//!
//! ```text
//! <source>/<os>/Default-Info.plist     user template (optional)
//! <source>/<os>/assets/                files, *.xcassets catalogs, extra folders
//! <generated>/<os>/                    defaults written when no user template exists
//! <app>/<AppName>.app                  the bundle being assembled
//! <tmp>/partial-plists/                per-run fragments from the asset compiler
//! <tmp>/Info.plist                     XML copy of the final document
//! ```
//!
//! # Supported Platforms
//!
//! | Platform | Layout | Devices | Auxiliary files |
//! |----------|--------|---------|-----------------|
//! | macOS | `Contents/` | mac | `PkgInfo` |
//! | iOS | flat | iphone, ipad | none |
//!
//! # Integration
//!
//! ```no_run
//! use kodegen_bundler_infoplist::bundler::{
//!     Actool, InfoPlistAssembler, Platform, SettingsBuilder, XcodeToolchain,
//! };
//!
//! # async fn run() -> kodegen_bundler_infoplist::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .app_name("Demo")
//!     .main_class_name("com/example/Main")
//!     .platform(Platform::Macos)
//!     .source_dir("src")
//!     .build_root("target/macos")
//!     .build()?;
//!
//! let toolchain = XcodeToolchain::new(settings.sdk()).probe().await?;
//! let assembler = InfoPlistAssembler::new(&settings, toolchain, Actool::new("macosx"));
//! let processed = assembler.process().await?;
//! println!("{}", processed.info_plist.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod error;
mod info_plist;
pub mod platform;
pub mod plist;
mod process;
mod resources;
mod settings;
mod toolchain;
mod utils;

// Public re-exports
pub use assets::{AssetCatalogRequest, AssetCatalogVerifier, CatalogSet};
pub use error::{Context, Error, ErrorExt, Result};
pub use info_plist::{
    BundleDescriptor, INFO_PLIST, InfoPlistAssembler, ProcessedInfoPlist, VERSION_KEY,
    build_working_document, derive_bundle_identifier, locate_executable, process_info_plist,
    reorder_for_output, resolve_bundle_identifier, resolve_executable_name,
};
pub use platform::{BundleLayout, IOS, MACOS, Platform, PlatformDescriptor, Sdk};
pub use self::plist::{Number, OrderedDictionary, PlistValue};
pub use process::{Actool, AssetCompiler, ProcessOutput};
pub use resources::ResourceRoot;
pub use settings::{ProjectPaths, Settings, SettingsBuilder, TEMPLATE_FILE};
pub use toolchain::{ToolchainInfo, XcodeToolchain, parse_xcodebuild_version};
