//! Apple platform descriptors.
//!
//! The Info.plist pipeline runs one algorithm for every Apple target. What
//! differs between macOS and iOS is captured in a [`PlatformDescriptor`]: the
//! bundle layout, the minimum OS version, where the built-in resources live,
//! the default assets to generate, and the devices passed to the asset
//! compiler. Adding a target means adding a descriptor, nothing else.
//!
//! | Platform | Layout | Executable | Compiled assets | Minimum OS |
//! |----------|--------|------------|-----------------|------------|
//! | macOS | nested `Contents/` | `Contents/MacOS` | `Contents/Resources` | 10.13 |
//! | iOS | flat | bundle root | bundle root | 11.0 |

mod ios;
mod macos;

pub use ios::IOS;
pub use macos::MACOS;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Directory structure of one `.app` bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    /// The `.app` directory itself
    pub root: PathBuf,
    /// Directory holding `Info.plist` and auxiliary files
    pub contents: PathBuf,
    /// Directory holding the main executable
    pub executable_dir: PathBuf,
    /// Output directory for compiled asset catalogs
    pub resources_dir: PathBuf,
}

/// Constants and layout that specialize the pipeline for one platform.
#[derive(Debug)]
pub struct PlatformDescriptor {
    /// Name of the per-platform folder under the source and generated roots
    pub os: &'static str,
    /// Folder of built-in resources, relative to the resource root
    pub resource_folder: &'static str,
    /// Value stamped as `MinimumOSVersion` and passed to the asset compiler
    pub min_os_version: &'static str,
    /// Maps a `.app` root to its layout
    pub layout: fn(&Path) -> BundleLayout,
    /// Default top-level assets (launch images, artwork)
    pub assets: &'static [&'static str],
    /// Default files of the `AppIcon.appiconset` icon set
    pub icon_assets: &'static [&'static str],
    /// Files copied next to the template and then into the bundle
    pub other_files: &'static [&'static str],
    /// `--target-device` values for the asset compiler
    pub target_devices: &'static [&'static str],
}

impl PlatformDescriptor {
    /// Layout of the bundle rooted at `app_root`.
    pub fn layout(&self, app_root: &Path) -> BundleLayout {
        (self.layout)(app_root)
    }
}

/// Targets with a descriptor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    /// macOS `.app`
    Macos,
    /// iOS `.app` (device or simulator)
    Ios,
}

impl Platform {
    /// Descriptor for this platform.
    pub fn descriptor(self) -> &'static PlatformDescriptor {
        match self {
            Platform::Macos => &MACOS,
            Platform::Ios => &IOS,
        }
    }

    /// SDK used when none is requested explicitly.
    pub fn default_sdk(self) -> Sdk {
        match self {
            Platform::Macos => Sdk::MacOsx,
            Platform::Ios => Sdk::IphoneOs,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Macos => write!(f, "macos"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "macos" | "macosx" | "darwin" => Ok(Platform::Macos),
            "ios" => Ok(Platform::Ios),
            other => Err(format!("unsupported target '{other}' (expected macos or ios)")),
        }
    }
}

/// Apple SDKs the toolchain can be probed for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Sdk {
    /// macOS SDK
    MacOsx,
    /// iOS device SDK
    IphoneOs,
    /// iOS simulator SDK
    IphoneSimulator,
}

impl Sdk {
    /// Canonical SDK name, as listed in `CFBundleSupportedPlatforms`.
    pub fn name(self) -> &'static str {
        match self {
            Sdk::MacOsx => "MacOSX",
            Sdk::IphoneOs => "iPhoneOS",
            Sdk::IphoneSimulator => "iPhoneSimulator",
        }
    }

    /// Lowercase identifier accepted by `xcrun --sdk` and `actool --platform`.
    pub fn id(self) -> &'static str {
        match self {
            Sdk::MacOsx => "macosx",
            Sdk::IphoneOs => "iphoneos",
            Sdk::IphoneSimulator => "iphonesimulator",
        }
    }
}

impl fmt::Display for Sdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Sdk {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "macosx" => Ok(Sdk::MacOsx),
            "iphoneos" => Ok(Sdk::IphoneOs),
            "iphonesimulator" => Ok(Sdk::IphoneSimulator),
            other => Err(format!("unsupported sdk '{other}'")),
        }
    }
}
