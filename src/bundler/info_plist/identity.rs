//! Bundle identity: executable name, bundle identifier, and the values
//! stamped into the working document.

use crate::bundler::{
    error::{Error, Result},
    plist::{OrderedDictionary, PlistValue},
    toolchain::ToolchainInfo,
};
use std::path::Path;

pub(super) const EXECUTABLE_KEY: &str = "CFBundleExecutable";
pub(super) const IDENTIFIER_KEY: &str = "CFBundleIdentifier";
pub(super) const NAME_KEY: &str = "CFBundleName";

/// Resolves the executable name.
///
/// With a template, its `CFBundleExecutable` wins; without one the application
/// name is used. A template lacking the key is an [`Error::MissingKey`].
pub fn resolve_executable_name(template: Option<&Path>, app_name: &str) -> Result<String> {
    let name = match template {
        Some(path) => read_string_key(path, EXECUTABLE_KEY)?,
        None => app_name.to_string(),
    };
    log::debug!("Executable name = {name}");
    Ok(name)
}

/// Resolves the bundle identifier.
///
/// With a template, its `CFBundleIdentifier` wins; without one the identifier
/// is derived from the main entry point (see [`derive_bundle_identifier`]).
pub fn resolve_bundle_identifier(template: Option<&Path>, main_class_name: &str) -> Result<String> {
    let id = match template {
        Some(path) => read_string_key(path, IDENTIFIER_KEY)?,
        None => derive_bundle_identifier(main_class_name),
    };
    log::debug!("Bundle ID = {id}");
    Ok(id)
}

/// Strips everything up to and including the last `/` of an entry point.
///
/// `com/example/Main` becomes `Main`; a name without `/` is returned as is.
pub fn derive_bundle_identifier(main_class_name: &str) -> String {
    main_class_name
        .rsplit('/')
        .next()
        .unwrap_or(main_class_name)
        .to_string()
}

fn read_string_key(template: &Path, key: &str) -> Result<String> {
    let dict = OrderedDictionary::open(template)?;
    match dict.get(key) {
        Some(PlistValue::String(value)) => Ok(value.clone()),
        Some(other) => Err(Error::Parse {
            path: template.to_path_buf(),
            reason: format!("{key} must be a string, found {}", other.type_name()),
        }),
        None => Err(Error::MissingKey {
            key: key.to_string(),
            path: template.to_path_buf(),
        }),
    }
}

/// Identity and toolchain values for one run.
///
/// The executable name and bundle identifier are only ever produced by the
/// resolve functions above; there are no setters.
#[derive(Debug, Clone)]
pub struct BundleDescriptor {
    app_name: String,
    executable_name: String,
    bundle_identifier: String,
    main_entry_point: String,
    min_os_version: &'static str,
    toolchain: ToolchainInfo,
}

impl BundleDescriptor {
    /// Resolves the identity against `template` (if any).
    pub fn resolve(
        template: Option<&Path>,
        app_name: &str,
        main_entry_point: &str,
        min_os_version: &'static str,
        toolchain: ToolchainInfo,
    ) -> Result<Self> {
        Ok(Self {
            executable_name: resolve_executable_name(template, app_name)?,
            bundle_identifier: resolve_bundle_identifier(template, main_entry_point)?,
            app_name: app_name.to_string(),
            main_entry_point: main_entry_point.to_string(),
            min_os_version,
            toolchain,
        })
    }

    /// Application name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Resolved `CFBundleExecutable`.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// Resolved `CFBundleIdentifier`.
    pub fn bundle_identifier(&self) -> &str {
        &self.bundle_identifier
    }

    /// Main entry point the identifier may be derived from.
    pub fn main_entry_point(&self) -> &str {
        &self.main_entry_point
    }

    /// Stamped `MinimumOSVersion`.
    pub fn min_os_version(&self) -> &str {
        self.min_os_version
    }

    /// Probed toolchain values.
    pub fn toolchain(&self) -> &ToolchainInfo {
        &self.toolchain
    }

    /// Writes `CFBundleIdentifier`, `CFBundleExecutable` and `CFBundleName`.
    pub fn stamp_identity(&self, document: &mut OrderedDictionary) {
        document.put(IDENTIFIER_KEY, self.bundle_identifier.as_str());
        document.put(EXECUTABLE_KEY, self.executable_name.as_str());
        document.put(NAME_KEY, self.app_name.as_str());
    }

    /// Writes the platform, SDK and Xcode keys.
    pub fn stamp_toolchain(&self, document: &mut OrderedDictionary) {
        let tc = &self.toolchain;
        document.put("DTPlatformName", tc.platform_name.as_str());
        document.put("DTSDKName", tc.sdk_name.as_str());
        document.put("MinimumOSVersion", self.min_os_version);
        document.put(
            "CFBundleSupportedPlatforms",
            tc.supported_platforms
                .iter()
                .map(|p| PlistValue::from(p.as_str()))
                .collect::<Vec<_>>(),
        );
        document.put("DTPlatformVersion", tc.platform_version.as_str());
        document.put("DTPlatformBuild", tc.platform_build.as_str());
        document.put("DTSDKBuild", tc.sdk_build.as_str());
        document.put("DTXcode", tc.xcode_version.as_str());
        document.put("DTXcodeBuild", tc.xcode_build.as_str());
        document.put("BuildMachineOSBuild", tc.build_machine_os_build.as_str());
    }
}
