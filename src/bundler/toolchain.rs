//! Xcode toolchain probing.
//!
//! The working Info.plist is stamped with the SDK, platform and Xcode versions
//! used for the build (the `DT*` keys Xcode itself writes). [`XcodeToolchain`]
//! queries them once per run; the pipeline only ever sees the resulting
//! [`ToolchainInfo`] value.

use crate::bundler::{
    error::{Error, Result},
    platform::Sdk,
    process,
};

/// Toolchain fields stamped into the working document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainInfo {
    /// `DTPlatformName`, e.g. `iphoneos`; also the asset compiler `--platform`
    pub platform_name: String,
    /// `DTSDKName`, e.g. `iphoneos17.2`
    pub sdk_name: String,
    /// `DTPlatformVersion`
    pub platform_version: String,
    /// `DTPlatformBuild`
    pub platform_build: String,
    /// `DTSDKBuild`
    pub sdk_build: String,
    /// `DTXcode`, e.g. `1520`
    pub xcode_version: String,
    /// `DTXcodeBuild`
    pub xcode_build: String,
    /// `BuildMachineOSBuild`
    pub build_machine_os_build: String,
    /// `CFBundleSupportedPlatforms`
    pub supported_platforms: Vec<String>,
}

/// Probes the installed Xcode for one SDK.
#[derive(Debug, Clone, Copy)]
pub struct XcodeToolchain {
    sdk: Sdk,
}

impl XcodeToolchain {
    /// Creates a probe for `sdk`.
    pub fn new(sdk: Sdk) -> Self {
        Self { sdk }
    }

    /// Runs `xcrun`, `xcodebuild` and `sw_vers` and collects their answers.
    pub async fn probe(&self) -> Result<ToolchainInfo> {
        for tool in ["xcrun", "xcodebuild", "sw_vers"] {
            if let Err(e) = which::which(tool) {
                return Err(Error::ToolNotFound {
                    tool: tool.to_string(),
                    hint: format!("{e}. Install Xcode and run `xcode-select --install`"),
                });
            }
        }

        let sdk = self.sdk.id();
        let sdk_version = capture("xcrun", &["--sdk", sdk, "--show-sdk-version"]).await?;
        let platform_version =
            capture("xcrun", &["--sdk", sdk, "--show-sdk-platform-version"]).await?;
        let sdk_build = capture("xcrun", &["--sdk", sdk, "--show-sdk-build-version"]).await?;
        let xcodebuild = capture("xcodebuild", &["-version"]).await?;
        let build_machine_os_build = capture("sw_vers", &["-buildVersion"]).await?;

        let (xcode_version, xcode_build) = parse_xcodebuild_version(&xcodebuild)
            .ok_or_else(|| {
                Error::GenericError(format!(
                    "unexpected `xcodebuild -version` output: {xcodebuild}"
                ))
            })?;

        let info = ToolchainInfo {
            platform_name: sdk.to_string(),
            sdk_name: format!("{sdk}{sdk_version}"),
            platform_version,
            platform_build: sdk_build.clone(),
            sdk_build,
            xcode_version,
            xcode_build,
            build_machine_os_build,
            supported_platforms: vec![self.sdk.name().to_string()],
        };
        log::debug!("Toolchain: {info:?}");
        Ok(info)
    }
}

async fn capture(program: &str, args: &[&str]) -> Result<String> {
    let output = process::run(program, args).await?;
    if !output.success() {
        crate::bail!(
            "{} {} failed with exit code {:?}: {}",
            program,
            args.join(" "),
            output.exit_code,
            output.stderr.trim()
        );
    }
    Ok(output.stdout.trim().to_string())
}

/// Parses `xcodebuild -version` into (`DTXcode`, `DTXcodeBuild`).
///
/// `Xcode 15.2` becomes `1520` and `Xcode 9.4.1` becomes `0941`, matching the
/// values Xcode writes into its own bundles.
pub fn parse_xcodebuild_version(output: &str) -> Option<(String, String)> {
    let version_re = regex::Regex::new(r"Xcode\s+(\d+)(?:\.(\d+))?(?:\.(\d+))?").ok()?;
    let build_re = regex::Regex::new(r"Build version\s+(\S+)").ok()?;

    let caps = version_re.captures(output)?;
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    let dt_xcode = format!("{:02}{}{}", part(1), part(2).min(9), part(3).min(9));
    let build = build_re.captures(output)?.get(1)?.as_str().to_string();
    Some((dt_xcode, build))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_component_version() {
        let out = "Xcode 15.2\nBuild version 15C500b\n";
        assert_eq!(
            parse_xcodebuild_version(out),
            Some(("1520".to_string(), "15C500b".to_string()))
        );
    }

    #[test]
    fn test_parse_three_component_single_digit_major() {
        let out = "Xcode 9.4.1\nBuild version 9F2000";
        assert_eq!(
            parse_xcodebuild_version(out),
            Some(("0941".to_string(), "9F2000".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_xcodebuild_version("xcode-select: error"), None);
    }
}
