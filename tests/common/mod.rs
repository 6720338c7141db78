//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use kodegen_bundler_infoplist::bundler::{
    AssetCompiler, OrderedDictionary, Platform, ProcessOutput, Result, Settings, SettingsBuilder,
    ToolchainInfo,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Asset compiler double: records every invocation and writes a scripted
/// fragment to the `--output-partial-info-plist` path.
#[derive(Debug, Default)]
pub struct FakeCompiler {
    pub fragment: Vec<(String, String)>,
    pub exit_code: i32,
    pub skip_fragment: bool,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl FakeCompiler {
    pub fn emitting(entries: &[(&str, &str)]) -> Self {
        Self {
            fragment: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Default::default()
        }
    }

    /// Exits successfully without writing a fragment.
    pub fn silent() -> Self {
        Self {
            skip_fragment: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl AssetCompiler for FakeCompiler {
    async fn compile(&self, args: &[String]) -> Result<ProcessOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        if self.exit_code != 0 {
            return Ok(ProcessOutput {
                exit_code: Some(self.exit_code),
                stdout: String::new(),
                stderr: "error: The stickers icon set has an unassigned child".to_string(),
            });
        }
        if self.skip_fragment {
            return Ok(ProcessOutput {
                exit_code: Some(0),
                ..Default::default()
            });
        }
        let index = args
            .iter()
            .position(|a| a == "--output-partial-info-plist")
            .expect("fragment path argument");
        self.fragment
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect::<OrderedDictionary>()
            .save_as_xml(Path::new(&args[index + 1]))?;
        Ok(ProcessOutput {
            exit_code: Some(0),
            ..Default::default()
        })
    }
}

pub fn toolchain(platform: Platform) -> ToolchainInfo {
    let (platform_name, supported) = match platform {
        Platform::Macos => ("macosx", "MacOSX"),
        Platform::Ios => ("iphoneos", "iPhoneOS"),
    };
    ToolchainInfo {
        platform_name: platform_name.to_string(),
        sdk_name: format!("{platform_name}17.2"),
        platform_version: "17.2".to_string(),
        platform_build: "21C52".to_string(),
        sdk_build: "21C52".to_string(),
        xcode_version: "1520".to_string(),
        xcode_build: "15C500b".to_string(),
        build_machine_os_build: "23C71".to_string(),
        supported_platforms: vec![supported.to_string()],
    }
}

pub fn settings(root: &Path, platform: Platform) -> Settings {
    SettingsBuilder::new()
        .app_name("Demo")
        .main_class_name("com/example/Main")
        .platform(platform)
        .source_dir(root.join("src"))
        .build_root(root.join("build"))
        .build()
        .unwrap()
}

/// Creates an executable file named `name` where the bundle expects it.
pub fn install_executable(settings: &Settings, name: &str) -> PathBuf {
    let dir = settings.layout().executable_dir;
    std::fs::create_dir_all(&dir).unwrap();
    let exe = dir.join(name);
    std::fs::write(&exe, "#!/bin/sh\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    exe
}

/// Writes a user template with the given entries and an empty assets folder.
pub fn write_user_template(settings: &Settings, entries: &[(&str, &str)]) -> PathBuf {
    let template = settings.user_template();
    entries
        .iter()
        .map(|(k, v)| (*k, *v))
        .collect::<OrderedDictionary>()
        .save_as_xml(&template)
        .unwrap();
    std::fs::create_dir_all(settings.source_platform_dir().join("assets")).unwrap();
    template
}

pub fn keys(document: &OrderedDictionary) -> Vec<String> {
    document.keys().map(str::to_string).collect()
}
