mod common;

#[cfg(test)]
mod tests {
    use super::common::*;
    use kodegen_bundler_infoplist::bundler::{
        Error, InfoPlistAssembler, OrderedDictionary, Platform, PlistValue,
    };

    #[tokio::test]
    async fn test_fresh_ios_project_generates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Platform::Ios);
        install_executable(&settings, "Demo");
        let compiler = FakeCompiler::emitting(&[("CFBundleIconName", "AppIcon")]);

        let processed = InfoPlistAssembler::new(&settings, toolchain(Platform::Ios), compiler)
            .process()
            .await
            .unwrap();

        assert!(processed.freshly_initialized);
        assert_eq!(processed.bundle_identifier, "Main");
        assert_eq!(processed.template, settings.generated_template());
        assert_eq!(processed.info_plist, settings.bundle_root().join("Info.plist"));

        let generated = OrderedDictionary::open(&settings.generated_template()).unwrap();
        assert_eq!(generated.get_string("CFBundleIdentifier"), Some("Main"));
        assert_eq!(generated.get_string("CFBundleExecutable"), Some("Demo"));
        assert_eq!(generated.get_string("CFBundleName"), Some("Demo"));

        let info = OrderedDictionary::open(&processed.info_plist).unwrap();
        assert_eq!(info.keys().next(), Some("CFBundleVersion"));
        assert_eq!(info.get_string("CFBundleIdentifier"), Some("Main"));
        assert_eq!(info.get_string("CFBundleExecutable"), Some("Demo"));
        assert_eq!(info.get_string("MinimumOSVersion"), Some("11.0"));
        assert_eq!(info.get_string("DTSDKName"), Some("iphoneos17.2"));
        assert_eq!(info.get_string("CFBundleIconName"), Some("AppIcon"));
        assert_eq!(
            info.get("CFBundleSupportedPlatforms"),
            Some(&PlistValue::Array(vec!["iPhoneOS".into()]))
        );

        let bytes = std::fs::read(&processed.info_plist).unwrap();
        assert!(bytes.starts_with(b"bplist00"));
        let mirror = std::fs::read_to_string(&processed.xml_mirror).unwrap();
        assert!(mirror.starts_with("<?xml"));
        assert_eq!(processed.fragments_merged, 1);
        assert_eq!(processed.catalogs.len(), 1);
    }

    #[tokio::test]
    async fn test_user_template_keeps_order_and_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Platform::Ios);
        let template = write_user_template(
            &settings,
            &[
                ("CFBundleDevelopmentRegion", "en"),
                ("CFBundleExecutable", "Demo"),
                ("CFBundleIdentifier", "com.example.demo"),
                ("CFBundleName", "Stale"),
                ("CFBundleShortVersionString", "2.1"),
                ("CFBundleVersion", "42"),
                ("NSCameraUsageDescription", "Scanning codes"),
            ],
        );
        let before = std::fs::read(&template).unwrap();
        install_executable(&settings, "Demo");

        let processed = InfoPlistAssembler::new(&settings, toolchain(Platform::Ios), FakeCompiler::default())
            .process()
            .await
            .unwrap();

        assert!(!processed.freshly_initialized);
        assert_eq!(processed.bundle_identifier, "com.example.demo");
        assert_eq!(processed.fragments_merged, 0);
        assert_eq!(std::fs::read(&template).unwrap(), before);

        let info = OrderedDictionary::open(&processed.info_plist).unwrap();
        assert_eq!(
            &keys(&info)[..7],
            [
                "CFBundleVersion",
                "CFBundleDevelopmentRegion",
                "CFBundleExecutable",
                "CFBundleIdentifier",
                "CFBundleName",
                "CFBundleShortVersionString",
                "NSCameraUsageDescription",
            ]
        );
        assert_eq!(info.get_string("CFBundleName"), Some("Demo"));
        assert_eq!(info.get_string("CFBundleShortVersionString"), Some("2.1"));
        assert_eq!(info.get_string("NSCameraUsageDescription"), Some("Scanning codes"));
        assert_eq!(info.get_string("DTXcode"), Some("1520"));
        assert!(!settings.generated_template().exists());
    }

    #[tokio::test]
    async fn test_missing_executable_fails_before_touching_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Platform::Ios);
        let template = write_user_template(
            &settings,
            &[
                ("CFBundleExecutable", "Demo"),
                ("CFBundleIdentifier", "com.example.demo"),
                ("CFBundleVersion", "1"),
            ],
        );
        std::fs::write(settings.source_platform_dir().join("assets/extra.txt"), "x").unwrap();
        let compiler = FakeCompiler::default();

        let err = InfoPlistAssembler::new(&settings, toolchain(Platform::Ios), compiler)
            .process()
            .await
            .unwrap_err();

        match err {
            Error::MissingExecutable {
                path,
                template: t,
                key,
                ..
            } => {
                assert_eq!(path, settings.bundle_root().join("Demo"));
                assert_eq!(t, template);
                assert_eq!(key, "CFBundleExecutable");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!settings.bundle_root().exists());
    }

    #[tokio::test]
    async fn test_template_without_executable_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Platform::Macos);
        write_user_template(
            &settings,
            &[("CFBundleIdentifier", "com.example.demo"), ("CFBundleVersion", "1")],
        );

        let err = InfoPlistAssembler::new(&settings, toolchain(Platform::Macos), FakeCompiler::default())
            .process()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingKey { ref key, .. } if key == "CFBundleExecutable"));
    }

    #[tokio::test]
    async fn test_template_without_version_is_rejected_before_staging() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Platform::Ios);
        write_user_template(
            &settings,
            &[("CFBundleExecutable", "Demo"), ("CFBundleIdentifier", "x")],
        );
        std::fs::write(settings.source_platform_dir().join("assets/extra.txt"), "x").unwrap();
        install_executable(&settings, "Demo");

        let err = InfoPlistAssembler::new(&settings, toolchain(Platform::Ios), FakeCompiler::default())
            .process()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingKey { ref key, .. } if key == "CFBundleVersion"));
        assert!(!settings.bundle_root().join("extra.txt").exists());
        assert!(!settings.bundle_root().join("Info.plist").exists());
    }

    #[tokio::test]
    async fn test_second_run_ignores_first_run_fragments() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Platform::Ios);
        install_executable(&settings, "Demo");

        let first = FakeCompiler::emitting(&[("FirstRunOnly", "yes")]);
        InfoPlistAssembler::new(&settings, toolchain(Platform::Ios), first)
            .process()
            .await
            .unwrap();

        let second = FakeCompiler::emitting(&[("SecondRun", "yes")]);
        let processed = InfoPlistAssembler::new(&settings, toolchain(Platform::Ios), second)
            .process()
            .await
            .unwrap();

        let info = OrderedDictionary::open(&processed.info_plist).unwrap();
        assert!(info.contains_key("SecondRun"));
        assert!(!info.contains_key("FirstRunOnly"));
        assert_eq!(processed.fragments_merged, 1);
        let leftovers = std::fs::read_dir(settings.paths().partial_plists_dir())
            .unwrap()
            .count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_macos_bundle_layout_and_pkginfo() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Platform::Macos);
        install_executable(&settings, "Demo");

        let compiler = FakeCompiler::default();
        let processed = InfoPlistAssembler::new(&settings, toolchain(Platform::Macos), compiler)
            .process()
            .await
            .unwrap();

        let contents = settings.bundle_root().join("Contents");
        assert_eq!(processed.info_plist, contents.join("Info.plist"));
        assert_eq!(std::fs::read_to_string(contents.join("PkgInfo")).unwrap(), "APPL????");

        let request = &processed.catalogs[0];
        assert_eq!(request.output_dir, contents.join("Resources"));
        assert_eq!(request.platform_name, "macosx");
        assert_eq!(request.min_os_version, "10.13");
        assert_eq!(request.target_devices, ["mac"]);

        let info = OrderedDictionary::open(&processed.info_plist).unwrap();
        assert_eq!(info.get_string("MinimumOSVersion"), Some("10.13"));
    }

    #[tokio::test]
    async fn test_failed_verification_aborts_without_info_plist() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), Platform::Ios);
        install_executable(&settings, "Demo");

        let err = InfoPlistAssembler::new(&settings, toolchain(Platform::Ios), FakeCompiler::failing(1))
            .process()
            .await
            .unwrap_err();

        match err {
            Error::Verification {
                catalog,
                exit_code,
                stderr,
            } => {
                assert!(catalog.ends_with("Assets.xcassets"));
                assert_eq!(exit_code, Some(1));
                assert!(stderr.contains("unassigned child"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!settings.bundle_root().join("Info.plist").exists());
    }
}
