use super::{BundleLayout, PlatformDescriptor};
use std::path::Path;

const ICON_ASSETS: &[&str] = &[
    "Contents.json",
    "icon-16@1x.png",
    "icon-16@2x.png",
    "icon-32@1x.png",
    "icon-32@2x.png",
    "icon-128@1x.png",
    "icon-128@2x.png",
    "icon-256@1x.png",
    "icon-256@2x.png",
    "icon-512@1x.png",
    "icon-512@2x.png",
];

fn layout(app_root: &Path) -> BundleLayout {
    let contents = app_root.join("Contents");
    BundleLayout {
        root: app_root.to_path_buf(),
        executable_dir: contents.join("MacOS"),
        resources_dir: contents.join("Resources"),
        contents,
    }
}

/// macOS `.app`: nested `Contents/` tree, `PkgInfo` shipped beside Info.plist.
pub static MACOS: PlatformDescriptor = PlatformDescriptor {
    os: "macos",
    resource_folder: "native/macosx/",
    min_os_version: "10.13",
    layout,
    assets: &[],
    icon_assets: ICON_ASSETS,
    other_files: &["PkgInfo"],
    target_devices: &["mac"],
};
