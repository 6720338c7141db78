use super::{BundleLayout, PlatformDescriptor};
use std::path::Path;

const LAUNCH_ASSETS: &[&str] = &[
    "Default-375w-667h@2x~iphone.png",
    "Default-414w-736h@3x~iphone.png",
    "Default-portrait@2x~ipad.png",
    "Default-375w-812h-landscape@3x~iphone.png",
    "Default-568h@2x~iphone.png",
    "Default-portrait~ipad.png",
    "Default-375w-812h@3x~iphone.png",
    "Default-landscape@2x~ipad.png",
    "Default@2x~iphone.png",
    "Default-414w-736h-landscape@3x~iphone.png",
    "Default-414w-896h@3x~iphone.png",
    "Default-414w-896h-landscape@3x~iphone.png",
    "Default-landscape~ipad.png",
    "iTunesArtwork",
    "iTunesArtwork@2x",
];

const ICON_ASSETS: &[&str] = &[
    "Contents.json",
    "app-store-icon-1024@1x.png",
    "ipad-app-icon-76@1x.png",
    "ipad-app-icon-76@2x.png",
    "ipad-notifications-icon-20@1x.png",
    "ipad-notifications-icon-20@2x.png",
    "ipad-pro-app-icon-83.5@2x.png",
    "ipad-settings-icon-29@1x.png",
    "ipad-settings-icon-29@2x.png",
    "ipad-spotlight-icon-40@1x.png",
    "ipad-spotlight-icon-40@2x.png",
    "iphone-app-icon-60@2x.png",
    "iphone-app-icon-60@3x.png",
    "iphone-notification-icon-20@2x.png",
    "iphone-notification-icon-20@3x.png",
    "iphone-spotlight-icon-40@2x.png",
    "iphone-spotlight-icon-40@3x.png",
    "iphone-spotlight-settings-icon-29@2x.png",
    "iphone-spotlight-settings-icon-29@3x.png",
];

// Everything lives at the bundle root on iOS.
fn layout(app_root: &Path) -> BundleLayout {
    BundleLayout {
        root: app_root.to_path_buf(),
        contents: app_root.to_path_buf(),
        executable_dir: app_root.to_path_buf(),
        resources_dir: app_root.to_path_buf(),
    }
}

/// iOS `.app`: flat bundle, universal iPhone + iPad assets.
pub static IOS: PlatformDescriptor = PlatformDescriptor {
    os: "ios",
    resource_folder: "native/ios/",
    min_os_version: "11.0",
    layout,
    assets: LAUNCH_ASSETS,
    icon_assets: ICON_ASSETS,
    other_files: &[],
    target_devices: &["iphone", "ipad"],
};
