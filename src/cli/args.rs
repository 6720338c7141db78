//! Command line argument parsing.
//!
//! Every option can also come from an environment variable or from the TOML
//! file passed with `--config`; flags win over the file.

use clap::Parser;
use std::path::PathBuf;

/// Assemble Info.plist for a macOS or iOS app bundle
#[derive(Parser, Debug, Default)]
#[command(
    name = "kodegen_bundler_infoplist",
    version,
    about = "Assemble Info.plist and verify asset catalogs for Apple app bundles",
    long_about = "Builds the Info.plist of <app-dir>/<app-name>.app from \
<source-dir>/<target>/Default-Info.plist (generating defaults when it is missing), \
stamps it with the installed Xcode toolchain and compiles asset catalogs with actool.

Usage:
  kodegen_bundler_infoplist --target ios --app-name Demo --main-class com/example/Main \\
      --source-dir src --build-root target/ios
  kodegen_bundler_infoplist --config infoplist.toml"
)]
pub struct Args {
    /// Target platform (macos or ios)
    #[arg(long, env = "INFOPLIST_TARGET", value_name = "TARGET")]
    pub target: Option<String>,

    /// Application name; the bundle is <app-dir>/<app-name>.app
    #[arg(long, env = "INFOPLIST_APP_NAME")]
    pub app_name: Option<String>,

    /// Main entry point, e.g. com/example/Main
    #[arg(long, env = "INFOPLIST_MAIN_CLASS")]
    pub main_class: Option<String>,

    /// SDK to probe (macosx, iphoneos, iphonesimulator)
    #[arg(long, env = "INFOPLIST_SDK")]
    pub sdk: Option<String>,

    /// Directory holding <target>/Default-Info.plist
    #[arg(long, env = "INFOPLIST_SOURCE_DIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory receiving generated defaults
    #[arg(long, env = "INFOPLIST_GEN_DIR")]
    pub gen_dir: Option<PathBuf>,

    /// Directory containing the .app bundle
    #[arg(long, env = "INFOPLIST_APP_DIR")]
    pub app_dir: Option<PathBuf>,

    /// Scratch directory
    #[arg(long, env = "INFOPLIST_TMP_DIR")]
    pub tmp_dir: Option<PathBuf>,

    /// Default for --gen-dir (<root>/gensrc), --app-dir (<root>) and --tmp-dir (<root>/tmp)
    #[arg(long, env = "INFOPLIST_BUILD_ROOT")]
    pub build_root: Option<PathBuf>,

    /// Directory with built-in resources (native/macosx, native/ios)
    #[arg(long, env = "INFOPLIST_RESOURCES")]
    pub resources: Option<PathBuf>,

    /// TOML file with default values for the options above
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only print errors
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
