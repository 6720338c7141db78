//! # Info.plist assembly for Apple bundles
//!
//! Builds the `Info.plist` of macOS and iOS `.app` bundles and verifies their
//! asset catalogs with Xcode's `actool`.
//!
//! ## Features
//!
//! - **Template merge**: A project `Default-Info.plist` is stamped with identity
//!   and toolchain keys while every other key keeps its order
//! - **Generated defaults**: Projects without a template get one, plus icon
//!   and launch image skeletons, ready to be copied into the sources
//! - **Asset catalogs**: Every `*.xcassets` is compiled once and its partial
//!   plist merged into the final document
//! - **Fail early**: Identity, template and executable problems are reported
//!   before the bundle is touched
//!
//! ## Usage
//!
//! ```bash
//! kodegen_bundler_infoplist --target ios --app-name Demo --main-class com/example/Main \
//!     --source-dir src --build-root target/ios
//! kodegen_bundler_infoplist --config infoplist.toml
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;
pub mod error;

pub use bundler::{InfoPlistAssembler, OrderedDictionary, PlistValue, ProcessedInfoPlist};
pub use cli::Args;
pub use error::{CliError, ConfigError, InfoPlistError, Result};
