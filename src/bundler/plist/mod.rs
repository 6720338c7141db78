//! Order-preserving property list store.
//!
//! Info.plist documents are read into an [`OrderedDictionary`] of typed
//! [`PlistValue`]s, edited, and written back as XML or binary plists through the
//! `plist` crate. Key order survives every read, edit and write, which the
//! final metadata document relies on (`CFBundleVersion` must come first).
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_infoplist::bundler::{OrderedDictionary, PlistValue};
//! use std::path::Path;
//!
//! # fn example() -> kodegen_bundler_infoplist::bundler::Result<()> {
//! let mut dict = OrderedDictionary::open(Path::new("Default-Info.plist"))?;
//! dict.put("CFBundleName", "Demo");
//! dict.put("CFBundleSupportedPlatforms", PlistValue::Array(vec!["MacOSX".into()]));
//! dict.save_as_binary(Path::new("Demo.app/Contents/Info.plist"))?;
//! # Ok(())
//! # }
//! ```

mod dictionary;
mod value;

pub use dictionary::OrderedDictionary;
pub use value::{Number, PlistValue};
