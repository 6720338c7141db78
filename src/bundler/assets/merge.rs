//! Folding partial Info.plist fragments into the working document.

use crate::bundler::{error::Result, plist::OrderedDictionary, utils::fs};
use std::path::Path;

/// Merges every `*.plist` fragment below `scratch_dir` into `document`.
///
/// Fragments are applied in path order and key by key, so when two fragments
/// declare the same key the later one wins. Existing keys keep their position.
/// A fragment that cannot be parsed aborts the merge with
/// [`Error::Parse`](crate::bundler::Error::Parse). Returns the number of
/// fragments merged; a missing scratch directory merges nothing.
pub fn merge_fragments(scratch_dir: &Path, document: &mut OrderedDictionary) -> Result<usize> {
    if !scratch_dir.is_dir() {
        return Ok(0);
    }

    let fragments = fs::files_with_suffix(scratch_dir, ".plist")?;
    for fragment in &fragments {
        let partial = OrderedDictionary::open(fragment)?;
        log::debug!(
            "Merging {} keys from {}",
            partial.len(),
            fragment.display()
        );
        for (key, value) in partial {
            document.put(key, value);
        }
    }
    Ok(fragments.len())
}
