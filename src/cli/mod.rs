//! Command line interface for Info.plist assembly.
//!
//! Parses flags, merges them with an optional TOML file, runs the pipeline
//! against the installed Xcode toolchain and prints the outcome.

mod args;
mod config;
mod output;

pub use args::Args;
pub use config::{FileConfig, resolve_settings};
pub use output::OutputManager;

use crate::bundler::{ProcessedInfoPlist, Settings, TEMPLATE_FILE, process_info_plist};
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    execute(Args::parse_args()).await
}

/// Runs the pipeline for already parsed arguments.
pub async fn execute(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.quiet);
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = resolve_settings(&args, file)?;

    output.info(&format!(
        "Processing {} for {}",
        settings.bundle_root().display(),
        settings.platform()
    ))?;
    let processed = process_info_plist(&settings).await?;

    report(&output, &settings, &processed)?;
    Ok(0)
}

/// Prints the outcome of one run.
fn report(output: &OutputManager, settings: &Settings, processed: &ProcessedInfoPlist) -> Result<()> {
    if processed.freshly_initialized {
        output.warn(&format!(
            "No {} found, defaults generated in {}",
            TEMPLATE_FILE,
            settings.gen_platform_dir().display()
        ))?;
    }
    output.success("Info.plist processed")?;
    output.field("Template", &processed.template.display().to_string())?;
    output.field("Bundle ID", &processed.bundle_identifier)?;
    output.field("Info.plist", &processed.info_plist.display().to_string())?;
    output.field(
        "Asset catalogs",
        &format!(
            "{} compiled, {} partial plists merged",
            processed.catalogs.len(),
            processed.fragments_merged
        ),
    )?;
    Ok(())
}
