use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dx_cli::config::Settings;
use dx_cli::pipeline::{ExtractRequest, ExtractResult, output_dir, run_extract};
use dx_dictionary::load_default_dictionary;
use dx_output::{OutputFormat, clean_outputs, convert, default_output_path};
use tracing::info;

use crate::cli::{CleanArgs, DictionaryArgs, ExtractArgs, FormatArgs, PipelineArgs};
use crate::summary::{print_dictionary, print_extract_summary};

pub fn run_extract_command(args: &ExtractArgs, settings: &Settings) -> Result<ExtractResult> {
    let request = extract_request(args, settings)?;
    let result = run_extract(&request)?;
    print_extract_summary(&result);
    Ok(result)
}

pub fn run_format(args: &FormatArgs) -> Result<()> {
    let format = OutputFormat::from(args.format_type);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, format));
    format_output(&args.input, format, &output)
}

pub fn run_clean(args: &CleanArgs) -> Result<()> {
    clean_dir(&args.dir)
}

pub fn run_pipeline(args: &PipelineArgs, settings: &Settings) -> Result<()> {
    if args.clean {
        clean_dir(output_dir(&args.extract.output))?;
    }
    let result = run_extract_command(&args.extract, settings)?;
    if let Some(format_type) = args.format_type {
        let format = OutputFormat::from(format_type);
        let output = default_output_path(&result.output, format);
        format_output(&result.output, format, &output)?;
    }
    Ok(())
}

pub fn run_dictionary(args: &DictionaryArgs, settings: &Settings) -> Result<()> {
    let path = args.dictionary.as_deref().or(settings.dictionary.as_deref());
    let loaded = load_default_dictionary(path).context("load drug dictionary")?;
    print_dictionary(&loaded);
    Ok(())
}

fn extract_request(args: &ExtractArgs, settings: &Settings) -> Result<ExtractRequest> {
    let config = args
        .scan
        .overrides()
        .apply(settings.scan.clone())
        .context("scan options")?;
    let dictionary: Option<PathBuf> = args
        .scan
        .dictionary
        .clone()
        .or_else(|| settings.dictionary.clone());
    Ok(ExtractRequest {
        input: args.input.clone(),
        id_column: args.id_column.clone(),
        target_column: args.target_column.clone(),
        output: args.output.clone(),
        dictionary,
        config,
        show_progress: !args.no_progress,
    })
}

fn format_output(input: &Path, format: OutputFormat, output: &Path) -> Result<()> {
    let count = convert(input, format, output)
        .with_context(|| format!("convert {} to {format}", input.display()))?;
    println!("Wrote {count} matches to {}", output.display());
    Ok(())
}

fn clean_dir(dir: &Path) -> Result<()> {
    let removed = clean_outputs(dir).with_context(|| format!("clean {}", dir.display()))?;
    if removed.is_empty() {
        println!("Nothing to clean in {}", dir.display());
    }
    for path in &removed {
        println!("Removed {}", path.display());
    }
    info!(dir = %dir.display(), removed = removed.len(), "clean complete");
    Ok(())
}
