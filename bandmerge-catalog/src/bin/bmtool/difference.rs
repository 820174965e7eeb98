//! `bmtool diff`: remove confirmed sources from a band-merge file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bandmerge_catalog::io::{write_catalog_json, write_catalog_text, write_to_path};
use bandmerge_xmatch::CrossMatcher;
use log::info;

use crate::cli::{Cli, DiffArgs, OutputFormat};
use crate::{ensure_not_an_input, load_catalog};

pub fn run(args: &DiffArgs, cli: &Cli, matcher: &CrossMatcher) -> Result<()> {
    let inputs: Vec<&Path> = std::iter::once(args.input.as_path())
        .chain(args.filters.iter().map(PathBuf::as_path))
        .collect();
    ensure_not_an_input(&args.output, &inputs)?;
    let options = cli.load_options();

    info!("[INPUT]");
    let input = load_catalog(&args.input, &options)?;

    info!("[FILTERS]");
    let filters = args
        .filters
        .iter()
        .map(|path| load_catalog(path, &options))
        .collect::<Result<Vec<_>>>()?;

    info!("[MATCH]");
    let difference = matcher.difference(&input, &filters);

    info!("[OUTPUT]");
    info!(
        "- Writing {} sources to {}...",
        difference.len(),
        args.output.display()
    );
    write_to_path(&args.output, |w| match cli.format {
        OutputFormat::Text => write_catalog_text(w, &difference),
        OutputFormat::Json => write_catalog_json(w, &difference),
    })
    .with_context(|| format!("Failed to write {:?}", args.output))?;

    Ok(())
}
