//! `bmtool union`: merge band-merge files in priority order

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bandmerge_catalog::io::{write_merged_json, write_merged_text, write_to_path};
use bandmerge_xmatch::CrossMatcher;
use log::info;

use crate::cli::{Cli, OutputFormat, UnionArgs};
use crate::{ensure_not_an_input, load_catalog};

pub fn run(args: &UnionArgs, cli: &Cli, matcher: &CrossMatcher) -> Result<()> {
    let inputs: Vec<&Path> = args.catalogs.iter().map(PathBuf::as_path).collect();
    ensure_not_an_input(&args.output, &inputs)?;
    let options = cli.load_options();

    info!("[INPUT]");
    let catalogs = args
        .catalogs
        .iter()
        .map(|path| load_catalog(path, &options))
        .collect::<Result<Vec<_>>>()?;

    info!("[MATCH]");
    let merged = matcher.union(&catalogs)?;

    info!("[OUTPUT]");
    for (bm_idx, catalog) in catalogs.iter().enumerate() {
        info!(
            "- {} ({}): {} sources kept",
            bm_idx,
            catalog.label(),
            merged.count_from(bm_idx)
        );
    }
    info!(
        "- Writing {} sources to {}...",
        merged.len(),
        args.output.display()
    );
    write_to_path(&args.output, |w| match cli.format {
        OutputFormat::Text => write_merged_text(w, &merged),
        OutputFormat::Json => write_merged_json(w, &merged),
    })
    .with_context(|| format!("Failed to write {:?}", args.output))?;

    Ok(())
}
