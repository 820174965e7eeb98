//! `bmtool match`: list mutually matched sources of two band-merge files

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use bandmerge_core::Catalog;
use bandmerge_xmatch::CrossMatcher;
use log::info;
use serde::Serialize;

use crate::cli::{Cli, MatchArgs, OutputFormat};
use crate::load_catalog;

#[derive(Serialize)]
struct MatchedPair {
    left_idx: usize,
    right_idx: usize,
}

pub fn run(args: &MatchArgs, cli: &Cli, matcher: &CrossMatcher) -> Result<()> {
    let options = cli.load_options();

    info!("[INPUT]");
    let left = load_catalog(&args.left, &options)?;
    let right = load_catalog(&args.right, &options)?;

    let pairs = matched_rows(matcher, &left, &right);
    info!("{} mutual matches", pairs.len());

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
            let mut writer = BufWriter::new(file);
            write_pairs(&mut writer, &pairs, cli.format)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_pairs(&mut writer, &pairs, cli.format)?;
        }
    }

    Ok(())
}

/// Pairs of file row indices, in right-catalog order.
fn matched_rows(matcher: &CrossMatcher, left: &Catalog, right: &Catalog) -> Vec<MatchedPair> {
    matcher
        .match_records(left.records(), right.records())
        .into_iter()
        .map(|(i, j)| MatchedPair {
            left_idx: left[i].idx(),
            right_idx: right[j].idx(),
        })
        .collect()
}

fn write_pairs<W: Write>(writer: &mut W, pairs: &[MatchedPair], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for pair in pairs {
                writeln!(writer, "{} {}", pair.left_idx, pair.right_idx)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, pairs)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
