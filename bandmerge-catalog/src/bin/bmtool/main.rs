//! bmtool: band-merge catalog cross-matching CLI
//!
//! Loads band-merge files, runs a difference, union or plain match on the
//! selected band and writes the result.

mod cli;
mod difference;
mod matching;
mod union;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use bandmerge_catalog::io::{read_catalog, LoadOptions};
use bandmerge_core::{Catalog, Radius};
use bandmerge_xmatch::{CrossMatcher, LogObserver, MatchConfig};
use clap::Parser;
use cli::{Cli, Commands};
use flexi_logger::{Logger, LoggerHandle};
use log::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.quiet)?;

    let matcher = build_matcher(&cli)?;

    match &cli.command {
        Commands::Diff(args) => difference::run(args, &cli, &matcher),
        Commands::Union(args) => union::run(args, &cli, &matcher),
        Commands::Match(args) => matching::run(args, &cli, &matcher),
    }
}

/// Logs to stderr at info (warn with `--quiet`); `RUST_LOG` overrides.
fn init_logging(quiet: bool) -> anyhow::Result<LoggerHandle> {
    let level = if quiet { "warn" } else { "info" };
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .start()
        .context("Logger initialization failed")?;
    Ok(handle)
}

fn build_matcher(cli: &Cli) -> anyhow::Result<CrossMatcher> {
    let radius = Radius::new(cli.radius).context("Invalid --radius")?;
    let config = MatchConfig {
        radius,
        band: cli.band.into(),
        strategy: cli.strategy.into(),
        parallel: true,
    };
    Ok(CrossMatcher::from_config(config).with_observer(LogObserver))
}

pub(crate) fn load_catalog(path: &Path, options: &LoadOptions) -> anyhow::Result<Catalog> {
    info!("- Reading {}...", path.display());
    let catalog = read_catalog(path, options)
        .with_context(|| format!("Failed to read band-merge file: {:?}", path))?;
    info!(
        "Found {}/{} valid sources",
        catalog.len(),
        catalog.rows_read()
    );
    Ok(catalog)
}

/// Comparable form of `path`. Resolves through the parent directory when the
/// file itself does not exist yet.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(full) = path.canonicalize() {
        return full;
    }
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Refuses an output path that names one of the inputs.
pub(crate) fn ensure_not_an_input(output: &Path, inputs: &[&Path]) -> anyhow::Result<()> {
    let target = resolved(output);
    if inputs.iter().any(|input| resolved(input) == target) {
        bail!("Output {:?} would overwrite an input file", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_spellings_of_same_input_are_refused() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.dat");
        fs::write(&input, "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let dotted = dir.path().join(".").join("in.dat");
        let detour = dir.path().join("sub").join("..").join("in.dat");
        assert!(ensure_not_an_input(&dotted, &[input.as_path()]).is_err());
        assert!(ensure_not_an_input(&detour, &[input.as_path()]).is_err());
    }

    #[test]
    fn test_new_output_is_accepted() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.dat");
        fs::write(&input, "").unwrap();

        let output = dir.path().join("out.dat");
        assert!(ensure_not_an_input(&output, &[input.as_path()]).is_ok());
    }
}
