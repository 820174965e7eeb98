//! Band-merge catalog files and the `bmtool` command-line tool.
//!
//! The matching itself lives in `bandmerge-xmatch`. This crate handles the
//! files around it:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`io::reader`] | [`read_catalog`](io::read_catalog), [`LoadOptions`](io::LoadOptions) |
//! | [`io::writer`] | Text (`%1.18e` columns) and JSON output for differences and unions |
//!
//! # Quick Start
//!
//! ```ignore
//! use bandmerge_catalog::io::{read_catalog, write_catalog_text, write_to_path, LoadOptions};
//! use bandmerge_xmatch::CrossMatcher;
//!
//! let options = LoadOptions::default();
//! let base = read_catalog("ibm.dat", &options)?;
//! let filters = vec![read_catalog("flt0.dat", &options)?];
//!
//! let diff = CrossMatcher::default().difference(&base, &filters);
//! write_to_path("diff.dat", |w| write_catalog_text(w, &diff))?;
//! ```
//!
//! # Binaries
//!
//! - **`bmtool`**: `diff`, `union` and `match` subcommands over band-merge files.

pub mod io;
