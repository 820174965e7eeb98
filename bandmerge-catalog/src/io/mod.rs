//! Reading and writing band-merge text files.
//!
//! - [`reader`]: parse a file into a [`Catalog`](bandmerge_core::Catalog), dropping rows
//!   unmeasured in the selected band
//! - [`writer`]: serialize difference and union results as text or JSON

pub mod reader;
pub mod writer;

pub use reader::{parse_catalog, read_catalog, LoadOptions};
pub use writer::{
    format_scientific, write_catalog_json, write_catalog_text, write_merged_json,
    write_merged_text, write_to_path,
};
