//! Photometric band selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BandMergeError;

/// One of the three photometric bands carried by a band-merge record.
///
/// The selected band decides which `(ra, dec)` pair the matcher compares;
/// the other two bands are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    H,
    J,
    #[default]
    K,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::H, Band::J, Band::K];

    /// Position of this band's ra column in a band-merge row (dec follows it).
    pub fn column_offset(self) -> usize {
        match self {
            Band::H => 0,
            Band::J => 2,
            Band::K => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Band::H => "h",
            Band::J => "j",
            Band::K => "k",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = BandMergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" => Ok(Band::H),
            "j" => Ok(Band::J),
            "k" => Ok(Band::K),
            other => Err(BandMergeError::configuration(
                "band",
                &format!("unknown band '{}', expected one of h, j, k", other),
            )),
        }
    }
}
