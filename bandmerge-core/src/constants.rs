/// Marks a coordinate that was not measured in a band.
pub const SENTINEL: f64 = -9999.0;

/// One arcsecond expressed in degrees, as used by the band-merge pipeline.
#[allow(clippy::excessive_precision)]
pub const ARCSEC_TO_DEG: f64 = 9.2592592592592588e-5;

/// Default cross-match radius in degrees (three times [`ARCSEC_TO_DEG`]).
pub const DEFAULT_RADIUS_DEG: f64 = 3.0 * ARCSEC_TO_DEG;

/// Number of leading epoch lines in a band-merge file.
pub const DEFAULT_HEADER_LINES: usize = 3;

/// Coordinate columns per row: ra/dec for each of the h, j and k bands.
pub const COORDINATE_COLUMNS: usize = 6;
