//! Raw rows of the two CSV sources, exactly as they appear on disk. Each record
//! converts into its domain counterpart from the `model` crate.

pub mod stations;
pub mod trips;

/// WGS84 latitude in decimal degrees.
///
/// # Examples
///
/// `42.363796` for 175 N Harvard St, Boston.
pub type Latitude = f64;

/// WGS84 longitude in decimal degrees.
///
/// # Examples
///
/// `-71.129164` for 175 N Harvard St, Boston.
pub type Longitude = f64;

/// Station identifiers are kept as text. Registries use codes such as `A32019`
/// while older trip logs use plain numbers such as `67`; reading both as strings
/// gives them one representation without guessing.
pub type IdString = String;
