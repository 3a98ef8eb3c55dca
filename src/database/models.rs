use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Transponder polarization as stored in the database (0 = H, 1 = V).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarization {
    Horizontal,
    Vertical,
    Unknown(i64),
}

impl Polarization {
    pub fn from_db(raw: i64) -> Self {
        match raw {
            0 => Self::Horizontal,
            1 => Self::Vertical,
            other => Self::Unknown(other),
        }
    }
}

impl std::fmt::Display for Polarization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Horizontal => write!(f, "H"),
            Self::Vertical => write!(f, "V"),
            Self::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// Static reference data; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    pub id: i64,
    pub name: String,
    /// Orbital angle in tenths of a degree. Positive means East, except
    /// for a fixed set of "really West" angles stored as positive values
    /// (see `provider::tables::ANGLE_TO_POSITION`).
    pub angle: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteGroup {
    pub id: i64,
    pub label: String,
}

/// A channel as cached by the favorites editor: identity, display name
/// and the set of favorite-group ids it currently belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub favorites: BTreeSet<i64>,
}

/// A fully joined channel row, used by the enrichment pass and the
/// report export.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelRow {
    pub id: i64,
    pub name: String,
    pub satellite: String,
    pub angle: i64,
    pub frequency: u32,
    pub polarization: Polarization,
    pub symbol_rate: Option<i64>,
    pub network_name: Option<String>,
}

impl ChannelRow {
    /// The upstream database stores unnamed services as an empty string
    /// or the `"Unname"` placeholder; neither is worth enriching.
    pub fn has_usable_name(&self) -> bool {
        !self.name.is_empty() && self.name != "Unname"
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub id: i64,
    pub label: String,
    pub channel_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SatelliteSummary {
    pub id: i64,
    pub name: String,
    pub angle: i64,
    pub channel_count: i64,
}
