//! Region and anchor definitions.

use crate::economy::Transaction;
use crate::state::{AnchorId, RegionId};

/// Position of a definition or zone on the Nav↔Prav axis.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Alignment {
    Nav,
    #[default]
    Yav,
    Prav,
}

impl Alignment {
    /// Sign of the alignment on the resonance axis (-1, 0, +1).
    pub const fn sign(&self) -> i32 {
        match self {
            Self::Nav => -1,
            Self::Yav => 0,
            Self::Prav => 1,
        }
    }
}

/// Static description of a region.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegionDefinition {
    pub id: RegionId,
    /// Free-form type used by event filters (e.g. "forest", "settlement").
    pub region_type: String,
    /// Regions reachable by a single travel action.
    pub neighbors: Vec<RegionId>,
    /// Days spent travelling into this region.
    pub travel_days: u32,
    /// Resources spent travelling into this region.
    pub travel_cost: Transaction,
    /// Anchor protecting this region from degradation.
    pub anchor: Option<AnchorId>,
    pub starts_discovered: bool,
}

impl Default for RegionDefinition {
    fn default() -> Self {
        Self {
            id: RegionId::new(),
            region_type: String::new(),
            neighbors: Vec::new(),
            travel_days: 1,
            travel_cost: Transaction::free(),
            anchor: None,
            starts_discovered: false,
        }
    }
}

/// Static description of an anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnchorDefinition {
    pub id: AnchorId,
    pub region: RegionId,
    pub alignment: Alignment,
    pub initial_integrity: i32,
    pub strengthen_cost: Transaction,
}

impl Default for AnchorDefinition {
    fn default() -> Self {
        Self {
            id: AnchorId::new(),
            region: RegionId::new(),
            alignment: Alignment::Yav,
            initial_integrity: 100,
            strengthen_cost: Transaction::free(),
        }
    }
}
