use std::collections::{BTreeMap, BTreeSet};

use crate::config::GameConfig;
use crate::env::Alignment;
use crate::pressure::PressureState;
use crate::time::TimeEngine;

use super::{AnchorId, Flag, RegionId};

/// Runtime state of the world map and its systemic values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub current_region: RegionId,
    pub clock: TimeEngine,
    /// World resonance on the Nav (-) / Prav (+) axis.
    pub resonance: i32,
    pub pressure: PressureState,
    pub regions: BTreeMap<RegionId, RegionState>,
    pub anchors: BTreeMap<AnchorId, AnchorState>,
    pub flags: BTreeSet<Flag>,
}

impl WorldState {
    pub fn day(&self) -> u32 {
        self.clock.current_time()
    }

    pub fn region(&self, id: &str) -> Option<&RegionState> {
        self.regions.get(id)
    }

    pub fn current(&self) -> Option<&RegionState> {
        self.regions.get(&self.current_region)
    }

    pub fn has_visited(&self, region: &str) -> bool {
        self.regions
            .get(region)
            .is_some_and(|state| state.visit_count > 0)
    }

    /// Whether `region` is covered by an active anchor.
    pub fn is_anchored(&self, region: &str) -> bool {
        self.anchors
            .values()
            .any(|anchor| anchor.active && anchor.region == region)
    }

    pub fn clamp_resonance(value: i32) -> i32 {
        value.clamp(-GameConfig::RESONANCE_LIMIT, GameConfig::RESONANCE_LIMIT)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionState {
    pub visit_count: u32,
    pub discovered: bool,
    /// 0 = stable, [`GameConfig::MAX_DEGRADATION`] = fully degraded.
    pub degradation: u8,
    pub flags: BTreeSet<Flag>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorState {
    pub region: RegionId,
    pub integrity: i32,
    pub active: bool,
    pub alignment: Alignment,
}

impl AnchorState {
    pub fn new(region: impl Into<RegionId>, integrity: i32, alignment: Alignment) -> Self {
        let integrity = integrity.clamp(0, GameConfig::MAX_ANCHOR_INTEGRITY);
        Self {
            region: region.into(),
            integrity,
            active: integrity > 0,
            alignment,
        }
    }
}
