//! Atomic resource transactions.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ResourceId, Resources};

/// Immutable bundle of named costs and gains.
///
/// A transaction is applied whole or not at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Transaction {
    costs: BTreeMap<ResourceId, i32>,
    gains: BTreeMap<ResourceId, i32>,
}

impl Transaction {
    pub fn free() -> Self {
        Self::default()
    }

    pub fn new(
        costs: impl IntoIterator<Item = (ResourceId, i32)>,
        gains: impl IntoIterator<Item = (ResourceId, i32)>,
    ) -> Self {
        Self {
            costs: costs.into_iter().collect(),
            gains: gains.into_iter().collect(),
        }
    }

    /// Builder: adds a cost (consumes self).
    #[must_use]
    pub fn with_cost(mut self, resource: impl Into<ResourceId>, amount: i32) -> Self {
        self.costs.insert(resource.into(), amount);
        self
    }

    /// Builder: adds a gain (consumes self).
    #[must_use]
    pub fn with_gain(mut self, resource: impl Into<ResourceId>, amount: i32) -> Self {
        self.gains.insert(resource.into(), amount);
        self
    }

    pub fn costs(&self) -> &BTreeMap<ResourceId, i32> {
        &self.costs
    }

    pub fn gains(&self) -> &BTreeMap<ResourceId, i32> {
        &self.gains
    }

    pub fn is_free(&self) -> bool {
        self.costs.values().all(|amount| *amount <= 0) && self.gains.is_empty()
    }
}

/// First unaffordable cost of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("insufficient {resource}: need {required}, have {available}")]
pub struct Shortfall {
    pub resource: ResourceId,
    pub required: i32,
    pub available: i32,
}

impl GameError for Shortfall {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "ECONOMY_INSUFFICIENT"
    }
}

/// Resource movement produced by a processed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceDelta {
    pub resource: ResourceId,
    pub before: i32,
    pub after: i32,
}

/// Stateless transaction processor.
#[derive(Clone, Copy, Debug, Default)]
pub struct EconomyManager;

impl EconomyManager {
    /// Every named cost is at most the current amount.
    pub fn can_afford(tx: &Transaction, resources: &Resources) -> bool {
        Self::shortfall(tx, resources).is_none()
    }

    /// First cost (in resource id order) that cannot be paid.
    pub fn shortfall(tx: &Transaction, resources: &Resources) -> Option<Shortfall> {
        tx.costs.iter().find_map(|(resource, required)| {
            let available = resources.get(resource);
            (*required > available).then(|| Shortfall {
                resource: resource.clone(),
                required: *required,
                available,
            })
        })
    }

    /// Resulting amounts if `tx` were applied, or the shortfall.
    ///
    /// Costs are deducted before gains are credited; gains respect caps.
    pub fn plan(tx: &Transaction, resources: &Resources) -> Result<Vec<ResourceDelta>, Shortfall> {
        if let Some(shortfall) = Self::shortfall(tx, resources) {
            return Err(shortfall);
        }
        let mut after: BTreeMap<&str, i32> = BTreeMap::new();
        for (resource, cost) in &tx.costs {
            let current = after
                .get(resource.as_str())
                .copied()
                .unwrap_or_else(|| resources.get(resource));
            after.insert(resource.as_str(), resources.clamp(resource, current - (*cost).max(0)));
        }
        for (resource, gain) in &tx.gains {
            let current = after
                .get(resource.as_str())
                .copied()
                .unwrap_or_else(|| resources.get(resource));
            after.insert(resource.as_str(), resources.clamp(resource, current.saturating_add(*gain)));
        }
        Ok(after
            .into_iter()
            .filter_map(|(resource, value)| {
                let before = resources.get(resource);
                (before != value).then(|| ResourceDelta {
                    resource: resource.to_owned(),
                    before,
                    after: value,
                })
            })
            .collect())
    }

    /// Applies `tx` if affordable. Returns `false` and leaves `resources`
    /// untouched otherwise.
    pub fn process(tx: &Transaction, resources: &mut Resources) -> bool {
        match Self::plan(tx, resources) {
            Ok(deltas) => {
                for delta in deltas {
                    resources.set(delta.resource, delta.after);
                }
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purse() -> Resources {
        let mut resources = Resources::new();
        resources.set("gold", 10);
        resources.set("faith", 4);
        resources.set("supplies", 2);
        resources
    }

    #[test]
    fn affordable_transaction_applies_all_costs() {
        let mut resources = purse();
        let tx = Transaction::free()
            .with_cost("gold", 5)
            .with_cost("faith", 4)
            .with_cost("supplies", 1)
            .with_gain("relic", 1);
        assert!(EconomyManager::process(&tx, &mut resources));
        assert_eq!(resources.get("gold"), 5);
        assert_eq!(resources.get("faith"), 0);
        assert_eq!(resources.get("supplies"), 1);
        assert_eq!(resources.get("relic"), 1);
    }

    #[test]
    fn one_missing_cost_applies_nothing() {
        let mut resources = purse();
        let before = resources.clone();
        let tx = Transaction::free()
            .with_cost("gold", 5)
            .with_cost("faith", 5)
            .with_cost("supplies", 1);
        assert!(!EconomyManager::can_afford(&tx, &resources));
        assert!(!EconomyManager::process(&tx, &mut resources));
        assert_eq!(resources, before);
    }

    #[test]
    fn shortfall_reports_first_missing_resource() {
        let resources = purse();
        let tx = Transaction::free().with_cost("supplies", 3).with_cost("gold", 20);
        let shortfall = EconomyManager::shortfall(&tx, &resources).unwrap();
        assert_eq!(shortfall.resource, "gold");
        assert_eq!(shortfall.required, 20);
        assert_eq!(shortfall.available, 10);
    }

    #[test]
    fn gains_respect_caps() {
        let mut resources = purse();
        resources.set_cap("faith", 5);
        let tx = Transaction::free().with_gain("faith", 10);
        assert!(EconomyManager::process(&tx, &mut resources));
        assert_eq!(resources.get("faith"), 5);
    }
}
