use std::collections::BTreeMap;

use super::ResourceId;

/// Named integer resources with optional per-resource caps.
///
/// Missing entries read as zero. Amounts never go below zero and never exceed
/// their cap when one is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    amounts: BTreeMap<ResourceId, i32>,
    caps: BTreeMap<ResourceId, i32>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current amount of `resource` (0 when unknown).
    pub fn get(&self, resource: &str) -> i32 {
        self.amounts.get(resource).copied().unwrap_or(0)
    }

    pub fn cap(&self, resource: &str) -> Option<i32> {
        self.caps.get(resource).copied()
    }

    /// Clamps `value` into `[0, cap]` for `resource`.
    pub fn clamp(&self, resource: &str, value: i32) -> i32 {
        let value = value.max(0);
        match self.cap(resource) {
            Some(cap) => value.min(cap),
            None => value,
        }
    }

    /// Sets an amount, clamped. Returns the stored value.
    pub fn set(&mut self, resource: impl Into<ResourceId>, value: i32) -> i32 {
        let resource = resource.into();
        let value = self.clamp(&resource, value);
        self.amounts.insert(resource, value);
        value
    }

    pub fn set_cap(&mut self, resource: impl Into<ResourceId>, cap: i32) {
        let resource = resource.into();
        self.caps.insert(resource.clone(), cap.max(0));
        if let Some(amount) = self.amounts.get_mut(&resource) {
            *amount = (*amount).min(cap.max(0));
        }
    }

    /// Value `resource` would hold after adding `delta`, with clamping.
    pub fn preview(&self, resource: &str, delta: i32) -> i32 {
        self.clamp(resource, self.get(resource).saturating_add(delta))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceId, i32)> {
        self.amounts.iter().map(|(id, amount)| (id, *amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_resource_reads_zero() {
        let resources = Resources::new();
        assert_eq!(resources.get("gold"), 0);
    }

    #[test]
    fn set_respects_floor_and_cap() {
        let mut resources = Resources::new();
        resources.set_cap("health", 10);
        assert_eq!(resources.set("health", 15), 10);
        assert_eq!(resources.set("health", -3), 0);
        assert_eq!(resources.preview("health", 4), 4);
    }

    #[test]
    fn lowering_cap_trims_amount() {
        let mut resources = Resources::new();
        resources.set("faith", 8);
        resources.set_cap("faith", 5);
        assert_eq!(resources.get("faith"), 5);
    }
}
