use crate::config::GameConfig;

/// Signed adversary state between neutralization (-100) and subjugation (+100).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Disposition(i32);

impl Disposition {
    pub const LIMIT: i32 = GameConfig::DISPOSITION_LIMIT;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(-Self::LIMIT, Self::LIMIT))
    }

    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Moves toward neutralization by `power`.
    pub fn strike(&mut self, power: i32) {
        *self = Self::new(self.0.saturating_sub(power.max(0)));
    }

    /// Moves toward subjugation by `power`.
    pub fn influence(&mut self, power: i32) {
        *self = Self::new(self.0.saturating_add(power.max(0)));
    }

    /// Moves toward zero by at most `amount`, never crossing it.
    pub fn recover(&mut self, amount: i32) {
        let amount = amount.max(0);
        self.0 = if self.0 < 0 {
            (self.0 + amount).min(0)
        } else {
            (self.0 - amount).max(0)
        };
    }

    pub const fn is_neutralized(&self) -> bool {
        self.0 <= -Self::LIMIT
    }

    pub const fn is_subjugated(&self) -> bool {
        self.0 >= Self::LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_at_both_ends() {
        let mut disposition = Disposition::new(-95);
        disposition.strike(20);
        assert_eq!(disposition.value(), -100);
        assert!(disposition.is_neutralized());
        disposition.influence(500);
        assert_eq!(disposition.value(), 100);
        assert!(disposition.is_subjugated());
    }

    #[test]
    fn recover_stops_at_zero() {
        let mut disposition = Disposition::new(-5);
        disposition.recover(10);
        assert_eq!(disposition.value(), 0);
        let mut disposition = Disposition::new(30);
        disposition.recover(10);
        assert_eq!(disposition.value(), 20);
    }
}
