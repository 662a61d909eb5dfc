//! Streak bookkeeping. A pure function of the command history; never reads RNG.

use crate::config::CombatConfig;

/// Disposition track moved by a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Track {
    Strike,
    Influence,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    Strike,
    Influence,
    Sacrifice,
}

impl From<Track> for CommandKind {
    fn from(track: Track) -> Self {
        match track {
            Track::Strike => Self::Strike,
            Track::Influence => Self::Influence,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Momentum {
    track: Option<Track>,
    streak: u32,
    previous: Option<CommandKind>,
}

/// Momentum terms of the power formula for one command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentumBonus {
    pub streak_bonus: i32,
    pub threat_bonus: i32,
    pub switch_penalty: i32,
    pub extends_streak: bool,
}

impl Momentum {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn track(&self) -> Option<Track> {
        self.track
    }

    pub const fn streak(&self) -> u32 {
        self.streak
    }

    pub const fn previous(&self) -> Option<CommandKind> {
        self.previous
    }

    /// Terms a command on `track` would receive, without recording it.
    ///
    /// Repeating a track: `min((len - 1) * streak_step, streak_cap)` where
    /// `len` counts the new command. Switching: `switch_penalty`, plus
    /// `threat_bonus` when leaving a strike streak of `threat_streak` or more
    /// for influence.
    pub fn preview(&self, track: Track, config: &CombatConfig) -> MomentumBonus {
        match self.track {
            Some(current) if current == track => {
                let repeats = i64::from(self.streak);
                let bonus = (repeats * i64::from(config.streak_step))
                    .min(i64::from(config.streak_cap))
                    .max(0);
                MomentumBonus {
                    streak_bonus: bonus as i32,
                    extends_streak: true,
                    ..MomentumBonus::default()
                }
            }
            Some(current) => {
                let threat = current == Track::Strike
                    && track == Track::Influence
                    && self.streak >= config.threat_streak;
                MomentumBonus {
                    switch_penalty: config.switch_penalty,
                    threat_bonus: if threat { config.threat_bonus } else { 0 },
                    ..MomentumBonus::default()
                }
            }
            None => MomentumBonus::default(),
        }
    }

    pub fn record(&mut self, track: Track) {
        if self.track == Some(track) {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.track = Some(track);
            self.streak = 1;
        }
        self.previous = Some(track.into());
    }

    /// Sacrifices leave the streak intact but block a following Echo.
    pub fn record_sacrifice(&mut self) {
        self.previous = Some(CommandKind::Sacrifice);
    }
}
