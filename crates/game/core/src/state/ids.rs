//! Content identifiers.
//!
//! Runtime state refers to definitions only by these ids; the definitions
//! themselves live in the content registry.

pub type RegionId = String;
pub type AnchorId = String;
pub type EventId = String;
pub type QuestId = String;
pub type ObjectiveId = String;
pub type CardId = String;
pub type FateCardId = String;
pub type EnemyId = String;
pub type HeroId = String;
pub type CurseId = String;
pub type ResourceId = String;
pub type Flag = String;

/// Unique handle of one physical card in the player's deck.
///
/// Two copies of the same [`CardId`] are distinct instances.
pub type CardUid = u32;
