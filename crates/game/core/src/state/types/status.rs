//! Status entries attached to field objects.
//!
//! Entries never merge: applying a status always appends an independent entry
//! that tracks its own duration. Numeric kinds stack additively, so the
//! combined effect of a kind is the sum over all active entries of that kind.
//!
//! # Tick-based Duration
//!
//! Finite entries count down once per tick at tick close and are removed
//! when they reach zero. An entry applied with a zero duration therefore
//! expires at the very next tick boundary.

use bitflags::bitflags;

use crate::action::Targeting;

use super::ObjectId;

/// Remaining lifetime of a status entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Duration {
    /// Remaining tick boundaries before expiry.
    Ticks(u32),
    /// Persists until removed explicitly or the holder leaves the field.
    Indefinite,
}

impl Duration {
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Ticks(_))
    }
}

/// Kinds of status entries.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    // ========================================================================
    // Numeric modifiers (stack additively)
    // ========================================================================
    /// Added to every attack the holder performs.
    AttackPointsModification(i32),

    /// Added to the holder's auto-action repeat count.
    AutoActionRepeatsModification(i32),

    /// Flat damage added to the holder's attacks after doubling.
    AdditionalDamageInflicted(i32),

    /// Added to the holder's counterattack points.
    CounterattackPointsModification(i32),

    /// Damage over time; deals its points each tick, then weakens by one.
    GradualWeakeningDot(i32),

    /// Added to the holder's max life points while active.
    MaxLifePointsModification(i32),

    /// Added to the holder's next attack only, consumed on use.
    OneTimeAttackPointModification(i32),

    // ========================================================================
    // Behavioral flags
    // ========================================================================
    /// Elapsed auto-action wait does not accrue.
    AutoActionWaitFrozen,

    /// The auto-action does not fire even when matured.
    Sealed,

    /// The holder's attacks deal double damage.
    DoubleDamageInflicted,

    /// Overrides the holder's base can-retreat flag.
    CanRetreatModification(bool),

    /// Substitutes the holder's directional targeting (confusion).
    TargetingModification(Targeting),
}

impl StatusKind {
    /// Short snake_case name used in logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    fn flag(&self) -> StatusFlags {
        match self {
            Self::AutoActionWaitFrozen => StatusFlags::WAIT_FROZEN,
            Self::Sealed => StatusFlags::SEALED,
            Self::DoubleDamageInflicted => StatusFlags::DOUBLE_DAMAGE,
            _ => StatusFlags::empty(),
        }
    }
}

bitflags! {
    /// Behavioral flags derived from the active status entries.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u8 {
        const WAIT_FROZEN = 1 << 0;
        const SEALED = 1 << 1;
        const DOUBLE_DAMAGE = 1 << 2;
    }
}

/// Skill that produced an aura entry.
///
/// Aura entries are recomputed on every formation change, so they are tagged
/// with their origin instead of being applied as regular stacking entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuraSource {
    pub owner: ObjectId,
    pub skill: u8,
}

/// A single status entry with its remaining duration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEntry {
    pub kind: StatusKind,
    pub duration: Duration,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aura: Option<AuraSource>,
}

impl StatusEntry {
    pub fn new(kind: StatusKind, duration: Duration) -> Self {
        Self {
            kind,
            duration,
            aura: None,
        }
    }

    pub fn ticks(kind: StatusKind, ticks: u32) -> Self {
        Self::new(kind, Duration::Ticks(ticks))
    }

    pub fn indefinite(kind: StatusKind) -> Self {
        Self::new(kind, Duration::Indefinite)
    }

    pub(crate) fn with_aura(mut self, aura: AuraSource) -> Self {
        self.aura = Some(aura);
        self
    }
}

/// Active status entries of one field object, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusEntries {
    entries: Vec<StatusEntry>,
}

impl StatusEntries {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = StatusEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Appends an entry. Existing entries of the same kind are left untouched.
    pub fn push(&mut self, entry: StatusEntry) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn flags(&self) -> StatusFlags {
        self.entries
            .iter()
            .fold(StatusFlags::empty(), |flags, entry| flags | entry.kind.flag())
    }

    pub fn has(&self, flag: StatusFlags) -> bool {
        self.flags().contains(flag)
    }

    fn sum(&self, points: impl Fn(&StatusKind) -> Option<i32>) -> i32 {
        self.entries
            .iter()
            .filter_map(|entry| points(&entry.kind))
            .sum()
    }

    pub fn attack_points_bonus(&self) -> i32 {
        self.sum(|kind| match kind {
            StatusKind::AttackPointsModification(points) => Some(*points),
            _ => None,
        })
    }

    pub fn one_time_attack_bonus(&self) -> i32 {
        self.sum(|kind| match kind {
            StatusKind::OneTimeAttackPointModification(points) => Some(*points),
            _ => None,
        })
    }

    pub fn additional_damage(&self) -> i32 {
        self.sum(|kind| match kind {
            StatusKind::AdditionalDamageInflicted(points) => Some(*points),
            _ => None,
        })
    }

    pub fn repeats_bonus(&self) -> i32 {
        self.sum(|kind| match kind {
            StatusKind::AutoActionRepeatsModification(points) => Some(*points),
            _ => None,
        })
    }

    pub fn counterattack_bonus(&self) -> i32 {
        self.sum(|kind| match kind {
            StatusKind::CounterattackPointsModification(points) => Some(*points),
            _ => None,
        })
    }

    pub fn max_life_bonus(&self) -> i32 {
        self.sum(|kind| match kind {
            StatusKind::MaxLifePointsModification(points) => Some(*points),
            _ => None,
        })
    }

    /// Points of every damage-over-time entry, in application order.
    pub fn dot_points(&self) -> Vec<i32> {
        self.entries
            .iter()
            .filter_map(|entry| match entry.kind {
                StatusKind::GradualWeakeningDot(points) if points > 0 => Some(points),
                _ => None,
            })
            .collect()
    }

    /// The most recently applied can-retreat override, if any.
    pub fn can_retreat_override(&self) -> Option<bool> {
        self.entries.iter().rev().find_map(|entry| match entry.kind {
            StatusKind::CanRetreatModification(can_retreat) => Some(can_retreat),
            _ => None,
        })
    }

    /// The most recently applied targeting override, if any.
    pub fn targeting_override(&self) -> Option<&Targeting> {
        self.entries.iter().rev().find_map(|entry| match &entry.kind {
            StatusKind::TargetingModification(targeting) => Some(targeting),
            _ => None,
        })
    }

    /// Removes every one-time attack bonus. Returns true if any was present.
    pub(crate) fn consume_one_time_attack(&mut self) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !matches!(entry.kind, StatusKind::OneTimeAttackPointModification(_)));
        self.entries.len() != before
    }

    /// Removes every aura entry regardless of its owner.
    pub(crate) fn clear_auras(&mut self) {
        self.entries.retain(|entry| entry.aura.is_none());
    }

    /// Weakens every damage-over-time entry by one point and returns the
    /// entries that ran out.
    pub(crate) fn weaken_dots(&mut self) -> Vec<StatusEntry> {
        for entry in &mut self.entries {
            if let StatusKind::GradualWeakeningDot(points) = &mut entry.kind {
                *points -= 1;
            }
        }
        self.drain_where(|entry| matches!(entry.kind, StatusKind::GradualWeakeningDot(p) if p <= 0))
    }

    /// Counts every finite entry down by one tick and returns the expired
    /// entries in application order.
    pub(crate) fn tick_down(&mut self) -> Vec<StatusEntry> {
        for entry in &mut self.entries {
            if let Duration::Ticks(remaining) = &mut entry.duration {
                *remaining = remaining.saturating_sub(1);
            }
        }
        self.drain_where(|entry| entry.duration == Duration::Ticks(0))
    }

    fn drain_where(&mut self, predicate: impl Fn(&StatusEntry) -> bool) -> Vec<StatusEntry> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|entry| predicate(entry));
        self.entries = kept;
        removed
    }
}
