use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{INVERT_MS, SPEEDBOOST_MS};

/// Timed status modifiers granted by special food.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Direction input is mirrored while active.
    InvertControls,
    /// Tick interval is shortened while active.
    SpeedBoost,
}

impl EffectKind {
    pub const ALL: [Self; 2] = [Self::InvertControls, Self::SpeedBoost];

    /// Duration granted by one application of this effect.
    #[must_use]
    pub fn default_duration_ms(self) -> u64 {
        match self {
            Self::InvertControls => INVERT_MS,
            Self::SpeedBoost => SPEEDBOOST_MS,
        }
    }
}

/// Ledger of absolute expiry timestamps per effect kind.
///
/// An effect is active strictly before its expiry; reapplying never moves an
/// expiry earlier.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    expires_at: BTreeMap<EffectKind, u64>,
}

impl Effects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.expires_at.clear();
    }

    /// Extends `kind` to at least `now_ms + duration_ms`.
    pub fn apply(&mut self, kind: EffectKind, now_ms: u64, duration_ms: u64) {
        let proposed = now_ms.saturating_add(duration_ms);
        let until = self.expires_at.entry(kind).or_insert(0);
        *until = (*until).max(proposed);
    }

    pub fn apply_default(&mut self, kind: EffectKind, now_ms: u64) {
        self.apply(kind, now_ms, kind.default_duration_ms());
    }

    #[must_use]
    pub fn is_active(&self, kind: EffectKind, now_ms: u64) -> bool {
        self.expires_at
            .get(&kind)
            .is_some_and(|&until| now_ms < until)
    }

    /// Milliseconds left on `kind`, or 0 when inactive.
    #[must_use]
    pub fn remaining_ms(&self, kind: EffectKind, now_ms: u64) -> u64 {
        self.expires_at
            .get(&kind)
            .map_or(0, |&until| until.saturating_sub(now_ms))
    }

    /// Absolute expiry of `kind`, if it has an entry.
    #[must_use]
    pub fn expires_at(&self, kind: EffectKind) -> Option<u64> {
        self.expires_at.get(&kind).copied()
    }

    /// Removes and returns every kind whose expiry is at or before `now_ms`.
    ///
    /// The result is ordered by [`EffectKind`].
    pub fn purge_expired(&mut self, now_ms: u64) -> Vec<EffectKind> {
        let expired: Vec<EffectKind> = self
            .expires_at
            .iter()
            .filter(|&(_, &until)| now_ms >= until)
            .map(|(&kind, _)| kind)
            .collect();

        for kind in &expired {
            self.expires_at.remove(kind);
        }
        expired
    }

    #[must_use]
    pub fn any_active(&self, now_ms: u64) -> bool {
        self.expires_at.values().any(|&until| now_ms < until)
    }
}

#[cfg(test)]
mod tests {
    use super::{EffectKind, Effects};
    use crate::config::{INVERT_MS, SPEEDBOOST_MS};

    #[test]
    fn default_invert_is_active_until_its_expiry_instant() {
        let mut effects = Effects::new();
        let t0 = 5_000;

        effects.apply_default(EffectKind::InvertControls, t0);

        assert!(effects.is_active(EffectKind::InvertControls, t0));
        assert!(effects.is_active(EffectKind::InvertControls, t0 + INVERT_MS - 1));
        assert!(!effects.is_active(EffectKind::InvertControls, t0 + INVERT_MS));
        assert!(!effects.is_active(EffectKind::SpeedBoost, t0));
    }

    #[test]
    fn reapplying_extends_but_never_shortens() {
        let mut effects = Effects::new();

        effects.apply(EffectKind::SpeedBoost, 0, 10_000);
        effects.apply(EffectKind::SpeedBoost, 2_000, 1_000);
        assert_eq!(effects.expires_at(EffectKind::SpeedBoost), Some(10_000));

        effects.apply_default(EffectKind::SpeedBoost, 4_000);
        assert_eq!(
            effects.expires_at(EffectKind::SpeedBoost),
            Some(4_000 + SPEEDBOOST_MS)
        );
    }

    #[test]
    fn remaining_time_is_clamped_at_zero() {
        let mut effects = Effects::new();
        effects.apply(EffectKind::InvertControls, 100, 50);

        assert_eq!(effects.remaining_ms(EffectKind::InvertControls, 120), 30);
        assert_eq!(effects.remaining_ms(EffectKind::InvertControls, 500), 0);
        assert_eq!(effects.remaining_ms(EffectKind::SpeedBoost, 120), 0);
    }

    #[test]
    fn purge_removes_exactly_the_expired_kinds() {
        let mut effects = Effects::new();
        effects.apply(EffectKind::InvertControls, 0, 100);
        effects.apply(EffectKind::SpeedBoost, 0, 300);

        assert!(effects.purge_expired(99).is_empty());

        let expired = effects.purge_expired(100);
        assert_eq!(expired, vec![EffectKind::InvertControls]);
        assert!(!effects.is_active(EffectKind::InvertControls, 100));
        assert!(effects.is_active(EffectKind::SpeedBoost, 100));

        // Already purged kinds are not reported twice.
        assert_eq!(effects.purge_expired(400), vec![EffectKind::SpeedBoost]);
        assert!(effects.purge_expired(500).is_empty());
    }

    #[test]
    fn any_active_and_clear() {
        let mut effects = Effects::new();
        assert!(!effects.any_active(0));

        effects.apply_default(EffectKind::SpeedBoost, 0);
        assert!(effects.any_active(1));
        assert!(!effects.any_active(SPEEDBOOST_MS));

        effects.clear();
        assert!(!effects.any_active(1));
        assert_eq!(effects.expires_at(EffectKind::SpeedBoost), None);
    }
}
