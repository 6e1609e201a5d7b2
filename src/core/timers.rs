//! One-shot timers keyed per concern.
//!
//! Every timed effect in the game (stun, attack cooldown, post-death delay,
//! level exit wait) lives in a [`TimerSlots`] component owned by the entity it
//! affects. A slot holds at most one pending timer per key: scheduling a key
//! again replaces the pending timer, and a fired timer is removed before its
//! key is handed back, so no timer can fire twice.

use std::time::Duration;

use bevy::prelude::*;

/// Anything usable as a timer slot key.
pub trait TimerKey: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {}

impl<T: Copy + Eq + std::fmt::Debug + Send + Sync + 'static> TimerKey for T {}

/// Deferred-callback scheduler seen by gameplay logic.
///
/// Callbacks are not stored: the owner of the scheduler maps each expired key
/// back to the operation it stands for.
pub trait Scheduler<K> {
    /// Arm `key` to expire after `delay_secs`, replacing any pending instance.
    fn schedule(&mut self, key: K, delay_secs: f32);
    /// Drop the pending instance of `key`, if any.
    fn cancel(&mut self, key: K);
    /// Whether `key` is pending.
    fn is_active(&self, key: K) -> bool;
    /// Drop every pending timer. Must run before the owner is despawned.
    fn cancel_all(&mut self);
}

/// Timer slots backed by Bevy [`Timer`]s, ticked by the owning plugin.
#[derive(Component, Debug)]
pub struct TimerSlots<K: TimerKey> {
    slots: Vec<(K, Timer)>,
}

impl<K: TimerKey> Default for TimerSlots<K> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<K: TimerKey> TimerSlots<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds left on the pending instance of `key`.
    pub fn remaining_secs(&self, key: K) -> Option<f32> {
        self.slots
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, timer)| timer.remaining_secs())
    }

    pub fn pending(&self) -> usize {
        self.slots.len()
    }

    /// Advance all pending timers and return the keys that expired, in slot order.
    pub fn tick(&mut self, delta: Duration) -> Vec<K> {
        for (_, timer) in self.slots.iter_mut() {
            timer.tick(delta);
        }

        let mut fired = Vec::new();
        self.slots.retain(|(key, timer)| {
            if timer.finished() {
                fired.push(*key);
                false
            } else {
                true
            }
        });
        fired
    }
}

impl<K: TimerKey> Scheduler<K> for TimerSlots<K> {
    fn schedule(&mut self, key: K, delay_secs: f32) {
        let timer = Timer::from_seconds(delay_secs.max(0.0), TimerMode::Once);
        match self.slots.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = timer,
            None => self.slots.push((key, timer)),
        }
    }

    fn cancel(&mut self, key: K) {
        self.slots.retain(|(k, _)| *k != key);
    }

    fn is_active(&self, key: K) -> bool {
        self.slots.iter().any(|(k, _)| *k == key)
    }

    fn cancel_all(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Stun,
        Cooldown,
    }

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_timer_fires_once_after_delay() {
        let mut slots = TimerSlots::new();
        slots.schedule(Key::Stun, 0.5);

        assert!(slots.tick(secs(0.25)).is_empty());
        assert_eq!(slots.tick(secs(0.25)), vec![Key::Stun]);
        assert!(!slots.is_active(Key::Stun));
        assert!(slots.tick(secs(1.0)).is_empty());
    }

    #[test]
    fn test_rescheduling_replaces_instead_of_stacking() {
        let mut slots = TimerSlots::new();
        slots.schedule(Key::Stun, 1.0);
        slots.tick(secs(0.75));

        slots.schedule(Key::Stun, 0.5);

        assert_eq!(slots.pending(), 1);
        let remaining = slots.remaining_secs(Key::Stun).unwrap();
        assert!((remaining - 0.5).abs() < 1e-4, "remaining was {remaining}");
        assert!(slots.tick(secs(0.4)).is_empty());
        assert_eq!(slots.tick(secs(0.1)), vec![Key::Stun]);
    }

    #[test]
    fn test_cancel_drops_only_that_key() {
        let mut slots = TimerSlots::new();
        slots.schedule(Key::Stun, 0.1);
        slots.schedule(Key::Cooldown, 0.1);

        slots.cancel(Key::Stun);

        assert!(!slots.is_active(Key::Stun));
        assert!(slots.is_active(Key::Cooldown));
        assert_eq!(slots.tick(secs(0.2)), vec![Key::Cooldown]);
    }

    #[test]
    fn test_cancel_all_silences_everything() {
        let mut slots = TimerSlots::new();
        slots.schedule(Key::Stun, 0.1);
        slots.schedule(Key::Cooldown, 0.2);

        slots.cancel_all();

        assert_eq!(slots.pending(), 0);
        assert!(slots.tick(secs(1.0)).is_empty());
    }

    #[test]
    fn test_expired_keys_come_back_in_slot_order() {
        let mut slots = TimerSlots::new();
        slots.schedule(Key::Cooldown, 0.1);
        slots.schedule(Key::Stun, 0.1);

        assert_eq!(slots.tick(secs(0.1)), vec![Key::Cooldown, Key::Stun]);
    }

    #[test]
    fn test_zero_delay_fires_on_next_tick() {
        let mut slots = TimerSlots::new();
        slots.schedule(Key::Stun, 0.0);

        assert_eq!(slots.tick(Duration::ZERO), vec![Key::Stun]);
    }
}
