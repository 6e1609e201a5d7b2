//! Animation driver for combatants.
//!
//! Sprites are flat placeholders, so nothing is blended or sampled here. The
//! [`Animator`] only keeps clip timing: it plays the attack override, reports
//! the clip's hit window and completion as [`AnimationSignal`]s, and holds
//! short reaction states (take-hit, death) that decide which pose to show.

use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use super::combatant::Reaction;
use crate::core::{check_delay, DataLoadError};

/// Override clips layered over the base pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideClip {
    Attack,
}

/// Clip timings loaded with the combatant definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClipTimings {
    /// Length of the attack override at speed 1.0
    pub attack_secs: f32,
    /// Fractions of the attack clip during which the hit-volume is live
    pub hit_window: (f32, f32),
    /// How long the take-hit reaction is shown
    pub take_hit_secs: f32,
}

impl Default for ClipTimings {
    fn default() -> Self {
        Self {
            attack_secs: 0.5,
            hit_window: (0.3, 0.7),
            take_hit_secs: 0.3,
        }
    }
}

impl ClipTimings {
    pub fn validate(&self, origin: &str) -> Result<(), DataLoadError> {
        check_delay(origin, "animation.attack_secs", self.attack_secs)?;
        check_delay(origin, "animation.take_hit_secs", self.take_hit_secs)
    }
}

/// Pose shown by the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pose {
    #[default]
    Idle,
    Run,
    Airborne,
    Attack,
    TakeHit,
    Dead,
}

/// Reported back to the combat systems by [`Animator::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSignal {
    HitWindowOpened,
    HitWindowClosed,
    OverrideEnded { clip: OverrideClip, completed: bool },
}

/// Animation collaborator seen by the combat logic.
pub trait AnimationPlayer {
    fn play_override(&mut self, clip: OverrideClip, speed: f32, start_secs: f32);
    fn stop_all_overrides(&mut self);
    fn jump_to_state(&mut self, state: Reaction);
}

#[derive(Debug, Clone)]
struct OverridePlayback {
    clip: OverrideClip,
    elapsed: f32,
    duration: f32,
    speed: f32,
    window_open: bool,
    window_done: bool,
}

impl OverridePlayback {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Animator {
    timings: ClipTimings,
    locomotion: Pose,
    reaction: Option<Timer>,
    dead: bool,
    playback: Option<OverridePlayback>,
    pending: Vec<AnimationSignal>,
}

impl Animator {
    pub fn new(timings: ClipTimings) -> Self {
        Self {
            timings,
            ..default()
        }
    }

    pub fn pose(&self) -> Pose {
        if self.dead {
            Pose::Dead
        } else if self.reaction.is_some() {
            Pose::TakeHit
        } else if self.playback.is_some() {
            Pose::Attack
        } else {
            self.locomotion
        }
    }

    /// Set the base pose driven by movement (idle, run, airborne).
    pub fn set_locomotion(&mut self, pose: Pose) {
        self.locomotion = pose;
    }

    pub fn is_playing_override(&self) -> bool {
        self.playback.is_some()
    }

    /// Advance clip time and collect the signals raised since the last tick.
    pub fn tick(&mut self, delta: Duration) -> Vec<AnimationSignal> {
        let mut signals = std::mem::take(&mut self.pending);
        let delta_secs = delta.as_secs_f32();

        if let Some(reaction) = self.reaction.as_mut() {
            if reaction.tick(delta).finished() {
                self.reaction = None;
            }
        }

        let Some(playback) = self.playback.as_mut() else {
            return signals;
        };

        playback.elapsed += delta_secs * playback.speed;
        let progress = playback.progress();
        let (open_at, close_at) = self.timings.hit_window;

        // A window never closes in the tick that opened it.
        let mut opened_now = false;
        if playback.clip == OverrideClip::Attack {
            if !playback.window_open && !playback.window_done && progress >= open_at {
                playback.window_open = true;
                opened_now = true;
                signals.push(AnimationSignal::HitWindowOpened);
            }
            let past_close = progress >= close_at || progress >= 1.0;
            if playback.window_open && !opened_now && past_close {
                playback.window_open = false;
                playback.window_done = true;
                signals.push(AnimationSignal::HitWindowClosed);
            }
        }

        if progress >= 1.0 && !playback.window_open {
            signals.push(AnimationSignal::OverrideEnded {
                clip: playback.clip,
                completed: true,
            });
            self.playback = None;
        }

        signals
    }

    fn clip_secs(&self, clip: OverrideClip) -> f32 {
        match clip {
            OverrideClip::Attack => self.timings.attack_secs,
        }
    }

    fn interrupt(&mut self) {
        let Some(playback) = self.playback.take() else {
            return;
        };
        if playback.window_open {
            self.pending.push(AnimationSignal::HitWindowClosed);
        }
        self.pending.push(AnimationSignal::OverrideEnded {
            clip: playback.clip,
            completed: false,
        });
    }
}

impl AnimationPlayer for Animator {
    fn play_override(&mut self, clip: OverrideClip, speed: f32, start_secs: f32) {
        self.interrupt();
        self.playback = Some(OverridePlayback {
            clip,
            elapsed: start_secs.max(0.0),
            duration: self.clip_secs(clip),
            speed: speed.max(0.0),
            window_open: false,
            window_done: false,
        });
    }

    fn stop_all_overrides(&mut self) {
        self.interrupt();
    }

    fn jump_to_state(&mut self, state: Reaction) {
        match state {
            Reaction::TakeHit => {
                self.reaction = Some(Timer::from_seconds(
                    self.timings.take_hit_secs,
                    TimerMode::Once,
                ));
            }
            Reaction::Die => {
                self.reaction = None;
                self.dead = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> Animator {
        Animator::new(ClipTimings {
            attack_secs: 1.0,
            hit_window: (0.25, 0.75),
            take_hit_secs: 0.5,
        })
    }

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_attack_reports_window_then_completion() {
        let mut anim = animator();
        anim.play_override(OverrideClip::Attack, 1.0, 0.0);
        assert_eq!(anim.pose(), Pose::Attack);

        assert!(anim.tick(secs(0.1)).is_empty());
        assert_eq!(anim.tick(secs(0.2)), vec![AnimationSignal::HitWindowOpened]);
        assert_eq!(anim.tick(secs(0.5)), vec![AnimationSignal::HitWindowClosed]);
        assert_eq!(
            anim.tick(secs(0.3)),
            vec![AnimationSignal::OverrideEnded {
                clip: OverrideClip::Attack,
                completed: true
            }]
        );
        assert!(!anim.is_playing_override());
        assert_eq!(anim.pose(), Pose::Idle);
    }

    #[test]
    fn test_speed_scales_clip_length() {
        let mut anim = animator();
        anim.play_override(OverrideClip::Attack, 2.0, 0.0);

        assert_eq!(anim.tick(secs(0.4)), vec![AnimationSignal::HitWindowOpened]);
        let signals = anim.tick(secs(0.5));

        assert!(signals.contains(&AnimationSignal::OverrideEnded {
            clip: OverrideClip::Attack,
            completed: true
        }));
    }

    #[test]
    fn test_long_frame_keeps_window_open_for_one_tick() {
        let mut anim = animator();
        anim.play_override(OverrideClip::Attack, 1.0, 0.0);

        assert!(anim.tick(secs(0.1)).is_empty());
        // Jumps from 0.1 straight past the close fraction
        assert_eq!(anim.tick(secs(0.7)), vec![AnimationSignal::HitWindowOpened]);
        assert_eq!(anim.tick(secs(0.1)), vec![AnimationSignal::HitWindowClosed]);
    }

    #[test]
    fn test_window_opened_at_clip_end_closes_before_completion() {
        let mut anim = animator();
        anim.play_override(OverrideClip::Attack, 1.0, 0.0);

        assert_eq!(anim.tick(secs(2.0)), vec![AnimationSignal::HitWindowOpened]);
        assert!(anim.is_playing_override());
        assert_eq!(
            anim.tick(Duration::ZERO),
            vec![
                AnimationSignal::HitWindowClosed,
                AnimationSignal::OverrideEnded {
                    clip: OverrideClip::Attack,
                    completed: true
                }
            ]
        );
    }

    #[test]
    fn test_stop_reports_interrupted_and_closes_window() {
        let mut anim = animator();
        anim.play_override(OverrideClip::Attack, 1.0, 0.0);
        anim.tick(secs(0.5));

        anim.stop_all_overrides();

        assert_eq!(
            anim.tick(Duration::ZERO),
            vec![
                AnimationSignal::HitWindowClosed,
                AnimationSignal::OverrideEnded {
                    clip: OverrideClip::Attack,
                    completed: false
                }
            ]
        );
    }

    #[test]
    fn test_stop_without_override_is_silent() {
        let mut anim = animator();
        anim.stop_all_overrides();
        assert!(anim.tick(secs(0.1)).is_empty());
    }

    #[test]
    fn test_take_hit_reaction_expires() {
        let mut anim = animator();
        anim.set_locomotion(Pose::Run);
        anim.jump_to_state(Reaction::TakeHit);
        assert_eq!(anim.pose(), Pose::TakeHit);

        anim.tick(secs(0.5));
        assert_eq!(anim.pose(), Pose::Run);
    }

    #[test]
    fn test_death_pose_sticks() {
        let mut anim = animator();
        anim.jump_to_state(Reaction::Die);
        anim.tick(secs(10.0));
        anim.set_locomotion(Pose::Run);
        assert_eq!(anim.pose(), Pose::Dead);
    }
}
