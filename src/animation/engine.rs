//! Time-driven tween engine

use super::tween::{sample, TweenSpec};
use crate::dom::{Document, ElementId, StyleProp};
use std::time::Duration;

/// Handle returned for every started tween, reported back on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl AnimationId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Visual-effect primitive used by controllers.
///
/// Completion is never synchronous: a started tween is reported by a later
/// call to [`Animator::advance`], even when its duration is zero.
#[cfg_attr(test, mockall::automock)]
pub trait Animator {
    /// Start a tween; `from` values are written immediately
    fn animate(&mut self, doc: &mut Document, spec: TweenSpec) -> AnimationId;

    /// Move time forward, returning tweens that finished during this step
    fn advance(&mut self, doc: &mut Document, dt: Duration) -> Vec<AnimationId>;

    /// Drop every running tween on `target` without reporting completion
    fn kill_tweens_of(&mut self, target: ElementId);

    fn is_running(&self, id: AnimationId) -> bool;
}

#[derive(Debug)]
struct ActiveTween {
    id: AnimationId,
    target: ElementId,
    tracks: Vec<(StyleProp, Vec<f32>)>,
    duration: Duration,
    elapsed: Duration,
    easing: super::Easing,
}

impl ActiveTween {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// Default [`Animator`]: interpolates style properties on each `advance`.
///
/// A new tween takes over the properties it animates from older tweens on the
/// same target; the older tweens keep running for their other properties and
/// still report completion.
#[derive(Debug, Default)]
pub struct TweenEngine {
    running: Vec<ActiveTween>,
    next_id: u64,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tweens still running
    pub fn active_count(&self) -> usize {
        self.running.len()
    }
}

impl Animator for TweenEngine {
    fn animate(&mut self, doc: &mut Document, spec: TweenSpec) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;

        for tween in self.running.iter_mut().filter(|t| t.target == spec.target) {
            tween.tracks.retain(|(prop, _)| !spec.animates(*prop));
        }

        let element = doc.element(spec.target);
        let tracks: Vec<(StyleProp, Vec<f32>)> = spec
            .tracks
            .iter()
            .map(|(prop, track)| (*prop, track.resolve(element.style(*prop))))
            .collect();

        doc.batch(|doc| {
            for (prop, frames) in &tracks {
                if let Some(first) = frames.first() {
                    doc.set_style(spec.target, *prop, *first);
                }
            }
        });

        tracing::trace!("Tween {id:?} started on {} ({:?})", spec.target, spec.duration);
        self.running.push(ActiveTween {
            id,
            target: spec.target,
            tracks,
            duration: spec.duration,
            elapsed: Duration::ZERO,
            easing: spec.easing,
        });
        id
    }

    fn advance(&mut self, doc: &mut Document, dt: Duration) -> Vec<AnimationId> {
        let mut finished = Vec::new();
        doc.batch(|doc| {
            for tween in &mut self.running {
                tween.elapsed = tween.elapsed.saturating_add(dt);
                let progress = tween.progress();
                let eased = tween.easing.apply(progress);
                for (prop, frames) in &tween.tracks {
                    let value = if progress >= 1.0 {
                        frames.last().copied().unwrap_or_else(|| prop.neutral())
                    } else {
                        sample(frames, eased)
                    };
                    doc.set_style(tween.target, *prop, value);
                }
                if progress >= 1.0 {
                    finished.push(tween.id);
                }
            }
        });
        self.running.retain(|t| !finished.contains(&t.id));
        finished
    }

    fn kill_tweens_of(&mut self, target: ElementId) {
        self.running.retain(|t| t.target != target);
    }

    fn is_running(&self, id: AnimationId) -> bool {
        self.running.iter().any(|t| t.id == id)
    }
}
