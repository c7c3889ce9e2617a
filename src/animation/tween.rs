//! Tween descriptions

use super::easing::Easing;
use crate::dom::{ElementId, StyleProp};
use std::time::Duration;

/// How one property moves over the tween
#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    /// Jump to `from` when the tween starts, then move to `to`
    FromTo { from: f32, to: f32 },
    /// Move from the current value to `to`
    To(f32),
    /// Visit each value in turn, starting from the current value
    Keyframes(Vec<f32>),
}

impl Track {
    /// Resolve into explicit keyframes given the value at start time
    pub(crate) fn resolve(&self, current: f32) -> Vec<f32> {
        match self {
            Track::FromTo { from, to } => vec![*from, *to],
            Track::To(to) => vec![current, *to],
            Track::Keyframes(frames) => {
                let mut out = Vec::with_capacity(frames.len() + 1);
                out.push(current);
                out.extend_from_slice(frames);
                out
            }
        }
    }
}

/// Sample piecewise-linear keyframes at eased progress `p`
pub(crate) fn sample(frames: &[f32], p: f32) -> f32 {
    match frames {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (frames.len() - 1) as f32;
            let position = p.clamp(0.0, 1.0) * segments;
            let index = (position.floor() as usize).min(frames.len() - 2);
            let frac = position - index as f32;
            frames[index] + (frames[index + 1] - frames[index]) * frac
        }
    }
}

/// A request to animate properties of one element
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSpec {
    pub target: ElementId,
    pub tracks: Vec<(StyleProp, Track)>,
    pub duration: Duration,
    pub easing: Easing,
}

impl TweenSpec {
    pub fn new(target: ElementId, duration: Duration) -> Self {
        Self {
            target,
            tracks: Vec::new(),
            duration,
            easing: Easing::default(),
        }
    }

    pub fn from_to(mut self, prop: StyleProp, from: f32, to: f32) -> Self {
        self.tracks.push((prop, Track::FromTo { from, to }));
        self
    }

    pub fn to(mut self, prop: StyleProp, to: f32) -> Self {
        self.tracks.push((prop, Track::To(to)));
        self
    }

    pub fn keyframes(mut self, prop: StyleProp, frames: Vec<f32>) -> Self {
        self.tracks.push((prop, Track::Keyframes(frames)));
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn animates(&self, prop: StyleProp) -> bool {
        self.tracks.iter().any(|(p, _)| *p == prop)
    }
}
