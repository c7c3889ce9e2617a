//! Visual-effect primitive
//!
//! Tweens interpolate numeric style properties of document elements over
//! time. Time only moves when the host calls [`Animator::advance`], which makes
//! every transition deterministic under test.

mod easing;
mod engine;
mod tween;

pub use easing::Easing;
pub use engine::{AnimationId, Animator, TweenEngine};
pub use tween::{Track, TweenSpec};

#[cfg(test)]
pub use engine::MockAnimator;
