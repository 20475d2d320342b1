//! Fold animation: scalar progress in, hinge poses out.
//!
//! [`FoldAnimator`] owns the progress value and advances it per frame
//! ([`PlaybackMode`]). [`FoldMotion`] maps a progress to per-hinge angles and
//! lifts for each topology and writes them onto a
//! [`FoldTree`](crate::scene::FoldTree). Easing curves live in
//! [`EasingFunction`].

mod animator;
mod easing;
mod motion;

pub use animator::{FoldAnimator, PlaybackMode};
pub use easing::EasingFunction;
pub use motion::{FoldMotion, HingePose, ROLL_STAGE_DELAY, ROLL_STAGE_SPAN};
