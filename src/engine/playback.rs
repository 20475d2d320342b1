//! Playback control and the per-frame animation step.

use std::time::Duration;

use super::FoldEngine;
use crate::error::FoldError;
use crate::scene::FoldTree;

impl FoldEngine {
    /// Advance playback by `dt` and pose the tree. Returns whether the tree
    /// changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.animator.tick(dt) {
            return false;
        }
        self.animator.apply(&mut self.tree);
        self.invalidate();
        true
    }

    /// [`Self::tick`] with the wall-clock time since the previous frame.
    pub fn advance_frame(&mut self) -> bool {
        let dt = self.timing.end_frame();
        self.tick(dt)
    }

    /// Start sweeping between flat and folded.
    pub fn play(&mut self) {
        self.timing.restart();
        self.animator.play();
    }

    /// Stop advancing progress.
    pub fn pause(&mut self) {
        self.animator.pause();
    }

    /// Play when idle, pause otherwise.
    pub fn toggle_playback(&mut self) {
        if self.animator.is_animating() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Animate toward `target` over the following frames.
    pub fn animate_to(&mut self, target: f32) -> Result<(), FoldError> {
        self.animator.animate_to(target)?;
        self.timing.restart();
        Ok(())
    }

    /// Jump to `progress` and pose the tree immediately.
    pub fn set_progress(&mut self, progress: f32) -> Result<(), FoldError> {
        self.animator.set_progress(progress)?;
        self.animator.apply(&mut self.tree);
        self.invalidate();
        Ok(())
    }

    /// Set the playback speed multiplier.
    pub fn set_speed(&mut self, speed: f32) {
        self.animator.set_speed(speed);
    }

    /// Flat, idle, every pivot at rest.
    pub fn reset(&mut self) {
        self.animator.reset(&mut self.tree);
        self.invalidate();
    }

    /// A copy of the tree posed at `progress`; live state is untouched.
    pub fn snapshot(&self, progress: f32) -> Result<FoldTree, FoldError> {
        if !progress.is_finite() {
            return Err(FoldError::InvalidProgress(progress));
        }
        Ok(self.animator.motion().posed(&self.tree, progress))
    }
}
