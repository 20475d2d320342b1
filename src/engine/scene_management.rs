//! State setters. Each one builds the replacement off to the side and
//! commits only on success.

use super::FoldEngine;
use crate::error::FoldError;
use crate::layout::{FoldType, Orientation, PaperSize};
use crate::scene::{MirrorOptions, TextureHandle};

impl FoldEngine {
    /// Change the sheet size.
    pub fn set_size(&mut self, size: PaperSize) -> Result<(), FoldError> {
        let state = self.state.clone().with_size(size);
        self.rebuild(state).inspect_err(|e| {
            log::warn!("rejected sheet size: {e}");
        })
    }

    /// Change the fold topology.
    pub fn set_fold_type(
        &mut self,
        fold_type: FoldType,
    ) -> Result<(), FoldError> {
        let state = self.state.clone().with_fold_type(fold_type);
        self.rebuild(state)
    }

    /// Select a topology by id. Unknown ids fall back to bi-fold; the
    /// returned warning says so.
    pub fn select_fold_type(
        &mut self,
        id: &str,
    ) -> Result<Option<FoldError>, FoldError> {
        let (fold_type, warning) = FoldType::resolve(id);
        self.set_fold_type(fold_type)?;
        Ok(warning)
    }

    /// Change the fold-axis orientation.
    pub fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) -> Result<(), FoldError> {
        let state = self.state.clone().with_orientation(orientation);
        self.rebuild(state)
    }

    /// Replace the artwork on either side. Both sides may share one handle.
    pub fn set_textures(
        &mut self,
        front: Option<TextureHandle>,
        back: Option<TextureHandle>,
    ) -> Result<(), FoldError> {
        let state = self.state.clone().with_textures(front, back);
        self.rebuild(state)
    }

    /// Change the per-side texture flips.
    pub fn set_mirror(
        &mut self,
        mirror: MirrorOptions,
    ) -> Result<(), FoldError> {
        let state = self.state.clone().with_mirror(mirror);
        self.rebuild(state)
    }
}
