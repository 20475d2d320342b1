use super::{build, FoldTree, MirrorOptions, TextureHandle};
use crate::error::FoldError;
use crate::layout::{
    calculate_with, FoldType, Orientation, PaperSize, PanelConfig,
};
use crate::options::{LayoutOptions, SceneOptions};

/// Everything a rebuild depends on, as one immutable value.
///
/// Setters consume the state and return a new one; the engine swaps it in
/// only after the new layout and tree have been produced successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldState {
    /// Flat sheet size.
    pub size: PaperSize,
    /// Fold topology.
    pub fold_type: FoldType,
    /// Fold-axis orientation.
    pub orientation: Orientation,
    /// Front-face artwork.
    pub front: Option<TextureHandle>,
    /// Back-face artwork.
    pub back: Option<TextureHandle>,
    /// Per-side flips.
    pub mirror: MirrorOptions,
}

impl FoldState {
    /// Untextured state.
    #[must_use]
    pub fn new(
        size: PaperSize,
        fold_type: FoldType,
        orientation: Orientation,
    ) -> Self {
        Self {
            size,
            fold_type,
            orientation,
            front: None,
            back: None,
            mirror: MirrorOptions::default(),
        }
    }

    /// Same state with a different sheet size.
    #[must_use]
    pub fn with_size(self, size: PaperSize) -> Self {
        Self { size, ..self }
    }

    /// Same state with a different topology.
    #[must_use]
    pub fn with_fold_type(self, fold_type: FoldType) -> Self {
        Self { fold_type, ..self }
    }

    /// Same state with a different orientation.
    #[must_use]
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    /// Same state with different artwork.
    #[must_use]
    pub fn with_textures(
        self,
        front: Option<TextureHandle>,
        back: Option<TextureHandle>,
    ) -> Self {
        Self {
            front,
            back,
            ..self
        }
    }

    /// Same state with different flips.
    #[must_use]
    pub fn with_mirror(self, mirror: MirrorOptions) -> Self {
        Self { mirror, ..self }
    }

    /// Panel layout for this state.
    pub fn layout(
        &self,
        options: &LayoutOptions,
    ) -> Result<PanelConfig, FoldError> {
        calculate_with(self.fold_type, self.orientation, self.size, options)
    }

    /// Transform tree for `config` with this state's artwork.
    pub fn build(
        &self,
        config: &PanelConfig,
        options: &SceneOptions,
    ) -> Result<FoldTree, FoldError> {
        build(
            config,
            self.front.as_ref(),
            self.back.as_ref(),
            self.mirror,
            options,
        )
    }
}

impl Default for FoldState {
    fn default() -> Self {
        Self::new(PaperSize::LETTER, FoldType::BiFold, Orientation::Vertical)
    }
}
