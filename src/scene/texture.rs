//! Texture references and per-side UV remapping.
//!
//! Source images are shared. Mirroring never touches the shared image: each
//! side gets its own [`TextureBinding`] holding a clone of the handle and its
//! own [`UvTransform`], so front and back can show the same picture with
//! different flips at the same time.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque reference to a decoded image owned by the host renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(Arc<str>);

impl TextureHandle {
    /// Handle keyed by the host's image id.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Host image id.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.0
    }

    /// Whether both handles point at the same underlying image allocation.
    #[must_use]
    pub fn shares_image(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Flip flags for one side of the sheet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct Mirror {
    /// Flip left/right.
    pub horizontal: bool,
    /// Flip top/bottom.
    pub vertical: bool,
}

/// Flip flags for both sides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct MirrorOptions {
    /// Front face.
    pub front: Mirror,
    /// Back face.
    pub back: Mirror,
}

/// Affine remap of mesh UVs: `uv * repeat + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvTransform {
    /// Added after scaling.
    pub offset: Vec2,
    /// Per-axis scale; -1 flips.
    pub repeat: Vec2,
}

impl UvTransform {
    /// No remapping.
    pub const IDENTITY: UvTransform = UvTransform {
        offset: Vec2::ZERO,
        repeat: Vec2::ONE,
    };

    /// Transform applying the given flips.
    #[must_use]
    pub fn mirrored(mirror: Mirror) -> Self {
        let mut t = Self::IDENTITY;
        if mirror.horizontal {
            t.repeat.x = -1.0;
            t.offset.x = 1.0;
        }
        if mirror.vertical {
            t.repeat.y = -1.0;
            t.offset.y = 1.0;
        }
        t
    }

    /// Remap one coordinate.
    #[must_use]
    pub fn apply(&self, uv: Vec2) -> Vec2 {
        uv * self.repeat + self.offset
    }
}

impl Default for UvTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A texture bound to one side of the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    /// Shared source image.
    pub handle: TextureHandle,
    /// This side's private coordinate transform.
    pub transform: UvTransform,
}

impl TextureBinding {
    /// Bind `handle` with the given flips.
    #[must_use]
    pub fn new(handle: &TextureHandle, mirror: Mirror) -> Self {
        Self {
            handle: handle.clone(),
            transform: UvTransform::mirrored(mirror),
        }
    }

    /// Sample coordinate for a mesh UV.
    #[must_use]
    pub fn map_uv(&self, uv: Vec2) -> Vec2 {
        self.transform.apply(uv)
    }
}
