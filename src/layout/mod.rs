//! Panel layout: how a flat sheet is partitioned into hinged panels.
//!
//! [`calculate`] turns a fold topology, an orientation and a paper size
//! into a [`PanelConfig`]: an ordered list of [`PanelNode`]s whose parent
//! links form a forest rooted at the base panel(s). Everything here is
//! pure data; the transform tree in [`crate::scene`] is built from it.

mod calculator;

use std::fmt;
use std::str::FromStr;

pub use calculator::{calculate, calculate_with};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FoldError;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Enumerated fold topologies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum FoldType {
    /// One fold, two equal panels.
    #[default]
    BiFold,
    /// Accordion: three equal panels folding in alternating directions.
    TriFoldZ,
    /// Letter fold: three panels rolled inward, innermost slightly smaller.
    TriFoldRoll,
    /// Two quarter-width flaps closing over a half-width center panel.
    GateFold,
}

impl FoldType {
    /// Every supported topology, in UI order.
    pub const ALL: [FoldType; 4] = [
        FoldType::BiFold,
        FoldType::TriFoldZ,
        FoldType::TriFoldRoll,
        FoldType::GateFold,
    ];

    /// Stable string id (`bi-fold`, `tri-fold-z`, ...).
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::BiFold => "bi-fold",
            Self::TriFoldZ => "tri-fold-z",
            Self::TriFoldRoll => "tri-fold-roll",
            Self::GateFold => "gate-fold",
        }
    }

    /// Number of panels the topology produces.
    #[must_use]
    pub fn panel_count(self) -> usize {
        match self {
            Self::BiFold => 2,
            Self::TriFoldZ | Self::TriFoldRoll | Self::GateFold => 3,
        }
    }

    /// Lenient lookup: unknown ids fall back to [`FoldType::BiFold`].
    ///
    /// The fallback is never silent. It is logged and the
    /// [`FoldError::UnknownFoldType`] is handed back alongside the default
    /// so callers can surface it.
    #[must_use]
    pub fn resolve(id: &str) -> (Self, Option<FoldError>) {
        match id.parse() {
            Ok(fold_type) => (fold_type, None),
            Err(e) => {
                log::warn!("{e}; falling back to {}", Self::BiFold);
                (Self::BiFold, Some(e))
            }
        }
    }
}

impl FromStr for FoldType {
    type Err = FoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| FoldError::UnknownFoldType(s.to_owned()))
    }
}

impl fmt::Display for FoldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Which sheet dimension the panels are laid out along.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Fold lines run top to bottom; panels split the width.
    #[default]
    Vertical,
    /// Fold lines run left to right; panels split the height.
    Horizontal,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(format!("unknown orientation '{other}'")),
        }
    }
}

/// Flat sheet dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    /// Sheet width.
    pub width: f32,
    /// Sheet height.
    pub height: f32,
}

impl PaperSize {
    /// US Letter, 8.5 x 11 in.
    pub const LETTER: PaperSize = PaperSize::new(8.5, 11.0);
    /// US Legal, 8.5 x 14 in.
    pub const LEGAL: PaperSize = PaperSize::new(8.5, 14.0);
    /// Tabloid, 11 x 17 in.
    pub const TABLOID: PaperSize = PaperSize::new(11.0, 17.0);

    /// Sheet of the given width and height.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reject non-positive or non-finite dimensions.
    pub fn validate(self) -> Result<Self, FoldError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(FoldError::InvalidDimension {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Length of the fold axis for the given orientation.
    #[must_use]
    pub fn fold_length(self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Vertical => self.width,
            Orientation::Horizontal => self.height,
        }
    }

    /// Length perpendicular to the fold axis.
    #[must_use]
    pub fn across_length(self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Vertical => self.height,
            Orientation::Horizontal => self.width,
        }
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        Self::LETTER
    }
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// Which edge of a panel is its hinge line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotEdge {
    /// Near edge (lowest fold-axis coordinate).
    Left,
    /// Far edge.
    Right,
    /// Panel center; only used by the gate-fold base.
    Center,
}

/// Sign of the hinge rotation, seen from the panel's own hinge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldDirection {
    /// Rotates by `-angle`.
    Negative,
    /// No hinge; base panels.
    Rigid,
    /// Rotates by `+angle`.
    Positive,
}

impl FoldDirection {
    /// -1, 0 or 1.
    #[must_use]
    pub fn sign(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Rigid => 0.0,
            Self::Positive => 1.0,
        }
    }
}

/// One rigid rectangular region of the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelNode {
    /// Ordinal within the configuration; equals the panel's position.
    pub index: usize,
    /// Extent along the fold axis.
    pub width_along_fold: f32,
    /// Extent perpendicular to the fold axis.
    pub height_across_fold: f32,
    /// Distance from the fold-axis origin to the panel's near edge.
    pub offset_along_fold: f32,
    /// Hinge edge.
    pub pivot_edge: PivotEdge,
    /// Hinge rotation sign.
    pub fold_direction: FoldDirection,
    /// Panel this one hinges from. `None` (or itself) for base panels.
    pub parent_index: Option<usize>,
    /// Base panels never rotate relative to the world.
    pub is_base: bool,
    /// Perpendicular clearance applied as the panel folds, so a nested
    /// panel does not sit coplanar with the one it tucks under.
    pub nest_offset: f32,
}

impl PanelNode {
    /// Rigid base panel.
    #[must_use]
    pub fn base(
        index: usize,
        width: f32,
        across: f32,
        offset: f32,
        pivot_edge: PivotEdge,
    ) -> Self {
        Self {
            index,
            width_along_fold: width,
            height_across_fold: across,
            offset_along_fold: offset,
            pivot_edge,
            fold_direction: FoldDirection::Rigid,
            parent_index: None,
            is_base: true,
            nest_offset: 0.0,
        }
    }

    /// Panel hinged from `parent`.
    #[must_use]
    pub fn hinged(
        index: usize,
        width: f32,
        across: f32,
        offset: f32,
        pivot_edge: PivotEdge,
        parent: usize,
        fold_direction: FoldDirection,
    ) -> Self {
        Self {
            index,
            width_along_fold: width,
            height_across_fold: across,
            offset_along_fold: offset,
            pivot_edge,
            fold_direction,
            parent_index: Some(parent),
            is_base: false,
            nest_offset: 0.0,
        }
    }

    /// Set the nesting clearance.
    #[must_use]
    pub fn with_nest_offset(mut self, nest_offset: f32) -> Self {
        self.nest_offset = nest_offset;
        self
    }

    /// Far edge along the fold axis.
    #[must_use]
    pub fn end_along_fold(&self) -> f32 {
        self.offset_along_fold + self.width_along_fold
    }

    /// Midpoint along the fold axis.
    #[must_use]
    pub fn center_along_fold(&self) -> f32 {
        self.offset_along_fold + self.width_along_fold * 0.5
    }

    /// Fold-axis coordinate of the hinge line.
    #[must_use]
    pub fn hinge_along_fold(&self) -> f32 {
        match self.pivot_edge {
            PivotEdge::Left => self.offset_along_fold,
            PivotEdge::Right => self.end_along_fold(),
            PivotEdge::Center => self.center_along_fold(),
        }
    }

    /// Parent panel, treating a self reference as "no parent".
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent_index.filter(|&p| p != self.index)
    }
}

/// A complete panel partition of one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Topology that produced the panels.
    pub fold_type: FoldType,
    /// Fold-axis orientation.
    pub orientation: Orientation,
    /// Panels in fold-axis order.
    pub panels: Vec<PanelNode>,
    /// Sheet width in inches.
    pub total_width: f32,
    /// Sheet height in inches.
    pub total_height: f32,
}

/// Relative tolerance when checking that panels tile the fold axis.
const TILE_TOLERANCE: f32 = 1e-4;

impl PanelConfig {
    /// Assemble a configuration from externally built panels, validating
    /// the parent forest and the fold-axis partition.
    pub fn from_panels(
        fold_type: FoldType,
        orientation: Orientation,
        size: PaperSize,
        panels: Vec<PanelNode>,
    ) -> Result<Self, FoldError> {
        let size = size.validate()?;
        let config = Self {
            fold_type,
            orientation,
            panels,
            total_width: size.width,
            total_height: size.height,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sheet dimensions.
    #[must_use]
    pub fn size(&self) -> PaperSize {
        PaperSize::new(self.total_width, self.total_height)
    }

    /// Length of the fold axis.
    #[must_use]
    pub fn fold_length(&self) -> f32 {
        self.size().fold_length(self.orientation)
    }

    /// Indices of the base panels.
    pub fn base_panels(&self) -> impl Iterator<Item = usize> + '_ {
        self.panels.iter().filter(|p| p.is_base).map(|p| p.index)
    }

    /// Indices of panels hinged directly from `index`.
    pub fn children_of(
        &self,
        index: usize,
    ) -> impl Iterator<Item = usize> + '_ {
        self.panels
            .iter()
            .filter(move |p| p.parent() == Some(index))
            .map(|p| p.index)
    }

    /// Fold-axis coordinates of every hinge line, ascending.
    #[must_use]
    pub fn fold_lines(&self) -> Vec<f32> {
        let mut lines: Vec<f32> = self
            .panels
            .iter()
            .filter(|p| !p.is_base)
            .map(PanelNode::hinge_along_fold)
            .collect();
        lines.sort_by(f32::total_cmp);
        lines
    }

    /// Check the sheet size, every panel, the parent forest and the
    /// fold-axis partition.
    pub fn validate(&self) -> Result<(), FoldError> {
        self.fold_order().map(|_| ())
    }

    /// Order in which panels are built and folded: base panels first, then
    /// every panel after its parent. Runs the same checks as
    /// [`Self::validate`].
    pub fn fold_order(&self) -> Result<Vec<usize>, FoldError> {
        let size = self.size().validate()?;
        if self.panels.is_empty() {
            return Err(FoldError::malformed(0, "configuration has no panels"));
        }
        let across = size.across_length(self.orientation);
        for (pos, panel) in self.panels.iter().enumerate() {
            self.check_panel(pos, panel, across)?;
        }

        let order = self.topological_order()?;
        self.check_partition(size.fold_length(self.orientation))?;
        Ok(order)
    }

    fn check_panel(
        &self,
        pos: usize,
        panel: &PanelNode,
        across: f32,
    ) -> Result<(), FoldError> {
        if panel.index != pos {
            return Err(FoldError::malformed(
                pos,
                format!("index {} does not match position", panel.index),
            ));
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(panel.width_along_fold)
            || !positive(panel.height_across_fold)
        {
            return Err(FoldError::malformed(pos, "non-positive extent"));
        }
        if (panel.height_across_fold - across).abs()
            > TILE_TOLERANCE * across.max(1.0)
        {
            return Err(FoldError::malformed(
                pos,
                format!(
                    "spans {} across the fold axis, sheet spans {across}",
                    panel.height_across_fold
                ),
            ));
        }
        match (panel.is_base, panel.parent(), panel.fold_direction) {
            (true, Some(p), _) => Err(FoldError::malformed(
                pos,
                format!("base panel hinges from panel {p}"),
            )),
            (true, None, FoldDirection::Negative | FoldDirection::Positive) => {
                Err(FoldError::malformed(pos, "base panel has a fold direction"))
            }
            (false, None, _) => {
                Err(FoldError::malformed(pos, "non-base panel has no parent"))
            }
            (false, Some(p), _) if p >= self.panels.len() => Err(
                FoldError::malformed(pos, format!("parent {p} does not exist")),
            ),
            (false, Some(_), FoldDirection::Rigid) => Err(FoldError::malformed(
                pos,
                "hinged panel has no fold direction",
            )),
            _ => Ok(()),
        }
    }

    /// Topological order, base panels first. Fails on cycles.
    fn topological_order(&self) -> Result<Vec<usize>, FoldError> {
        let n = self.panels.len();
        let mut placed = vec![false; n];
        let mut order: Vec<usize> = self.base_panels().collect();
        if order.is_empty() {
            return Err(FoldError::malformed(0, "no base panel"));
        }
        for &i in &order {
            placed[i] = true;
        }

        while order.len() < n {
            let before = order.len();
            for panel in &self.panels {
                if placed[panel.index] {
                    continue;
                }
                if panel.parent().is_some_and(|p| placed[p]) {
                    placed[panel.index] = true;
                    order.push(panel.index);
                }
            }
            if order.len() == before {
                let stuck = placed.iter().position(|&p| !p).unwrap_or(0);
                return Err(FoldError::malformed(
                    stuck,
                    "parent chain never reaches a base panel",
                ));
            }
        }
        Ok(order)
    }

    /// Panels must tile `[0, fold_length]` without gaps or overlaps.
    fn check_partition(&self, length: f32) -> Result<(), FoldError> {
        let tolerance = TILE_TOLERANCE * length.max(1.0);
        let mut spans: Vec<&PanelNode> = self.panels.iter().collect();
        spans.sort_by(|a, b| {
            a.offset_along_fold.total_cmp(&b.offset_along_fold)
        });

        let mut cursor = 0.0_f32;
        for panel in spans {
            if (panel.offset_along_fold - cursor).abs() > tolerance {
                return Err(FoldError::malformed(
                    panel.index,
                    format!(
                        "starts at {} but previous panel ends at {cursor}",
                        panel.offset_along_fold
                    ),
                ));
            }
            cursor = panel.end_along_fold();
        }
        if (cursor - length).abs() > tolerance {
            return Err(FoldError::malformed(
                self.panels.len() - 1,
                format!("panels cover {cursor} of {length} in"),
            ));
        }
        Ok(())
    }
}
