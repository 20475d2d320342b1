//! Per-topology partition rules.

use super::{
    FoldDirection, FoldType, Orientation, PanelConfig, PanelNode, PaperSize,
    PivotEdge,
};
use crate::error::FoldError;
use crate::options::LayoutOptions;

/// Panel layout with default tuning.
pub fn calculate(
    fold_type: FoldType,
    orientation: Orientation,
    size: PaperSize,
) -> Result<PanelConfig, FoldError> {
    calculate_with(fold_type, orientation, size, &LayoutOptions::default())
}

/// Panel layout for a topology, orientation and sheet.
///
/// The fold axis is the sheet width for vertical folds and the height for
/// horizontal ones; every panel spans the full other dimension. Panel widths
/// always sum to the fold-axis length.
pub fn calculate_with(
    fold_type: FoldType,
    orientation: Orientation,
    size: PaperSize,
    options: &LayoutOptions,
) -> Result<PanelConfig, FoldError> {
    let size = size.validate()?;
    let length = size.fold_length(orientation);
    let across = size.across_length(orientation);

    let panels = match fold_type {
        FoldType::BiFold => bi_fold(length, across),
        FoldType::TriFoldZ => z_fold(length, across),
        FoldType::TriFoldRoll => roll_fold(length, across, options),
        FoldType::GateFold => gate_fold(length, across),
    };

    let config = PanelConfig {
        fold_type,
        orientation,
        panels,
        total_width: size.width,
        total_height: size.height,
    };
    config.validate()?;
    Ok(config)
}

fn bi_fold(length: f32, across: f32) -> Vec<PanelNode> {
    let half = length / 2.0;
    vec![
        PanelNode::base(0, half, across, 0.0, PivotEdge::Right),
        PanelNode::hinged(
            1,
            length - half,
            across,
            half,
            PivotEdge::Left,
            0,
            FoldDirection::Negative,
        ),
    ]
}

/// Accordion: each hinge folds opposite to the previous one.
fn z_fold(length: f32, across: f32) -> Vec<PanelNode> {
    let third = length / 3.0;
    vec![
        PanelNode::base(0, third, across, 0.0, PivotEdge::Right),
        PanelNode::hinged(
            1,
            third,
            across,
            third,
            PivotEdge::Left,
            0,
            FoldDirection::Negative,
        ),
        PanelNode::hinged(
            2,
            length - 2.0 * third,
            across,
            2.0 * third,
            PivotEdge::Left,
            1,
            FoldDirection::Positive,
        ),
    ]
}

/// Letter fold: outer panel grows by the inset, innermost shrinks by it,
/// center takes the remainder. Both hinges roll the same way.
fn roll_fold(
    length: f32,
    across: f32,
    options: &LayoutOptions,
) -> Vec<PanelNode> {
    let third = length / 3.0;
    let max_inset = length / 12.0;
    let inset = options.roll_inset.clamp(0.0, max_inset);
    if inset < options.roll_inset {
        log::debug!(
            "roll inset {} clamped to {inset} for a {length} in fold axis",
            options.roll_inset
        );
    }

    let outer = third + inset;
    let inner = third - inset;
    let center = length - outer - inner;
    vec![
        PanelNode::base(0, outer, across, 0.0, PivotEdge::Right),
        PanelNode::hinged(
            1,
            center,
            across,
            outer,
            PivotEdge::Left,
            0,
            FoldDirection::Negative,
        ),
        PanelNode::hinged(
            2,
            inner,
            across,
            outer + center,
            PivotEdge::Left,
            1,
            FoldDirection::Negative,
        )
        .with_nest_offset(options.roll_nest_offset.max(0.0)),
    ]
}

/// Two quarter-width flaps hinged on either edge of a half-width center.
fn gate_fold(length: f32, across: f32) -> Vec<PanelNode> {
    let quarter = length / 4.0;
    let center = length - 2.0 * quarter;
    vec![
        PanelNode::hinged(
            0,
            quarter,
            across,
            0.0,
            PivotEdge::Right,
            1,
            FoldDirection::Negative,
        ),
        PanelNode::base(1, center, across, quarter, PivotEdge::Center),
        PanelNode::hinged(
            2,
            quarter,
            across,
            quarter + center,
            PivotEdge::Left,
            1,
            FoldDirection::Negative,
        ),
    ]
}
