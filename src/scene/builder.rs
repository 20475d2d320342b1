//! Build a [`FoldTree`] from a validated [`PanelConfig`].

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec2, Vec3};

use super::mesh::{Face, PanelMesh};
use super::texture::{MirrorOptions, TextureBinding, TextureHandle};
use super::uv::{mirror_along, mirror_rect, panel_rect};
use super::{FoldTree, NodeId, Pivot, TransformNode};
use crate::error::FoldError;
use crate::layout::{Orientation, PanelConfig, PanelNode, PivotEdge};
use crate::options::SceneOptions;

/// Local direction of increasing fold-axis coordinate.
fn fold_axis(orientation: Orientation) -> Vec3 {
    match orientation {
        Orientation::Vertical => Vec3::X,
        Orientation::Horizontal => Vec3::Y,
    }
}

/// Hinge axis for a panel extending in +fold-axis from its hinge. Both
/// orientations are chosen so a negative fold lifts the panel toward +Z.
fn hinge_axis(orientation: Orientation) -> Vec3 {
    match orientation {
        Orientation::Vertical => Vec3::Y,
        Orientation::Horizontal => Vec3::NEG_X,
    }
}

/// +1 when the panel extends forward from its hinge, -1 when it hangs
/// back from a far-edge hinge.
fn edge_sign(edge: PivotEdge) -> f32 {
    match edge {
        PivotEdge::Left | PivotEdge::Center => 1.0,
        PivotEdge::Right => -1.0,
    }
}

/// Quad half-size in local XY. The fold-axis extent lands on X for
/// vertical folds and on Y for horizontal ones.
fn half_extent(panel: &PanelNode, orientation: Orientation) -> Vec2 {
    let along = panel.width_along_fold * 0.5;
    let across = panel.height_across_fold * 0.5;
    match orientation {
        Orientation::Vertical => Vec2::new(along, across),
        Orientation::Horizontal => Vec2::new(across, along),
    }
}

/// Build the transform tree for `config`.
///
/// Nodes are created in fold order, so every pivot is attached to a node
/// that already exists. Base pivots carry the lie-flat tilt; hinged pivots
/// start at identity and only ever rotate about their hinge axis. When
/// [`SceneOptions::center`] is set the finished assembly is recentered in
/// world space, which needs the complete parent chain.
pub fn build(
    config: &PanelConfig,
    front: Option<&TextureHandle>,
    back: Option<&TextureHandle>,
    mirror: MirrorOptions,
    options: &SceneOptions,
) -> Result<FoldTree, FoldError> {
    let order = config.fold_order()?;
    let orientation = config.orientation;
    let length = config.fold_length();
    let axis_along = fold_axis(orientation);
    let lie_flat = if options.lie_flat {
        Quat::from_rotation_x(-FRAC_PI_2)
    } else {
        Quat::IDENTITY
    };

    let mut nodes: Vec<TransformNode> = Vec::with_capacity(order.len());
    let mut panel_nodes: Vec<Option<NodeId>> = vec![None; config.panels.len()];

    for &index in &order {
        let panel = &config.panels[index];
        let hinge = panel.hinge_along_fold();
        let id = nodes.len();

        let (parent, depth, pivot) = match panel.parent() {
            None => {
                let rest = lie_flat * (axis_along * hinge);
                (None, 0, Pivot::new(rest, lie_flat))
            }
            Some(p) => {
                let parent_id = panel_nodes[p].ok_or_else(|| {
                    FoldError::malformed(index, "parent not yet built")
                })?;
                let parent_center = config.panels[p].center_along_fold();
                let rest = axis_along * (hinge - parent_center);
                let depth = nodes[parent_id].depth + 1;
                (Some(parent_id), depth, Pivot::new(rest, Quat::IDENTITY))
            }
        };

        let front_uv = panel_rect(panel, length, orientation);
        let back_uv = mirror_rect(front_uv, orientation);
        let half = half_extent(panel, orientation);

        nodes.push(TransformNode {
            panel: panel.clone(),
            parent,
            children: Vec::new(),
            depth,
            pivot,
            axis: hinge_axis(orientation) * edge_sign(panel.pivot_edge),
            fold_normal: Vec3::Z * -panel.fold_direction.sign(),
            content_offset: axis_along * (panel.center_along_fold() - hinge),
            front: PanelMesh::quad(Face::Front, half, |f| front_uv.at(f)),
            back: PanelMesh::quad(Face::Back, half, |f| {
                mirror_along(front_uv.at(f), orientation)
            }),
            front_uv,
            back_uv,
        });
        if let Some(parent_id) = parent {
            nodes[parent_id].children.push(id);
        }
        panel_nodes[index] = Some(id);
    }

    let panel_nodes = panel_nodes
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            id.ok_or_else(|| FoldError::malformed(i, "panel was never built"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut tree = FoldTree {
        fold_type: config.fold_type,
        orientation,
        nodes,
        panel_nodes,
        root_offset: Vec3::ZERO,
        front_material: front.map(|h| TextureBinding::new(h, mirror.front)),
        back_material: back.map(|h| TextureBinding::new(h, mirror.back)),
    };
    if options.center {
        tree.recenter();
    }

    log::debug!(
        "built {} tree: {} panels, {:?}, root offset {:?}",
        config.fold_type,
        tree.len(),
        orientation,
        tree.root_offset
    );
    Ok(tree)
}
