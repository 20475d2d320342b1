//! Renderable fold tree: one hinge transform per panel.
//!
//! The tree is an arena of [`TransformNode`]s stored in fold order, so a
//! node's parent always precedes it. Each node owns
//!
//! - a [`Pivot`] sitting on the physical fold line, expressed in the parent
//!   panel's content frame (or the assembly frame for a base panel),
//! - a content offset moving from the hinge to the panel center,
//! - a front and a back [`PanelMesh`] centered on that content origin.
//!
//! World placement is `root_offset * pivot * content` composed down the
//! parent chain, so rotating one hinge carries every descendant rigidly.
//! Structure is fixed once built; only pivot rotation and translation can be
//! changed afterwards, through [`FoldTree::hinges_mut`].

mod bounds;
mod builder;
mod mesh;
mod state;
mod texture;
pub mod uv;

pub use bounds::Aabb;
pub use builder::build;
use glam::{Mat4, Quat, Vec3};
pub use mesh::{Face, PanelMesh, PanelVertex};
pub use state::FoldState;
pub use texture::{
    Mirror, MirrorOptions, TextureBinding, TextureHandle, UvTransform,
};
pub use uv::UvRect;

use crate::layout::{FoldDirection, FoldType, Orientation, PanelNode};

/// Index of a node in [`FoldTree::nodes`].
pub type NodeId = usize;

/// Hinge transform of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    /// Current position in the parent frame.
    pub translation: Vec3,
    /// Current orientation in the parent frame.
    pub rotation: Quat,
    rest_translation: Vec3,
    base_rotation: Quat,
}

impl Pivot {
    pub(crate) fn new(rest_translation: Vec3, base_rotation: Quat) -> Self {
        Self {
            translation: rest_translation,
            rotation: base_rotation,
            rest_translation,
            base_rotation,
        }
    }

    /// Position on the flat sheet.
    #[must_use]
    pub fn rest_translation(&self) -> Vec3 {
        self.rest_translation
    }

    /// Fixed orientation: the lie-flat tilt for base panels, identity for
    /// every hinged panel.
    #[must_use]
    pub fn base_rotation(&self) -> Quat {
        self.base_rotation
    }

    /// Back to the flat-sheet pose.
    pub fn reset(&mut self) {
        self.translation = self.rest_translation;
        self.rotation = self.base_rotation;
    }

    /// Local transform (translate after rotate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

/// Read-only hinge metadata handed to the animation code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HingeInfo {
    /// Node in the tree.
    pub node: NodeId,
    /// Panel index in the source configuration.
    pub panel: usize,
    /// Base panels never rotate.
    pub is_base: bool,
    /// Rotation sign.
    pub fold_direction: FoldDirection,
    /// Unit rotation axis in the parent frame, already flipped for panels
    /// hinged on their far edge.
    pub axis: Vec3,
    /// Unit sheet normal pointing to the side the panel folds toward.
    /// Zero for base panels.
    pub fold_normal: Vec3,
    /// Perpendicular clearance reached at full local progress.
    pub nest_offset: f32,
    /// Hinges between this panel and its base.
    pub depth: usize,
    /// Whether no panel in the tree sits deeper.
    pub innermost: bool,
}

/// Renderable counterpart of one [`PanelNode`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransformNode {
    pub(crate) panel: PanelNode,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) depth: usize,
    pub(crate) pivot: Pivot,
    pub(crate) axis: Vec3,
    pub(crate) fold_normal: Vec3,
    pub(crate) content_offset: Vec3,
    pub(crate) front: PanelMesh,
    pub(crate) back: PanelMesh,
    pub(crate) front_uv: UvRect,
    pub(crate) back_uv: UvRect,
}

impl TransformNode {
    /// Source panel.
    #[must_use]
    pub fn panel(&self) -> &PanelNode {
        &self.panel
    }

    /// Node this one is attached to.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Nodes attached to this one.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Hinges between this node and its base.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Current hinge transform.
    #[must_use]
    pub fn pivot(&self) -> &Pivot {
        &self.pivot
    }

    /// Offset from the hinge to the panel center, in the pivot frame.
    #[must_use]
    pub fn content_offset(&self) -> Vec3 {
        self.content_offset
    }

    /// Front quad.
    #[must_use]
    pub fn front(&self) -> &PanelMesh {
        &self.front
    }

    /// Back quad.
    #[must_use]
    pub fn back(&self) -> &PanelMesh {
        &self.back
    }

    /// Texture rectangle of the front quad.
    #[must_use]
    pub fn front_uv(&self) -> UvRect {
        self.front_uv
    }

    /// Texture rectangle of the back quad.
    #[must_use]
    pub fn back_uv(&self) -> UvRect {
        self.back_uv
    }
}

/// World transforms of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeWorld {
    /// Hinge frame.
    pub pivot: Mat4,
    /// Panel geometry frame.
    pub content: Mat4,
}

/// The built tree for one [`FoldState`].
#[derive(Debug, Clone, PartialEq)]
pub struct FoldTree {
    pub(crate) fold_type: FoldType,
    pub(crate) orientation: Orientation,
    pub(crate) nodes: Vec<TransformNode>,
    pub(crate) panel_nodes: Vec<NodeId>,
    pub(crate) root_offset: Vec3,
    pub(crate) front_material: Option<TextureBinding>,
    pub(crate) back_material: Option<TextureBinding>,
}

impl FoldTree {
    /// Topology the tree was built for.
    #[must_use]
    pub fn fold_type(&self) -> FoldType {
        self.fold_type
    }

    /// Fold-axis orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Nodes in fold order; parents precede children.
    #[must_use]
    pub fn nodes(&self) -> &[TransformNode] {
        &self.nodes
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&TransformNode> {
        self.nodes.get(id)
    }

    /// Node id of a configuration panel.
    #[must_use]
    pub fn node_id_for_panel(&self, panel: usize) -> Option<NodeId> {
        self.panel_nodes.get(panel).copied()
    }

    /// Node of a configuration panel.
    #[must_use]
    pub fn node_for_panel(&self, panel: usize) -> Option<&TransformNode> {
        self.node_id_for_panel(panel).and_then(|id| self.node(id))
    }

    /// Base panel nodes.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Deepest hinge chain.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Assembly translation applied above every base pivot.
    #[must_use]
    pub fn root_offset(&self) -> Vec3 {
        self.root_offset
    }

    /// Front-side material, if a front texture was supplied.
    #[must_use]
    pub fn front_material(&self) -> Option<&TextureBinding> {
        self.front_material.as_ref()
    }

    /// Back-side material, if a back texture was supplied.
    #[must_use]
    pub fn back_material(&self) -> Option<&TextureBinding> {
        self.back_material.as_ref()
    }

    fn hinge_info(&self, id: NodeId, max_depth: usize) -> HingeInfo {
        let node = &self.nodes[id];
        HingeInfo {
            node: id,
            panel: node.panel.index,
            is_base: node.parent.is_none(),
            fold_direction: node.panel.fold_direction,
            axis: node.axis,
            fold_normal: node.fold_normal,
            nest_offset: node.panel.nest_offset,
            depth: node.depth,
            innermost: node.depth == max_depth,
        }
    }

    /// Hinge metadata in fold order.
    pub fn hinges(&self) -> impl Iterator<Item = HingeInfo> + '_ {
        let max_depth = self.max_depth();
        (0..self.nodes.len()).map(move |id| self.hinge_info(id, max_depth))
    }

    /// Hinge metadata paired with mutable pivots. This is the only way to
    /// change a built tree, and it cannot add, remove or reparent nodes.
    pub fn hinges_mut(
        &mut self,
    ) -> impl Iterator<Item = (HingeInfo, &mut Pivot)> + '_ {
        let infos: Vec<HingeInfo> = self.hinges().collect();
        infos
            .into_iter()
            .zip(self.nodes.iter_mut().map(|n| &mut n.pivot))
    }

    /// Restore every pivot to the flat-sheet pose.
    pub fn reset_pivots(&mut self) {
        for node in &mut self.nodes {
            node.pivot.reset();
        }
    }

    /// World transforms for every node, indexed like [`Self::nodes`].
    #[must_use]
    pub fn world_matrices(&self) -> Vec<NodeWorld> {
        let root = Mat4::from_translation(self.root_offset);
        let mut out: Vec<NodeWorld> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let parent = node.parent.map_or(root, |p| out[p].content);
            let pivot = parent * node.pivot.matrix();
            let content = pivot * Mat4::from_translation(node.content_offset);
            out.push(NodeWorld { pivot, content });
        }
        out
    }

    /// World-space corners of every panel's front quad.
    #[must_use]
    pub fn world_corners(&self) -> Vec<[Vec3; 4]> {
        self.nodes
            .iter()
            .zip(self.world_matrices())
            .map(|(node, world)| {
                let v = &node.front.vertices;
                [0, 1, 2, 3].map(|i| {
                    world
                        .content
                        .transform_point3(Vec3::from_array(v[i].position))
                })
            })
            .collect()
    }

    /// World-space bounds of all panel geometry.
    #[must_use]
    pub fn world_bounds(&self) -> Aabb {
        Aabb::from_points(self.world_corners().into_iter().flatten())
    }

    /// Shift the assembly so its bounds are centered on the ground plane
    /// (X and Z), leaving height alone.
    pub fn recenter(&mut self) {
        let bounds = self.world_bounds();
        if bounds.is_empty() {
            return;
        }
        let center = bounds.center();
        self.root_offset -= Vec3::new(center.x, 0.0, center.z);
    }
}
