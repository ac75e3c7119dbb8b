use std::collections::BTreeMap;

use ahash::{HashMap, HashSet};
use egui::Rect;
use itertools::Itertools as _;

use super::region::DockRegion;
use super::types::ContainerId;

/// Stable id of a node in the [`SplitTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NodeId(u64);

impl NodeId {
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// How the two children of a split are arranged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SplitAxis {
    /// Side by side, divider is vertical.
    Horizontal,

    /// Stacked, divider is horizontal.
    Vertical,
}

/// Position of the divider inside a split.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Sash {
    /// Share of the extent given to the first child.
    Fraction(f32),

    /// Fixed extent of the first child.
    FirstPx(f32),

    /// Fixed extent of the second child.
    SecondPx(f32),
}

impl Sash {
    fn first_extent(self, extent: f32) -> f32 {
        match self {
            Self::Fraction(fraction) => extent * fraction.clamp(0.0, 1.0),
            Self::FirstPx(px) => px,
            Self::SecondPx(px) => extent - px,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split {
    pub axis: SplitAxis,
    pub sash: Sash,
    pub children: [NodeId; 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutNode {
    Leaf(ContainerId),
    Split(Split),
}

/// Screen rects produced by [`SplitTree::layout`].
#[derive(Clone, Debug, Default)]
pub struct TreeLayout {
    pub containers: BTreeMap<ContainerId, Rect>,
    pub splits: BTreeMap<NodeId, Rect>,
}

/// Binary split layout of docked containers, stored as an arena of nodes.
#[derive(Clone, Debug, Default)]
pub struct SplitTree {
    nodes: BTreeMap<NodeId, LayoutNode>,
    root: Option<NodeId>,
    next_id: u64,
}

impl SplitTree {
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(&id)
    }

    pub fn split(&self, id: NodeId) -> Option<&Split> {
        match self.nodes.get(&id) {
            Some(LayoutNode::Split(split)) => Some(split),
            _ => None,
        }
    }

    pub(crate) fn split_mut(&mut self, id: NodeId) -> Option<&mut Split> {
        match self.nodes.get_mut(&id) {
            Some(LayoutNode::Split(split)) => Some(split),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc_id(&mut self) -> NodeId {
        self.next_id = self.next_id.saturating_add(1);
        NodeId(self.next_id)
    }

    pub(crate) fn insert_leaf(&mut self, container: ContainerId) -> NodeId {
        let id = self.alloc_id();
        self.nodes.insert(id, LayoutNode::Leaf(container));
        id
    }

    pub(crate) fn insert_split(
        &mut self,
        axis: SplitAxis,
        sash: Sash,
        first: NodeId,
        second: NodeId,
    ) -> NodeId {
        let id = self.alloc_id();
        self.nodes.insert(
            id,
            LayoutNode::Split(Split {
                axis,
                sash,
                children: [first, second],
            }),
        );
        id
    }

    pub fn leaf_of(&self, container: ContainerId) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| **node == LayoutNode::Leaf(container))
            .map(|(id, _)| *id)
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.iter().find_map(|(id, n)| match n {
            LayoutNode::Split(split) if split.children.contains(&node) => Some(*id),
            _ => None,
        })
    }

    /// Whether `container` sits in a top/bottom split, the only place it can collapse to a caption.
    pub fn can_collapse(&self, container: ContainerId) -> bool {
        self.leaf_of(container)
            .and_then(|leaf| self.parent_of(leaf))
            .and_then(|parent| self.split(parent))
            .is_some_and(|split| split.axis == SplitAxis::Vertical)
    }

    /// Number of split nodes above `container`'s leaf.
    pub fn split_depth(&self, container: ContainerId) -> Option<usize> {
        let mut node = self.leaf_of(container)?;
        let mut depth = 0;
        while let Some(parent) = self.parent_of(node) {
            depth += 1;
            node = parent;
            if depth > self.nodes.len() {
                break;
            }
        }
        Some(depth)
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => {
                if self.root == Some(old) {
                    self.root = Some(new);
                }
            }
            Some(parent) => {
                if let Some(split) = self.split_mut(parent) {
                    for child in &mut split.children {
                        if *child == old {
                            *child = new;
                        }
                    }
                }
            }
        }
    }

    /// Split `target`'s slot in two, placing `new` on the `region` side.
    ///
    /// `fraction` is the share given to `new`, in the same way as Dear ImGui's
    /// `DockBuilderSplitNode`. Returns the new split node, or `None` if `target` is not a leaf of
    /// this tree or `region` is [`DockRegion::Center`].
    pub(crate) fn split_leaf(
        &mut self,
        target: ContainerId,
        new: ContainerId,
        region: DockRegion,
        fraction: f32,
    ) -> Option<NodeId> {
        if region == DockRegion::Center {
            return None;
        }
        let target_leaf = self.leaf_of(target)?;
        let parent = self.parent_of(target_leaf);
        let new_leaf = self.insert_leaf(new);

        let axis = if region.is_horizontal() {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        };
        let fraction = fraction.clamp(0.0, 1.0);
        let (first, second, first_fraction) = if region.inserts_first() {
            (new_leaf, target_leaf, fraction)
        } else {
            (target_leaf, new_leaf, 1.0 - fraction)
        };

        let split = self.insert_split(axis, Sash::Fraction(first_fraction), first, second);
        self.replace_child(parent, target_leaf, split);
        Some(split)
    }

    /// Remove `container`'s leaf; its sibling takes over the parent split's slot.
    pub(crate) fn remove_leaf(&mut self, container: ContainerId) -> bool {
        let Some(leaf) = self.leaf_of(container) else {
            return false;
        };
        let parent = self.parent_of(leaf);
        self.nodes.remove(&leaf);

        let Some(parent) = parent else {
            if self.root == Some(leaf) {
                self.root = None;
            }
            return true;
        };

        let sibling = self
            .split(parent)
            .and_then(|split| split.children.iter().copied().find(|&c| c != leaf));
        let grandparent = self.parent_of(parent);
        self.nodes.remove(&parent);
        match sibling {
            Some(sibling) => self.replace_child(grandparent, parent, sibling),
            None => {
                if self.root == Some(parent) {
                    self.root = None;
                }
            }
        }
        true
    }

    /// Containers reachable from the root, first child before second.
    pub fn containers(&self) -> Vec<ContainerId> {
        let mut out = Vec::new();
        let mut visited = HashSet::default();
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            match self.nodes.get(&id) {
                Some(LayoutNode::Leaf(container)) => out.push(*container),
                Some(LayoutNode::Split(split)) => {
                    stack.push(split.children[1]);
                    stack.push(split.children[0]);
                }
                None => {}
            }
        }
        out
    }

    /// Assign a screen rect to every reachable node.
    ///
    /// Each split gives its first child the extent the sash asks for, clamped so that both
    /// children keep at least `min_pane_size` when the split is big enough for that. A child that
    /// is a collapsed container (per `collapsed_extent`) only gets that extent, and only in
    /// vertical splits; side-by-side children ignore it.
    pub fn layout(
        &self,
        bounds: Rect,
        min_pane_size: f32,
        collapsed_extent: impl Fn(ContainerId) -> Option<f32>,
    ) -> TreeLayout {
        let mut out = TreeLayout::default();
        let mut visited = HashSet::default();
        let mut stack: Vec<(NodeId, Rect)> = self.root.map(|r| (r, bounds)).into_iter().collect();

        while let Some((id, rect)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            match self.nodes.get(&id) {
                Some(LayoutNode::Leaf(container)) => {
                    out.containers.insert(*container, rect);
                }
                Some(LayoutNode::Split(split)) => {
                    out.splits.insert(id, rect);
                    let extent = match split.axis {
                        SplitAxis::Horizontal => rect.width(),
                        SplitAxis::Vertical => rect.height(),
                    }
                    .max(0.0);

                    let mut first = split.sash.first_extent(extent);
                    first = if extent >= 2.0 * min_pane_size {
                        first.clamp(min_pane_size, extent - min_pane_size)
                    } else {
                        first.clamp(0.0, extent)
                    };

                    let collapsed = |node: NodeId| match self.nodes.get(&node) {
                        Some(LayoutNode::Leaf(c)) if split.axis == SplitAxis::Vertical => {
                            collapsed_extent(*c).map(|e| e.min(extent))
                        }
                        _ => None,
                    };
                    if let Some(e) = collapsed(split.children[0]) {
                        first = e;
                    } else if let Some(e) = collapsed(split.children[1]) {
                        first = extent - e;
                    }

                    let (a, b) = match split.axis {
                        SplitAxis::Horizontal => rect.split_left_right_at_x(rect.left() + first),
                        SplitAxis::Vertical => rect.split_top_bottom_at_y(rect.top() + first),
                    };
                    stack.push((split.children[1], b));
                    stack.push((split.children[0], a));
                }
                None => {}
            }
        }
        out
    }

    pub(crate) fn integrity_issues(&self) -> Vec<String> {
        let mut issues: Vec<String> = Vec::new();

        let Some(root) = self.root else {
            if !self.nodes.is_empty() {
                issues.push("integrity: root=None but nodes non-empty".to_owned());
            }
            return issues;
        };
        if !self.nodes.contains_key(&root) {
            issues.push(format!("integrity: root {root:?} missing"));
            return issues;
        }

        let mut visited: HashSet<NodeId> = HashSet::default();
        let mut parent_of: HashMap<NodeId, NodeId> = HashMap::default();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(LayoutNode::Split(split)) = self.nodes.get(&id) else {
                continue;
            };
            if split.children[0] == split.children[1] {
                issues.push(format!("integrity: split {id:?} has the same child twice"));
            }
            for child in split.children {
                if !self.nodes.contains_key(&child) {
                    issues.push(format!(
                        "integrity: split {id:?} references missing child {child:?}"
                    ));
                    continue;
                }
                if let Some(previous) = parent_of.insert(child, id) {
                    issues.push(format!(
                        "integrity: node {child:?} has multiple parents {previous:?} and {id:?}"
                    ));
                }
                stack.push(child);
            }
        }

        if visited.len() != self.nodes.len() {
            issues.push(format!(
                "integrity: unreachable nodes {} of {}",
                self.nodes.len().saturating_sub(visited.len()),
                self.nodes.len()
            ));
        }

        for container in self.containers().into_iter().duplicates() {
            issues.push(format!("integrity: container {container:?} appears more than once"));
        }

        issues
    }
}
