//! Read-only tree views over the flat object list
//!
//! The flat [`HircCollection`](super::HircCollection) stays the single
//! source of truth; these trees are derived wholesale from the weak
//! back-references and thrown away after use. Rebuild after any
//! structural mutation instead of patching a view in place.

use std::collections::HashMap;

use tracing::debug;

use super::object::{HircCollection, HircKind, HircObject};

/// One node of a derived tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: u32,
    pub kind: HircKind,
    /// Indices into the owning tree's node arena.
    pub children: Vec<usize>,
}

/// A derived parent/child view. Nodes live in an arena indexed by
/// `usize`; roots are arena indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyTree {
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
    by_id: HashMap<u32, usize>,
}

impl HierarchyTree {
    /// The actor-mixer view: sounds and the ordinary containers, linked
    /// by `DirectParentId`. Parent id 0 marks a root.
    #[must_use]
    pub fn actor_mixer(collection: &HircCollection) -> Self {
        let mut tree = Self::allocate(collection, |object| {
            matches!(
                object.kind(),
                HircKind::Sound
                    | HircKind::RanSeqCntr
                    | HircKind::SwitchCntr
                    | HircKind::ActorMixer
                    | HircKind::LayerCntr
            )
        });
        for index in 0..tree.nodes.len() {
            let parent = collection
                .get(tree.nodes[index].id)
                .ok()
                .and_then(HircObject::parent_id)
                .unwrap_or(0);
            tree.link(index, parent);
        }
        tree
    }

    /// The bus view, linked by `OverrideBusId`. Buses may resolve out
    /// of declaration order, hence allocate-then-link.
    #[must_use]
    pub fn bus(collection: &HircCollection) -> Self {
        let mut tree = Self::allocate(collection, |object| {
            matches!(object.kind(), HircKind::Bus | HircKind::AuxBus)
        });
        for index in 0..tree.nodes.len() {
            let parent = match collection.get(tree.nodes[index].id) {
                Ok(HircObject::Bus(bus)) | Ok(HircObject::AuxBus(bus)) => bus.override_bus_id,
                _ => 0,
            };
            tree.link(index, parent);
        }
        tree
    }

    /// The interactive-music view. Music nodes link by
    /// `DirectParentId`; tracks carry no back-reference of their own
    /// and are attached through their owning node's child list.
    #[must_use]
    pub fn music(collection: &HircCollection) -> Self {
        let mut tree = Self::allocate(collection, |object| {
            matches!(
                object.kind(),
                HircKind::MusicSegment
                    | HircKind::MusicTrack
                    | HircKind::MusicSwitchCntr
                    | HircKind::MusicRanSeqCntr
            )
        });
        let mut track_parent: HashMap<u32, u32> = HashMap::new();
        for object in &collection.objects {
            if let Ok(parent_id) = object.id() {
                for &child in object.child_ids() {
                    if matches!(collection.get(child), Ok(HircObject::MusicTrack(_))) {
                        track_parent.insert(child, parent_id);
                    }
                }
            }
        }
        for index in 0..tree.nodes.len() {
            let node = &tree.nodes[index];
            let parent = if node.kind == HircKind::MusicTrack {
                track_parent.get(&node.id).copied().unwrap_or(0)
            } else {
                collection
                    .get(node.id)
                    .ok()
                    .and_then(HircObject::parent_id)
                    .unwrap_or(0)
            };
            tree.link(index, parent);
        }
        tree
    }

    /// First pass: one arena node per matching object, no edges yet.
    fn allocate(collection: &HircCollection, keep: impl Fn(&HircObject) -> bool) -> Self {
        let mut tree = Self::default();
        for object in &collection.objects {
            if !keep(object) {
                continue;
            }
            let Ok(id) = object.id() else { continue };
            let index = tree.nodes.len();
            tree.nodes.push(TreeNode {
                id,
                kind: object.kind(),
                children: Vec::new(),
            });
            tree.by_id.insert(id, index);
        }
        tree
    }

    /// Second pass: attach one node under its parent, or promote it to
    /// a root when the parent id is 0 or resolves to nothing.
    fn link(&mut self, index: usize, parent_id: u32) {
        if parent_id == 0 {
            self.roots.push(index);
            return;
        }
        match self.by_id.get(&parent_id).copied() {
            Some(parent_index) => self.nodes[parent_index].children.push(index),
            None => {
                debug!(
                    id = self.nodes[index].id,
                    parent_id, "orphaned hierarchy object, promoting to root"
                );
                self.roots.push(index);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena indices of the root nodes, in collection order.
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Borrow a node by arena index.
    #[must_use]
    pub fn node(&self, index: usize) -> &TreeNode {
        &self.nodes[index]
    }

    /// Arena index of an object id, if it is in this view.
    #[must_use]
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Child object ids of one node, in list order.
    #[must_use]
    pub fn children_of(&self, id: u32) -> Vec<u32> {
        self.index_of(id)
            .map(|index| {
                self.nodes[index]
                    .children
                    .iter()
                    .map(|&child| self.nodes[child].id)
                    .collect()
            })
            .unwrap_or_default()
    }
}
