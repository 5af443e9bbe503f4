use crate::node::Node;
use indexmap::IndexMap;
use mochila_structs::{Quaternion, Vector3};
use uuid::Uuid;

/// The live tree. Nodes live in an insertion-ordered map keyed by id;
/// parent/child links are kept coherent by `spawn`/`despawn`.
#[derive(Debug)]
pub struct Scene {
    nodes: IndexMap<Uuid, Node>,
    root: Uuid,
}

impl Scene {
    pub fn new() -> Self {
        let root_node = Node::new("root");
        let root = root_node.id;
        let mut nodes = IndexMap::new();
        nodes.insert(root, root_node);
        Self { nodes, root }
    }

    pub fn root(&self) -> Uuid {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: Uuid) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: Uuid) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Create a node under `parent` and link it both ways.
    /// Panics when the parent does not exist; spawning under a dead node is
    /// a programmer error, same contract as arena insertion.
    pub fn spawn(&mut self, parent: Uuid, name: &str) -> Uuid {
        if !self.nodes.contains_key(&parent) {
            panic!("Scene::spawn: parent {parent} does not exist");
        }
        let mut node = Node::new(name);
        node.parent = Some(parent);
        let id = node.id;
        self.nodes.insert(id, node);
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        id
    }

    /// Immediate children in insertion order.
    pub fn children_of(&self, id: Uuid) -> Vec<Uuid> {
        self.nodes
            .get(&id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Remove a node and its whole subtree, unlinking from the parent.
    /// The root cannot be despawned. Returns false when nothing was removed.
    pub fn despawn(&mut self, id: Uuid) -> bool {
        if id == self.root || !self.nodes.contains_key(&id) {
            return false;
        }
        if let Some(parent) = self.nodes.get(&id).and_then(|n| n.parent) {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|c| *c != id);
            }
        }
        for node_id in self.walk_subtree(id) {
            self.nodes.shift_remove(&node_id);
        }
        true
    }

    /// Depth-first preorder ids of the subtree rooted at `id`, `id` included.
    pub fn walk_subtree(&self, id: Uuid) -> Vec<Uuid> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                out.push(current);
                // reversed so the first child is visited first
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Ids of every node in the subtree that carries a variable system,
    /// preorder. Depth and position carry no meaning for re-binding; this
    /// order only makes saves deterministic.
    pub fn subtree_stores(&self, id: Uuid) -> Vec<Uuid> {
        self.walk_subtree(id)
            .into_iter()
            .filter(|node_id| {
                self.nodes
                    .get(node_id)
                    .is_some_and(|node| node.vars.is_some())
            })
            .collect()
    }

    /// Linear search of the subtree for the node whose store carries
    /// `store_id`. Matching is by identifier only.
    pub fn find_store(&self, subtree_root: Uuid, store_id: Uuid) -> Option<Uuid> {
        self.subtree_stores(subtree_root)
            .into_iter()
            .find(|node_id| {
                self.nodes
                    .get(node_id)
                    .is_some_and(|node| node.store_id() == Some(store_id))
            })
    }

    pub fn transform(&self, id: Uuid) -> Option<(Vector3, Quaternion)> {
        self.nodes.get(&id).map(|n| (n.position, n.rotation))
    }

    pub fn set_transform(&mut self, id: Uuid, position: Vector3, rotation: Quaternion) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.position = position;
            node.rotation = rotation;
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
