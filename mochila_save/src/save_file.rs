use mochila_vars::StoreSnapshot;
use serde::{Deserialize, Serialize};

/// One captured instance: which template it came from, where it sat, and the
/// state of every variable store found anywhere in its subtree. `stores` is
/// tree-walk order; re-binding on load goes by store id, never by position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedInstance {
    pub template: String,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub stores: Vec<StoreSnapshot>,
}

/// One saved container state, written and read as a single unit.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveFile {
    pub instances: Vec<SavedInstance>,
}
