use mochila_structs::{Quaternion, Vector3};
use mochila_vars::VarSystem;
use uuid::Uuid;

/// One node in the host tree. Carries its local transform, an optional
/// template reference (only instance roots spawned from a template have one)
/// and an optional variable system.
#[derive(Debug)]
pub struct Node {
    pub id: Uuid,
    pub name: String,
    pub parent: Option<Uuid>,
    pub children: Vec<Uuid>,

    pub position: Vector3,
    pub rotation: Quaternion,

    /// Opaque stable identifier resolvable to an instantiable template,
    /// independent of any storage path.
    pub template_ref: Option<String>,

    pub vars: Option<Box<dyn VarSystem>>,
}

impl Node {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            position: Vector3::ZERO,
            rotation: Quaternion::IDENTITY,
            template_ref: None,
            vars: None,
        }
    }

    /// The store identifier, when a variable system is attached and its id
    /// has been assigned.
    pub fn store_id(&self) -> Option<Uuid> {
        self.vars.as_ref().and_then(|sys| sys.vars().id())
    }
}
