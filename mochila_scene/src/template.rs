use crate::scene::Scene;
use std::collections::HashMap;
use uuid::Uuid;

/// An instantiable resource. The build closure spawns a fresh subtree under
/// the given parent and returns its root. Variable systems attached by the
/// closure must carry their persisted store ids (`VarStore::with_id`), or
/// saved snapshots will have nothing to re-bind to.
pub struct Template {
    build: Box<dyn Fn(&mut Scene, Uuid) -> Uuid>,
}

impl Template {
    pub fn new(build: impl Fn(&mut Scene, Uuid) -> Uuid + 'static) -> Self {
        Self {
            build: Box::new(build),
        }
    }

    pub fn instantiate(&self, scene: &mut Scene, parent: Uuid) -> Uuid {
        (self.build)(scene, parent)
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template").finish_non_exhaustive()
    }
}

/// Maps an opaque template reference to an instantiable resource.
/// Unknown references resolve to `None`.
pub trait TemplateProvider {
    fn resolve(&self, reference: &str) -> Option<&Template>;
}

/// Plain in-memory provider. Hosts with an asset database implement
/// `TemplateProvider` over it instead.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, reference: &str, template: Template) {
        self.templates.insert(reference.to_string(), template);
    }
}

impl TemplateProvider for TemplateRegistry {
    fn resolve(&self, reference: &str) -> Option<&Template> {
        self.templates.get(reference)
    }
}
