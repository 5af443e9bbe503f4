use crate::codec;
use crate::error::SaveError;
use crate::save_file::SaveFile;
use crate::sink::SaveSink;
use mochila_scene::{Scene, TemplateProvider};
use uuid::Uuid;

/// The save/load orchestrator for one container. Holds only the sink key;
/// scene, provider and sink are collaborators handed in per call.
///
/// Single-threaded and non-reentrant: callers serialize `save_all` and
/// `load_all` invocations themselves.
#[derive(Debug, Clone)]
pub struct SaveSystem {
    key: String,
}

impl SaveSystem {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Capture every immediate child of `container` that carries a template
    /// reference (children without one are skipped) and write the aggregate
    /// to the sink in one atomic write.
    pub fn save_all(
        &self,
        scene: &mut Scene,
        container: Uuid,
        sink: &mut dyn SaveSink,
    ) -> Result<(), SaveError> {
        let mut file = SaveFile::default();
        for child in scene.children_of(container) {
            if let Some(saved) = codec::capture(scene, child) {
                file.instances.push(saved);
            }
        }
        let bytes = serde_json::to_vec_pretty(&file)?;
        sink.write(&self.key, &bytes)?;
        log::debug!(
            "saved {} instance(s) to `{}`",
            file.instances.len(),
            self.key
        );
        Ok(())
    }

    /// Rebuild the container from the sink. No data under the key is a
    /// no-op, not an error. Otherwise every existing immediate child is
    /// destroyed first (irreversible, non-transactional), then the saved
    /// instances are re-created in saved order.
    ///
    /// An unresolvable template reference aborts the remaining sequence
    /// with `SaveError::TemplateResolution`: already-destroyed children are
    /// gone and already-restored ones stay. Callers wanting all-or-nothing
    /// semantics snapshot externally before calling this.
    pub fn load_all(
        &self,
        scene: &mut Scene,
        container: Uuid,
        provider: &dyn TemplateProvider,
        sink: &dyn SaveSink,
    ) -> Result<(), SaveError> {
        let Some(bytes) = sink.read(&self.key)? else {
            log::debug!("no saved state under `{}`, leaving container as-is", self.key);
            return Ok(());
        };

        for child in scene.children_of(container) {
            scene.despawn(child);
        }

        let file: SaveFile = serde_json::from_slice(&bytes)?;
        for saved in &file.instances {
            let Some(template) = provider.resolve(&saved.template) else {
                log::error!(
                    "template `{}` did not resolve, aborting the remaining load",
                    saved.template
                );
                return Err(SaveError::TemplateResolution {
                    reference: saved.template.clone(),
                });
            };
            let outcome = codec::restore(scene, saved, template, container);
            // re-stamp the reference so the instance is saveable again
            if let Some(node) = scene.node_mut(outcome.root) {
                node.template_ref = Some(saved.template.clone());
            }
        }
        log::debug!(
            "loaded {} instance(s) from `{}`",
            file.instances.len(),
            self.key
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use mochila_scene::{Template, TemplateRegistry};
    use mochila_structs::{Quaternion, Vector3};
    use mochila_vars::{VarStore, VarSystem, VarValue};
    use std::any::Any;

    #[derive(Debug)]
    struct Counter {
        store: VarStore,
    }

    impl Counter {
        fn with_id(id: Uuid) -> Self {
            Self {
                store: VarStore::with_id(id),
            }
        }
    }

    impl VarSystem for Counter {
        fn vars(&self) -> &VarStore {
            &self.store
        }

        fn vars_mut(&mut self) -> &mut VarStore {
            &mut self.store
        }

        fn declare(&mut self) {
            self.store.clear();
            self.store.add("count", 0);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn counter_template(name: &'static str, store_id: Uuid) -> Template {
        Template::new(move |scene, parent| {
            let root = scene.spawn(parent, name);
            let mut sys = Counter::with_id(store_id);
            sys.declare();
            if let Some(node) = scene.node_mut(root) {
                node.vars = Some(Box::new(sys));
            }
            root
        })
    }

    fn registry_with(refs: &[(&'static str, Uuid)]) -> TemplateRegistry {
        let mut registry = TemplateRegistry::new();
        for (reference, store_id) in refs {
            registry.register(reference, counter_template(reference, *store_id));
        }
        registry
    }

    fn place(scene: &mut Scene, registry: &TemplateRegistry, reference: &str) -> Uuid {
        let parent = scene.root();
        let template = registry.resolve(reference).unwrap();
        let root = template.instantiate(scene, parent);
        scene.node_mut(root).unwrap().template_ref = Some(reference.to_string());
        root
    }

    #[test]
    fn save_all_writes_instances_in_child_order() {
        let registry = registry_with(&[("T1", Uuid::from_u128(1)), ("T2", Uuid::from_u128(2))]);
        let mut scene = Scene::new();
        place(&mut scene, &registry, "T1");
        place(&mut scene, &registry, "T2");
        // a child with no template reference is skipped, not errored
        scene.spawn(scene.root(), "decoration");

        let system = SaveSystem::new("slot.json");
        let mut sink = MemorySink::new();
        let root = scene.root();
        system.save_all(&mut scene, root, &mut sink).unwrap();

        let bytes = sink.read("slot.json").unwrap().unwrap();
        let file: SaveFile = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(file.instances.len(), 2);
        assert_eq!(file.instances[0].template, "T1");
        assert_eq!(file.instances[1].template, "T2");
    }

    #[test]
    fn load_all_without_saved_state_is_a_noop() {
        let registry = registry_with(&[("T1", Uuid::from_u128(1))]);
        let mut scene = Scene::new();
        let existing = place(&mut scene, &registry, "T1");

        let system = SaveSystem::new("slot.json");
        let sink = MemorySink::new();
        let root = scene.root();
        system.load_all(&mut scene, root, &registry, &sink).unwrap();

        assert_eq!(scene.children_of(root), vec![existing]);
    }

    #[test]
    fn save_load_roundtrip_restores_state_and_transform() {
        let registry = registry_with(&[("T1", Uuid::from_u128(1))]);
        let mut scene = Scene::new();
        let instance = place(&mut scene, &registry, "T1");
        scene.set_transform(
            instance,
            Vector3::new(1.0, 2.0, 3.0),
            Quaternion::new(0.0, 0.0, 1.0, 0.0),
        );
        scene
            .node_mut(instance)
            .unwrap()
            .vars
            .as_mut()
            .unwrap()
            .set("count", VarValue::Int(9))
            .unwrap();

        let system = SaveSystem::new("slot.json");
        let mut sink = MemorySink::new();
        let root = scene.root();
        system.save_all(&mut scene, root, &mut sink).unwrap();

        // mutate after saving so the load has something to undo
        scene
            .node_mut(instance)
            .unwrap()
            .vars
            .as_mut()
            .unwrap()
            .set("count", VarValue::Int(-1))
            .unwrap();

        system.load_all(&mut scene, root, &registry, &sink).unwrap();

        let children = scene.children_of(root);
        assert_eq!(children.len(), 1);
        let restored = children[0];
        assert_ne!(restored, instance, "old child must have been destroyed");
        assert_eq!(
            scene.node(restored).unwrap().template_ref.as_deref(),
            Some("T1")
        );
        assert_eq!(
            scene.transform(restored).unwrap(),
            (
                Vector3::new(1.0, 2.0, 3.0),
                Quaternion::new(0.0, 0.0, 1.0, 0.0)
            )
        );
        let vars = scene.node(restored).unwrap().vars.as_ref().unwrap();
        assert_eq!(vars.vars().get::<i32>("count").unwrap(), 9);
    }

    #[test]
    fn unresolved_template_aborts_after_prior_instances() {
        let full = registry_with(&[("T1", Uuid::from_u128(1)), ("T2", Uuid::from_u128(2))]);
        let mut scene = Scene::new();
        place(&mut scene, &full, "T1");
        place(&mut scene, &full, "T2");

        let system = SaveSystem::new("slot.json");
        let mut sink = MemorySink::new();
        let root = scene.root();
        system.save_all(&mut scene, root, &mut sink).unwrap();

        // the resolver lost T2 between save and load
        let partial = registry_with(&[("T1", Uuid::from_u128(1))]);
        let err = system
            .load_all(&mut scene, root, &partial, &sink)
            .unwrap_err();
        assert!(matches!(
            err,
            SaveError::TemplateResolution { ref reference } if reference == "T2"
        ));

        // instance 1 made it back in, instance 2 did not
        let children = scene.children_of(root);
        assert_eq!(children.len(), 1);
        assert_eq!(
            scene.node(children[0]).unwrap().template_ref.as_deref(),
            Some("T1")
        );
    }

    #[test]
    fn corrupt_save_data_is_an_error() {
        let registry = registry_with(&[("T1", Uuid::from_u128(1))]);
        let mut scene = Scene::new();
        let system = SaveSystem::new("slot.json");
        let mut sink = MemorySink::new();
        sink.write("slot.json", b"not json").unwrap();

        let root = scene.root();
        let err = system.load_all(&mut scene, root, &registry, &sink).unwrap_err();
        assert!(matches!(err, SaveError::Corrupt(_)));
    }
}
