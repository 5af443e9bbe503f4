use crate::error::VarError;
use crate::store::{StoreSnapshot, VarStore};
use crate::value::{VarType, VarValue};
use std::any::Any;
use std::fmt::Debug;

/// The behavior seam for concrete store kinds. Implementors own a `VarStore`,
/// define their declared variable set in `declare`, and may override the
/// lifecycle hooks. All mutation that should notify the owner goes through
/// the provided methods here, never through the store directly.
///
/// Dyn-safe on purpose: hosts hang `Box<dyn VarSystem>` off their tree nodes.
/// Typed reads stay on `VarStore` (`sys.vars().get::<i32>("health")`).
pub trait VarSystem: Debug {
    fn vars(&self) -> &VarStore;
    fn vars_mut(&mut self) -> &mut VarStore;

    /// Reset the variable collection and repopulate it. Destructive and
    /// idempotent: re-declaring discards prior runtime edits.
    fn declare(&mut self);

    /// Fires after every successful mutation through this surface.
    fn var_update(&mut self) {}

    /// Runs just before a snapshot is taken.
    fn on_saved(&mut self) {}

    /// Runs after a snapshot applied without any missing names.
    fn on_loaded(&mut self) {}

    // down-casting helpers, so hosts can reach their concrete store kind
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn add(&mut self, name: &str, value: VarValue) -> bool {
        let added = self.vars_mut().add(name, value);
        if added {
            self.var_update();
        }
        added
    }

    fn add_list(&mut self, name: &str, ty: VarType, values: &[VarValue]) -> bool {
        let added = self.vars_mut().add_list(name, ty, values);
        if added {
            self.var_update();
        }
        added
    }

    fn set(&mut self, name: &str, value: VarValue) -> Result<(), VarError> {
        self.vars_mut().set(name, value)?;
        self.var_update();
        Ok(())
    }

    fn set_list(&mut self, name: &str, values: &[VarValue]) -> Result<(), VarError> {
        self.vars_mut().set_list(name, values)?;
        self.var_update();
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), VarError> {
        self.vars_mut().remove(name)?;
        self.var_update();
        Ok(())
    }

    /// Hook, then capture. Ensures the identifier exists first.
    fn save(&mut self) -> StoreSnapshot {
        self.on_saved();
        self.vars_mut().snapshot()
    }

    /// Apply a snapshot to the currently declared set. `on_loaded` only runs
    /// when every snapshot name found a counterpart.
    fn load(&mut self, snapshot: &StoreSnapshot) -> Result<(), VarError> {
        self.vars_mut().apply(snapshot)?;
        self.on_loaded();
        Ok(())
    }
}

/// Store kind with no behavior of its own: declares nothing, so its whole
/// variable set is runtime-driven.
#[derive(Debug, Default)]
pub struct BasicVars {
    store: VarStore,
}

impl BasicVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: uuid::Uuid) -> Self {
        Self {
            store: VarStore::with_id(id),
        }
    }
}

impl VarSystem for BasicVars {
    fn vars(&self) -> &VarStore {
        &self.store
    }

    fn vars_mut(&mut self) -> &mut VarStore {
        &mut self.store
    }

    fn declare(&mut self) {
        self.store.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store kind with a fixed schema and an edit counter driven by the
    /// change hook.
    #[derive(Debug, Default)]
    struct Health {
        store: VarStore,
        updates: usize,
        loads: usize,
    }

    impl VarSystem for Health {
        fn vars(&self) -> &VarStore {
            &self.store
        }

        fn vars_mut(&mut self) -> &mut VarStore {
            &mut self.store
        }

        fn declare(&mut self) {
            self.store.clear();
            self.store.add("health", 100);
            self.store.add_list(
                "tags",
                VarType::String,
                &[VarValue::from("a"), VarValue::from("b")],
            );
        }

        fn var_update(&mut self) {
            self.updates += 1;
        }

        fn on_loaded(&mut self) {
            self.loads += 1;
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn declare_is_destructive_and_idempotent() {
        let mut sys = Health::default();
        sys.declare();
        sys.set("health", VarValue::Int(42)).unwrap();
        sys.declare();
        assert_eq!(sys.vars().get::<i32>("health").unwrap(), 100);
        assert_eq!(sys.vars().len(), 2);
    }

    #[test]
    fn mutations_fire_var_update() {
        let mut sys = Health::default();
        sys.declare();
        sys.set("health", VarValue::Int(42)).unwrap();
        assert!(sys.add("extra", VarValue::Bool(true)));
        sys.remove("extra").unwrap();
        assert_eq!(sys.updates, 3);
    }

    #[test]
    fn failed_mutation_does_not_fire_var_update() {
        let mut sys = Health::default();
        sys.declare();
        assert!(sys.set("missing", VarValue::Int(1)).is_err());
        assert!(!sys.add("health", VarValue::Int(1)));
        assert_eq!(sys.updates, 0);
    }

    #[test]
    fn save_then_load_into_fresh_declared_store() {
        let mut sys = Health::default();
        sys.declare();
        sys.set("health", VarValue::Int(42)).unwrap();
        let snapshot = sys.save();
        assert_eq!(snapshot.var("health").unwrap().values, vec!["42"]);
        assert_eq!(snapshot.var("tags").unwrap().values, vec!["a", "b"]);

        let mut fresh = Health {
            store: VarStore::with_id(snapshot.id),
            ..Default::default()
        };
        fresh.declare();
        fresh.load(&snapshot).unwrap();
        assert_eq!(fresh.vars().get::<i32>("health").unwrap(), 42);
        assert_eq!(
            fresh.vars().get_list::<String>("tags").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(fresh.loads, 1);
    }

    #[test]
    fn incomplete_load_skips_on_loaded() {
        let mut sys = Health::default();
        sys.declare();
        let mut snapshot = sys.save();
        snapshot.vars.push(crate::store::SavedVar {
            name: "gone".to_string(),
            values: vec!["1".to_string()],
        });

        let mut fresh = Health {
            store: VarStore::with_id(snapshot.id),
            ..Default::default()
        };
        fresh.declare();
        let err = fresh.load(&snapshot).unwrap_err();
        assert!(matches!(err, VarError::MissingVars { ref names } if names == &["gone"]));
        assert_eq!(fresh.loads, 0);
        // the surviving names were still applied
        assert_eq!(fresh.vars().get::<i32>("health").unwrap(), 100);
    }
}
