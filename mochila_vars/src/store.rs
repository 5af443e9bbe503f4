use crate::error::VarError;
use crate::value::{FromVarValue, VarType, VarValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One named, typed slot. Values live as canonical strings and are parsed on
/// access; the declared type and shape are fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefabVar {
    name: String,
    ty: VarType,
    is_list: bool,
    values: Vec<String>,
}

impl PrefabVar {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> VarType {
        self.ty
    }

    pub fn is_list(&self) -> bool {
        self.is_list
    }

    /// Raw encoded contents, in order. Length 1 for scalars.
    pub fn raw_values(&self) -> &[String] {
        &self.values
    }

    fn decode_one<T: FromVarValue>(&self, raw: &str) -> Result<T, VarError> {
        if T::VAR_TYPE != self.ty {
            return Err(VarError::TypeMismatch {
                name: self.name.clone(),
                declared: self.ty,
                requested: T::TYPE_NAME,
            });
        }
        let value = VarValue::decode(self.ty, raw).ok_or_else(|| VarError::Decode {
            name: self.name.clone(),
            ty: self.ty,
            raw: raw.to_string(),
        })?;
        // decode() already produced the matching variant
        T::from_value(value).ok_or_else(|| VarError::TypeMismatch {
            name: self.name.clone(),
            declared: self.ty,
            requested: T::TYPE_NAME,
        })
    }

    fn get<T: FromVarValue>(&self) -> Result<T, VarError> {
        if self.is_list {
            return Err(VarError::ShapeMismatch {
                name: self.name.clone(),
                is_list: true,
            });
        }
        self.decode_one(&self.values[0])
    }

    fn get_list<T: FromVarValue>(&self) -> Result<Vec<T>, VarError> {
        if !self.is_list {
            return Err(VarError::ShapeMismatch {
                name: self.name.clone(),
                is_list: false,
            });
        }
        self.values.iter().map(|raw| self.decode_one(raw)).collect()
    }

    fn check_type(&self, value: &VarValue) -> Result<(), VarError> {
        if value.ty() != self.ty {
            return Err(VarError::TypeMismatch {
                name: self.name.clone(),
                declared: self.ty,
                requested: value.ty().type_name(),
            });
        }
        Ok(())
    }

    fn set(&mut self, value: VarValue) -> Result<(), VarError> {
        self.check_type(&value)?;
        // A scalar write on a list collapses it to a single element.
        self.values = vec![value.encode()];
        Ok(())
    }

    fn set_list(&mut self, values: &[VarValue]) -> Result<(), VarError> {
        if !self.is_list {
            return Err(VarError::ShapeMismatch {
                name: self.name.clone(),
                is_list: false,
            });
        }
        for value in values {
            self.check_type(value)?;
        }
        self.values = values.iter().map(VarValue::encode).collect();
        Ok(())
    }

    fn overwrite_raw(&mut self, values: Vec<String>) {
        if !self.is_list && values.is_empty() {
            // scalars are never empty
            return;
        }
        self.values = values;
    }
}

impl VarType {
    pub(crate) fn type_name(self) -> &'static str {
        match self {
            VarType::Int => "i32",
            VarType::Float => "f32",
            VarType::String => "String",
            VarType::Bool => "bool",
            VarType::Vector3 => "Vector3",
        }
    }
}

/// Persisted form of one variable: its name plus the encoded value list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedVar {
    pub name: String,
    pub values: Vec<String>,
}

/// Point-in-time capture of one store: the stable identifier and every
/// variable's encoded contents. Re-binding after a load matches on `id` only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub id: Uuid,
    pub vars: Vec<SavedVar>,
}

impl StoreSnapshot {
    pub fn var(&self, name: &str) -> Option<&SavedVar> {
        self.vars.iter().find(|v| v.name == name)
    }
}

/// Named, typed variable collection with a stable cross-session identifier.
/// All mutation goes through the store so shape and type stay coherent.
#[derive(Clone, Debug, Default)]
pub struct VarStore {
    id: Option<Uuid>,
    vars: IndexMap<String, PrefabVar>,
}

impl VarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already carries its persisted identifier. Template
    /// definitions use this so instantiated copies keep the id that was
    /// captured at save time.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            vars: IndexMap::new(),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Assigns a fresh identifier only when none is set, then returns it.
    /// The id is never regenerated once present; doing so would break
    /// snapshot re-binding.
    pub fn ensure_id(&mut self) -> Uuid {
        *self.id.get_or_insert_with(Uuid::new_v4)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn var(&self, name: &str) -> Option<&PrefabVar> {
        self.vars.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrefabVar> {
        self.vars.values()
    }

    /// Drops every variable. The identifier is kept.
    pub fn clear(&mut self) {
        self.vars.clear();
    }

    /// Declare a scalar variable. Returns false (store unchanged) when the
    /// name is already taken.
    pub fn add(&mut self, name: &str, value: impl Into<VarValue>) -> bool {
        if self.vars.contains_key(name) {
            return false;
        }
        let value = value.into();
        self.vars.insert(
            name.to_string(),
            PrefabVar {
                name: name.to_string(),
                ty: value.ty(),
                is_list: false,
                values: vec![value.encode()],
            },
        );
        true
    }

    /// Declare a list variable. `ty` is explicit so empty lists stay typed.
    /// Returns false on a duplicate name or a value of the wrong type.
    pub fn add_list(&mut self, name: &str, ty: VarType, values: &[VarValue]) -> bool {
        if self.vars.contains_key(name) {
            return false;
        }
        if let Some(bad) = values.iter().find(|v| v.ty() != ty) {
            log::error!(
                "add_list `{}`: element of type {:?} in a {:?} list",
                name,
                bad.ty(),
                ty
            );
            return false;
        }
        self.vars.insert(
            name.to_string(),
            PrefabVar {
                name: name.to_string(),
                ty,
                is_list: true,
                values: values.iter().map(VarValue::encode).collect(),
            },
        );
        true
    }

    pub fn remove(&mut self, name: &str) -> Result<(), VarError> {
        self.vars
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| VarError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn get<T: FromVarValue>(&self, name: &str) -> Result<T, VarError> {
        self.lookup(name)?.get()
    }

    pub fn get_list<T: FromVarValue>(&self, name: &str) -> Result<Vec<T>, VarError> {
        self.lookup(name)?.get_list()
    }

    pub fn set(&mut self, name: &str, value: impl Into<VarValue>) -> Result<(), VarError> {
        self.lookup_mut(name)?.set(value.into())
    }

    pub fn set_list(&mut self, name: &str, values: &[VarValue]) -> Result<(), VarError> {
        self.lookup_mut(name)?.set_list(values)
    }

    fn lookup(&self, name: &str) -> Result<&PrefabVar, VarError> {
        self.vars.get(name).ok_or_else(|| VarError::NotFound {
            name: name.to_string(),
        })
    }

    fn lookup_mut(&mut self, name: &str) -> Result<&mut PrefabVar, VarError> {
        self.vars.get_mut(name).ok_or_else(|| VarError::NotFound {
            name: name.to_string(),
        })
    }

    /// Immutable capture of the identifier plus every variable's encoded
    /// contents, in insertion order.
    pub fn snapshot(&mut self) -> StoreSnapshot {
        let id = self.ensure_id();
        StoreSnapshot {
            id,
            vars: self
                .vars
                .values()
                .map(|v| SavedVar {
                    name: v.name.clone(),
                    values: v.values.clone(),
                })
                .collect(),
        }
    }

    /// Overwrite each named variable's encoded contents from `snapshot`.
    /// Names missing from the current declared set are skipped (the schema
    /// may have changed since the save); every present name is still applied
    /// and the misses come back as `MissingVars`.
    pub fn apply(&mut self, snapshot: &StoreSnapshot) -> Result<(), VarError> {
        let mut missing = Vec::new();
        for saved in &snapshot.vars {
            match self.vars.get_mut(&saved.name) {
                Some(var) => var.overwrite_raw(saved.values.clone()),
                None => {
                    log::warn!(
                        "snapshot variable `{}` has no counterpart in the declared set",
                        saved.name
                    );
                    missing.push(saved.name.clone());
                }
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(VarError::MissingVars { names: missing })
        }
    }
}
