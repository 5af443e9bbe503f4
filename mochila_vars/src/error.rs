use crate::value::VarType;
use thiserror::Error;

/// Failures surfaced by the variable store. All of these are local and
/// non-fatal: callers get the error, the store stays usable, and an
/// in-progress save or load of other stores is never aborted by them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VarError {
    #[error("variable `{name}` not found")]
    NotFound { name: String },

    #[error("variable `{name}` has the wrong shape (is_list = {is_list}); use the other accessor")]
    ShapeMismatch { name: String, is_list: bool },

    #[error("variable `{name}` is declared {declared:?}, requested {requested}")]
    TypeMismatch {
        name: String,
        declared: VarType,
        requested: &'static str,
    },

    #[error("variable `{name}`: cannot decode `{raw}` as {ty:?}")]
    Decode {
        name: String,
        ty: VarType,
        raw: String,
    },

    #[error("snapshot names variables absent from the declared set: {names:?}")]
    MissingVars { names: Vec<String> },
}
