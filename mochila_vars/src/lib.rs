#![forbid(unsafe_code)]

pub mod error;
pub mod store;
pub mod system;
pub mod value;

pub use error::*;
pub use store::*;
pub use system::*;
pub use value::*;
