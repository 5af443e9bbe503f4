#![forbid(unsafe_code)]

pub mod codec;
pub mod engine;
pub mod error;
pub mod save_file;
pub mod sink;

pub use codec::*;
pub use engine::*;
pub use error::*;
pub use save_file::*;
pub use sink::*;
