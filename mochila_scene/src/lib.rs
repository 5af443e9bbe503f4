pub mod node;
pub mod scene;
pub mod template;

pub use node::*;
pub use scene::*;
pub use template::*;
