pub mod provider;

pub use provider::{ToolProvider, ToolType};
