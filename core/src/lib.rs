pub mod config;
pub mod error;
pub mod orchestrator;
pub mod project;
pub mod providers;
pub mod skills;
pub mod traits;

pub use config::*;
pub use error::{Result, SkillSyncError};
pub use orchestrator::*;
pub use project::{current_project_root, find_project_root};
pub use providers::*;
pub use skills::*;
pub use traits::*;
