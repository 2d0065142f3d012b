pub mod install;
pub mod list;
pub mod remove;
pub mod scope;

pub use install::{InstallOutcome, InstallReport, Installer, SkillInstallReport, install};
pub use list::{Inventory, ScanFailure, list_installed};
pub use remove::{RemoveOutcome, RemoveReport, RemoveStatus, remove};
pub use scope::{Location, PlannedTarget, Scope, install_preview, plan, removal_preview};
