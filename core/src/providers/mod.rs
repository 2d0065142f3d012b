pub mod alias;
pub mod registry;
pub mod table;

pub use alias::AliasProvider;
pub use registry::{ProviderRegistry, valid_names};
pub use table::{PathLayout, TableProvider};
