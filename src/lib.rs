// Para - in-memory PARA (Projects/Areas/Resources/Archives) state store

pub mod config;
pub mod draft;
pub mod filter;
pub mod models;
pub mod ops;
pub mod record;
pub mod render;
pub mod repl;
pub mod state;
pub mod store;

// Re-export main types for convenience
pub use draft::Draft;
pub use filter::{Filter, FilterOp};
pub use models::{Artifact, ArtifactKind, Category, Item, ItemStatus, Task};
pub use ops::{Op, Outcome, Session};
pub use record::{IndexValue, Record};
pub use state::ParaState;
pub use store::Store;
