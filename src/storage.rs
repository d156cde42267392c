mod document;
pub mod store;

pub use document::InconsistentDocument;
pub use store::{PersistenceError, PlantStore, StoreError};
