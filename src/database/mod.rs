pub mod collection;
pub mod manager;
pub mod memory;
pub mod models;
pub mod object_id;
pub mod postgres;
pub mod repository;

pub use collection::{DocumentStore, RemoveOutcome, StoredDocument, UpdateOutcome};
pub use manager::{DatabaseError, DatabaseManager};
pub use object_id::{InvalidIdError, ObjectId};
pub use repository::Repository;
