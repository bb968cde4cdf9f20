// Service exports
pub mod explorer;
pub mod memory;
pub mod postgres;
pub mod store;

pub use explorer::{Exploration, Explorer};
pub use memory::InMemoryStore;
pub use postgres::PostgresClient;
pub use store::{CandidateStore, StoreError};
