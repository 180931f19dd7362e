pub mod api;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use api::AppState;
pub use config::AppConfig;
pub use error::{ServiceError, StoreError};
pub use service::{BranchService, OrderService};
pub use store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
