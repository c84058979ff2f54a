//! SQLite backend for quote drafts.

pub mod factory;
pub mod repository;

pub use factory::SqliteDraftStoreFactory;
pub use repository::SqliteDraftStore;
