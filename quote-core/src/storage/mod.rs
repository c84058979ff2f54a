//! Persistence of in-progress answers.

pub mod draft;
pub mod factory;
pub mod memory;

pub use draft::{
    DRAFT_RECORD_KEY, DRAFT_STEP_KEY, DraftStore, SavedDraft, StorageError, clear_draft,
    load_draft, save_draft,
};
pub use factory::{DraftStoreFactory, DraftStoreRegistry, StoreConfig};
pub use memory::{MemoryDraftStore, MemoryDraftStoreFactory};
