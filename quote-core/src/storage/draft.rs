use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{AnswerRecord, Step};

/// Key under which the answer record is stored, as JSON.
pub const DRAFT_RECORD_KEY: &str = "insuranceFormData";

/// Key under which the current step number is stored.
pub const DRAFT_STEP_KEY: &str = "insuranceFormStep";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Best-effort key/value storage for in-progress answers.
///
/// Last write wins; there is no consistency guarantee beyond that.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn write(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError>;

    async fn read(
        &self,
        key: &str,
    ) -> Result<Option<String>, StorageError>;

    /// Removing a missing key is not an error.
    async fn delete(
        &self,
        key: &str,
    ) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: DraftStore + ?Sized> DraftStore for Box<T> {
    async fn write(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        (**self).write(key, value).await
    }

    async fn read(
        &self,
        key: &str,
    ) -> Result<Option<String>, StorageError> {
        (**self).read(key).await
    }

    async fn delete(
        &self,
        key: &str,
    ) -> Result<(), StorageError> {
        (**self).delete(key).await
    }
}

/// A previously saved record together with the step it was saved on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDraft {
    pub record: AnswerRecord,
    pub step: Step,
}

/// Writes the record and step under [`DRAFT_RECORD_KEY`] and [`DRAFT_STEP_KEY`].
pub async fn save_draft<S: DraftStore + ?Sized>(
    store: &S,
    record: &AnswerRecord,
    step: Step,
) -> Result<(), StorageError> {
    let json =
        serde_json::to_string(record).map_err(|e| StorageError::Serialization(e.to_string()))?;

    store.write(DRAFT_RECORD_KEY, &json).await?;
    store.write(DRAFT_STEP_KEY, &step.number().to_string()).await?;

    debug!(step = step.number(), "draft saved");
    Ok(())
}

/// Reads a saved draft back.
///
/// Returns `Ok(None)` when no record has been saved. A missing or
/// unreadable step falls back to the first step; an unreadable record is a
/// [`StorageError::Serialization`].
pub async fn load_draft<S: DraftStore + ?Sized>(
    store: &S,
) -> Result<Option<SavedDraft>, StorageError> {
    let Some(json) = store.read(DRAFT_RECORD_KEY).await? else {
        return Ok(None);
    };

    let record: AnswerRecord =
        serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let step = match store.read(DRAFT_STEP_KEY).await? {
        Some(raw) => parse_step(&raw),
        None => Step::default(),
    };

    Ok(Some(SavedDraft { record, step }))
}

/// Deletes both draft keys.
pub async fn clear_draft<S: DraftStore + ?Sized>(store: &S) -> Result<(), StorageError> {
    store.delete(DRAFT_RECORD_KEY).await?;
    store.delete(DRAFT_STEP_KEY).await?;
    debug!("draft cleared");
    Ok(())
}

fn parse_step(raw: &str) -> Step {
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(Step::from_number)
        .unwrap_or_else(|| {
            warn!(raw, "stored step is not 1-4, starting from the first step");
            Step::default()
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Field;
    use crate::storage::MemoryDraftStore;

    fn sample() -> AnswerRecord {
        AnswerRecord::new()
            .with(Field::FullName, "Watu Matuze")
            .with(Field::CoverageType, "comprehensive")
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryDraftStore::new();

        save_draft(&store, &sample(), Step::Coverage).await.unwrap();
        let draft = load_draft(&store).await.unwrap();

        assert_eq!(
            draft,
            Some(SavedDraft {
                record: sample(),
                step: Step::Coverage,
            })
        );
    }

    #[tokio::test]
    async fn save_writes_both_keys() {
        let store = MemoryDraftStore::new();

        save_draft(&store, &sample(), Step::Vehicle).await.unwrap();

        assert_eq!(store.read(DRAFT_STEP_KEY).await.unwrap().as_deref(), Some("2"));
        let json = store.read(DRAFT_RECORD_KEY).await.unwrap().unwrap();
        assert!(json.contains("\"fullName\":\"Watu Matuze\""));
    }

    #[tokio::test]
    async fn load_without_draft_is_none() {
        let store = MemoryDraftStore::new();

        assert_eq!(load_draft(&store).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unreadable_step_falls_back_to_first() {
        let store = MemoryDraftStore::new();
        save_draft(&store, &sample(), Step::Summary).await.unwrap();
        store.write(DRAFT_STEP_KEY, "seven").await.unwrap();

        let draft = load_draft(&store).await.unwrap().unwrap();

        assert_eq!(draft.step, Step::Personal);
    }

    #[tokio::test]
    async fn missing_step_falls_back_to_first() {
        let store = MemoryDraftStore::new();
        store.write(DRAFT_RECORD_KEY, "{}").await.unwrap();

        let draft = load_draft(&store).await.unwrap().unwrap();

        assert_eq!(draft.step, Step::Personal);
        assert_eq!(draft.record, AnswerRecord::default());
    }

    #[tokio::test]
    async fn corrupt_record_is_a_serialization_error() {
        let store = MemoryDraftStore::new();
        store.write(DRAFT_RECORD_KEY, "not json").await.unwrap();

        let result = load_draft(&store).await;

        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[tokio::test]
    async fn clear_removes_both_keys() {
        let store = MemoryDraftStore::new();
        save_draft(&store, &sample(), Step::Vehicle).await.unwrap();

        clear_draft(&store).await.unwrap();

        assert_eq!(store.read(DRAFT_RECORD_KEY).await.unwrap(), None);
        assert_eq!(store.read(DRAFT_STEP_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_on_empty_store_is_ok() {
        assert_eq!(clear_draft(&MemoryDraftStore::new()).await, Ok(()));
    }

    #[tokio::test]
    async fn boxed_store_delegates() {
        let store: Box<dyn DraftStore> = Box::new(MemoryDraftStore::new());

        save_draft(&store, &sample(), Step::Vehicle).await.unwrap();

        assert!(load_draft(&store).await.unwrap().is_some());
    }
}
