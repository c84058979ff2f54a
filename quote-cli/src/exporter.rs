use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use quote_core::{ExportError, ExportRequest, QuoteExporter};
use tracing::debug;

use crate::document::DocumentRenderer;

/// Writes quote documents as text files into a directory.
#[derive(Debug, Clone)]
pub struct TextDocumentExporter {
    directory: PathBuf,
    renderer: DocumentRenderer,
}

impl TextDocumentExporter {
    pub const EXTENSION: &'static str = "txt";

    /// # Errors
    ///
    /// [`ExportError::Render`] if the document template fails to load.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, ExportError> {
        Ok(Self {
            directory: directory.into(),
            renderer: DocumentRenderer::new()?,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Joins `file_name` onto `directory`, refusing anything but a single plain
/// file name so the document always lands directly inside `directory`.
fn document_path(
    directory: &Path,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(directory.join(file_name)),
        _ => Err(ExportError::InvalidRequest(format!(
            "'{file_name}' is not a plain file name"
        ))),
    }
}

#[async_trait]
impl QuoteExporter for TextDocumentExporter {
    /// Creates the directory if needed and overwrites a same-day document
    /// for the same name.
    async fn export(
        &self,
        request: &ExportRequest,
    ) -> Result<PathBuf, ExportError> {
        let path = document_path(&self.directory, &request.file_name(Self::EXTENSION))?;
        let document = self.renderer.render(request)?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| ExportError::Io {
                path: self.directory.clone(),
                source,
            })?;

        tokio::fs::write(&path, document)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "quote document written");
        Ok(path)
    }
}
