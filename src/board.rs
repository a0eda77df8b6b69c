use std::sync::Arc;

use crate::config::NotionConfig;
use crate::error::BoardResult;
use crate::model::record::Record;
use crate::normalize::{normalize_page, normalize_pages};
use crate::notion::client::NotionClient;
use crate::notion::wire::{status_properties, title_properties};
use crate::notion::NotionApi;
use crate::sync::{self, ReplaceOutcome};

/// A record together with its flattened content.
#[derive(Debug, Clone)]
pub struct RecordDetail {
    pub record: Record,
    pub content: String,
}

/// Board operations over a Notion backend.
#[derive(Clone)]
pub struct Board {
    api: Arc<dyn NotionApi>,
}

impl Board {
    pub fn new(api: Arc<dyn NotionApi>) -> Self {
        Self { api }
    }

    pub fn from_config(config: NotionConfig) -> BoardResult<Self> {
        Ok(Self::new(Arc::new(NotionClient::new(config)?)))
    }

    pub async fn records(&self) -> BoardResult<Vec<Record>> {
        let pages = self.api.query_database().await?;
        tracing::info!(count = pages.len(), "Fetched records");
        Ok(normalize_pages(&pages))
    }

    pub async fn record(&self, page_id: &str) -> BoardResult<Record> {
        let page = self.api.retrieve_page(page_id).await?;
        Ok(normalize_page(&page))
    }

    pub async fn content(&self, page_id: &str) -> String {
        sync::read_content(self.api.as_ref(), page_id).await
    }

    /// Fetch the record and its content at the same time.
    pub async fn detail(&self, page_id: &str) -> BoardResult<RecordDetail> {
        let (record, content) = tokio::join!(self.record(page_id), self.content(page_id));
        Ok(RecordDetail {
            record: record?,
            content,
        })
    }

    pub async fn set_status(&self, page_id: &str, status: &str) -> BoardResult<()> {
        self.api
            .update_properties(page_id, status_properties(status))
            .await?;
        tracing::info!(page_id, status, "Updated status");
        Ok(())
    }

    pub async fn set_title(&self, page_id: &str, title: &str) -> BoardResult<()> {
        self.api
            .update_properties(page_id, title_properties(title))
            .await?;
        tracing::info!(page_id, "Updated title");
        Ok(())
    }

    pub async fn save_content(&self, page_id: &str, text: &str) -> BoardResult<ReplaceOutcome> {
        let outcome = sync::write_content(self.api.as_ref(), page_id, text).await?;
        tracing::info!(
            page_id,
            deleted = outcome.deleted,
            appended = outcome.appended,
            "Saved content"
        );
        Ok(outcome)
    }
}
