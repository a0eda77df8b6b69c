pub mod client;
pub mod wire;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BoardResult;
use crate::sync::{self, ReplaceOutcome};
use wire::{NewBlock, RawBlock, RawPage};

/// The Notion operations the board needs. `NotionClient` talks HTTP; tests use in-memory fakes.
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// All rows of the configured database, most recently edited first.
    async fn query_database(&self) -> BoardResult<Vec<RawPage>>;
    async fn retrieve_page(&self, page_id: &str) -> BoardResult<RawPage>;
    async fn update_properties(&self, page_id: &str, properties: Value) -> BoardResult<()>;
    async fn list_children(&self, block_id: &str) -> BoardResult<Vec<RawBlock>>;
    async fn delete_block(&self, block_id: &str) -> BoardResult<()>;
    async fn append_children(&self, block_id: &str, children: &[NewBlock]) -> BoardResult<()>;

    fn delete_concurrency(&self) -> usize {
        4
    }

    /// Swap a page's children for `blocks`. The default deletes then appends and is not atomic;
    /// a backend with a batch endpoint can override it.
    async fn replace_children(
        &self,
        page_id: &str,
        blocks: Vec<NewBlock>,
    ) -> BoardResult<ReplaceOutcome> {
        sync::delete_then_append(self, page_id, blocks).await
    }
}
