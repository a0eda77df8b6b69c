use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::wire::{NewBlock, RawBlock, RawPage};
use super::NotionApi;
use crate::error::{BoardError, BoardResult};

/// In-memory Notion that records every call.
#[derive(Default)]
pub struct MockNotion {
    pages: Mutex<Vec<RawPage>>,
    children: Mutex<HashMap<String, Vec<RawBlock>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    failing_deletes: HashSet<String>,
    fail_reads: bool,
    fail_writes: bool,
    next_block: Mutex<usize>,
    delete_limit: Option<usize>,
    deletes_in_flight: AtomicUsize,
    max_deletes_in_flight: AtomicUsize,
}

fn server_error() -> BoardError {
    BoardError::Http {
        status: 500,
        body: "mock failure".into(),
    }
}

pub fn page(id: &str, properties: Value) -> RawPage {
    serde_json::from_value(json!({
        "id": id,
        "last_edited_time": "2024-05-01T09:30:00.000Z",
        "url": format!("https://www.notion.so/{id}"),
        "properties": properties,
    }))
    .unwrap()
}

pub fn block(id: &str, kind: &str, runs: &[&str]) -> RawBlock {
    let runs: Vec<Value> = runs.iter().map(|t| json!({ "plain_text": t })).collect();
    serde_json::from_value(json!({
        "object": "block",
        "id": id,
        "type": kind,
        kind: { "rich_text": runs },
    }))
    .unwrap()
}

impl MockNotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: RawPage) -> Self {
        self.pages.lock().unwrap().push(page);
        self
    }

    pub fn with_children(self, page_id: &str, blocks: Vec<RawBlock>) -> Self {
        self.children
            .lock()
            .unwrap()
            .insert(page_id.to_string(), blocks);
        self
    }

    pub fn failing_delete(mut self, block_id: &str) -> Self {
        self.failing_deletes.insert(block_id.to_string());
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn with_delete_concurrency(mut self, limit: usize) -> Self {
        self.delete_limit = Some(limit);
        self
    }

    /// Highest number of `delete_block` calls that were awaiting at the same time.
    pub fn max_deletes_in_flight(&self) -> usize {
        self.max_deletes_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn children_of(&self, page_id: &str) -> Vec<RawBlock> {
        self.children
            .lock()
            .unwrap()
            .get(page_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn page_properties(&self, page_id: &str) -> Option<Value> {
        self.pages
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == page_id)
            .map(|p| Value::Object(p.properties.clone()))
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl NotionApi for MockNotion {
    async fn query_database(&self) -> BoardResult<Vec<RawPage>> {
        self.log("query".into());
        if self.fail_reads {
            return Err(server_error());
        }
        Ok(self.pages.lock().unwrap().clone())
    }

    async fn retrieve_page(&self, page_id: &str) -> BoardResult<RawPage> {
        self.log(format!("retrieve:{page_id}"));
        if self.fail_reads {
            return Err(server_error());
        }
        self.pages
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == page_id)
            .cloned()
            .ok_or(BoardError::Http {
                status: 404,
                body: "object_not_found".into(),
            })
    }

    async fn update_properties(&self, page_id: &str, properties: Value) -> BoardResult<()> {
        self.log(format!("update:{page_id}"));
        if self.fail_writes {
            return Err(server_error());
        }
        let mut pages = self.pages.lock().unwrap();
        let page = pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or(BoardError::Http {
                status: 404,
                body: "object_not_found".into(),
            })?;
        if let Value::Object(map) = properties {
            for (name, value) in map {
                page.properties.insert(name, value);
            }
        }
        Ok(())
    }

    async fn list_children(&self, block_id: &str) -> BoardResult<Vec<RawBlock>> {
        self.log(format!("list:{block_id}"));
        if self.fail_reads {
            return Err(server_error());
        }
        Ok(self.children_of(block_id))
    }

    async fn delete_block(&self, block_id: &str) -> BoardResult<()> {
        self.log(format!("delete:{block_id}"));
        let now = self.deletes_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_deletes_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.deletes_in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_deletes.contains(block_id) {
            return Err(server_error());
        }
        for blocks in self.children.lock().unwrap().values_mut() {
            blocks.retain(|b| b.id != block_id);
        }
        Ok(())
    }

    async fn append_children(&self, block_id: &str, children: &[NewBlock]) -> BoardResult<()> {
        self.log(format!("append:{block_id}:{}", children.len()));
        if self.fail_writes {
            return Err(server_error());
        }
        let mut appended = Vec::new();
        for child in children {
            let mut value = serde_json::to_value(child)?;
            let mut next = self.next_block.lock().unwrap();
            *next += 1;
            value["id"] = json!(format!("new-{}", *next));
            appended.push(serde_json::from_value::<RawBlock>(value)?);
        }
        self.children
            .lock()
            .unwrap()
            .entry(block_id.to_string())
            .or_default()
            .extend(appended);
        Ok(())
    }

    fn delete_concurrency(&self) -> usize {
        self.delete_limit.unwrap_or(4)
    }
}
