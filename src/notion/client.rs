use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde_json::{json, Value};

use super::wire::{self, ListResponse, NewBlock, RawBlock, RawPage};
use super::NotionApi;
use crate::config::{NotionConfig, NOTION_VERSION};
use crate::error::{BoardError, BoardResult};

pub struct NotionClient {
    config: NotionConfig,
    client: reqwest::Client,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> BoardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", NOTION_VERSION)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> BoardResult<Value> {
        tracing::debug!("Notion request: {what}");
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "Notion API error: {what}");
            return Err(BoardError::Http {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn query_database(&self) -> BoardResult<Vec<RawPage>> {
        let database_id = self.config.database_id()?;
        let value = self
            .send(
                self.request(Method::POST, &format!("/databases/{database_id}/query"))
                    .json(&wire::query_body()),
                "query database",
            )
            .await?;
        let list: ListResponse = serde_json::from_value(value)?;
        Ok(wire::decode_results(list.results, "page"))
    }

    async fn retrieve_page(&self, page_id: &str) -> BoardResult<RawPage> {
        let value = self
            .send(
                self.request(Method::GET, &format!("/pages/{page_id}")),
                "retrieve page",
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn update_properties(&self, page_id: &str, properties: Value) -> BoardResult<()> {
        self.send(
            self.request(Method::PATCH, &format!("/pages/{page_id}"))
                .json(&json!({ "properties": properties })),
            "update page properties",
        )
        .await?;
        Ok(())
    }

    async fn list_children(&self, block_id: &str) -> BoardResult<Vec<RawBlock>> {
        let value = self
            .send(
                self.request(Method::GET, &format!("/blocks/{block_id}/children")),
                "list block children",
            )
            .await?;
        let list: ListResponse = serde_json::from_value(value)?;
        Ok(wire::decode_results(list.results, "block"))
    }

    async fn delete_block(&self, block_id: &str) -> BoardResult<()> {
        self.send(
            self.request(Method::DELETE, &format!("/blocks/{block_id}")),
            "delete block",
        )
        .await?;
        Ok(())
    }

    async fn append_children(&self, block_id: &str, children: &[NewBlock]) -> BoardResult<()> {
        self.send(
            self.request(Method::PATCH, &format!("/blocks/{block_id}/children"))
                .json(&json!({ "children": children })),
            "append block children",
        )
        .await?;
        Ok(())
    }

    fn delete_concurrency(&self) -> usize {
        self.config.delete_concurrency
    }
}
