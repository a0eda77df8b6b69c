use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A database row as returned by the query and retrieve endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: String,
    #[serde(default)]
    pub last_edited_time: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// A child block. The type-specific payload is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl RawBlock {
    /// Plain text of each rich-text run under the block's type key.
    pub fn text_runs(&self) -> Vec<&str> {
        self.body
            .get(&self.kind)
            .and_then(|b| b.get("rich_text"))
            .and_then(Value::as_array)
            .map(|runs| runs.iter().filter_map(run_text).collect())
            .unwrap_or_default()
    }
}

/// `plain_text` on read payloads, `text.content` on payloads we built ourselves.
pub fn run_text(run: &Value) -> Option<&str> {
    run.get("plain_text")
        .and_then(Value::as_str)
        .or_else(|| {
            run.get("text")
                .and_then(|t| t.get("content"))
                .and_then(Value::as_str)
        })
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Decode each result on its own so one malformed entry does not sink the list.
pub(crate) fn decode_results<T: serde::de::DeserializeOwned>(results: Vec<Value>, what: &str) -> Vec<T> {
    results
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed {what}: {e}");
                None
            }
        })
        .collect()
}

/// A block to be appended. Only paragraphs are ever written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBlock {
    object: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    paragraph: Paragraph,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Paragraph {
    rich_text: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct TextRun {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct TextContent {
    content: String,
}

impl NewBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            object: "block",
            kind: "paragraph",
            paragraph: Paragraph {
                rich_text: vec![TextRun {
                    kind: "text",
                    text: TextContent {
                        content: text.into(),
                    },
                }],
            },
        }
    }

    #[cfg(test)]
    pub fn kind(&self) -> &str {
        self.kind
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        self.paragraph
            .rich_text
            .iter()
            .map(|r| r.text.content.as_str())
            .collect()
    }
}

pub fn query_body() -> Value {
    json!({
        "sorts": [
            { "timestamp": "last_edited_time", "direction": "descending" }
        ]
    })
}

pub fn status_properties(status: &str) -> Value {
    json!({ "Status": { "select": { "name": status } } })
}

pub fn title_properties(title: &str) -> Value {
    json!({ "Task": { "title": [ { "text": { "content": title } } ] } })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_block_wire_shape() {
        let block = NewBlock::paragraph("hello");
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [ { "type": "text", "text": { "content": "hello" } } ]
                }
            })
        );
        assert_eq!(block.text(), "hello");
        assert_eq!(block.kind(), "paragraph");
    }

    #[test]
    fn raw_block_reads_runs_under_its_type() {
        let block: RawBlock = serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "type": "heading_2",
            "heading_2": {
                "rich_text": [ { "plain_text": "Plan " }, { "text": { "content": "A" } } ]
            }
        }))
        .unwrap();
        assert_eq!(block.kind, "heading_2");
        assert_eq!(block.text_runs(), vec!["Plan ", "A"]);
    }

    #[test]
    fn raw_block_without_payload_has_no_runs() {
        let block: RawBlock =
            serde_json::from_value(json!({ "id": "b2", "type": "divider", "divider": {} })).unwrap();
        assert!(block.text_runs().is_empty());
    }

    #[test]
    fn malformed_results_are_skipped() {
        let results = vec![
            json!({ "id": "p1", "properties": {} }),
            json!({ "properties": {} }),
        ];
        let pages: Vec<RawPage> = decode_results(results, "page");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id, "p1");
        assert_eq!(pages[0].last_edited_time, "");
    }

    #[test]
    fn property_patches() {
        assert_eq!(
            status_properties("완료"),
            json!({ "Status": { "select": { "name": "완료" } } })
        );
        assert_eq!(
            title_properties("New"),
            json!({ "Task": { "title": [ { "text": { "content": "New" } } ] } })
        );
        assert_eq!(
            query_body()["sorts"][0]["direction"],
            json!("descending")
        );
    }
}
