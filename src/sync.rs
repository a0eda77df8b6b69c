//! Page content as flat text.
//!
//! Reading flattens the page's child blocks into one line per text block.
//! Writing replaces every child with one paragraph per non-blank line, so
//! headings and list items do not survive an edit; their markers become
//! literal text.

use futures::stream::{self, StreamExt};

use crate::error::BoardResult;
use crate::notion::wire::{NewBlock, RawBlock};
use crate::notion::NotionApi;

pub const BULLET_MARKER: &str = "• ";
pub const NUMBER_MARKER: &str = "- ";

/// What a replace actually did. `failed_deletes` lists old blocks still on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub deleted: usize,
    pub failed_deletes: Vec<String>,
    pub appended: usize,
}

impl ReplaceOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed_deletes.is_empty()
    }
}

fn block_line(block: &RawBlock) -> Option<String> {
    let marker = match block.kind.as_str() {
        "paragraph" | "heading_1" | "heading_2" | "heading_3" => "",
        "bulleted_list_item" => BULLET_MARKER,
        "numbered_list_item" => NUMBER_MARKER,
        _ => return None,
    };
    let runs = block.text_runs();
    if runs.is_empty() {
        return None;
    }
    let line = format!("{marker}{}", runs.concat());
    (!line.is_empty()).then_some(line)
}

pub fn flatten_blocks(blocks: &[RawBlock]) -> String {
    blocks
        .iter()
        .filter_map(block_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One paragraph per line that has something besides whitespace. Lines are kept verbatim.
pub fn rebuild_blocks(text: &str) -> Vec<NewBlock> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(NewBlock::paragraph)
        .collect()
}

/// Flattened content of a page. Content is optional, so a failed read yields "".
pub async fn read_content<A: NotionApi + ?Sized>(api: &A, page_id: &str) -> String {
    match api.list_children(page_id).await {
        Ok(blocks) => flatten_blocks(&blocks),
        Err(e) => {
            tracing::warn!(page_id, "Failed to load page content: {e}");
            String::new()
        }
    }
}

/// Replace a page's content with `text`. Errors are returned, never swallowed.
pub async fn write_content<A: NotionApi + ?Sized>(
    api: &A,
    page_id: &str,
    text: &str,
) -> BoardResult<ReplaceOutcome> {
    let outcome = api.replace_children(page_id, rebuild_blocks(text)).await?;
    if !outcome.is_clean() {
        tracing::warn!(
            page_id,
            failed = outcome.failed_deletes.len(),
            "Content saved but some old blocks could not be deleted"
        );
    }
    Ok(outcome)
}

/// Default replace: delete every child (bounded concurrency, failures collected), then
/// append `blocks` in one call. Not atomic.
pub async fn delete_then_append<A: NotionApi + ?Sized>(
    api: &A,
    page_id: &str,
    blocks: Vec<NewBlock>,
) -> BoardResult<ReplaceOutcome> {
    let existing = api.list_children(page_id).await?;
    let limit = api.delete_concurrency().max(1);

    let results: Vec<(String, BoardResult<()>)> = stream::iter(existing.into_iter().map(|b| b.id))
        .map(move |id: String| async move {
            let result = api.delete_block(&id).await;
            (id, result)
        })
        .buffer_unordered(limit)
        .collect()
        .await;

    let mut outcome = ReplaceOutcome::default();
    for (id, result) in results {
        match result {
            Ok(()) => outcome.deleted += 1,
            Err(e) => {
                tracing::warn!(block_id = %id, "Failed to delete block: {e}");
                outcome.failed_deletes.push(id);
            }
        }
    }
    outcome.failed_deletes.sort();

    if blocks.is_empty() {
        return Ok(outcome);
    }

    api.append_children(page_id, &blocks).await?;
    outcome.appended = blocks.len();
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::mock::{block, MockNotion};

    fn sample_blocks() -> Vec<RawBlock> {
        vec![
            block("b1", "heading_1", &["Plan"]),
            block("b2", "paragraph", &["Ship ", "it"]),
            block("b3", "bulleted_list_item", &["first"]),
            block("b4", "numbered_list_item", &["second"]),
            block("b5", "to_do", &["ignored"]),
            block("b6", "paragraph", &[]),
            block("b7", "heading_3", &["Notes"]),
        ]
    }

    #[test]
    fn flattens_supported_blocks() {
        assert_eq!(
            flatten_blocks(&sample_blocks()),
            "Plan\nShip it\n• first\n- second\nNotes"
        );
    }

    #[test]
    fn flatten_of_nothing_is_empty() {
        assert_eq!(flatten_blocks(&[]), "");
        assert_eq!(flatten_blocks(&[block("x", "paragraph", &[""])]), "");
    }

    #[test]
    fn rebuild_drops_blank_lines_and_keeps_order() {
        let blocks = rebuild_blocks("one\n\n   \ntwo  \n\tthree");
        let texts: Vec<String> = blocks.iter().map(|b| b.text()).collect();
        assert_eq!(texts, vec!["one", "two  ", "\tthree"]);
        assert!(blocks.iter().all(|b| b.kind() == "paragraph"));
    }

    #[test]
    fn round_trip_preserves_text_but_not_types() {
        let flat = flatten_blocks(&sample_blocks());
        let rebuilt = rebuild_blocks(&flat);
        let expected: Vec<&str> = flat.lines().filter(|l| !l.trim().is_empty()).collect();
        let texts: Vec<String> = rebuilt.iter().map(|b| b.text()).collect();
        assert_eq!(texts, expected);
        assert!(rebuilt.iter().all(|b| b.kind() == "paragraph"));
    }

    #[tokio::test]
    async fn read_content_flattens_children() {
        let api = MockNotion::new().with_children("page", sample_blocks());
        assert_eq!(
            read_content(&api, "page").await,
            "Plan\nShip it\n• first\n- second\nNotes"
        );
    }

    #[tokio::test]
    async fn read_failure_yields_empty_content() {
        let api = MockNotion::new()
            .with_children("page", sample_blocks())
            .failing_reads();
        assert_eq!(read_content(&api, "page").await, "");
    }

    #[tokio::test]
    async fn write_replaces_all_children() {
        let api = MockNotion::new().with_children("page", sample_blocks());
        let outcome = write_content(&api, "page", "alpha\n\nbeta").await.unwrap();

        assert_eq!(outcome.deleted, 7);
        assert_eq!(outcome.appended, 2);
        assert!(outcome.is_clean());

        let children = api.children_of("page");
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|b| b.kind == "paragraph"));
        assert_eq!(read_content(&api, "page").await, "alpha\nbeta");

        let calls = api.calls();
        assert_eq!(calls.first().map(String::as_str), Some("list:page"));
        assert_eq!(calls.iter().filter(|c| c.starts_with("delete:")).count(), 7);
        assert!(calls.contains(&"append:page:2".to_string()));
    }

    #[tokio::test]
    async fn blank_text_deletes_but_never_appends() {
        let api = MockNotion::new().with_children("page", sample_blocks());
        let outcome = write_content(&api, "page", "\n   \n\t\n").await.unwrap();

        assert_eq!(outcome.appended, 0);
        assert_eq!(outcome.deleted, 7);
        assert!(api.children_of("page").is_empty());
        assert!(!api.calls().iter().any(|c| c.starts_with("append:")));
    }

    #[tokio::test]
    async fn failed_deletes_are_reported_not_fatal() {
        let api = MockNotion::new()
            .with_children("page", sample_blocks())
            .failing_delete("b4")
            .failing_delete("b2");
        let outcome = write_content(&api, "page", "fresh").await.unwrap();

        assert_eq!(outcome.deleted, 5);
        assert_eq!(outcome.failed_deletes, vec!["b2", "b4"]);
        assert_eq!(outcome.appended, 1);
        assert!(!outcome.is_clean());
    }

    #[tokio::test]
    async fn deletes_overlap_up_to_the_configured_limit() {
        let api = MockNotion::new()
            .with_children("page", sample_blocks())
            .with_delete_concurrency(3);
        let outcome = write_content(&api, "page", "fresh").await.unwrap();

        assert_eq!(outcome.deleted, 7);
        assert_eq!(api.max_deletes_in_flight(), 3);
    }

    #[tokio::test]
    async fn limit_of_one_deletes_sequentially() {
        let api = MockNotion::new()
            .with_children("page", sample_blocks())
            .with_delete_concurrency(1);
        let outcome = write_content(&api, "page", "fresh").await.unwrap();

        assert_eq!(outcome.deleted, 7);
        assert_eq!(api.max_deletes_in_flight(), 1);
    }

    #[tokio::test]
    async fn list_failure_aborts_before_deleting() {
        let api = MockNotion::new()
            .with_children("page", sample_blocks())
            .failing_reads();
        let result = write_content(&api, "page", "text").await;

        assert!(result.is_err());
        assert!(!api.calls().iter().any(|c| c.starts_with("delete:")));
    }

    #[tokio::test]
    async fn append_failure_is_propagated() {
        let api = MockNotion::new()
            .with_children("page", sample_blocks())
            .failing_writes();
        let err = write_content(&api, "page", "text").await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
