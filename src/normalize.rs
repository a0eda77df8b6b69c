//! Notion page -> [`Record`].
//!
//! Deployments name and type the same logical column differently, so each
//! field is resolved from an ordered list of `(property, kind)` rules. The
//! first rule producing a non-empty value wins; when none does the field
//! gets its default. Nothing in here returns an error.

use serde_json::{Map, Value};

use crate::model::record::{Record, NO_STATUS, UNTITLED};
use crate::notion::wire::{run_text, RawPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Title,
    Select,
    Status,
    MultiSelect,
    People,
    RichText,
}

/// The value pulled out of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub avatar_url: Option<String>,
}

impl PropertyKind {
    fn key(self) -> &'static str {
        match self {
            PropertyKind::Title => "title",
            PropertyKind::Select => "select",
            PropertyKind::Status => "status",
            PropertyKind::MultiSelect => "multi_select",
            PropertyKind::People => "people",
            PropertyKind::RichText => "rich_text",
        }
    }

    pub fn extract(self, property: &Value) -> Option<Extracted> {
        let field = property.get(self.key())?;
        let extracted = match self {
            PropertyKind::Title | PropertyKind::RichText => Extracted {
                text: field.as_array()?.first().and_then(run_text)?.to_string(),
                avatar_url: None,
            },
            PropertyKind::Select | PropertyKind::Status => Extracted {
                text: field.get("name")?.as_str()?.to_string(),
                avatar_url: None,
            },
            PropertyKind::MultiSelect | PropertyKind::People => {
                let entry = field.as_array()?.first()?;
                Extracted {
                    text: entry.get("name")?.as_str()?.to_string(),
                    avatar_url: entry
                        .get("avatar_url")
                        .and_then(Value::as_str)
                        .filter(|u| !u.is_empty())
                        .map(String::from),
                }
            }
        };
        (!extracted.text.is_empty()).then_some(extracted)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub property: &'static str,
    pub kind: PropertyKind,
}

const fn rule(property: &'static str, kind: PropertyKind) -> Rule {
    Rule { property, kind }
}

pub const TITLE_RULES: &[Rule] = &[
    rule("Task", PropertyKind::Title),
    rule("Name", PropertyKind::Title),
    rule("Title", PropertyKind::Title),
];

pub const STATUS_RULES: &[Rule] = &[
    rule("Status", PropertyKind::Select),
    rule("Status", PropertyKind::Status),
];

pub const ASSIGNEE_RULES: &[Rule] = &[
    rule("Assignee", PropertyKind::MultiSelect),
    rule("Assignee", PropertyKind::People),
    rule("Person", PropertyKind::People),
];

pub const DEPTH1_RULES: &[Rule] = &[
    rule("1Depth", PropertyKind::Select),
    rule("1Depth", PropertyKind::MultiSelect),
    rule("1Depth", PropertyKind::RichText),
];

pub const DEPTH2_RULES: &[Rule] = &[
    rule("2Depth", PropertyKind::Select),
    rule("2Depth", PropertyKind::MultiSelect),
    rule("2Depth", PropertyKind::RichText),
];

pub fn resolve(properties: &Map<String, Value>, rules: &[Rule]) -> Option<Extracted> {
    rules.iter().find_map(|r| {
        properties
            .get(r.property)
            .and_then(|property| r.kind.extract(property))
    })
}

fn resolve_text(properties: &Map<String, Value>, rules: &[Rule]) -> Option<String> {
    resolve(properties, rules).map(|e| e.text)
}

pub fn normalize_page(page: &RawPage) -> Record {
    let props = &page.properties;
    let assignee = resolve(props, ASSIGNEE_RULES);

    Record {
        id: page.id.clone(),
        title: resolve_text(props, TITLE_RULES).unwrap_or_else(|| UNTITLED.to_string()),
        status: resolve_text(props, STATUS_RULES).unwrap_or_else(|| NO_STATUS.to_string()),
        assignee_avatar_url: assignee.as_ref().and_then(|a| a.avatar_url.clone()),
        assignee: assignee.map(|a| a.text),
        last_edited_time: page.last_edited_time.clone(),
        url: page.url.clone(),
        depth1: resolve_text(props, DEPTH1_RULES),
        depth2: resolve_text(props, DEPTH2_RULES),
    }
}

pub fn normalize_pages(pages: &[RawPage]) -> Vec<Record> {
    pages.iter().map(normalize_page).collect()
}
