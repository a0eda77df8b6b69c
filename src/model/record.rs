use serde::Serialize;

pub const UNTITLED: &str = "Untitled";
pub const NO_STATUS: &str = "No Status";

/// One task row, normalized from a Notion page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub title: String,
    pub status: String,
    pub assignee: Option<String>,
    /// Independent of `assignee`: tag-style assignees have a name but no avatar.
    pub assignee_avatar_url: Option<String>,
    pub last_edited_time: String,
    pub url: String,
    pub depth1: Option<String>,
    pub depth2: Option<String>,
}

impl Record {
    /// Local-time rendering of `last_edited_time`; the raw value if it does not parse.
    pub fn last_edited_display(&self) -> String {
        match chrono::DateTime::parse_from_rfc3339(&self.last_edited_time) {
            Ok(t) => t
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            Err(_) => self.last_edited_time.clone(),
        }
    }

    pub fn depth_path(&self) -> Option<String> {
        match (&self.depth1, &self.depth2) {
            (Some(a), Some(b)) => Some(format!("{a} / {b}")),
            (Some(a), None) => Some(a.clone()),
            (None, Some(b)) => Some(b.clone()),
            (None, None) => None,
        }
    }
}
