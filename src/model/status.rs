use serde::Serialize;

use super::record::Record;

/// Statuses offered in the picker. Remote pages may carry anything else.
pub const STATUS_SUGGESTIONS: [&str; 5] = ["시작전", "진행중", "완료", "이슈", "딜레이"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Completed,
    InProgress,
    Issue,
    Delayed,
    NotStarted,
    Review,
    Uncategorized,
}

const COMPLETED: &[&str] = &["완료", "done", "complete"];
const IN_PROGRESS: &[&str] = &["진행", "progress", "doing"];
const ISSUE: &[&str] = &["이슈", "issue", "block"];
const DELAYED: &[&str] = &["딜레이", "delay", "hold"];
const NOT_STARTED: &[&str] = &["시작", "not started", "to do", "todo"];
const REVIEW: &[&str] = &["review", "검토"];

// Checked in order; the first hit wins.
const RULES: [(StatusCategory, &[&str]); 6] = [
    (StatusCategory::Completed, COMPLETED),
    (StatusCategory::InProgress, IN_PROGRESS),
    (StatusCategory::Issue, ISSUE),
    (StatusCategory::Delayed, DELAYED),
    (StatusCategory::NotStarted, NOT_STARTED),
    (StatusCategory::Review, REVIEW),
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

impl StatusCategory {
    pub fn classify(status: &str) -> Self {
        let lower = status.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| contains_any(&lower, keywords))
            .map(|(category, _)| *category)
            .unwrap_or(StatusCategory::Uncategorized)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusCategory::Completed => "Completed",
            StatusCategory::InProgress => "In Progress",
            StatusCategory::Issue => "Issue",
            StatusCategory::Delayed => "Delayed",
            StatusCategory::NotStarted => "Not Started",
            StatusCategory::Review => "Review",
            StatusCategory::Uncategorized => "uncategorized",
        }
    }
}

/// Coarse grouping used for the overview numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Completed,
    InProgress,
    NotStarted,
}

impl Bucket {
    /// Only the completed and in-progress keywords matter; everything else is not started.
    pub fn of(status: &str) -> Self {
        let lower = status.to_lowercase();
        if contains_any(&lower, COMPLETED) {
            Bucket::Completed
        } else if contains_any(&lower, IN_PROGRESS) {
            Bucket::InProgress
        } else {
            Bucket::NotStarted
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub completed_percentage: u32,
    pub in_progress_percentage: u32,
    pub not_started_percentage: u32,
}

impl BoardStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut stats = BoardStats::default();
        for record in records {
            stats.total += 1;
            match Bucket::of(&record.status) {
                Bucket::Completed => stats.completed += 1,
                Bucket::InProgress => stats.in_progress += 1,
                Bucket::NotStarted => stats.not_started += 1,
            }
        }
        stats.completed_percentage = percentage(stats.completed, stats.total);
        stats.in_progress_percentage = percentage(stats.in_progress, stats.total);
        stats.not_started_percentage = percentage(stats.not_started, stats.total);
        stats
    }
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
