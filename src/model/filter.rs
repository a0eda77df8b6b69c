use std::collections::{BTreeMap, BTreeSet};

use super::record::Record;

pub const ALL_TASKS: &str = "All Tasks";

/// Board filter. `None` on either axis means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub assignee: Option<String>,
    pub status: Option<String>,
}

impl Filter {
    pub fn matches(&self, record: &Record) -> bool {
        let assignee_ok = self
            .assignee
            .as_ref()
            .map_or(true, |a| record.assignee.as_ref() == Some(a));
        let status_ok = self.status.as_ref().map_or(true, |s| &record.status == s);
        assignee_ok && status_ok
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.assignee.is_none() && self.status.is_none()
    }

    pub fn heading(&self) -> &str {
        self.assignee.as_deref().unwrap_or(ALL_TASKS)
    }
}

/// Distinct assignees, sorted.
pub fn assignees(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.assignee.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records per assignee. Unassigned records are not counted.
pub fn assignee_counts(records: &[Record]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for assignee in records.iter().filter_map(|r| r.assignee.as_ref()) {
        *counts.entry(assignee.clone()).or_insert(0) += 1;
    }
    counts
}

/// Distinct statuses in first-seen order.
pub fn statuses(records: &[Record]) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.status) {
            seen.push(record.status.clone());
        }
    }
    seen
}

pub fn status_counts(records: &[Record]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.status.clone()).or_insert(0) += 1;
    }
    counts
}

/// Step through `None, options[0], options[1], ..., None`.
pub fn cycle(current: Option<&str>, options: &[String], forward: bool) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let pos = current.and_then(|c| options.iter().position(|o| o == c));
    let next = match (pos, forward) {
        (None, true) => Some(0),
        (None, false) => Some(options.len() - 1),
        (Some(i), true) if i + 1 < options.len() => Some(i + 1),
        (Some(_), true) => None,
        (Some(0), false) => None,
        (Some(i), false) => Some(i - 1),
    };
    next.map(|i| options[i].clone())
}
