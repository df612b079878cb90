use serde::{Deserialize, Serialize};

/// Task priority, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high sorts before medium sorts before low
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// One of the five fixed pipeline columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    #[default]
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl Column {
    /// All columns in board order
    pub const ALL: [Column; 5] = [
        Column::Backlog,
        Column::Todo,
        Column::InProgress,
        Column::Review,
        Column::Done,
    ];

    /// Storage/CLI key (matches the serialized form)
    pub fn key(self) -> &'static str {
        match self {
            Column::Backlog => "backlog",
            Column::Todo => "todo",
            Column::InProgress => "inprogress",
            Column::Review => "review",
            Column::Done => "done",
        }
    }

    /// Human-facing column header
    pub fn label(self) -> &'static str {
        match self {
            Column::Backlog => "Backlog",
            Column::Todo => "To Do",
            Column::InProgress => "In Progress",
            Column::Review => "Review",
            Column::Done => "Done",
        }
    }

    pub fn parse(s: &str) -> Option<Column> {
        match s {
            "backlog" => Some(Column::Backlog),
            "todo" => Some(Column::Todo),
            "inprogress" => Some(Column::InProgress),
            "review" => Some(Column::Review),
            "done" => Some(Column::Done),
            _ => None,
        }
    }
}

/// A single task card. Serialized field names match the board blob format
/// (`createdAt` stays camelCase, `due` is an ISO date string or empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique ID, stable for the record's lifetime
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assignee: String,
    /// ISO date (`2025-12-20`) or empty for no due date
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub column: Column,
    /// Creation time, ms since epoch; stable sort tie-break
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}

/// Field values for a new task; anything omitted takes the documented default.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub desc: String,
    pub priority: Priority,
    pub assignee: String,
    pub due: String,
    pub column: Column,
}

/// A partial update: only `Some` fields are applied, everything else is
/// preserved. `id` and `createdAt` are never touched by a patch.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub due: Option<String>,
    pub column: Option<Column>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.desc.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.due.is_none()
            && self.column.is_none()
    }
}

impl Task {
    /// Merge a patch over this task in place.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(desc) = patch.desc {
            self.desc = desc;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        if let Some(due) = patch.due {
            self.due = due;
        }
        if let Some(column) = patch.column {
            self.column = column;
        }
    }

    /// Parse the due field, treating empty or malformed values as "no date".
    pub fn due_date(&self) -> Option<chrono::NaiveDate> {
        if self.due.is_empty() {
            return None;
        }
        chrono::NaiveDate::parse_from_str(&self.due, "%Y-%m-%d").ok()
    }
}
