use indexmap::IndexMap;
use serde::Serialize;

use crate::model::task::{Priority, Task};
use crate::ops::query::{BoardCounts, BoardView};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct BoardJson {
    pub columns: IndexMap<String, Vec<Task>>,
    pub counts: CountsJson,
}

#[derive(Serialize)]
pub struct CountsJson {
    pub total: usize,
    pub active: usize,
    pub done: usize,
    pub columns: IndexMap<String, usize>,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub id: String,
    pub title: String,
    pub column: String,
    pub priority: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn board_to_json(view: &BoardView<'_>, counts: &BoardCounts) -> BoardJson {
    let mut columns = IndexMap::new();
    for (col, tasks) in view.columns() {
        columns.insert(
            col.key().to_string(),
            tasks.iter().map(|t| (*t).clone()).collect(),
        );
    }
    BoardJson {
        columns,
        counts: counts_to_json(counts),
    }
}

pub fn counts_to_json(counts: &BoardCounts) -> CountsJson {
    CountsJson {
        total: counts.total,
        active: counts.active,
        done: counts.done,
        columns: counts
            .per_column
            .iter()
            .map(|(col, n)| (col.key().to_string(), *n))
            .collect(),
    }
}

pub fn search_hit_to_json(task: &Task) -> SearchHitJson {
    SearchHitJson {
        id: task.id.clone(),
        title: task.title.clone(),
        column: task.column.key().to_string(),
        priority: task.priority.as_str().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// One-line card rendering: priority marker, id, title, then assignee and
/// due date when present.
pub fn format_task_line(task: &Task) -> String {
    let marker = match task.priority {
        Priority::High => "!",
        Priority::Medium => "-",
        Priority::Low => ".",
    };
    let mut line = format!("  [{}] {}  {}", marker, task.id, task.title);
    if !task.assignee.is_empty() {
        line.push_str(&format!("  @{}", task.assignee));
    }
    if !task.due.is_empty() {
        line.push_str(&format!("  due:{}", task.due));
    }
    line
}

/// Render the whole board as text, one section per column.
pub fn format_board(view: &BoardView<'_>, counts: &BoardCounts) -> String {
    let mut out = String::new();
    for (col, tasks) in view.columns() {
        let total_in_col = counts
            .per_column
            .iter()
            .find(|(c, _)| c == col)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        out.push_str(&format!("{} ({})\n", col.label(), total_in_col));
        if tasks.is_empty() {
            out.push_str("  (empty)\n");
        }
        for task in tasks {
            out.push_str(&format_task_line(task));
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "{} tasks: {} active, {} done\n",
        counts.total, counts.active, counts.done
    ));
    out
}

/// Multi-line detail rendering for `show`.
pub fn format_task_detail(task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", task.id, task.title));
    out.push_str(&format!("  column:   {}\n", task.column.key()));
    out.push_str(&format!("  priority: {}\n", task.priority.as_str()));
    if !task.desc.is_empty() {
        out.push_str(&format!("  desc:     {}\n", task.desc));
    }
    if !task.assignee.is_empty() {
        out.push_str(&format!("  assignee: {}\n", task.assignee));
    }
    if !task.due.is_empty() {
        out.push_str(&format!("  due:      {}\n", task.due));
    }
    out
}
