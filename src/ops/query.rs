use std::cmp::Ordering;

use crate::model::task::{Column, Priority, Task};

/// Optional single-category predicate applied on top of search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// The "all" sentinel: no restriction
    #[default]
    All,
    Priority(Priority),
}

impl Filter {
    /// Parse a filter argument: "all" (or empty) is the sentinel, otherwise
    /// a priority name.
    pub fn parse(s: &str) -> Option<Filter> {
        match s {
            "" | "all" => Some(Filter::All),
            other => Priority::parse(other).map(Filter::Priority),
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Priority(p) => task.priority == *p,
        }
    }
}

/// The per-column, sorted, filtered task listing computed for rendering.
#[derive(Debug)]
pub struct BoardView<'a> {
    columns: Vec<(Column, Vec<&'a Task>)>,
}

impl<'a> BoardView<'a> {
    /// Columns in board order with their visible tasks.
    pub fn columns(&self) -> &[(Column, Vec<&'a Task>)] {
        &self.columns
    }

    /// Visible tasks for one column.
    pub fn tasks_in(&self, column: Column) -> &[&'a Task] {
        self.columns
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, tasks)| tasks.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of visible tasks across all columns.
    pub fn visible_count(&self) -> usize {
        self.columns.iter().map(|(_, t)| t.len()).sum()
    }
}

/// Aggregate counts over the whole collection (not filtered).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCounts {
    pub total: usize,
    /// Everything not in the done column
    pub active: usize,
    pub done: usize,
    pub per_column: Vec<(Column, usize)>,
}

/// Compute the visible set: filter by search query and category filter,
/// partition into the five columns, sort each column. Pure function; re-run
/// after every mutation or search/filter change.
pub fn visible_set<'a>(tasks: &'a [Task], query: &str, filter: Filter) -> BoardView<'a> {
    let query = query.trim().to_lowercase();

    let surviving: Vec<&Task> = tasks
        .iter()
        .filter(|t| filter.matches(t) && matches_query(t, &query))
        .collect();

    let mut columns = Vec::with_capacity(Column::ALL.len());
    for col in Column::ALL {
        let mut col_tasks: Vec<&Task> =
            surviving.iter().copied().filter(|t| t.column == col).collect();
        col_tasks.sort_by(|a, b| compare_tasks(a, b));
        columns.push((col, col_tasks));
    }

    BoardView { columns }
}

/// Case-insensitive substring search over title, description and assignee.
/// An empty query matches everything.
fn matches_query(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(query)
        || task.desc.to_lowercase().contains(query)
        || task.assignee.to_lowercase().contains(query)
}

/// Column ordering: priority rank, then due date (dated before undated,
/// earlier first), then creation time.
fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    let by_priority = a.priority.rank().cmp(&b.priority.rank());
    if by_priority != Ordering::Equal {
        return by_priority;
    }
    match (a.due_date(), b.due_date()) {
        (Some(da), Some(db)) => {
            let by_due = da.cmp(&db);
            if by_due != Ordering::Equal {
                return by_due;
            }
            a.created_at.cmp(&b.created_at)
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.created_at.cmp(&b.created_at),
    }
}

/// Aggregate counts for the header bar and per-column badges.
pub fn counts(tasks: &[Task]) -> BoardCounts {
    let total = tasks.len();
    let done = tasks.iter().filter(|t| t.column == Column::Done).count();
    let per_column = Column::ALL
        .iter()
        .map(|&col| (col, tasks.iter().filter(|t| t.column == col).count()))
        .collect();
    BoardCounts {
        total,
        active: total - done,
        done,
        per_column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, title: &str, priority: Priority, due: &str, column: Column, created_at: i64) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            desc: String::new(),
            priority,
            assignee: String::new(),
            due: due.into(),
            column,
            created_at,
        }
    }

    fn ids(view: &BoardView<'_>, column: Column) -> Vec<String> {
        view.tasks_in(column).iter().map(|t| t.id.clone()).collect()
    }

    // --- Sort ---

    #[test]
    fn test_sort_by_priority() {
        let tasks = vec![
            task("a", "low", Priority::Low, "", Column::Todo, 1),
            task("b", "high", Priority::High, "", Column::Todo, 2),
            task("c", "medium", Priority::Medium, "", Column::Todo, 3),
        ];
        let view = visible_set(&tasks, "", Filter::All);
        assert_eq!(ids(&view, Column::Todo), ["b", "c", "a"]);
    }

    #[test]
    fn test_sort_dated_before_undated() {
        let tasks = vec![
            task("a", "no due", Priority::Medium, "", Column::Todo, 1),
            task("b", "dated", Priority::Medium, "2025-01-01", Column::Todo, 2),
        ];
        let view = visible_set(&tasks, "", Filter::All);
        assert_eq!(ids(&view, Column::Todo), ["b", "a"]);
    }

    #[test]
    fn test_sort_earlier_due_first() {
        let tasks = vec![
            task("a", "later", Priority::Medium, "2025-06-01", Column::Todo, 1),
            task("b", "sooner", Priority::Medium, "2025-01-15", Column::Todo, 2),
        ];
        let view = visible_set(&tasks, "", Filter::All);
        assert_eq!(ids(&view, Column::Todo), ["b", "a"]);
    }

    #[test]
    fn test_sort_created_at_tie_break() {
        let tasks = vec![
            task("newer", "x", Priority::Medium, "", Column::Todo, 200),
            task("older", "y", Priority::Medium, "", Column::Todo, 100),
        ];
        let view = visible_set(&tasks, "", Filter::All);
        assert_eq!(ids(&view, Column::Todo), ["older", "newer"]);
    }

    #[test]
    fn test_sort_malformed_due_treated_as_undated() {
        let tasks = vec![
            task("a", "garbage due", Priority::Medium, "next tuesday", Column::Todo, 1),
            task("b", "dated", Priority::Medium, "2025-03-01", Column::Todo, 2),
        ];
        let view = visible_set(&tasks, "", Filter::All);
        assert_eq!(ids(&view, Column::Todo), ["b", "a"]);
    }

    // --- Partition ---

    #[test]
    fn test_partition_into_columns() {
        let tasks = vec![
            task("a", "x", Priority::Medium, "", Column::Backlog, 1),
            task("b", "y", Priority::Medium, "", Column::Done, 2),
            task("c", "z", Priority::Medium, "", Column::Backlog, 3),
        ];
        let view = visible_set(&tasks, "", Filter::All);
        assert_eq!(view.tasks_in(Column::Backlog).len(), 2);
        assert_eq!(view.tasks_in(Column::Done).len(), 1);
        assert_eq!(view.tasks_in(Column::Review).len(), 0);
        assert_eq!(view.visible_count(), 3);
    }

    // --- Search ---

    #[test]
    fn test_search_matches_assignee_only() {
        let mut t = task("a", "Fix login", Priority::Medium, "", Column::Todo, 1);
        t.assignee = "Marisol".into();
        let tasks = vec![
            t,
            task("b", "Unrelated", Priority::Medium, "", Column::Todo, 2),
        ];
        let view = visible_set(&tasks, "marisol", Filter::All);
        assert_eq!(ids(&view, Column::Todo), ["a"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let tasks = vec![task("a", "Refactor Parser", Priority::Medium, "", Column::Todo, 1)];
        let view = visible_set(&tasks, "PARS", Filter::All);
        assert_eq!(view.visible_count(), 1);
        let view = visible_set(&tasks, "nomatch", Filter::All);
        assert_eq!(view.visible_count(), 0);
    }

    #[test]
    fn test_search_matches_desc() {
        let mut t = task("a", "Title", Priority::Medium, "", Column::Todo, 1);
        t.desc = "hidden keyword inside".into();
        let view_tasks = vec![t];
        let view = visible_set(&view_tasks, "keyword", Filter::All);
        assert_eq!(view.visible_count(), 1);
    }

    // --- Filter ---

    #[test]
    fn test_priority_filter() {
        let tasks = vec![
            task("a", "x", Priority::High, "", Column::Todo, 1),
            task("b", "y", Priority::Low, "", Column::Todo, 2),
        ];
        let view = visible_set(&tasks, "", Filter::Priority(Priority::High));
        assert_eq!(ids(&view, Column::Todo), ["a"]);
    }

    #[test]
    fn test_all_sentinel_filters_nothing() {
        let tasks = vec![
            task("a", "x", Priority::High, "", Column::Todo, 1),
            task("b", "y", Priority::Low, "", Column::Todo, 2),
        ];
        assert_eq!(visible_set(&tasks, "", Filter::All).visible_count(), 2);
        assert_eq!(Filter::parse("all"), Some(Filter::All));
        assert_eq!(Filter::parse(""), Some(Filter::All));
        assert_eq!(Filter::parse("high"), Some(Filter::Priority(Priority::High)));
        assert_eq!(Filter::parse("urgent"), None);
    }

    #[test]
    fn test_filter_and_search_combine() {
        let mut a = task("a", "alpha work", Priority::High, "", Column::Todo, 1);
        a.assignee = "Kim".into();
        let b = task("b", "alpha work", Priority::Low, "", Column::Todo, 2);
        let tasks = vec![a, b];
        let view = visible_set(&tasks, "alpha", Filter::Priority(Priority::High));
        assert_eq!(ids(&view, Column::Todo), ["a"]);
    }

    // --- Counts ---

    #[test]
    fn test_counts() {
        let tasks = vec![
            task("a", "x", Priority::Medium, "", Column::Backlog, 1),
            task("b", "y", Priority::Medium, "", Column::Done, 2),
            task("c", "z", Priority::Medium, "", Column::Done, 3),
        ];
        let c = counts(&tasks);
        assert_eq!(c.total, 3);
        assert_eq!(c.done, 2);
        assert_eq!(c.active, 1);
        assert_eq!(
            c.per_column,
            vec![
                (Column::Backlog, 1),
                (Column::Todo, 0),
                (Column::InProgress, 0),
                (Column::Review, 0),
                (Column::Done, 2),
            ]
        );
    }

    #[test]
    fn test_counts_ignore_filter_state() {
        // Counts are over the full collection; the query engine's filter does
        // not affect them.
        let tasks = vec![
            task("a", "x", Priority::High, "", Column::Done, 1),
            task("b", "y", Priority::Low, "", Column::Todo, 2),
        ];
        let c = counts(&tasks);
        assert_eq!(c.total, 2);
        assert_eq!(c.active, 1);
    }
}
