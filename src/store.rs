use std::path::{Path, PathBuf};

use chrono::Utc;
use ulid::Ulid;

use crate::io::board_io::{self, BoardError, StoredTasks};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::task::{Column, NewTask, Priority, Task, TaskPatch};

/// The authoritative in-memory task collection, mirrored to a single JSON
/// document after every mutation. The persisted file is written whole; there
/// are no partial updates.
#[derive(Debug)]
pub struct TaskStore {
    board_dir: PathBuf,
    tasks: Vec<Task>,
}

/// Result of a column move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Task already sits in the target column; nothing written
    NoChange,
    NotFound,
}

impl TaskStore {
    /// Open the store for a board directory. A missing blob seeds the board
    /// with the sample tasks; a corrupt blob is preserved in the recovery
    /// log and then treated as absent.
    pub fn open(board_dir: &Path) -> Result<TaskStore, BoardError> {
        let tasks = match board_io::read_tasks(board_dir)? {
            StoredTasks::Loaded(tasks) => tasks,
            StoredTasks::Absent => {
                let seeded = sample_tasks();
                board_io::write_tasks(board_dir, &seeded)?;
                seeded
            }
            StoredTasks::Corrupt { raw, error } => {
                eprintln!("warning: could not parse stored tasks ({}), starting fresh", error);
                recovery::log_recovery(
                    board_dir,
                    RecoveryEntry {
                        timestamp: Utc::now(),
                        category: RecoveryCategory::Parse,
                        description: "stored tasks unparsable, reseeding".to_string(),
                        fields: vec![
                            ("Source".to_string(), board_io::TASKS_FILE.to_string()),
                            ("Error".to_string(), error),
                        ],
                        body: raw,
                    },
                );
                let seeded = sample_tasks();
                board_io::write_tasks(board_dir, &seeded)?;
                seeded
            }
        };
        Ok(TaskStore {
            board_dir: board_dir.to_path_buf(),
            tasks,
        })
    }

    /// Open with an explicit initial collection, persisting it immediately.
    /// Used by tests and by import flows that bypass the seed.
    pub fn open_with(board_dir: &Path, tasks: Vec<Task>) -> Result<TaskStore, BoardError> {
        board_io::write_tasks(board_dir, &tasks)?;
        Ok(TaskStore {
            board_dir: board_dir.to_path_buf(),
            tasks,
        })
    }

    /// Read-only view of the collection. Order is storage order, which is not
    /// meaningful; display order comes from the query engine.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn board_dir(&self) -> &Path {
        &self.board_dir
    }

    /// Find a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Create a task, filling defaults for empty fields, and persist.
    /// An empty title becomes "Untitled".
    pub fn create(&mut self, fields: NewTask) -> Result<&Task, BoardError> {
        let task = Task {
            id: fresh_id(),
            title: if fields.title.is_empty() {
                "Untitled".to_string()
            } else {
                fields.title
            },
            desc: fields.desc,
            priority: fields.priority,
            assignee: fields.assignee,
            due: fields.due,
            column: fields.column,
            created_at: now_ms(),
        };
        self.tasks.push(task);
        self.persist()?;
        Ok(self.tasks.last().expect("just pushed"))
    }

    /// Merge a patch over the task with the given id and persist. Returns
    /// `None` (and performs no mutation) if the id is unknown.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Option<&Task>, BoardError> {
        let idx = match self.tasks.iter().position(|t| t.id == id) {
            Some(idx) => idx,
            None => return Ok(None),
        };
        self.tasks[idx].apply(patch);
        self.persist()?;
        Ok(Some(&self.tasks[idx]))
    }

    /// Move a task to another column. A drop onto the task's current column
    /// is a no-op and does not touch the persisted file.
    pub fn move_task(&mut self, id: &str, column: Column) -> Result<MoveOutcome, BoardError> {
        let task = match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => task,
            None => return Ok(MoveOutcome::NotFound),
        };
        if task.column == column {
            return Ok(MoveOutcome::NoChange);
        }
        task.column = column;
        self.persist()?;
        Ok(MoveOutcome::Moved)
    }

    /// Delete the task with the given id. Unknown ids are a benign no-op and
    /// skip the persistence write.
    pub fn delete(&mut self, id: &str) -> Result<bool, BoardError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Wholesale-replace the collection (import path) and persist.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> Result<(), BoardError> {
        self.tasks = tasks;
        self.persist()
    }

    /// Force a persistence write of the current collection.
    pub fn persist(&self) -> Result<(), BoardError> {
        board_io::write_tasks(&self.board_dir, &self.tasks)
    }
}

/// Generate a fresh opaque task id.
pub fn fresh_id() -> String {
    format!("t-{}", Ulid::new().to_string().to_lowercase())
}

/// Current time in ms since epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// The starter tasks seeded onto a brand-new (or unrecoverable) board.
pub fn sample_tasks() -> Vec<Task> {
    let now = now_ms();
    vec![
        Task {
            id: "t-sample-1".into(),
            title: "Product Requirements: draft initial PRD".into(),
            desc: "Collect stakeholders' needs & define MVP scope.".into(),
            priority: Priority::Medium,
            assignee: String::new(),
            due: "2025-12-20".into(),
            column: Column::Backlog,
            created_at: now,
        },
        Task {
            id: "t-sample-2".into(),
            title: "Backlog Cleanup: remove stale items".into(),
            desc: "Archive unassigned or blocked tasks older than 6 months.".into(),
            priority: Priority::Low,
            assignee: String::new(),
            due: "2026-01-10".into(),
            column: Column::Backlog,
            created_at: now - 1000,
        },
        Task {
            id: "t-sample-3".into(),
            title: "Set up repository: initialize repo & CI".into(),
            desc: "Create repo, add README, enable CI build.".into(),
            priority: Priority::High,
            assignee: "Sam".into(),
            due: "2025-12-10".into(),
            column: Column::Todo,
            created_at: now - 2000,
        },
    ]
}
