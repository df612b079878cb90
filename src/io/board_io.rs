use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::BoardConfig;
use crate::model::task::Task;

/// Name of the board data directory discovered by walking up from cwd.
pub const BOARD_DIR: &str = "plank";
/// File holding the serialized task collection, one whole document.
pub const TASKS_FILE: &str = "tasks.json";
/// Board configuration file.
pub const CONFIG_FILE: &str = "board.toml";

/// Error type for board I/O operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("not a plank board: no plank/ directory found")]
    NotABoard,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse board.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize board.toml: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),
    #[error("could not serialize tasks: {0}")]
    TasksSerializeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the board by walking up from the given directory, looking for a
/// `plank/` subdirectory containing `board.toml`.
pub fn discover_board(start: &Path) -> Result<PathBuf, BoardError> {
    let mut current = start.to_path_buf();
    loop {
        let board_dir = current.join(BOARD_DIR);
        if board_dir.is_dir() && board_dir.join(CONFIG_FILE).exists() {
            return Ok(board_dir);
        }
        if !current.pop() {
            return Err(BoardError::NotABoard);
        }
    }
}

/// Outcome of reading the persisted task blob.
#[derive(Debug)]
pub enum StoredTasks {
    /// Blob present and parsed
    Loaded(Vec<Task>),
    /// No blob on disk yet
    Absent,
    /// Blob present but unparsable; the raw text is returned so the caller
    /// can preserve it in the recovery log before falling back
    Corrupt { raw: String, error: String },
}

/// Read the task blob. A structurally-invalid document (not a task array) is
/// reported as corrupt, the same as malformed JSON.
pub fn read_tasks(board_dir: &Path) -> Result<StoredTasks, BoardError> {
    let path = board_dir.join(TASKS_FILE);
    if !path.exists() {
        return Ok(StoredTasks::Absent);
    }
    let raw = fs::read_to_string(&path).map_err(|e| BoardError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => Ok(StoredTasks::Loaded(tasks)),
        Err(e) => Ok(StoredTasks::Corrupt {
            raw,
            error: e.to_string(),
        }),
    }
}

/// Write the whole task collection as one document, atomically. Failed
/// writes are preserved in the recovery log before the error propagates.
pub fn write_tasks(board_dir: &Path, tasks: &[Task]) -> Result<(), BoardError> {
    let path = board_dir.join(TASKS_FILE);
    let content = serde_json::to_string_pretty(tasks)?;
    if let Err(e) = crate::io::recovery::atomic_write(&path, content.as_bytes()) {
        crate::io::recovery::log_recovery(
            board_dir,
            crate::io::recovery::RecoveryEntry {
                timestamp: chrono::Utc::now(),
                category: crate::io::recovery::RecoveryCategory::Write,
                description: "task blob write failed".to_string(),
                fields: vec![
                    ("Target".to_string(), TASKS_FILE.to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                body: content,
            },
        );
        return Err(BoardError::WriteError { path, source: e });
    }
    Ok(())
}

/// Read and parse board.toml.
pub fn read_config(board_dir: &Path) -> Result<BoardConfig, BoardError> {
    let path = board_dir.join(CONFIG_FILE);
    let text = fs::read_to_string(&path).map_err(|e| BoardError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Write board.toml back to disk.
pub fn write_config(board_dir: &Path, config: &BoardConfig) -> Result<(), BoardError> {
    let path = board_dir.join(CONFIG_FILE);
    let text = toml::to_string_pretty(config)?;
    fs::write(&path, text).map_err(|e| BoardError::WriteError { path, source: e })?;
    Ok(())
}
