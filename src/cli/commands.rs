use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pk", about = concat!("[|] plank v", env!("CARGO_PKG_VERSION"), " - your kanban board is one json file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new plank board in the current directory
    Init(InitArgs),
    /// Render the board (default when no subcommand is given)
    Board(BoardArgs),
    /// Add a task
    Add(AddArgs),
    /// Show task details
    Show(ShowArgs),
    /// Edit task fields
    Edit(EditArgs),
    /// Move a task to another column
    Mv(MvArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Search tasks across all columns
    Search(SearchArgs),
    /// Show board statistics
    Stats,
    /// Export the board to a JSON document
    Export(ExportArgs),
    /// Import tasks from a JSON document, replacing the board
    Import(ImportArgs),
    /// Print the raw task collection (debug)
    Dump,
    /// Force a persistence write of the current collection (debug)
    Sync,
    /// Delete all tasks (debug; asks for confirmation)
    Clear(ClearArgs),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Board name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if plank/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args, Default)]
pub struct BoardArgs {
    /// Free-text search over title, description and assignee
    #[arg(short, long)]
    pub search: Option<String>,
    /// Filter by priority (high, medium, low, all)
    #[arg(short, long)]
    pub priority: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID to show
    pub id: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search text (case-insensitive substring)
    pub query: String,
    /// Filter by priority (high, medium, low, all)
    #[arg(short, long)]
    pub priority: Option<String>,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Description
    #[arg(short, long)]
    pub desc: Option<String>,
    /// Priority (high, medium, low)
    #[arg(short, long)]
    pub priority: Option<String>,
    /// Assignee
    #[arg(short, long)]
    pub assignee: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Column (backlog, todo, inprogress, review, done)
    #[arg(short, long)]
    pub column: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID to edit
    pub id: String,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub desc: Option<String>,
    /// New priority (high, medium, low)
    #[arg(short, long)]
    pub priority: Option<String>,
    /// New assignee
    #[arg(short, long)]
    pub assignee: Option<String>,
    /// New due date (YYYY-MM-DD, empty string clears it)
    #[arg(long)]
    pub due: Option<String>,
    /// New column (backlog, todo, inprogress, review, done)
    #[arg(short, long)]
    pub column: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task ID to move
    pub id: String,
    /// Target column (backlog, todo, inprogress, review, done)
    pub column: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID to delete
    pub id: String,
}

// ---------------------------------------------------------------------------
// Export / import / debug args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ExportArgs {
    /// Output file ("-" for stdout; default: plank_tasks_<date>.json)
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file to import
    pub file: String,
    /// Proceed without asking when records fail validation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
