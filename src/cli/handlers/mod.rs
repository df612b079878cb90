mod init;
pub use init::cmd_init;

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Global override for the board directory (set by -C flag)
static BOARD_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::board_io::{self, BoardError};
use crate::model::task::{Column, NewTask, Priority, TaskPatch};
use crate::ops::{codec, query};
use crate::store::{MoveOutcome, TaskStore};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for board_dir_cwd()
    if let Some(ref dir) = cli.board_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        BOARD_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        // No subcommand: render the board, the way the page did on load
        None => cmd_board(BoardArgs::default(), json),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before board discovery
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::Board(args) => cmd_board(args, json),
            Commands::Show(args) => cmd_show(args, json),
            Commands::Search(args) => cmd_search(args, json),
            Commands::Stats => cmd_stats(json),

            // Write commands
            Commands::Add(args) => cmd_add(args, json),
            Commands::Edit(args) => cmd_edit(args, json),
            Commands::Mv(args) => cmd_mv(args),
            Commands::Rm(args) => cmd_rm(args),

            // Export / import
            Commands::Export(args) => cmd_export(args),
            Commands::Import(args) => cmd_import(args),

            // Debug surface
            Commands::Dump => cmd_dump(),
            Commands::Sync => cmd_sync(),
            Commands::Clear(args) => cmd_clear(args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn board_dir_cwd() -> Result<PathBuf, BoardError> {
    let start = match BOARD_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(BoardError::IoError)?,
    };
    board_io::discover_board(&start)
}

fn open_store() -> Result<TaskStore, BoardError> {
    TaskStore::open(&board_dir_cwd()?)
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s).ok_or_else(|| format!("unknown priority \"{}\" (use high, medium or low)", s))
}

fn parse_column(s: &str) -> Result<Column, String> {
    Column::parse(s).ok_or_else(|| {
        format!(
            "unknown column \"{}\" (use backlog, todo, inprogress, review or done)",
            s
        )
    })
}

fn parse_filter(arg: Option<&str>) -> Result<query::Filter, String> {
    match arg {
        None => Ok(query::Filter::All),
        Some(s) => query::Filter::parse(s)
            .ok_or_else(|| format!("unknown priority filter \"{}\" (use high, medium, low or all)", s)),
    }
}

/// Ask a yes/no question on stderr and read the answer from stdin.
/// Anything but an explicit yes declines.
fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_board(args: BoardArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let filter = parse_filter(args.priority.as_deref())?;
    let search = args.search.unwrap_or_default();

    let view = query::visible_set(store.tasks(), &search, filter);
    let counts = query::counts(store.tasks());

    if json {
        print_json(&board_to_json(&view, &counts))
    } else {
        print!("{}", format_board(&view, &counts));
        Ok(())
    }
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let task = store
        .get(&args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    if json {
        print_json(task)
    } else {
        print!("{}", format_task_detail(task));
        Ok(())
    }
}

fn cmd_search(args: SearchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let filter = parse_filter(args.priority.as_deref())?;
    let view = query::visible_set(store.tasks(), &args.query, filter);

    if json {
        let hits: Vec<SearchHitJson> = view
            .columns()
            .iter()
            .flat_map(|(_, tasks)| tasks.iter().map(|t| search_hit_to_json(t)))
            .collect();
        return print_json(&hits);
    }

    if view.visible_count() == 0 {
        println!("no matches");
        return Ok(());
    }
    for (col, tasks) in view.columns() {
        for task in tasks {
            println!("{:<12} {}", col.key(), format_task_line(task).trim_start());
        }
    }
    Ok(())
}

fn cmd_stats(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let counts = query::counts(store.tasks());
    if json {
        return print_json(&counts_to_json(&counts));
    }
    println!("total:  {}", counts.total);
    println!("active: {}", counts.active);
    println!("done:   {}", counts.done);
    for (col, n) in &counts.per_column {
        println!("  {:<12} {}", col.key(), n);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let board_dir = board_dir_cwd()?;
    let config = board_io::read_config(&board_dir)?;
    let mut store = TaskStore::open(&board_dir)?;

    let column = match args.column.as_deref() {
        Some(s) => parse_column(s)?,
        None => config.default_column(),
    };
    let priority = match args.priority.as_deref() {
        Some(s) => parse_priority(s)?,
        None => Priority::Medium,
    };

    let task = store
        .create(NewTask {
            title: args.title,
            desc: args.desc.unwrap_or_default(),
            priority,
            assignee: args.assignee.unwrap_or_default(),
            due: args.due.unwrap_or_default(),
            column,
        })?
        .clone();

    if json {
        print_json(&task)
    } else {
        println!("Added {} to {}: {}", task.id, task.column.key(), task.title);
        Ok(())
    }
}

fn cmd_edit(args: EditArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    let patch = TaskPatch {
        title: args.title,
        desc: args.desc,
        priority: args.priority.as_deref().map(parse_priority).transpose()?,
        assignee: args.assignee,
        due: args.due,
        column: args.column.as_deref().map(parse_column).transpose()?,
    };
    if patch.is_empty() {
        println!("nothing to change");
        return Ok(());
    }

    match store.update(&args.id, patch)? {
        Some(task) => {
            if json {
                print_json(task)
            } else {
                println!("Updated {}", task.id);
                Ok(())
            }
        }
        // Stale id: benign no-op
        None => {
            println!("no such task: {} (nothing changed)", args.id);
            Ok(())
        }
    }
}

fn cmd_mv(args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    let column = parse_column(&args.column)?;
    match store.move_task(&args.id, column)? {
        MoveOutcome::Moved => println!("Moved {} to {}", args.id, column.key()),
        MoveOutcome::NoChange => println!("{} is already in {}", args.id, column.key()),
        MoveOutcome::NotFound => println!("no such task: {} (nothing changed)", args.id),
    }
    Ok(())
}

fn cmd_rm(args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    if store.delete(&args.id)? {
        println!("Deleted {}", args.id);
    } else {
        println!("no such task: {} (nothing changed)", args.id);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Export / import handlers
// ---------------------------------------------------------------------------

fn cmd_export(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let doc = codec::export_document(store.tasks());
    let body = serde_json::to_string_pretty(&doc)?;

    match args.output.as_deref() {
        Some("-") => {
            println!("{}", body);
        }
        Some(path) => {
            fs::write(path, &body)?;
            println!("Exported {} tasks to {}", doc.tasks.len(), path);
        }
        None => {
            let path = codec::export_filename();
            fs::write(&path, &body)?;
            println!("Exported {} tasks to {}", doc.tasks.len(), path);
        }
    }
    Ok(())
}

fn cmd_import(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    let text = fs::read_to_string(&args.file)
        .map_err(|e| format!("could not read {}: {}", args.file, e))?;
    let records = codec::parse_import(&text)?;
    let warnings = codec::validate(&records);

    if !warnings.is_empty() && !args.yes {
        eprintln!("{} record(s) failed validation:", warnings.len());
        for warning in &warnings {
            eprintln!("  {}", warning);
        }
        if !confirm("Imported file appears to have non-standard tasks. Import anyway?") {
            println!("import aborted, board unchanged");
            return Ok(());
        }
    }

    let tasks = codec::normalize(records);
    let count = tasks.len();
    store.replace_all(tasks)?;
    println!("Import successful: {} tasks", count);
    Ok(())
}

// ---------------------------------------------------------------------------
// Debug surface
// ---------------------------------------------------------------------------

fn cmd_dump() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    println!("{}", serde_json::to_string_pretty(store.tasks())?);
    Ok(())
}

fn cmd_sync() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    store.persist()?;
    println!("Synced {} tasks", store.tasks().len());
    Ok(())
}

fn cmd_clear(args: ClearArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    if !args.yes && !confirm("Clear all tasks?") {
        println!("clear aborted, board unchanged");
        return Ok(());
    }
    store.replace_all(Vec::new())?;
    println!("Cleared all tasks");
    Ok(())
}
