use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::board_io::{BOARD_DIR, CONFIG_FILE};

const BOARD_TOML_TEMPLATE: &str = r#"[board]
name = "{name}"

# --- Defaults ---
# Column new tasks land in when `pk add` is given no --column.
# One of: backlog, todo, inprogress, review, done.

[defaults]
column = "backlog"
"#;

/// Infer a board name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let board_dir = cwd.join(BOARD_DIR);

    if board_dir.exists() && !args.force {
        return Err(format!(
            "{}/ already exists (use --force to reinitialize)",
            BOARD_DIR
        )
        .into());
    }

    let name = match args.name {
        Some(name) => name,
        None => cwd
            .file_name()
            .and_then(|s| s.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Board".to_string()),
    };

    fs::create_dir_all(&board_dir)?;
    fs::write(
        board_dir.join(CONFIG_FILE),
        BOARD_TOML_TEMPLATE.replace("{name}", &name),
    )?;

    println!("Initialized board \"{}\" in {}/", name, BOARD_DIR);
    println!("Run `pk` to see it (sample tasks are seeded on first use).");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("my-cool-project"), "My Cool Project");
        assert_eq!(infer_name("plank"), "Plank");
        assert_eq!(infer_name(""), "");
    }

    #[test]
    fn test_template_parses_as_config() {
        let text = BOARD_TOML_TEMPLATE.replace("{name}", "Test Board");
        let config: crate::model::config::BoardConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.board.name, "Test Board");
        assert_eq!(config.defaults.column, "backlog");
    }
}
