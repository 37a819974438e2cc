mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, item::EditArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "stepplan",
    about = "Hierarchical project schedule: phases, tasks, linked dates, undo",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .stepplan/)
    #[arg(long, global = true, env = "STEPPLAN_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a plan in the current project
    Init {
        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List every row of the plan
    List,

    /// Show one item in detail
    Show {
        /// Item id, id prefix, task number (2.3) or phase number (2)
        selector: String,
    },

    /// Append a phase at the end of the plan
    AddPhase {
        #[arg(required = true)]
        description: Vec<String>,
        /// Start date (YYYY-MM-DD); defaults to the end of the plan
        #[arg(long)]
        start: Option<String>,
        /// Work days (default from config)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Insert a task below an existing row
    AddTask {
        #[arg(required = true)]
        description: Vec<String>,
        /// Row to insert below
        #[arg(long)]
        after: String,
        /// Start date (YYYY-MM-DD); defaults to the day after the row above
        #[arg(long)]
        start: Option<String>,
        /// Work days (default from config)
        #[arg(long)]
        days: Option<u32>,
        /// Link to the next row: FS, SS, SF or FF
        #[arg(long)]
        mode: Option<String>,
    },

    /// Edit fields of one item and propagate the new dates
    Edit(EditArgs),

    /// Delete an item (a phase takes its tasks with it)
    Delete { selector: String },

    /// Move a row to another position (1-based, as shown by `list`)
    Move { from: usize, to: usize },

    /// Step back to the previous plan state
    Undo,

    /// Re-apply the last undone change
    Redo,

    /// Show the padded date window covering the plan
    Range,

    /// Write a backup of the current plan
    Backup {
        /// Suffix for the backup name (lowercase, hyphenated)
        #[arg(long)]
        label: Option<String>,
    },

    /// List backups, oldest first
    Backups,

    /// Replace the plan with a backup (clears undo history)
    Restore {
        /// Backup name as listed, or a path to a backup file
        backup: String,
    },

    /// Validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref(), cli.json),
        Commands::List => cmd::plan::list(&root, cli.json),
        Commands::Show { selector } => cmd::plan::show(&root, &selector, cli.json),
        Commands::AddPhase {
            description,
            start,
            days,
        } => cmd::item::add_phase(&root, &description.join(" "), start.as_deref(), days, cli.json),
        Commands::AddTask {
            description,
            after,
            start,
            days,
            mode,
        } => cmd::item::add_task(
            &root,
            &description.join(" "),
            &after,
            start.as_deref(),
            days,
            mode.as_deref(),
            cli.json,
        ),
        Commands::Edit(args) => cmd::item::edit(&root, args, cli.json),
        Commands::Delete { selector } => cmd::item::delete(&root, &selector, cli.json),
        Commands::Move { from, to } => cmd::item::move_row(&root, from, to, cli.json),
        Commands::Undo => cmd::history::undo(&root, cli.json),
        Commands::Redo => cmd::history::redo(&root, cli.json),
        Commands::Range => cmd::plan::range(&root, cli.json),
        Commands::Backup { label } => cmd::backup::create(&root, label.as_deref(), cli.json),
        Commands::Backups => cmd::backup::list(&root, cli.json),
        Commands::Restore { backup } => cmd::backup::restore(&root, &backup, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
