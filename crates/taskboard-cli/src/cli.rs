use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_domain::Lane;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Move tasks between kanban lanes the way a board drag would", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the board data file (or set TASKBOARD_FILE env var)
    #[arg(long, value_name = "FILE", env = "TASKBOARD_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Path to a config file (defaults to the platform config location)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append a new item to a lane
    Add(AddArgs),
    /// Show the board
    Show {
        /// Only show one lane
        #[arg(long, value_parser = parse_lane)]
        lane: Option<Lane>,
    },
    /// Drag an item and drop it on a lane, another item, or a pointer position
    Drag(DragArgs),
    /// Resequence a lane's positions to 0..n
    Compact {
        #[arg(long, value_parser = parse_lane)]
        lane: Lane,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, value_parser = parse_lane, default_value = "todo")]
    pub lane: Lane,
    /// Owning project (defaults to the project of existing items)
    #[arg(long)]
    pub project: Option<Uuid>,
    #[arg(long)]
    pub sprint: Option<Uuid>,
}

#[derive(Args)]
pub struct DragArgs {
    /// Item being dragged
    #[arg(long)]
    pub item: Uuid,
    /// Drop target: a lane id or another item's id
    #[arg(long)]
    pub target: Option<String>,
    /// Pointer x coordinate at the drop
    #[arg(long, allow_negative_numbers = true)]
    pub pointer_x: Option<f64>,
    /// Viewport width used to split the pointer into lane bands
    #[arg(long)]
    pub viewport_width: Option<f64>,
}

fn parse_lane(s: &str) -> Result<Lane, String> {
    s.parse::<Lane>().map_err(|e| e.to_string())
}
