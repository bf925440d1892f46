// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::scenes::SceneKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-demos")]
#[command(about = "Interactive grid scene demos", long_about = None)]
pub struct Cli {
    /// Demo scene to run
    #[arg(long, value_enum, default_value = "select-grid")]
    pub scene: SceneKind,

    /// Override the demo's grid size
    #[arg(long)]
    pub rows: Option<u32>,

    /// Settings file (JSON); defaults apply when omitted
    #[arg(long)]
    pub settings: Option<PathBuf>,
}
