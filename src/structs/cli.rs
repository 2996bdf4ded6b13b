use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "herovault")]
#[clap(about = "Progression tracker sync and remediation tool", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
