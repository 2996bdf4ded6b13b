use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    Init,
    Validate,
    Edit {
        #[clap(short = 'r', long)]
        hero: String,
        #[clap(short, long)]
        set: Vec<String>,
    },
    Diagnose,
    Remediate {
        #[clap(short, long)]
        max_severity: Option<String>,
        #[clap(long)]
        dry_run: bool,
    },
}
