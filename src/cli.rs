use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cytostat", version, about = "Clinical trial immune cell cohort statistics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Wide-format cell count CSV")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value = "melanoma", help = "Subject condition filter")]
    pub condition: String,

    #[arg(long, default_value = "miraclib", help = "Subject treatment filter")]
    pub treatment: String,

    #[arg(long, default_value = "PBMC", help = "Sample type filter")]
    pub sample_type: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Ignore the condition/treatment/sample-type filters and analyze every subject"
    )]
    pub all_subjects: bool,

    #[arg(long, default_value_t = false, help = "Also write cohort_report.json")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Wide-format cell count CSV")]
    pub input: PathBuf,
}
