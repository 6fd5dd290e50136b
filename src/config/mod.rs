pub mod descriptor;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "service-schema")]
#[command(about = "Validate service descriptors and summarize their use cases")]
pub struct CliConfig {
    /// Path to the service descriptor (YAML, JSON or TOML)
    pub descriptor: PathBuf,

    /// Descriptor format, inferred from the file extension when omitted
    #[arg(long)]
    pub format: Option<String>,

    /// Print the parsed model as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
