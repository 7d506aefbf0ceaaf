use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use apiscore_core::metadata::SpecType;

#[derive(Debug, Parser)]
#[command(
    name = "apiscore",
    version,
    about = "Package local API workspaces and submit them for certification scoring"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose diagnostic logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover the API project, stage an archive and submit it for scoring
    Certify(CertifyArgs),
    /// Submit a single definition document for ruleset verification
    Verify(VerifyArgs),
}

#[derive(Debug, clap::Args)]
pub struct CertifyArgs {
    /// Path to the project root (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Base URL of the certification service
    #[arg(long, env = "APISCORE_SERVICE_URL")]
    pub service_url: Option<String>,

    /// Validation type requested from the service
    #[arg(long)]
    pub validation_type: Option<String>,

    /// Only render results for this API name
    #[arg(long)]
    pub api_name: Option<String>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Accept invalid TLS certificates for this submission only
    #[arg(long)]
    pub insecure: bool,
}

#[derive(Debug, clap::Args)]
pub struct VerifyArgs {
    /// Definition document to verify
    pub file: PathBuf,

    /// API protocol of the definition
    #[arg(long, default_value = "rest")]
    pub protocol: Protocol,

    /// Base URL of the certification service
    #[arg(long, env = "APISCORE_SERVICE_URL")]
    pub service_url: Option<String>,

    /// Accept invalid TLS certificates for this submission only
    #[arg(long)]
    pub insecure: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Protocol {
    Rest,
    Asyncapi,
    Grpc,
}

impl Protocol {
    pub fn spec_type(&self) -> SpecType {
        match self {
            Protocol::Rest => SpecType::Rest,
            Protocol::Asyncapi => SpecType::Event,
            Protocol::Grpc => SpecType::Grpc,
        }
    }
}
