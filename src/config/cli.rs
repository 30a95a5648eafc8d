use crate::config::toml_config::{
    DEFAULT_RECORDS_PATH, DEFAULT_UPLOAD_DIR, DEFAULT_WORKER_COUNT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "bloodwork")]
#[command(about = "Extracts CBC markers from clinical documents and assesses them")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_UPLOAD_DIR)]
    pub upload_dir: String,

    #[arg(long, default_value = DEFAULT_RECORDS_PATH)]
    pub records_path: String,

    #[arg(long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,

    #[arg(long, help = "TOML file overriding dirs, worker count and reference ranges")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON logs instead of the compact format")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one document synchronously and print the persisted record
    Analyze {
        /// Local path or http(s) URL of the document
        input: String,
    },
    /// Queue documents, drain them with a worker pool, report job outcomes
    Submit {
        /// Local paths or http(s) URLs of the documents
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// List persisted analyses, most recent first
    List {
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
    Csv,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("upload_dir", &self.upload_dir)?;
        validate_path("records_path", &self.records_path)?;
        validate_positive_number("workers", self.workers, 1)?;
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn upload_dir(&self) -> &str {
        &self.upload_dir
    }

    fn records_path(&self) -> &str {
        &self.records_path
    }

    fn worker_count(&self) -> usize {
        self.workers
    }
}
