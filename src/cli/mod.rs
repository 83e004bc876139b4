use std::fs::File;
use std::io::{stdin, stdout, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::application::LedgerService;
use crate::config::Config;
use crate::telemetry;

mod render;
mod session;

pub use session::{Flow, Session};

/// Loterica - cash drawer and vault ledger for lottery outlets
#[derive(Parser, Debug)]
#[command(name = "loterica")]
#[command(about = "Log cash drawer and vault movements for a lottery outlet. Records live for one session.")]
#[command(version)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "loterica.toml")]
    pub config: PathBuf,

    /// Log filter, e.g. "debug" (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Currency symbol for table and chart headers (overrides config file)
    #[arg(long)]
    pub currency: Option<String>,

    /// Read session commands from a file instead of the terminal
    #[arg(short, long)]
    pub script: Option<PathBuf>,
}

impl Cli {
    /// Merge the config file with command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(&self.config)?;
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(currency) = &self.currency {
            config.display.currency = currency.clone();
        }
        Ok(config)
    }

    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;
        telemetry::init(&config.logging);

        let service = LedgerService::new_session().await?;
        let mut session = Session::new(&service, &config.display, stdout().lock());

        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script: {}", path.display()))?;
                session.run(BufReader::new(file), false).await?;
            }
            None => {
                let interactive = stdin().is_terminal();
                session.run(stdin().lock(), interactive).await?;
            }
        }

        Ok(())
    }
}
