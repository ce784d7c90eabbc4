//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::take_table;
use crate::config::IssConfig;
use crate::endpoints::{CandleQuery, HistoryQuery, Iss, Segments};
use crate::error::Result;
use crate::types::{Query, QueryValue, Table};
use serde::Serialize;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let iss = Iss::from_config(self.load_config()?)?;

        match &self.cli.command {
            Commands::Candles {
                security,
                interval,
                from,
                till,
                columns,
                all_boards,
                segments,
            } => {
                let mut query = CandleQuery {
                    interval: *interval,
                    from: *from,
                    till: *till,
                    ..CandleQuery::default()
                };
                if columns.is_some() {
                    query.columns.clone_from(columns);
                }
                let segments = Segments::from(segments);
                let table = if *all_boards {
                    iss.market_candles(security, &query, &segments).await?
                } else {
                    iss.board_candles(security, &query, &segments).await?
                };
                self.emit_table(&table)
            }
            Commands::Borders {
                security,
                all_boards,
                segments,
            } => {
                let segments = Segments::from(segments);
                let table = if *all_boards {
                    iss.market_candle_borders(security, &segments).await?
                } else {
                    iss.board_candle_borders(security, &segments).await?
                };
                self.emit_table(&table)
            }
            Commands::History {
                security,
                from,
                till,
                columns,
                all_boards,
                segments,
            } => {
                let mut query = HistoryQuery {
                    from: *from,
                    till: *till,
                    ..HistoryQuery::default()
                };
                if columns.is_some() {
                    query.columns.clone_from(columns);
                }
                let segments = Segments::from(segments);
                let table = if *all_boards {
                    iss.market_history(security, &query, &segments).await?
                } else {
                    iss.board_history(security, &query, &segments).await?
                };
                self.emit_table(&table)
            }
            Commands::Dates { segments } => {
                let table = iss.board_dates(&Segments::from(segments)).await?;
                self.emit_table(&table)
            }
            Commands::Securities {
                table,
                columns,
                segments,
            } => {
                let table = iss
                    .board_securities(
                        (*table).into(),
                        columns.as_deref(),
                        &Segments::from(segments),
                    )
                    .await?;
                self.emit_table(&table)
            }
            Commands::Find { text, columns } => {
                let table = iss.find_securities(text, columns.as_deref()).await?;
                self.emit_table(&table)
            }
            Commands::Reference { placeholder } => {
                let table = iss.reference(*placeholder).await?;
                self.emit_table(&table)
            }
            Commands::Series {
                asset_code,
                show_expired,
                engine,
                market,
            } => {
                let segments = Segments {
                    engine: engine.clone(),
                    market: market.clone(),
                    board: None,
                };
                let table = iss
                    .statistics_series(asset_code.as_deref(), *show_expired, &segments)
                    .await?;
                self.emit_table(&table)
            }
            Commands::Raw {
                url,
                params,
                all,
                table,
            } => self.raw(&iss, url, params, *all, table.as_deref()).await,
        }
    }

    /// Configuration file (if any) with command-line overrides applied
    fn load_config(&self) -> Result<IssConfig> {
        let mut config = match &self.cli.config {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                IssConfig::load(path)?
            }
            None => IssConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
            config.validate()?;
        }

        Ok(config)
    }

    async fn raw(
        &self,
        iss: &Iss,
        url: &str,
        params: &[(String, String)],
        all: bool,
        table: Option<&str>,
    ) -> Result<()> {
        let url = resolve_url(&iss.config().base_url, url);
        let query: Query = params
            .iter()
            .map(|(key, value)| (key.clone(), QueryValue::from(value.as_str())))
            .collect();

        let client = iss.client(url, query);
        let tables = if all {
            client.collect_all().await?
        } else {
            client.fetch(None).await?
        };

        match table {
            Some(name) => self.emit_table(&take_table(tables, name)?),
            None => self.emit_document(&tables),
        }
    }

    /// Print a table: one row per line, or one indented array
    fn emit_table(&self, table: &Table) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                for row in table {
                    println!("{}", serde_json::to_string(row)?);
                }
            }
            OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(table)?),
        }
        Ok(())
    }

    /// Print any document, compact or indented
    fn emit_document<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

/// Absolute URLs pass through; anything else is appended to the base URL
fn resolve_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_resolve_url() {
        let base = "https://iss.moex.com/iss/";
        assert_eq!(
            resolve_url(base, "/engines.json"),
            "https://iss.moex.com/iss/engines.json"
        );
        assert_eq!(
            resolve_url(base, "http://localhost/x.json"),
            "http://localhost/x.json"
        );
    }

    #[test]
    fn test_load_config_applies_base_url_override() {
        let cli = Cli::parse_from([
            "moex-iss",
            "--base-url",
            "http://127.0.0.1:9000/iss",
            "dates",
        ]);
        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/iss");
        assert_eq!(config.defaults.board, "TQBR");
    }

    #[test]
    fn test_load_config_rejects_invalid_override() {
        let cli = Cli::parse_from(["moex-iss", "--base-url", "ftp://nowhere", "dates"]);
        assert!(Runner::new(cli).load_config().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iss.yaml");
        std::fs::write(&path, "defaults:\n  board: SMAL\n").unwrap();

        let cli = Cli::parse_from([
            "moex-iss",
            "--config",
            path.to_str().unwrap(),
            "dates",
        ]);
        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.defaults.board, "SMAL");
    }
}
