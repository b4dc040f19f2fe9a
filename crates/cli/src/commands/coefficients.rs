use anyhow::Context;
use caseboard_client::{ApiClient, FixtureSource, RecordSource};
use caseboard_core::config::{AppConfig, LoadOptions};
use caseboard_core::rank::{rank_coefficients, Coefficient};
use caseboard_core::record::CoefficientMap;

use crate::commands::CommandResult;

pub fn run(offline: bool, json: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("coefficients", "config", error.to_string(), 2)
        }
    };

    let coefficients = match fetch_blocking(&config, offline) {
        Ok(coefficients) => coefficients,
        Err(error) => {
            return CommandResult::failure("coefficients", "fetch", format!("{error:#}"), 1)
        }
    };

    let ranked = rank_coefficients(&coefficients);

    if json {
        let output = serde_json::to_string_pretty(&ranked)
            .unwrap_or_else(|_| "[]".to_string());
        return CommandResult::rendered(output);
    }

    CommandResult::rendered(render_table(&ranked))
}

fn fetch_blocking(config: &AppConfig, offline: bool) -> anyhow::Result<CoefficientMap> {
    if offline {
        return Ok(FixtureSource::coefficients());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")?;

    runtime.block_on(async {
        let client = ApiClient::new(&config.api).context("could not build API client")?;
        client
            .fetch_coefficients()
            .await
            .with_context(|| format!("could not fetch coefficients from {}", config.api.base_url))
    })
}

fn render_table(ranked: &[Coefficient]) -> String {
    if ranked.is_empty() {
        return "model reported no coefficients".to_string();
    }

    let name_width = ranked.iter().map(|c| c.name.len()).max().unwrap_or(0);
    let mut lines = vec!["coefficients by absolute weight:".to_string()];
    for coefficient in ranked {
        let weight = if coefficient.weight.is_nan() {
            "n/a".to_string()
        } else {
            format!("{:+.4}", coefficient.weight)
        };
        lines.push(format!("  {:<name_width$}  {weight}", coefficient.name));
    }
    lines.join("\n")
}
