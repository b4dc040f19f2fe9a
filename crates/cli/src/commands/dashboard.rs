use anyhow::Context;
use caseboard_client::{load_session, ApiClient, FixtureSource};
use caseboard_core::chart::Palette;
use caseboard_core::config::{AppConfig, LoadOptions};
use caseboard_core::filter::DateRange;
use caseboard_core::record::KeyPath;
use caseboard_core::session::{DashboardQuery, SessionContext};
use chrono::NaiveDate;

use crate::commands::CommandResult;
use crate::sink::{JsonSink, TextSink};

#[derive(Debug)]
pub struct DashboardArgs {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub group_by: Option<String>,
    pub offline: bool,
    pub json: bool,
}

pub fn run(args: DashboardArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("dashboard", "config", error.to_string(), 2),
    };

    let session = match load_blocking(&config, args.offline) {
        Ok(session) => session,
        Err(error) => {
            return CommandResult::failure("dashboard", "fetch", format!("{error:#}"), 1)
        }
    };

    let group_by = args.group_by.unwrap_or_else(|| config.charts.group_by.clone());
    let query = DashboardQuery {
        range: DateRange::new(args.from, args.to),
        group_by: KeyPath::new(group_by),
    };
    let palette = Palette::new(config.charts.palette.clone());

    if args.json {
        let mut sink = JsonSink::default();
        session.dashboard(&query, &palette, &mut sink);
        CommandResult::rendered(sink.into_output())
    } else {
        let mut sink = TextSink::default();
        session.dashboard(&query, &palette, &mut sink);
        CommandResult::rendered(sink.into_output())
    }
}

fn load_blocking(config: &AppConfig, offline: bool) -> anyhow::Result<SessionContext> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")?;

    runtime.block_on(async {
        if offline {
            load_session(&FixtureSource).await.context("fixture load failed")
        } else {
            let client = ApiClient::new(&config.api).context("could not build API client")?;
            load_session(&client)
                .await
                .with_context(|| format!("could not load session from {}", config.api.base_url))
        }
    })
}
