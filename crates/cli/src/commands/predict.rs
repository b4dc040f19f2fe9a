use anyhow::Context;
use caseboard_client::{ApiClient, Prediction, PredictionRequest};
use caseboard_core::config::{AppConfig, LoadOptions};

use crate::commands::CommandResult;

pub fn run(age: u32, ethnicity: String, location: String, json: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("predict", "config", error.to_string(), 2),
    };

    let request = PredictionRequest { age, ethnicity, location };
    let prediction = match predict_blocking(&config, &request) {
        Ok(prediction) => prediction,
        Err(error) => return CommandResult::failure("predict", "fetch", format!("{error:#}"), 1),
    };

    if json {
        let output =
            serde_json::to_string_pretty(&prediction).unwrap_or_else(|_| "{}".to_string());
        return CommandResult::rendered(output);
    }

    CommandResult::rendered(render_prediction(&prediction))
}

fn predict_blocking(config: &AppConfig, request: &PredictionRequest) -> anyhow::Result<Prediction> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")?;

    runtime.block_on(async {
        let client = ApiClient::new(&config.api).context("could not build API client")?;
        client
            .predict(request)
            .await
            .with_context(|| format!("prediction request to {} failed", config.api.base_url))
    })
}

fn render_prediction(prediction: &Prediction) -> String {
    let mut lines = vec![format!("predicted case type: {}", prediction.predicted_class)];

    let mut classes: Vec<(&String, &f64)> = prediction.probabilities.iter().collect();
    classes.sort_by(|a, b| b.1.total_cmp(a.1));

    for (class, probability) in classes {
        lines.push(format!("  {class}: {:.1}%", probability * 100.0));
    }

    lines.join("\n")
}
