use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use caseboard_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "api.base_url",
        &config.api.base_url,
        field_source(
            "api.base_url",
            Some("CASEBOARD_API_BASE_URL"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "api.timeout_secs",
        &config.api.timeout_secs.to_string(),
        field_source(
            "api.timeout_secs",
            Some("CASEBOARD_API_TIMEOUT_SECS"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "charts.group_by",
        &config.charts.group_by,
        field_source(
            "charts.group_by",
            Some("CASEBOARD_CHARTS_GROUP_BY"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "charts.palette",
        &config.charts.palette.join(","),
        field_source(
            "charts.palette",
            None,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            Some("CASEBOARD_LOGGING_LEVEL"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        field_source(
            "logging.format",
            Some("CASEBOARD_LOGGING_FORMAT"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn render_line(field: &str, value: &str, source: String) -> String {
    format!("  {field} = {value}  [{source}]")
}

fn field_source(
    field: &str,
    env_key: Option<&str>,
    doc: Option<&Value>,
    path: Option<&Path>,
) -> String {
    if let Some(key) = env_key {
        if env::var(key).ok().filter(|value| !value.trim().is_empty()).is_some() {
            return format!("env:{key}");
        }
    }

    if let (Some(doc), Some(path)) = (doc, path) {
        if doc_has_field(doc, field) {
            return format!("file:{}", path.display());
        }
    }

    "default".to_string()
}

fn doc_has_field(doc: &Value, dotted: &str) -> bool {
    let mut current = doc;
    for segment in dotted.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("caseboard.toml"), PathBuf::from("config/caseboard.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}
