//! Config command

use anyhow::{Context, Result};
use camino::Utf8Path;

use super::load_config;
use crate::cli::ConfigArgs;
use crate::output;

pub(crate) fn run(args: ConfigArgs, config: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config)?;

    if args.json {
        let json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize configuration to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    output::header("Catalog configuration");
    output::kv("debounce", &format!("{} ms", config.debounce_ms));
    output::kv("languages", &config.enabled_languages.join(", "));
    Ok(())
}
