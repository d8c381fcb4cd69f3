use anyhow::Context;
use clap::Parser;
use cql_translation_client::utils::{logger, validation::Validate};
use cql_translation_client::{CliConfig, CqlSubmission, TranslationClient};
use std::collections::HashMap;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cql-to-elm");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let main_cql = std::fs::read_to_string(&config.main)
        .with_context(|| format!("Failed to read {}", config.main.display()))?;

    let client = TranslationClient::with_timeout(
        config.url.clone(),
        Duration::from_secs(config.timeout_seconds),
    )?;

    if config.basic {
        tracing::info!("Translating {} as a single unit", config.main.display());
        let elm = client.convert_basic_cql(&main_cql).await?;
        println!("{}", serde_json::to_string_pretty(&elm)?);
        return Ok(());
    }

    let mut libraries = HashMap::new();
    for entry in &config.libraries {
        let (name, path) = entry
            .split_once('=')
            .with_context(|| format!("Invalid --library value '{}', expected NAME=PATH", entry))?;
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read library file {}", path))?;
        libraries.insert(name.to_string(), source);
    }

    tracing::info!(
        "Translating {} with {} additional libraries",
        config.main.display(),
        libraries.len()
    );

    let submission = CqlSubmission {
        main: main_cql,
        libraries,
    };
    let artifacts = client.convert_cql(&submission).await?;

    if artifacts.main.is_none() {
        tracing::warn!("⚠️ The service returned no ELM for the main library");
    }
    for name in artifacts.libraries.keys() {
        tracing::debug!("Library '{}' translated", name);
    }
    tracing::info!("✅ Translation completed");

    println!("{}", serde_json::to_string_pretty(&artifacts)?);
    Ok(())
}
