use clap::Parser;
use http_getter::utils::{logger, validation::Validate};
use http_getter::{CliConfig, ConfigProvider, FetchEngine, FetchError, Result, TomlConfig};

fn load_config(cli: &CliConfig) -> Result<Box<dyn ConfigProvider>> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = TomlConfig::from_file(path)?;
            config.apply_overrides(cli.fetcher, cli.port);
            config.validate()?;
            Ok(Box::new(config))
        }
        None => {
            cli.validate()?;
            Ok(Box::new(cli.clone()))
        }
    }
}

fn exit_on_config_error(e: FetchError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting http-getter");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = load_config(&cli).unwrap_or_else(|e| exit_on_config_error(e));
    let engine = FetchEngine::from_config(&*config).unwrap_or_else(|e| exit_on_config_error(e));

    // A failed fetch is reported but never turns into a failing exit status.
    match engine.run(config.output_file()).await {
        Ok(report) => {
            println!("✅ Output saved to: {}", report.output_path.display());
        }
        Err(e) => {
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
        }
    }

    Ok(())
}
