use anyhow::Context;
use clap::Parser;
use room_inventory::config::toml_config::DEFAULT_DATABASE_FILE;
use room_inventory::config::{Command, ListFormat};
use room_inventory::core::report;
use room_inventory::core::ConfigProvider;
use room_inventory::core::LineStore;
use room_inventory::utils::error::ErrorSeverity;
use room_inventory::utils::{logger, validation::Validate};
use room_inventory::{
    CliConfig, EtlEngine, InventoryError, LocalStorage, MigrationOutcome, StoreSession,
    TextImportPipeline, TomlConfig,
};

fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting room-inventory");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        tracing::error!("❌ {:#}", e);

        let exit_code = match e.downcast_ref::<InventoryError>() {
            Some(inventory_error) => {
                eprintln!("❌ {}", inventory_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", inventory_error.recovery_suggestion());
                match inventory_error.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                }
            }
            None => {
                eprintln!("❌ {:#}", e);
                1
            }
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &CliConfig) -> anyhow::Result<()> {
    let mut config = TomlConfig::load_or_create(&cli.config, DEFAULT_DATABASE_FILE)?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    tracing::debug!("Store location: {}", config.store.url);

    let storage = LocalStorage::default();

    match &cli.command {
        Command::Migrate { dry_run, .. } => {
            if *dry_run {
                tracing::info!("🔍 DRY RUN MODE - the database will not be touched");
            }
            let pipeline = TextImportPipeline::new(storage, config).with_dry_run(*dry_run);
            let outcome = EtlEngine::new(pipeline).migrate();

            match &outcome {
                MigrationOutcome::Failed { .. } => {
                    eprintln!("❌ {}", outcome);
                    std::process::exit(1);
                }
                MigrationOutcome::Migrated { .. } => println!("✅ {}", outcome),
                _ => println!("⚠️  {}", outcome),
            }
        }
        Command::List { prefix, format } => {
            let session = StoreSession::connect(config.connection_params())?;
            let directory = session
                .load(prefix)
                .with_context(|| format!("listing room '{}'", prefix))?;

            match format {
                ListFormat::Text => {
                    println!("{}", directory);
                    for line in report::sorted_display_lines(&directory) {
                        println!("{}", line);
                    }
                }
                ListFormat::Csv => print!("{}", report::render_csv(&directory)?),
                ListFormat::Json => println!("{}", report::render_json(&directory)?),
            }
        }
        Command::Export { prefix, .. } => {
            let session = StoreSession::connect(config.connection_params())?;
            let directory = session
                .load(prefix)
                .with_context(|| format!("exporting room '{}'", prefix))?;

            storage
                .write_lines(&config.export.output, &directory.to_interchange_lines())
                .with_context(|| format!("writing {}", config.export.output))?;
            println!(
                "✅ {} exported to {}",
                directory, config.export.output
            );
        }
        Command::Clear => {
            let session = StoreSession::connect(config.connection_params())?;
            let removed = session.clear()?;
            println!("✅ {} rows removed", removed);
        }
    }

    Ok(())
}
