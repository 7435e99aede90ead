use clap::Parser;
use minebase::config::{CliConfig, Command, MinebaseConfig};
use minebase::core::commands;
use minebase::core::{DataFetcher, DataStore, Exporter, HttpArchiveSource};
use minebase::domain::ports::ConfigProvider;
use minebase::utils::error::Result;
use minebase::utils::logger;
use minebase::utils::monitor::SystemMonitor;
use minebase::{DataRoot, Edition, LocalStorage};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_format);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    let settings = cli.load_settings()?;
    let monitor = SystemMonitor::new(settings.monitoring_enabled());
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let store = DataStore::new(DataRoot::from_config(&settings));

    match &cli.command {
        Command::Versions { edition } => {
            for version in store.supported_versions(*edition)? {
                println!("{}", version);
            }
        }
        Command::Info { version, edition } => show_info(&store, *edition, version)?,
        Command::Validate {
            versions,
            all,
            edition,
        } => {
            let versions = commands::resolve_versions(&store, *edition, versions, *all)?;
            let report = commands::validate_versions(&store, &monitor, *edition, &versions)?;
            for check in &report.checks {
                match &check.outcome {
                    Ok(()) => println!("✅ {} {}", edition, check.version),
                    Err(e) => println!("❌ {} {}: {}", edition, check.version, e),
                }
            }
            report.into_result()?;
        }
        Command::Export {
            version,
            dataset,
            edition,
            format,
            bundle,
            ..
        } => {
            let data = store.version(*edition, version)?;
            let exporter = Exporter::new(&data)?;
            let storage = LocalStorage::new(settings.export_dir());
            let path =
                commands::export(&exporter, &storage, dataset.as_deref(), *format, *bundle).await?;
            println!("📁 Output saved to: {}/{}", settings.export_dir(), path);
        }
        Command::Fetch { .. } => fetch(&settings, &monitor).await?,
    }

    monitor.log_final_stats();
    Ok(())
}

fn show_info(store: &DataStore, edition: Edition, version: &str) -> Result<()> {
    let summary = commands::summarize_version(store, edition, version)?;
    println!(
        "{} {} (protocol {}, major {})",
        summary.edition, summary.minecraft_version, summary.protocol_version, summary.major_version
    );

    for (dataset, count) in &summary.datasets {
        match count {
            Some(count) => println!("  {:<24} {}", dataset, count),
            None => println!("  {:<24} -", dataset),
        }
    }
    Ok(())
}

async fn fetch(settings: &MinebaseConfig, monitor: &SystemMonitor) -> Result<()> {
    let storage = LocalStorage::new(settings.data_dir());
    let source = HttpArchiveSource::new(
        settings.fetch_url(),
        Duration::from_secs(settings.fetch.timeout_seconds),
    )?;

    let fetcher = DataFetcher::new(storage, source);
    if let Ok(Some(previous)) = fetcher.last_fetch().await {
        tracing::info!(
            "Replacing data fetched from {} at {}",
            previous.source,
            previous.fetched_at
        );
    }
    let stamp = fetcher.fetch().await?;
    monitor.log_stats("Fetch");

    DataRoot::from_config(settings).validate_data()?;
    println!(
        "✅ Fetched {} files from {} into {}",
        stamp.file_count,
        stamp.source,
        settings.data_dir()
    );
    Ok(())
}
