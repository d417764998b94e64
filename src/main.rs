use antidotv::utils::{logger, validation::Validate};
use antidotv::{CliConfig, CureEngine, LocalStorage};
use clap::Parser;

fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::debug!("CLI config: {:?}", cli);

    let options = match cli.resolve() {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = options.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    if options.order_ports {
        tracing::info!("Port ordering enabled");
    }

    let engine = CureEngine::new(LocalStorage::new(), options);
    match engine.run() {
        Ok(report) if report.files_scanned == 0 => {
            tracing::info!("Nothing to cure.");
        }
        Ok(report) => {
            tracing::info!(
                "Cured {} instance(s) in {} of {} file(s).",
                report.instances_cured,
                report.files_changed.len(),
                report.files_scanned
            );
        }
        Err(e) => {
            tracing::error!("Cure failed: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
