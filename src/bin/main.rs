use checklist_sync::{cli, config, telemetry};

fn main() {
    let cli = cli::parse_from(std::env::args_os());

    let loaded = config::load_or_init(cli.config.as_deref());
    // The subscriber is built from this config, so it cannot report on it.
    for warning in &loaded.warnings {
        eprintln!("warning: {warning}");
    }

    let _telemetry_guard = telemetry::init(telemetry::TelemetryConfig::new(
        cli.verbose,
        loaded.config.logging.clone(),
    ));

    if let Err(e) = cli::run(cli, loaded.config) {
        tracing::error!(transience = ?e.transience(), effect = %e.effect(), "error: {e}");
        std::process::exit(1);
    }
}
