//! Dispatcher entry point: CLI wiring, logging and config-driven planner construction.

use std::fs;
use std::path::Path;
use std::process;

use plant_dispatch::cli::{CliOptions, parse_args, print_usage};
use plant_dispatch::config::DispatchConfig;
use plant_dispatch::io::export::export_csv;
use plant_dispatch::plan::planner::Planner;
use plant_dispatch::request::parse_request;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber on stderr.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads config: --config takes priority, then --preset, then the standard preset.
fn load_config(cli: &CliOptions) -> DispatchConfig {
    let loaded = if let Some(ref path) = cli.config {
        DispatchConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        DispatchConfig::from_preset(name)
    } else {
        Ok(DispatchConfig::standard())
    };

    let config = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    config
}

/// Plans one payload file, prints the plan as JSON on stdout and the summary on stderr.
fn run_payload(planner: &Planner, path: &Path, cli: &CliOptions) -> Result<(), String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("cannot read payload \"{}\": {e}", path.display()))?;
    let request = parse_request(&raw).map_err(|e| format!("invalid payload: {e}"))?;
    let plan = planner
        .plan(&request)
        .map_err(|e| match std::error::Error::source(&e) {
            Some(cause) => format!("{} stage: {e}: {cause}", e.stage()),
            None => format!("{} stage: {e}", e.stage()),
        })?;

    let outputs = if cli.request_order {
        plan.in_request_order(&request)
    } else {
        plan.outputs().to_vec()
    };
    let json = serde_json::to_string_pretty(&outputs)
        .map_err(|e| format!("cannot serialize plan: {e}"))?;
    println!("{json}");

    eprintln!("\n{}", plan.summary());

    if let Some(ref out) = cli.plan_out {
        export_csv(&plan, out).map_err(|e| format!("failed to write CSV: {e}"))?;
        info!(path = %out.display(), "plan written");
    }

    Ok(())
}

fn main() {
    let cli = parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        print_usage();
        process::exit(1);
    });

    let config = load_config(&cli);
    init_tracing(&config.logging.level);

    let planner = Planner::new(config.model.clone());

    if let Some(ref path) = cli.payload {
        if let Err(e) = run_payload(&planner, path, &cli) {
            error!("{e}");
            eprintln!("error: {e}");
            process::exit(1);
        }
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(plant_dispatch::api::AppState { planner });
        let port = cli.port.unwrap_or(config.server.port);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(plant_dispatch::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
