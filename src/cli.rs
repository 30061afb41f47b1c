//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Parsed CLI arguments.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub payload: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub plan_out: Option<PathBuf>,
    pub request_order: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: Option<u16>,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid or conflicting argument.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let opts = parse_options(&args)?;

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.payload.is_none() && !opts.serves() {
        return Err("nothing to do: pass --payload <path>".to_string() + SERVE_HINT);
    }

    Ok(opts)
}

#[cfg(feature = "api")]
const SERVE_HINT: &str = " or --serve";
#[cfg(not(feature = "api"))]
const SERVE_HINT: &str = "";

impl CliOptions {
    #[cfg(feature = "api")]
    fn serves(&self) -> bool {
        self.serve
    }

    #[cfg(not(feature = "api"))]
    fn serves(&self) -> bool {
        false
    }
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--payload" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --payload (expected a JSON file path)")?;
                if opts.payload.replace(PathBuf::from(path)).is_some() {
                    return Err("--payload provided more than once".to_string());
                }
            }
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--plan-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --plan-out (expected a file path)")?;
                if opts.plan_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--plan-out provided more than once".to_string());
                }
            }
            "--request-order" => {
                opts.request_order = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                opts.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                if opts.port.replace(port).is_some() {
                    return Err("--port provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("plant-dispatch: merit-order production plan for a power plant roster");
    eprintln!();
    eprintln!("Usage: plant-dispatch [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --payload <path>     Compute a plan for a JSON payload file");
    eprintln!("  --config <path>      Load configuration from a TOML file");
    eprintln!("  --preset <name>      Use a built-in preset (standard, fine_step)");
    eprintln!("  --plan-out <path>    Export the plan to CSV");
    eprintln!("  --request-order      Print plants in payload order instead of merit order");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve              Start the REST API server");
        eprintln!("  --port <u16>         API server port (overrides server.port)");
    }
    eprintln!("  --help               Show this help message");
}
