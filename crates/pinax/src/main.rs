//! Pinax - Entry point
//!
//! Loads the configuration, builds the Swagger document and serves it.

use std::path::{Path, PathBuf};

use tracing::info;

use pinax::prelude::*;
use pinax::telemetry::{init_logging, LogConfig};

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "PINAX_CONFIG";

/// Configuration file used when no path is given.
const DEFAULT_CONFIG_FILE: &str = "pinax.toml";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "PINAX";

/// Command-line arguments.
struct Args {
    /// Path to configuration file.
    config: Option<PathBuf>,
    /// Print the document and exit instead of serving it.
    print: bool,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut config = None;
        let mut print = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    config = args.next().map(PathBuf::from);
                }
                "--print" | "-p" => print = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("pinax {}", pinax::VERSION);
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    eprintln!("Unknown argument: {other}");
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
                path => {
                    config = Some(PathBuf::from(path));
                }
            }
        }

        Self { config, print }
    }
}

fn print_help() {
    println!(
        r"Pinax - Swagger 2.0 documentation from route annotations

USAGE:
    pinax [OPTIONS] [CONFIG]

ARGS:
    [CONFIG]               Path to configuration file (TOML or JSON)

OPTIONS:
    -c, --config <PATH>    Path to configuration file (TOML or JSON)
    -p, --print            Print the generated document and exit
    -h, --help             Print help information
    -v, --version          Print version information

ENVIRONMENT VARIABLES:
    PINAX_CONFIG                   Configuration file (default: pinax.toml)
    PINAX__SERVER__HTTP_ADDR       Bind address (default: 0.0.0.0:1337)
    PINAX__SERVER__MOUNT_PREFIX    Prefix for the documentation routes
    PINAX__LOGGING__LEVEL          Log filter (default: info)
    PINAX__LOGGING__FORMAT         json or pretty
    PINAX__SWAGGER__BASE_PATH      Document basePath
    PINAX__SWAGGER__UI__URL        External viewer to redirect to

ENDPOINTS:
    GET /swagger/doc               Swagger 2.0 document
    GET /swagger/ui                Documentation viewer
"
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loader = ConfigLoader::new().with_defaults().with_dotenv()?;
    let loader = match args
        .config
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    {
        Some(path) => loader.with_file(&path)?,
        None => loader.with_optional_file(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    let config = loader.with_env_prefix(ENV_PREFIX).load()?;

    init_logging(&log_config(&config, args.print))?;

    if args.print {
        let doc = DocumentBuilder::from_config(&config).build_json_pretty()?;
        println!("{doc}");
        return Ok(());
    }

    info!(version = pinax::VERSION, "Starting Pinax");

    Server::from_config(&config)?.run().await?;
    Ok(())
}

/// Logging settings for this run. Printing keeps stdout for the document.
fn log_config(config: &PinaxConfig, print: bool) -> LogConfig {
    LogConfig {
        stderr: print,
        ..LogConfig::from(&config.logging)
    }
}
