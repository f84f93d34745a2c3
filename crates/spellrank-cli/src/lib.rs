// spellrank-cli: shared utilities for CLI tools.

use std::path::PathBuf;
use std::process;

use spellrank::{Collaborators, RankerConfig, SuggestionRanker};
use tracing_subscriber::EnvFilter;

/// Config file name looked up in the default locations.
const CONFIG_FILE: &str = "spellrank.json";

/// Environment variable holding an explicit config path.
const CONFIG_ENV: &str = "SPELLRANK_CONFIG";

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SPELLRANK_LOG";

/// Install the stderr log subscriber. The filter comes from `SPELLRANK_LOG`
/// (e.g. `spellrank=debug`) and defaults to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second call in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Find and load the ranker config.
///
/// Search order:
/// 1. `config_path` argument (if provided; must exist)
/// 2. `SPELLRANK_CONFIG` environment variable (must exist)
/// 3. `~/.config/spellrank/spellrank.json`
/// 4. `spellrank.json` in the current working directory
///
/// Without any config file the defaults are used.
pub fn load_config(config_path: Option<&str>) -> Result<RankerConfig, String> {
    let explicit = config_path
        .map(PathBuf::from)
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));
    if let Some(path) = explicit {
        return RankerConfig::load(&path).map_err(|e| e.to_string());
    }

    for path in default_config_paths() {
        if path.is_file() {
            tracing::debug!(path = %path.display(), "using config");
            return RankerConfig::load(&path).map_err(|e| e.to_string());
        }
    }
    Ok(RankerConfig::default())
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = home_dir() {
        paths.push(home.join(".config").join("spellrank").join(CONFIG_FILE));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(CONFIG_FILE));
    }
    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Build a ranker with default collaborators. Fallbacks are reported by
/// the ranker's own `warn!` events.
pub fn build_ranker(config: &RankerConfig) -> Result<SuggestionRanker, String> {
    SuggestionRanker::new(config, Collaborators::default()).map_err(|e| e.to_string())
}

/// Parse a `--config=PATH` or `-c PATH` argument from command line args.
///
/// Returns `(config_path, remaining_args)`.
pub fn parse_config_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut config_path = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--config=") {
            config_path = Some(val.to_string());
        } else if arg == "--config" || arg == "-c" {
            match args.get(i + 1) {
                Some(val) => {
                    config_path = Some(val.clone());
                    skip_next = true;
                }
                None => fatal(&format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (config_path, remaining)
}

/// Value following the first of `names` in `args`, parsed; `None` when the option
/// is absent. Exits on a missing or unparsable value.
pub fn option_value<T: std::str::FromStr>(args: &[String], names: &[&str]) -> Option<T> {
    let i = args.iter().position(|a| names.contains(&a.as_str()))?;
    let Some(raw) = args.get(i + 1) else {
        fatal(&format!("{} requires a value", args[i]));
    };
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => fatal(&format!("invalid value for {}: {raw}", args[i])),
    }
}

/// Arguments that are neither options nor option values.
pub fn positional(args: &[String], options_with_values: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if options_with_values.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with('-') {
            out.push(arg.clone());
        }
    }
    out
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
