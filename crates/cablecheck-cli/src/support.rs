use cablecheck_kernel::{Catalogue, ConductorSize, parse_amps_text, parse_size_text};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_CONFIG_PATH: &str = "cablecheck.toml";
pub const LOG_ENV_VAR: &str = "CABLECHECK_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Contents of `cablecheck.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Catalogue TOML to load instead of the built-in data.
    pub catalogue: Option<PathBuf>,
    pub log_filter: Option<String>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Catalogue path, resolved relative to the config file.
    fn catalogue_path(&self) -> Option<PathBuf> {
        let path = self.catalogue.as_ref()?;
        match &self.base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path.clone()),
        }
    }
}

pub fn load_config_or_exit(explicit: Option<&str>) -> CliConfig {
    let path = match explicit {
        Some(path) => PathBuf::from(path),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return CliConfig::default();
            }
            default
        }
    };
    let text = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("error: failed to read config {}: {e}", path.display());
        std::process::exit(1);
    });
    let mut config: CliConfig = toml::from_str(&text).unwrap_or_else(|e| {
        eprintln!("error: invalid config {}: {e}", path.display());
        std::process::exit(1);
    });
    config.base_dir = path.parent().map(Path::to_path_buf);
    config
}

/// Install the stderr subscriber. `CABLECHECK_LOG` wins over the config
/// file's `log_filter`, which wins over `warn`.
pub fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .ok()
        .or_else(|| {
            config
                .log_filter
                .as_deref()
                .and_then(|f| EnvFilter::try_new(f).ok())
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

pub fn catalogue_or_exit(config: &CliConfig) -> Catalogue {
    let loaded = match config.catalogue_path() {
        Some(path) => {
            debug!(path = %path.display(), "loading catalogue file");
            Catalogue::from_path(&path)
        }
        None => Catalogue::builtin(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

/// Read a JSON argument given inline, as a file path, or as `-` for stdin.
pub fn read_json_arg_or_exit<T: DeserializeOwned>(arg: &str, what: &str) -> T {
    let trimmed = arg.trim_start();
    let text = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        arg.to_string()
    } else if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
            eprintln!("error: failed to read {what} from stdin: {e}");
            std::process::exit(1);
        });
        buf
    } else {
        fs::read_to_string(arg).unwrap_or_else(|e| {
            eprintln!("error: failed to read {what} {arg}: {e}");
            std::process::exit(1);
        })
    };
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("error: invalid {what}: {e}");
        std::process::exit(1);
    })
}

pub fn parse_size_or_exit(text: &str) -> ConductorSize {
    parse_size_text(text).unwrap_or_else(|| {
        eprintln!("error: unrecognised conductor size: {text}");
        std::process::exit(1);
    })
}

pub fn parse_amps_or_exit(text: &str) -> Decimal {
    parse_amps_text(text).unwrap_or_else(|| {
        eprintln!("error: unrecognised current value: {text}");
        std::process::exit(1);
    })
}

pub fn parse_decimal_or_exit(text: &str, what: &str) -> Decimal {
    Decimal::from_str(text.trim()).unwrap_or_else(|e| {
        eprintln!("error: invalid {what} `{text}`: {e}");
        std::process::exit(1);
    })
}

pub fn print_json<T: serde::Serialize>(payload: &T) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|e| {
        eprintln!("error: failed to render json output: {e}");
        std::process::exit(2);
    });
    println!("{rendered}");
}

/// Money for display, to the penny.
pub fn money(value: Decimal) -> String {
    format!("£{:.2}", value)
}
