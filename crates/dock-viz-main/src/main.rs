// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use dock_viz_render::pipeline::{RunConfig, run};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// JSON file with a `RunConfig`; every field is optional.
const CONFIG_ENV: &str = "DOCK_VIZ_CONFIG";
/// Directory searched for `slot_allocations.csv`, overriding the config file.
const BASE_ENV: &str = "DOCK_VIZ_BASE";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT | FmtSpan::CLOSE)
        // Stdout carries the result lines.
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Could not read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Invalid config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

fn read_config(path: PathBuf) -> Result<RunConfig, ConfigError> {
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
}

fn load_config() -> RunConfig {
    let mut config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => read_config(PathBuf::from(path)).unwrap_or_else(|e| {
            warn!(%e, "Falling back to default configuration");
            RunConfig::default()
        }),
        None => RunConfig::default(),
    };
    if let Some(base) = std::env::var_os(BASE_ENV) {
        config = config.with_base_dir(base);
    }
    config
}

fn main() {
    enable_tracing();

    let config = load_config();
    info!(%config, "Starting");

    let summary = run(&config);
    print!("{summary}");
    debug!(aborted = summary.is_aborted(), "Done");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn reads_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viz.json");
        std::fs::write(&path, r#"{ "subdir_prefix": "run", "style": { "dpi": 72 } }"#).unwrap();

        let config = read_config(path).unwrap();
        assert_eq!(config.subdir_prefix(), "run");
        assert_eq!(config.base_dir(), Path::new("output"));
        assert_eq!(config.style().dpi(), 72.0);
    }

    #[test]
    fn reports_unreadable_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(read_config(missing), Err(ConfigError::Read { .. })));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ dpi: }").unwrap();
        let err = read_config(broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Invalid config"));
    }
}
