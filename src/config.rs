//! Generator configuration files.

use anyhow::Context;
use fixture_generator::GeneratorConfig;
use std::fs;
use std::path::Path;

/// Load a [`GeneratorConfig`] from a `.yaml`/`.yml`, `.toml` or `.json` file.
///
/// Fields missing from the file keep their defaults. The loaded values are
/// validated before they are returned.
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<GeneratorConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let config: GeneratorConfig = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML config: {}", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML config: {}", path.display()))?,
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON config: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported config file extension: {} (expected yaml, yml, toml or json)",
            path.display()
        ),
    };

    config
        .validate()
        .with_context(|| format!("Invalid generator config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "Loaded generator config");
    Ok(config)
}
