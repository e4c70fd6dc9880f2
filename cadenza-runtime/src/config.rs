use config::{Config, ConfigError, File, FileFormat};
use std::path::Path;

/// When the enablement gate consults configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnablementCheck {
    /// Check once while registering triggers; a value that flips afterwards
    /// does not affect triggers already registered.
    #[default]
    AtRegistration,
    /// Re-check on every firing.
    PerFiring,
}

/// Load config from a specific TOML file
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .add_source(config::Environment::with_prefix("CADENZA").separator("_"))
        .build()?;
    Ok(config)
}

/// Load config from a specific YAML file
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Yaml))
        .add_source(config::Environment::with_prefix("CADENZA").separator("_"))
        .build()?;
    Ok(config)
}

/// Resolve a config placeholder like ${tasks.reports.cron} or ${tasks.reports.cron:default}
pub fn resolve_config_value(
    value: &str,
    config: Option<&Config>,
) -> Result<String, Box<dyn std::error::Error>> {
    if value.starts_with("${") && value.ends_with('}') {
        let inner = &value[2..value.len() - 1];

        // Check if there's a default value (e.g., ${tasks.reports.cron:@daily})
        if let Some(colon_pos) = inner.find(':') {
            let key = &inner[..colon_pos];
            let default_value = &inner[colon_pos + 1..];

            match config {
                Some(config) => match config.get_string(key) {
                    Ok(resolved) => Ok(resolved),
                    Err(_) => Ok(default_value.to_string()),
                },
                None => Ok(default_value.to_string()),
            }
        } else {
            let config = config.ok_or_else(|| {
                format!("placeholder '{value}' used without a configuration source")
            })?;
            let resolved = config.get_string(inner)?;
            Ok(resolved)
        }
    } else {
        Ok(value.to_string())
    }
}

/// Config path for a task's enablement switch: `<namespace>.<group>.<name>`.
pub(crate) fn enablement_path(namespace: &str, group: &str, name: &str) -> String {
    format!("{namespace}.{group}.{name}")
}

/// Whether the gate allows a task to run.
///
/// Fail-open: an undefined path counts as enabled. Other lookup failures
/// (e.g. a non-boolean value at the path) also allow the task, but loudly.
pub(crate) fn is_enabled(config: Option<&Config>, path: &str) -> bool {
    let Some(config) = config else {
        return true;
    };
    match config.get_bool(path) {
        Ok(enabled) => enabled,
        Err(ConfigError::NotFound(_)) => true,
        Err(e) => {
            tracing::warn!("enablement lookup for '{path}' failed, treating as enabled: {e}");
            true
        }
    }
}
