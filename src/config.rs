use crate::errors::AppError;

const MEGABYTE: u64 = 1024 * 1024;
pub const DEFAULT_ATTACHMENT_MAX_BYTES: u64 = 10 * MEGABYTE;
const DEFAULT_EVENT_BUS_CAPACITY: usize = 1024;
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_UPLOAD_DIR: &str = "uploads";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
    pub attachment_max_bytes: u64,
    pub event_bus_capacity: usize,
    /// Directory recorded in attachment paths.
    pub upload_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            attachment_max_bytes: DEFAULT_ATTACHMENT_MAX_BYTES,
            event_bus_capacity: DEFAULT_EVENT_BUS_CAPACITY,
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let log_filter = lookup("LOG_FILTER").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let attachment_max_bytes = match lookup("ATTACHMENT_MAX_SIZE") {
            Some(raw) => parse_max_file_size(&raw)?,
            None => DEFAULT_ATTACHMENT_MAX_BYTES,
        };

        let event_bus_capacity = lookup("EVENT_BUS_CAPACITY")
            .map(|val| val.trim().parse::<usize>())
            .unwrap_or(Ok(DEFAULT_EVENT_BUS_CAPACITY))
            .map_err(|_| AppError::configuration("EVENT_BUS_CAPACITY must be a valid integer"))?;

        let upload_dir = lookup("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string());

        Ok(Self {
            log_filter,
            attachment_max_bytes,
            event_bus_capacity,
            upload_dir,
        })
    }
}

/// `<n>MB` is `n` megabytes; any other shape falls back to 10 MB.
pub fn parse_max_file_size(raw: &str) -> Result<u64, AppError> {
    let trimmed = raw.trim();
    let Some(number) = trimmed.strip_suffix("MB") else {
        return Ok(DEFAULT_ATTACHMENT_MAX_BYTES);
    };

    number
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|mb| mb.checked_mul(MEGABYTE))
        .ok_or_else(|| AppError::configuration(format!("ATTACHMENT_MAX_SIZE is not a valid size: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.attachment_max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_lookup(lookup(&[
            ("LOG_FILTER", "task_authz=debug"),
            ("ATTACHMENT_MAX_SIZE", "25MB"),
            ("EVENT_BUS_CAPACITY", "16"),
            ("UPLOAD_DIR", "/var/lib/tasks"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "task_authz=debug");
        assert_eq!(config.attachment_max_bytes, 25 * 1024 * 1024);
        assert_eq!(config.event_bus_capacity, 16);
        assert_eq!(config.upload_dir, "/var/lib/tasks");
    }

    #[test]
    fn size_without_mb_suffix_falls_back_to_default() {
        assert_eq!(parse_max_file_size("512KB").unwrap(), DEFAULT_ATTACHMENT_MAX_BYTES);
        assert_eq!(parse_max_file_size("12").unwrap(), DEFAULT_ATTACHMENT_MAX_BYTES);
    }

    #[test]
    fn malformed_values_are_configuration_errors() {
        assert!(matches!(parse_max_file_size("tenMB"), Err(AppError::Configuration(_))));
        assert!(matches!(
            Config::from_lookup(lookup(&[("EVENT_BUS_CAPACITY", "lots")])),
            Err(AppError::Configuration(_))
        ));
    }
}
