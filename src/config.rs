//! Configuration management for the Animia SMS dispatcher.
//!
//! This module handles loading and validating configuration from environment variables.
//! The .env file is loaded through `dotenvy`, which does not write to stdout (MCP uses
//! stdout for communication).

use crate::channels::TargetPlatform;
use crate::dispatch::DispatchSettings;
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Configuration for the Animia SMS dispatcher.
#[derive(Debug, Clone)]
pub struct Config {
    /// Animia backend base URL
    pub api_base_url: String,

    /// Bearer token for the backend
    pub api_token: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Calling code prepended to 10-digit numbers, without `+` (default: "91")
    pub default_country_code: String,

    /// Pause between consecutive sends in a batch, in milliseconds (default: 2000)
    pub inter_send_delay_ms: u64,

    /// Native channel attempts per destination (default: 2)
    pub native_max_attempts: u32,

    /// Pause between native attempts, in milliseconds (default: 1000)
    pub native_retry_delay_ms: u64,

    /// Try the native channel before the messaging app (default: true)
    pub prefer_native: bool,

    /// Platform whose messaging-app URI format is used (default: android)
    pub target_platform: TargetPlatform,

    /// Device that relays native SMS through the backend; no native channel when unset
    pub relay_device_id: Option<String>,

    /// Whether the relay device holds the SMS permission (default: true)
    pub sms_permission_granted: bool,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ANIMIA_API_BASE_URL`: Base URL for the Animia backend
    /// - `ANIMIA_API_TOKEN`: Bearer token for authentication
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `DEFAULT_COUNTRY_CODE`: calling code for 10-digit numbers (default: 91)
    /// - `INTER_SEND_DELAY_MS`: delay between sends (default: 2000)
    /// - `NATIVE_MAX_ATTEMPTS`: native send attempts (default: 2)
    /// - `NATIVE_RETRY_DELAY_MS`: delay between native attempts (default: 1000)
    /// - `PREFER_NATIVE`: prefer direct send (default: true)
    /// - `TARGET_PLATFORM`: `android` or `ios` (default: android)
    /// - `SMS_RELAY_DEVICE_ID`: enables the native channel via device relay
    /// - `SMS_PERMISSION_GRANTED`: relay permission state (default: true)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("ANIMIA_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("ANIMIA_API_BASE_URL".to_string()))?;

        let api_token = env::var("ANIMIA_API_TOKEN")
            .map_err(|_| ConfigError::MissingVar("ANIMIA_API_TOKEN".to_string()))?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "ANIMIA_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if api_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "ANIMIA_API_TOKEN".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let default_country_code =
            env::var("DEFAULT_COUNTRY_CODE").unwrap_or_else(|_| "91".to_string());
        let default_country_code = default_country_code.trim_start_matches('+').to_string();
        if default_country_code.is_empty()
            || default_country_code.len() > 3
            || !default_country_code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::InvalidValue {
                var: "DEFAULT_COUNTRY_CODE".to_string(),
                reason: format!("Must be 1-3 digits, got: {}", default_country_code),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let inter_send_delay_ms = Self::parse_env_u64("INTER_SEND_DELAY_MS", 2000)?;
        let native_retry_delay_ms = Self::parse_env_u64("NATIVE_RETRY_DELAY_MS", 1000)?;
        let native_max_attempts = Self::parse_env_u32("NATIVE_MAX_ATTEMPTS", 2)?;
        if native_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                var: "NATIVE_MAX_ATTEMPTS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let prefer_native = Self::parse_env_bool("PREFER_NATIVE", true)?;
        let sms_permission_granted = Self::parse_env_bool("SMS_PERMISSION_GRANTED", true)?;

        let target_platform = match env::var("TARGET_PLATFORM") {
            Ok(val) => val
                .parse::<TargetPlatform>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "TARGET_PLATFORM".to_string(),
                    reason,
                })?,
            Err(_) => TargetPlatform::Android,
        };

        let relay_device_id = env::var("SMS_RELAY_DEVICE_ID")
            .ok()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            api_token,
            request_timeout,
            default_country_code,
            inter_send_delay_ms,
            native_max_attempts,
            native_retry_delay_ms,
            prefer_native,
            target_platform,
            relay_device_id,
            sms_permission_granted,
            log_level,
        })
    }

    /// Dispatch tunables derived from this configuration.
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            inter_send_delay: Duration::from_millis(self.inter_send_delay_ms),
            native_max_attempts: self.native_max_attempts,
            native_retry_delay: Duration::from_millis(self.native_retry_delay_ms),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            api_token: String::new(),
            request_timeout: 10,
            default_country_code: "91".to_string(),
            inter_send_delay_ms: 2000,
            native_max_attempts: 2,
            native_retry_delay_ms: 1000,
            prefer_native: true,
            target_platform: TargetPlatform::Android,
            relay_device_id: None,
            sms_permission_granted: true,
            log_level: "error".to_string(),
        }
    }
}
