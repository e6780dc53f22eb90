//! Configuration loading and validation.
//!
//! All values are fixed for the lifetime of one control loop run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AutotrackError, ConfigError};
use crate::tracker::{ControlConfig, FrameGeometry, MIN_ROTATE_STEP};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub frame: FrameConfig,
    pub control: ControlSettings,
    pub serial: SerialConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AutotrackError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, AutotrackError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, AutotrackError> {
        let paths = [
            PathBuf::from("autotrack.toml"),
            PathBuf::from("config/autotrack.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration. Run before the control loop starts.
    pub fn validate(&self) -> Result<(), AutotrackError> {
        self.geometry()?;
        self.control()?;

        if self.serial.enabled {
            if self.serial.port.trim().is_empty() {
                return Err(ConfigError::invalid("serial.port", "Port must not be empty").into());
            }
            if self.serial.baud_rate == 0 {
                return Err(
                    ConfigError::invalid("serial.baud_rate", "Baud rate must be greater than 0")
                        .into(),
                );
            }
        }

        Ok(())
    }

    /// Frame geometry for the controller.
    pub fn geometry(&self) -> Result<FrameGeometry, ConfigError> {
        FrameGeometry::new(self.frame.width, self.frame.height)
    }

    /// Controller tuning, with the interval converted to a `Duration`.
    pub fn control(&self) -> Result<ControlConfig, ConfigError> {
        let c = &self.control;

        if !c.max_rotate_step.is_finite() || c.max_rotate_step < MIN_ROTATE_STEP {
            return Err(ConfigError::invalid(
                "control.max_rotate_step",
                format!("Must be a finite number of degrees >= {MIN_ROTATE_STEP}"),
            ));
        }

        if !c.smooth_factor.is_finite() || c.smooth_factor <= 0.0 {
            return Err(ConfigError::invalid(
                "control.smooth_factor",
                "Gain must be a finite number greater than 0",
            ));
        }

        let send_interval = Duration::try_from_secs_f64(c.send_interval).map_err(|_| {
            ConfigError::invalid(
                "control.send_interval",
                "Interval must be a finite, non-negative number of seconds",
            )
        })?;

        Ok(ControlConfig {
            threshold: c.threshold,
            max_rotate_step: c.max_rotate_step,
            smooth_factor: c.smooth_factor,
            send_interval,
        })
    }
}

/// Frame size as delivered by the camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
    /// Flip detections horizontally (selfie-style preview)
    pub mirror: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            mirror: false,
        }
    }
}

/// Controller tuning as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Minimum offset in pixels before correcting
    pub threshold: u32,
    /// Max degrees per command
    pub max_rotate_step: f64,
    /// Degrees per pixel of offset; 0.03 to 0.1 works well
    pub smooth_factor: f64,
    /// Seconds between commands
    pub send_interval: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            threshold: 20,
            max_rotate_step: 10.0,
            smooth_factor: 0.04,
            send_interval: 0.05,
        }
    }
}

/// Serial link to the motor controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Set to false to run without hardware
    pub enabled: bool,
    pub port: String,
    pub baud_rate: u32,
    /// Write timeout in milliseconds
    pub timeout_ms: u64,
    /// Wait after opening, in milliseconds, while the board resets
    pub settle_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: "/dev/ttyACM0".to_string(),
            baud_rate: 9600,
            timeout_ms: 100,
            settle_ms: 2000,
        }
    }
}

#[cfg(feature = "serial")]
impl SerialConfig {
    /// Connector for the configured port.
    pub fn connector(&self) -> crate::command::SerialConnector {
        crate::command::SerialConnector::new(self.port.clone(), self.baud_rate)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_settle(Duration::from_millis(self.settle_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_field(err: AutotrackError) -> String {
        match err {
            AutotrackError::Config(ConfigError::InvalidValue { field, .. }) => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_defaults_match_tuning() {
        let config = Config::default();
        config.validate().unwrap();

        let control = config.control().unwrap();
        assert_eq!(control, ControlConfig::default());
        assert_eq!(config.geometry().unwrap().center_x(), 400);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_str(
            r#"
            [control]
            threshold = 35
            send_interval = 0.1

            [serial]
            port = "COM13"
            "#,
        )
        .unwrap();

        assert_eq!(config.control.threshold, 35);
        assert_eq!(config.control.smooth_factor, 0.04);
        assert_eq!(config.serial.port, "COM13");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(
            config.control().unwrap().send_interval,
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_str("[frame]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, AutotrackError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/nonexistent/autotrack.toml").unwrap_err();
        assert!(matches!(err, AutotrackError::Config(ConfigError::ReadFile(_))));
    }

    #[test]
    fn test_rejects_zero_width() {
        let mut config = Config::default();
        config.frame.width = 0;
        assert_eq!(invalid_field(config.validate().unwrap_err()), "frame.width");
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let mut config = Config::default();
        config.control.max_rotate_step = 0.5;
        assert_eq!(
            invalid_field(config.validate().unwrap_err()),
            "control.max_rotate_step"
        );

        let mut config = Config::default();
        config.control.smooth_factor = f64::NAN;
        assert_eq!(
            invalid_field(config.validate().unwrap_err()),
            "control.smooth_factor"
        );

        let mut config = Config::default();
        config.control.send_interval = -0.05;
        assert_eq!(
            invalid_field(config.validate().unwrap_err()),
            "control.send_interval"
        );
    }

    #[test]
    fn test_serial_checked_only_when_enabled() {
        let mut config = Config::default();
        config.serial.port = String::new();
        assert_eq!(invalid_field(config.validate().unwrap_err()), "serial.port");

        config.serial.enabled = false;
        config.validate().unwrap();
    }
}
