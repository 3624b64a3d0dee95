use crate::core::schedule::{FeeSchedule, FeeTier};
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransferConfig {
    pub source_currency: String,
    pub target_currency: String,
    /// Units of the source currency per one unit of the target currency
    /// (INR per USD). Static configuration; never fetched live.
    pub exchange_rate: f64,
    /// Name of the fee schedule applied to transfers.
    pub schedule: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        TransferConfig {
            source_currency: "INR".to_string(),
            target_currency: "USD".to_string(),
            exchange_rate: 83.5,
            schedule: "standard".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OfflineConfig {
    pub base_url: String,
    #[serde(default = "default_cache_version")]
    pub cache_version: u32,
    #[serde(default = "default_offline_page")]
    pub offline_page: String,
    #[serde(default = "default_precache")]
    pub precache: Vec<String>,
}

impl OfflineConfig {
    /// Versioned cache name; bumping `cache_version` retires older caches
    /// on the next activation.
    pub fn cache_name(&self) -> String {
        format!("remitq-offline-v{}", self.cache_version)
    }
}

impl Default for OfflineConfig {
    fn default() -> Self {
        OfflineConfig {
            base_url: "https://transfer.citadel.in".to_string(),
            cache_version: default_cache_version(),
            offline_page: default_offline_page(),
            precache: default_precache(),
        }
    }
}

fn default_cache_version() -> u32 {
    1
}

fn default_offline_page() -> String {
    "offline.html".to_string()
}

fn default_precache() -> Vec<String> {
    [
        "index.html",
        "offline.html",
        "manifest.json",
        "assets/logo.png",
        "static/css/styles.css",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_schedules() -> Vec<FeeSchedule> {
    vec![
        FeeSchedule {
            name: "standard".to_string(),
            tiers: vec![
                FeeTier {
                    min: 0.0,
                    max: Some(8350.0),
                    rate: 0.03,
                },
                FeeTier {
                    min: 8351.0,
                    max: Some(12500.0),
                    rate: 0.04,
                },
                FeeTier {
                    min: 12501.0,
                    max: Some(16700.0),
                    rate: 0.045,
                },
                FeeTier {
                    min: 16701.0,
                    max: None,
                    rate: 0.05,
                },
            ],
        },
        FeeSchedule {
            name: "flat".to_string(),
            tiers: vec![FeeTier {
                min: 0.0,
                max: None,
                rate: 0.05,
            }],
        },
    ]
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub transfer: TransferConfig,
    #[serde(default = "default_schedules")]
    pub schedules: Vec<FeeSchedule>,
    #[serde(default)]
    pub offline: OfflineConfig,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            transfer: TransferConfig::default(),
            schedules: default_schedules(),
            offline: OfflineConfig::default(),
            data_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "remitq")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("in", "codito", "remitq")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// The fee schedule selected by `transfer.schedule`.
    pub fn active_schedule(&self) -> Result<&FeeSchedule> {
        self.schedules
            .iter()
            .find(|s| s.name == self.transfer.schedule)
            .with_context(|| {
                format!(
                    "Selected fee schedule '{}' is not defined",
                    self.transfer.schedule
                )
            })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.transfer.exchange_rate.is_finite() || self.transfer.exchange_rate <= 0.0 {
            bail!(
                "Exchange rate must be a positive number, found {}",
                self.transfer.exchange_rate
            );
        }
        if self.schedules.is_empty() {
            bail!("No fee schedules defined");
        }
        for schedule in &self.schedules {
            schedule
                .validate()
                .with_context(|| format!("Invalid fee schedule '{}'", schedule.name))?;
        }
        self.active_schedule()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
transfer:
  source_currency: "INR"
  target_currency: "USD"
  exchange_rate: 83.5
  schedule: "standard"

schedules:
  - name: "standard"
    tiers:
      - min: 0
        max: 8350
        rate: 0.03
      - min: 8351
        max: 12500
        rate: 0.04
      - min: 12501
        max: 16700
        rate: 0.045
      - min: 16701
        rate: 0.05
  - name: "flat"
    tiers:
      - min: 0
        rate: 0.05

offline:
  base_url: "https://transfer.citadel.in"
  cache_version: 2
  precache:
    - index.html
    - offline.html
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        config.validate().expect("Config should be valid");

        assert_eq!(config.transfer.exchange_rate, 83.5);
        assert_eq!(config.transfer.source_currency, "INR");

        let schedule = config.active_schedule().unwrap();
        assert_eq!(schedule.name, "standard");
        assert_eq!(schedule.tiers.len(), 4);
        assert_eq!(schedule.tiers[0].rate, 0.03);
        assert_eq!(schedule.tiers[3].max, None);

        assert_eq!(config.schedules[1].name, "flat");
        assert!(config.schedules[1].is_flat());

        assert_eq!(config.offline.cache_name(), "remitq-offline-v2");
        assert_eq!(config.offline.offline_page, "offline.html");
        assert_eq!(config.offline.precache.len(), 2);
    }

    #[test]
    fn test_builtin_defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.active_schedule().unwrap().name, "standard");
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("data_path: /tmp/remitq").unwrap();
        config.validate().unwrap();

        assert_eq!(config.transfer.exchange_rate, 83.5);
        assert_eq!(config.transfer.schedule, "standard");
        assert_eq!(config.schedules.len(), 2);
        assert_eq!(config.offline.cache_name(), "remitq-offline-v1");
        assert!(config.offline.precache.contains(&"offline.html".to_string()));
        assert_eq!(config.data_path.as_deref(), Some("/tmp/remitq"));
    }

    #[test]
    fn test_unknown_selected_schedule_is_rejected() {
        let yaml_str = r#"
transfer:
  source_currency: "INR"
  target_currency: "USD"
  exchange_rate: 83.5
  schedule: "premium"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert!(config.validate().is_err());
        assert!(config.active_schedule().is_err());
    }

    #[test]
    fn test_invalid_exchange_rate_is_rejected() {
        for rate in ["0", "-83.5", ".nan"] {
            let yaml_str = format!(
                r#"
transfer:
  source_currency: "INR"
  target_currency: "USD"
  exchange_rate: {rate}
  schedule: "standard"
"#
            );
            let config: AppConfig = serde_yaml::from_str(&yaml_str).unwrap();
            assert!(config.validate().is_err(), "rate {rate} should be rejected");
        }
    }

    #[test]
    fn test_invalid_schedule_in_config_is_rejected() {
        let yaml_str = r#"
transfer:
  source_currency: "INR"
  target_currency: "USD"
  exchange_rate: 83.5
  schedule: "broken"

schedules:
  - name: "broken"
    tiers:
      - min: 0
        max: 5000
        rate: 0.03
      - min: 9000
        rate: 0.05
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
