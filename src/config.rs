use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::data::schema::ColumnMapping;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sales-dashboard.toml";

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Everything the dashboard reads from `sales-dashboard.toml`.
///
/// ```toml
/// data_file = "ventas.xlsx"
///
/// [columns]
/// region = "region"
/// category = "categoria_simplificada"
/// timestamp = "orden_compra_timestamp"
/// price = "precio_final"
/// order_metric = "ticket_promedio"
///
/// [charts]
/// histogram_bins = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset opened at startup. Relative paths resolve against the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Explicit column layout; detected from the headers when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnMapping>,
    pub charts: ChartConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub histogram_bins: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { histogram_bins: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 860.0,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text).context("parsing config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file; a relative `data_file` is resolved against the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config =
            Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))?;

        if let (Some(data), Some(dir)) = (&config.data_file, path.parent()) {
            if data.is_relative() {
                config.data_file = Some(dir.join(data));
            }
        }
        Ok(config)
    }

    /// `explicit` must exist; otherwise [`DEFAULT_CONFIG_FILE`] in `cwd` is
    /// used if present, else built-in defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            log::info!("Using config {}", candidate.display());
            Self::load(&candidate)
        } else {
            log::debug!("No {DEFAULT_CONFIG_FILE} found; using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.charts.histogram_bins == 0 {
            bail!("charts.histogram_bins must be at least 1");
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            bail!("window size must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data_file, None);
        assert_eq!(config.columns, None);
        assert_eq!(config.charts.histogram_bins, 20);
        assert_eq!(config.window.width, 1280.0);
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn parses_columns_and_charts() {
        let config = AppConfig::from_toml_str(
            r#"
            data_file = "ventas.xlsx"

            [columns]
            region = "Region"
            category = "categoria_producto"
            timestamp = "fecha_compra_datetime"
            price = "precio_final"
            order_metric = "precio_promedio_por_pedido"

            [charts]
            histogram_bins = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("ventas.xlsx")));
        assert_eq!(config.columns.unwrap().normalized(), ColumnMapping::detailed());
        assert_eq!(config.charts.histogram_bins, 12);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn rejects_zero_bins_and_partial_mapping() {
        assert!(AppConfig::from_toml_str("[charts]\nhistogram_bins = 0\n").is_err());
        assert!(AppConfig::from_toml_str("[columns]\nregion = \"region\"\n").is_err());
    }

    #[test]
    fn load_resolves_relative_data_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "data_file = \"ventas.csv\"\n").unwrap();

        let config = AppConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config.data_file, Some(dir.path().join("ventas.csv")));
    }

    #[test]
    fn discover_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(AppConfig::discover(None, dir.path()).unwrap(), AppConfig::default());

        let missing = dir.path().join("other.toml");
        assert!(AppConfig::discover(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = AppConfig {
            columns: Some(ColumnMapping::consolidated()),
            ..Default::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[columns]"));
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }
}
