use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::AppConfig;
use crate::data::schema::ColumnMapping;

#[derive(Parser, Debug)]
#[command(name = "sales-dashboard")]
#[command(about = "Interactive sales dashboard over a spreadsheet of orders")]
#[command(version)]
pub struct Args {
    /// Dataset to open (xlsx, xls, ods, csv, parquet or json)
    pub file: Option<PathBuf>,

    /// Config file (default: ./sales-dashboard.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Force a known column layout instead of detecting it
    #[arg(long, value_enum)]
    pub layout: Option<Layout>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// categoria_simplificada / orden_compra_timestamp / ticket_promedio
    Consolidated,
    /// categoria_producto / fecha_compra_datetime / precio_promedio_por_pedido
    Detailed,
}

impl From<Layout> for ColumnMapping {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Consolidated => ColumnMapping::consolidated(),
            Layout::Detailed => ColumnMapping::detailed(),
        }
    }
}

impl Args {
    /// Command-line values win over the config file.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(file) = &self.file {
            config.data_file = Some(file.clone());
        }
        if let Some(layout) = self.layout {
            config.columns = Some(layout.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_and_layout() {
        let args =
            Args::try_parse_from(["sales-dashboard", "ventas.xlsx", "--layout", "detailed"])
                .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("ventas.xlsx")));
        assert_eq!(args.layout, Some(Layout::Detailed));
        assert_eq!(args.config, None);
    }

    #[test]
    fn args_override_config() {
        let mut config = AppConfig {
            data_file: Some("old.csv".into()),
            columns: Some(ColumnMapping::consolidated()),
            ..Default::default()
        };
        let args = Args::try_parse_from([
            "sales-dashboard",
            "-c",
            "x.toml",
            "new.csv",
            "--layout",
            "detailed",
        ])
        .unwrap();
        args.apply_to(&mut config);
        assert_eq!(config.data_file, Some(PathBuf::from("new.csv")));
        assert_eq!(config.columns, Some(ColumnMapping::detailed()));

        let mut untouched = AppConfig::default();
        Args::try_parse_from(["sales-dashboard"]).unwrap().apply_to(&mut untouched);
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn rejects_unknown_layout() {
        assert!(Args::try_parse_from(["sales-dashboard", "--layout", "wide"]).is_err());
    }
}
