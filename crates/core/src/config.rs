//! Per-metric import configuration.
//!
//! The three imports (reach, likes, followers) run the same pipeline; only
//! the raw sheet name, the two section markers and the destination column
//! differ. Built-in values match the labels Meta Business Suite puts in its
//! Portuguese exports and can be overridden from a YAML file.

use crate::error::{InsightsError, InsightsResult};
use metainsights_sheet::parse_column;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Metric imported into the tracking sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Reach,
    Likes,
    Followers,
}

impl Metric {
    /// Portuguese name of the metric as shown in dialogs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::Reach => "Alcance",
            Metric::Likes => "Visitas e Curtidas",
            Metric::Followers => "Novos seguidores",
        }
    }

    fn dialog_label(self) -> &'static str {
        match self {
            Metric::Reach => "Alcance",
            Metric::Likes => "Visitas",
            Metric::Followers => "Novos seguidores",
        }
    }

    /// Built-in configuration for this metric.
    #[must_use]
    pub fn default_config(self) -> MetricConfig {
        let (source_sheet, facebook_marker, instagram_marker, dest_column) = match self {
            Metric::Reach => ("Alcance", "Alcance no Facebook", "Alcance do Instagram", "D"),
            Metric::Likes => (
                "Visitas",
                "Visitas ao Facebook",
                "Visitas ao perfil do Instagram",
                "E",
            ),
            Metric::Followers => ("Seguidores", "Seguidores", "Seguidos no Instagram", "F"),
        };
        MetricConfig {
            metric: self,
            source_sheet: source_sheet.to_string(),
            facebook_marker: facebook_marker.to_string(),
            instagram_marker: instagram_marker.to_string(),
            dest_column: dest_column.to_string(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Reach => "reach",
            Metric::Likes => "likes",
            Metric::Followers => "followers",
        };
        f.write_str(name)
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reach" | "alcance" => Ok(Metric::Reach),
            "likes" | "visits" | "curtidas" | "visitas" => Ok(Metric::Likes),
            "followers" | "seguidores" => Ok(Metric::Followers),
            other => Err(format!(
                "unknown metric '{other}', expected 'reach', 'likes' or 'followers'"
            )),
        }
    }
}

/// Where one metric's data lives in the raw export and in the tracking sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricConfig {
    pub metric: Metric,
    /// Raw import sheet the CSV export is pasted into.
    pub source_sheet: String,
    /// Marker of the upper (Facebook) section in column A.
    pub facebook_marker: String,
    /// Marker of the lower (Instagram) section in column A.
    pub instagram_marker: String,
    /// Destination column letter in the tracking sheets.
    pub dest_column: String,
}

impl MetricConfig {
    /// 0-based destination column index.
    pub fn dest_column_index(&self) -> InsightsResult<usize> {
        parse_column(&self.dest_column).map_err(|_| {
            InsightsError::Config(format!(
                "invalid destination column '{}' for {}",
                self.dest_column, self.metric
            ))
        })
    }

    /// Title of the confirmation dialog.
    #[must_use]
    pub fn dialog_title(&self) -> String {
        format!("Importar {}", self.metric.dialog_label())
    }

    /// Instructions shown in the confirmation dialog.
    #[must_use]
    pub fn dialog_message(&self) -> String {
        format!(
            "Faça o upload do arquivo CSV das métricas de {} e nomeie a nova guia como \"{}\". \
             Apenas após seguir esse passo, inicie a importação.",
            self.metric.label(),
            self.source_sheet
        )
    }

    /// Alert shown when the raw sheet is not in the workbook.
    #[must_use]
    pub fn missing_source_message(&self) -> String {
        format!(
            "Não foi encontrada a planilha \"{}\". Tente novamente após criar a planilha.",
            self.source_sheet
        )
    }
}

/// Partial override of a metric's configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricOverride {
    pub source_sheet: Option<String>,
    pub facebook_marker: Option<String>,
    pub instagram_marker: Option<String>,
    pub dest_column: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    reach: Option<MetricOverride>,
    likes: Option<MetricOverride>,
    followers: Option<MetricOverride>,
}

/// Configuration of all three imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    reach: MetricConfig,
    likes: MetricConfig,
    followers: MetricConfig,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            reach: Metric::Reach.default_config(),
            likes: Metric::Likes.default_config(),
            followers: Metric::Followers.default_config(),
        }
    }
}

impl ImportConfig {
    /// Configuration for one metric.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> &MetricConfig {
        match metric {
            Metric::Reach => &self.reach,
            Metric::Likes => &self.likes,
            Metric::Followers => &self.followers,
        }
    }

    fn metric_mut(&mut self, metric: Metric) -> &mut MetricConfig {
        match metric {
            Metric::Reach => &mut self.reach,
            Metric::Likes => &mut self.likes,
            Metric::Followers => &mut self.followers,
        }
    }

    /// Apply an override to one metric.
    pub fn apply(&mut self, metric: Metric, patch: MetricOverride) -> InsightsResult<()> {
        let config = self.metric_mut(metric);
        if let Some(v) = patch.source_sheet {
            config.source_sheet = v;
        }
        if let Some(v) = patch.facebook_marker {
            config.facebook_marker = v;
        }
        if let Some(v) = patch.instagram_marker {
            config.instagram_marker = v;
        }
        if let Some(v) = patch.dest_column {
            config.dest_column = v;
        }
        config.dest_column_index()?;
        Ok(())
    }

    /// Built-in configuration with the overrides found in a YAML document.
    pub fn from_yaml_str(content: &str) -> InsightsResult<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let mut config = ImportConfig::default();
        for (metric, patch) in [
            (Metric::Reach, file.reach),
            (Metric::Likes, file.likes),
            (Metric::Followers, file.followers),
        ] {
            if let Some(patch) = patch {
                config.apply(metric, patch)?;
            }
        }
        Ok(config)
    }

    /// Load overrides from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> InsightsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            InsightsError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }
}
