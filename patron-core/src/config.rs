use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PatronError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub min_results: usize,
    pub max_results: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_results: 5,
            max_results: 15,
        }
    }
}

/// Seuils (en %) qui transforment les taux historiques en prédictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub pacha_percent: f64,
    pub repetition_percent: f64,
    /// Utilisé uniquement par le choix sur la diagonale.
    pub group_a_percent: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pacha_percent: 40.0,
            repetition_percent: 30.0,
            group_a_percent: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub frequency: f64,
    pub delay: f64,
    pub pacha: f64,
    pub repetition: f64,
    pub position: f64,
    pub group: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            frequency: 5.0,
            delay: 10.0,
            pacha: 30.0,
            repetition: 25.0,
            position: 15.0,
            group: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Nombre de tirages récents utilisés pour les statistiques.
    pub window: usize,
    /// En dessous, aucune analyse n'est produite.
    pub min_history: usize,
    pub backtest_window: usize,
    pub extraction: ExtractionConfig,
    pub thresholds: Thresholds,
    pub weights: ScoringWeights,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: 15,
            min_history: 5,
            backtest_window: 15,
            extraction: ExtractionConfig::default(),
            thresholds: Thresholds::default(),
            weights: ScoringWeights::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_history < 2 {
            return Err(PatronError::Config(format!(
                "min_history doit valoir au moins 2 (reçu {})",
                self.min_history
            )));
        }
        if self.window < self.min_history {
            return Err(PatronError::Config(format!(
                "window ({}) doit être >= min_history ({})",
                self.window, self.min_history
            )));
        }
        if self.backtest_window == 0 {
            return Err(PatronError::Config("backtest_window doit être > 0".into()));
        }
        let ex = &self.extraction;
        if ex.min_results == 0 || ex.min_results > ex.max_results {
            return Err(PatronError::Config(format!(
                "extraction : 0 < min_results ({}) <= max_results ({}) attendu",
                ex.min_results, ex.max_results
            )));
        }
        Ok(())
    }
}

pub fn save_config(config: &AnalysisConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let json = std::fs::read_to_string(path)?;
    let config: AnalysisConfig = serde_json::from_str(&json)?;
    config.validate()?;
    Ok(config)
}
