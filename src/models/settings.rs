use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::HistoryError;
use crate::models::TimeframeFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub currency_symbol: String,
    /// Win rate above which the summary is shown as strong.
    pub strong_win_rate: f64,
    pub csv_delimiter: char,
    pub default_timeframe: TimeframeFilter,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            strong_win_rate: 0.7,
            csv_delimiter: ',',
            default_timeframe: TimeframeFilter::All,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsInput {
    pub currency_symbol: Option<String>,
    pub strong_win_rate: Option<f64>,
    pub csv_delimiter: Option<char>,
    pub default_timeframe: Option<TimeframeFilter>,
}

impl HistorySettings {
    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        let settings: HistorySettings =
            serde_json::from_str(json).map_err(|e| HistoryError::SettingsError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&content)?;
        log::info!("Loaded history settings from {:?}", path);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.currency_symbol.is_empty() {
            return Err(HistoryError::SettingsError("currency symbol is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.strong_win_rate) {
            return Err(HistoryError::SettingsError(format!(
                "strong win rate {} outside [0, 1]",
                self.strong_win_rate
            )));
        }
        if !self.csv_delimiter.is_ascii() {
            return Err(HistoryError::SettingsError(format!(
                "CSV delimiter {:?} must be a single ASCII character",
                self.csv_delimiter
            )));
        }
        Ok(())
    }

    /// Applies only the provided fields and re-validates. On error `self` is unchanged.
    pub fn apply(&mut self, update: UpdateSettingsInput) -> Result<(), HistoryError> {
        let mut next = self.clone();

        if let Some(val) = update.currency_symbol {
            next.currency_symbol = val;
        }
        if let Some(val) = update.strong_win_rate {
            next.strong_win_rate = val;
        }
        if let Some(val) = update.csv_delimiter {
            next.csv_delimiter = val;
        }
        if let Some(val) = update.default_timeframe {
            next.default_timeframe = val;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn csv_delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.csv_delimiter as u8
    }

    pub fn format_currency(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}
