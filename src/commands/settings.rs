use std::path::Path;

use crate::error::HistoryError;
use crate::models::{HistorySettings, UpdateSettingsInput};

/// Settings from `path`, or defaults when no path is given or the file does not exist.
pub fn get_settings(path: Option<&Path>) -> Result<HistorySettings, HistoryError> {
    match path {
        Some(path) if path.exists() => HistorySettings::load(path),
        Some(path) => {
            log::warn!("Settings file {:?} not found, using defaults", path);
            Ok(HistorySettings::default())
        }
        None => Ok(HistorySettings::default()),
    }
}

pub fn update_settings(
    current: &HistorySettings,
    settings: UpdateSettingsInput,
) -> Result<HistorySettings, HistoryError> {
    let mut updated = current.clone();
    updated.apply(settings)?;
    Ok(updated)
}
