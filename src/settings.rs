use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::analysis::confidence::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MIN_CONFIDENT_KEYPOINTS};

/// User-tunable coaching defaults, persisted as JSON next to the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachSettings {
    pub default_rep_count: u32,
    pub confidence_threshold: f32,
    pub min_confident_keypoints: usize,
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self {
            default_rep_count: 10,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            min_confident_keypoints: DEFAULT_MIN_CONFIDENT_KEYPOINTS,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<CoachSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            CoachSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn get(&self) -> CoachSettings {
        self.data.read().unwrap().clone()
    }

    pub fn update(&self, settings: CoachSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &CoachSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("formcoach-settings-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let store = SettingsStore::new(temp_path()).unwrap();
        let settings = store.get();
        assert_eq!(settings.default_rep_count, 10);
        assert_eq!(settings.confidence_threshold, 0.5);
        assert_eq!(settings.min_confident_keypoints, 10);
    }

    #[test]
    fn updates_round_trip_through_the_file() {
        let path = temp_path();
        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update(CoachSettings {
                default_rep_count: 15,
                confidence_threshold: 0.6,
                min_confident_keypoints: 12,
            })
            .unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        let settings = reopened.get();
        assert_eq!(settings.default_rep_count, 15);
        assert_eq!(settings.confidence_threshold, 0.6);
        assert_eq!(settings.min_confident_keypoints, 12);
    }
}
