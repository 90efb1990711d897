use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for a generation run, stored as JSON.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    #[serde(default = "default_version")]
    version: u32,

    /// Figgerits to build per run.
    #[serde(default = "default_count")]
    pub count: usize,

    /// Riddles drawn from the pool for each attempt.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// The attempt budget is `count * attempts_per_figgerit`.
    #[serde(default = "default_attempts_per_figgerit")]
    pub attempts_per_figgerit: usize,

    /// Seed for pool sampling; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_version() -> u32 {
    2
}
fn default_count() -> usize {
    6
}
fn default_sample_size() -> usize {
    2000
}
fn default_attempts_per_figgerit() -> usize {
    1000
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            version: default_version(),
            count: default_count(),
            sample_size: default_sample_size(),
            attempts_per_figgerit: default_attempts_per_figgerit(),
            seed: None,
        }
    }
}

impl GeneratorSettings {
    /// Reads settings from `path`, falling back to defaults when the file is
    /// missing or unreadable. `SEED` in the environment overrides the seed.
    pub fn load(path: &Path) -> Self {
        let mut settings = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<GeneratorSettings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    settings
                }
                Err(e) => {
                    warn!(
                        target: "settings",
                        "Ignoring unreadable settings at {}: {}",
                        path.display(),
                        e
                    );
                    GeneratorSettings::default()
                }
            },
            Err(_) => GeneratorSettings::default(),
        };
        if let Some(seed) = Self::seed_from_env() {
            settings.seed = Some(seed);
        }
        settings
    }

    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    fn migrate(&mut self) {
        match self.version {
            // version 1 had no per-figgerit attempt budget
            0 | 1 => {
                self.attempts_per_figgerit = default_attempts_per_figgerit();
                self.version = 2;
            }
            _ => (),
        }
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_missing_file_gives_defaults() {
        std::env::remove_var("SEED");
        let dir = tempfile::tempdir().unwrap();
        let settings = GeneratorSettings::load(&dir.path().join("settings.json"));
        assert_eq!(settings, GeneratorSettings::default());
        assert_eq!(settings.count, 6);
        assert_eq!(settings.sample_size, 2000);
        assert_eq!(settings.attempts_per_figgerit, 1000);
    }

    #[test]
    #[serial]
    fn test_partial_file_fills_defaults() {
        std::env::remove_var("SEED");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"version": 2, "count": 3, "seed": 11}"#).unwrap();

        let settings = GeneratorSettings::load(&path);
        assert_eq!(settings.count, 3);
        assert_eq!(settings.seed, Some(11));
        assert_eq!(settings.sample_size, 2000);
    }

    #[test]
    #[serial]
    fn test_old_version_is_migrated() {
        std::env::remove_var("SEED");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"version": 1, "attempts_per_figgerit": 0}"#).unwrap();

        let settings = GeneratorSettings::load(&path);
        assert_eq!(settings.version(), 2);
        assert_eq!(settings.attempts_per_figgerit, 1000);
    }

    #[test]
    #[serial]
    fn test_seed_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = GeneratorSettings {
            seed: Some(1),
            ..Default::default()
        };
        settings.save(&path).unwrap();

        std::env::set_var("SEED", "99");
        let loaded = GeneratorSettings::load(&path);
        std::env::remove_var("SEED");
        assert_eq!(loaded.seed, Some(99));
    }

    #[test]
    #[serial]
    fn test_garbage_file_gives_defaults() {
        std::env::remove_var("SEED");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(GeneratorSettings::load(&path), GeneratorSettings::default());
    }
}
