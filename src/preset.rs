//! Named parameter presets kept in a key-value store.
//!
//! All presets live as one JSON array under [`PRESET_NAMESPACE`]. Saving a
//! name that already exists replaces it (last write wins).

use crate::error::{BendError, Result};
use crate::params::DrawingParameters;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key under which the preset list is stored.
pub const PRESET_NAMESPACE: &str = "bendscape-presets";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetData {
    pub name: String,
    pub parameters: DrawingParameters,
    /// Milliseconds since the Unix epoch at save time.
    pub timestamp: i64,
}

/// Minimal string key-value storage backing a [`PresetStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store holding one `<key>.json` file per key.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Preset operations over any [`KeyValueStore`].
pub struct PresetStore<S> {
    store: S,
}

impl<S: KeyValueStore> PresetStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Every stored preset in save order. An empty store yields an empty list;
    /// unreadable data is an error.
    pub fn load_all(&self) -> Result<Vec<PresetData>> {
        match self.store.get(PRESET_NAMESPACE)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn load(&self, name: &str) -> Result<Option<PresetData>> {
        Ok(self.load_all()?.into_iter().find(|p| p.name == name))
    }

    /// Like [`load`](Self::load) but a missing preset is an error.
    pub fn require(&self, name: &str) -> Result<PresetData> {
        self.load(name)?
            .ok_or_else(|| BendError::PresetNotFound(name.to_string()))
    }

    /// Validates and stores `parameters` under `name`, replacing any preset
    /// with the same name.
    pub fn save(&mut self, name: &str, parameters: &DrawingParameters) -> Result<PresetData> {
        parameters.validate()?;

        let preset = PresetData {
            name: name.to_string(),
            parameters: parameters.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let mut presets = self.load_all()?;
        presets.retain(|p| p.name != name);
        presets.push(preset.clone());
        self.write_all(&presets)?;

        debug!(preset = name, count = presets.len(), "preset saved");
        Ok(preset)
    }

    /// Removes `name`. Returns whether a preset was actually removed.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        let mut presets = self.load_all()?;
        let before = presets.len();
        presets.retain(|p| p.name != name);
        let removed = presets.len() != before;
        self.write_all(&presets)?;

        debug!(preset = name, removed, "preset deleted");
        Ok(removed)
    }

    fn write_all(&mut self, presets: &[PresetData]) -> Result<()> {
        let raw = serde_json::to_string(presets)?;
        self.store.set(PRESET_NAMESPACE, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::StoppingKind;

    #[test]
    fn empty_store_has_no_presets() {
        let store = PresetStore::new(MemoryStore::new());
        assert!(store.load_all().unwrap().is_empty());
        assert!(store.load("anything").unwrap().is_none());
        assert!(matches!(
            store.require("anything"),
            Err(BendError::PresetNotFound(name)) if name == "anything"
        ));
    }

    #[test]
    fn save_is_last_write_wins() {
        let mut store = PresetStore::new(MemoryStore::new());
        let first = DrawingParameters {
            max_lines: 10,
            ..Default::default()
        };
        let second = DrawingParameters {
            max_lines: 20,
            ..Default::default()
        };

        store.save("star", &first).unwrap();
        store.save("square", &DrawingParameters::default()).unwrap();
        store.save("star", &second).unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "square");
        assert_eq!(all[1].name, "star");
        assert_eq!(all[1].parameters.max_lines, 20);
    }

    #[test]
    fn save_rejects_invalid_parameters() {
        let mut store = PresetStore::new(MemoryStore::new());
        let params = DrawingParameters {
            canvas_height: -1.0,
            ..Default::default()
        };
        assert!(store.save("bad", &params).is_err());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_only_the_named_preset() {
        let mut store = PresetStore::new(MemoryStore::new());
        store.save("a", &DrawingParameters::default()).unwrap();
        store.save("b", &DrawingParameters::default()).unwrap();

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());

        let names: Vec<_> = store.load_all().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["b"]);
    }

    #[test]
    fn corrupt_data_surfaces_an_error() {
        let mut backing = MemoryStore::new();
        backing.set(PRESET_NAMESPACE, "{not json").unwrap();
        let store = PresetStore::new(backing);
        assert!(matches!(store.load_all(), Err(BendError::Json(_))));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("presets");

        let params = DrawingParameters {
            stopping_condition: StoppingKind::Exact,
            ..Default::default()
        };
        PresetStore::new(FileStore::new(&root))
            .save("loop", &params)
            .unwrap();

        let reopened = PresetStore::new(FileStore::new(&root));
        let preset = reopened.require("loop").unwrap();
        assert_eq!(preset.parameters, params);
        assert!(root.join("bendscape-presets.json").exists());
    }
}
