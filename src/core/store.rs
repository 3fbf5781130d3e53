use std::fs;
use std::path::{Path, PathBuf};

use log::{error, warn};

use crate::config::config::{CONFIG_DIR, CONFIG_FILE};
use crate::core::document::Document;
use crate::error::AppError;

/// Owns the in-memory [`Document`] and the file it is persisted to.
///
/// The store is an explicit handle threaded through the UI; there is no
/// global state. Every mutation goes through `document_mut` followed by an
/// explicit `save`, which rewrites the whole file.
pub struct ConfigStore {
    document: Document,
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            document: Document::default(),
            config_path: base_dir.join(CONFIG_DIR).join(CONFIG_FILE),
        }
    }

    /// Loads the document from disk. A missing file silently becomes the
    /// default document (persisted right away); a read or parse failure
    /// also falls back to the default but returns the error so the caller
    /// can notify the user.
    pub fn load(&mut self) -> Result<(), AppError> {
        if !self.config_path.exists() {
            return self.create_default();
        }

        let parsed = fs::read_to_string(&self.config_path)
            .map_err(AppError::from)
            .and_then(|text| serde_json::from_str(&text).map_err(AppError::from));

        match parsed {
            Ok(document) => {
                self.document = document;
                Ok(())
            }
            Err(err) => {
                warn!(
                    "no se pudo leer {}: {}",
                    self.config_path.display(),
                    err
                );
                let _ = self.create_default();
                Err(err)
            }
        }
    }

    /// Resets to the minimal valid document and persists it immediately.
    pub fn create_default(&mut self) -> Result<(), AppError> {
        self.document = Document::default();
        self.save()
    }

    /// Serializes the full document to disk, creating parent directories as
    /// needed. On failure the in-memory state is retained; the caller may
    /// simply save again.
    pub fn save(&self) -> Result<(), AppError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.document)?;
        fs::write(&self.config_path, text).map_err(|err| {
            error!(
                "no se pudo escribir {}: {}",
                self.config_path.display(),
                err
            );
            AppError::from(err)
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::{Repository, ServerEntry};
    use tempfile::tempdir;

    fn server(name: &str) -> ServerEntry {
        ServerEntry {
            name: name.to_string(),
            address: "127.0.0.1".to_string(),
            duelport: 7911,
            roomaddress: "127.0.0.1".to_string(),
            roomlistprotocol: "http".to_string(),
            roomlistport: 7922,
        }
    }

    #[test]
    fn missing_file_creates_and_persists_default() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::new(dir.path());
        store.load().unwrap();

        assert_eq!(*store.document(), Document::default());
        assert!(store.config_path().exists());

        let text = fs::read_to_string(store.config_path()).unwrap();
        let on_disk: Document = serde_json::from_str(&text).unwrap();
        assert_eq!(on_disk, Document::default());
    }

    #[test]
    fn well_formed_file_loads_field_for_field() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join(CONFIG_FILE),
            r#"{
                "repos": [{"repo_name": "R1", "url": "u", "has_core": true}],
                "urls": [{"type": "cover", "url": "http://x"}],
                "servers": [],
                "posixPathExtension": "/opt/bin",
                "language": "es"
            }"#,
        )
        .unwrap();

        let mut store = ConfigStore::new(dir.path());
        store.load().unwrap();

        let document = store.document();
        assert_eq!(document.language, "es");
        assert_eq!(document.posix_path_extension, "/opt/bin");
        assert_eq!(document.repos.len(), 1);
        assert_eq!(document.repos[0].repo_name, "R1");
        assert!(document.repos[0].has_core);
        assert_eq!(document.urls[0].url, "http://x");
    }

    #[test]
    fn malformed_file_falls_back_to_default_with_error() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), "{ not json").unwrap();

        let mut store = ConfigStore::new(dir.path());
        assert!(store.load().is_err());
        assert_eq!(*store.document(), Document::default());
    }

    #[test]
    fn add_save_reload_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::new(dir.path());
        store.load().unwrap();

        store.document_mut().repos.push(Repository {
            repo_name: "R1".to_string(),
            url: "u".to_string(),
            has_core: true,
            ..Repository::default()
        });
        store.save().unwrap();

        let mut reloaded = ConfigStore::new(dir.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.document().repos.len(), 1);
        assert_eq!(reloaded.document().repos[0].repo_name, "R1");
        assert!(reloaded.document().repos[0].has_core);
    }

    #[test]
    fn edit_replaces_in_place() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::new(dir.path());
        store.load().unwrap();

        store.document_mut().servers.push(server("A"));
        store.document_mut().servers.push(server("B"));
        store.document_mut().servers[1] = server("C");
        store.save().unwrap();

        let servers = &store.document().servers;
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].name, "A");
        assert_eq!(servers[1].name, "C");
    }

    #[test]
    fn delete_removes_by_position() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::new(dir.path());
        store.load().unwrap();

        for name in ["A", "B", "C"] {
            store.document_mut().servers.push(server(name));
        }
        store.document_mut().servers.remove(1);
        store.save().unwrap();

        let servers = &store.document().servers;
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].name, "A");
        assert_eq!(servers[1].name, "C");
    }
}
