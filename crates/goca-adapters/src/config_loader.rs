//! YAML implementation of the `ConfigLoader` port.

use std::fs;
use std::path::{Path, PathBuf};

use goca_core::{
    application::{
        ApplicationError,
        ports::{ConfigLoader, LoadedDocument},
    },
    domain::{config::CONFIG_FILE_NAMES, config::ConfigDocument},
    error::{Context, GocaResult},
};
use tracing::{debug, instrument};

/// Reads `.goca.yaml` (and its alternate spellings) from a project directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlConfigLoader;

impl YamlConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse document text. Blank or comment-only input is an empty document.
    pub fn parse_str(content: &str, path: &Path) -> GocaResult<ConfigDocument> {
        let parse_error = |e: serde_yaml::Error| ApplicationError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        if content.trim().is_empty() {
            return Ok(ConfigDocument::default());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
        if value.is_null() {
            return Ok(ConfigDocument::default());
        }
        Ok(serde_yaml::from_value(value).map_err(parse_error)?)
    }

    fn read(path: &Path) -> GocaResult<LoadedDocument> {
        let content = fs::read_to_string(path).map_err(|e| ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let document = Self::parse_str(&content, path)?;
        debug!(path = %path.display(), "configuration document parsed");
        Ok(LoadedDocument {
            path: path.to_path_buf(),
            document,
        })
    }
}

impl ConfigLoader for YamlConfigLoader {
    fn discover(&self, dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    #[instrument(skip(self))]
    fn load(&self, dir: &Path) -> GocaResult<Option<LoadedDocument>> {
        match self.discover(dir) {
            Some(path) => Self::read(&path).map(Some),
            None => {
                debug!("no configuration document found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    fn load_file(&self, path: &Path) -> GocaResult<LoadedDocument> {
        if !path.is_file() {
            return Err(ApplicationError::ConfigNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Self::read(path)
    }

    fn serialize(&self, document: &ConfigDocument) -> GocaResult<String> {
        let mut tree = serde_yaml::to_value(document).context("serializing configuration")?;
        prune_unset(&mut tree);
        serde_yaml::to_string(&tree).context("serializing configuration")
    }
}

/// Drop `null` entries so unset fields stay absent from the file.
fn prune_unset(value: &mut serde_yaml::Value) {
    if let serde_yaml::Value::Mapping(map) = value {
        map.retain(|_, v| !v.is_null());
        for (_, v) in map.iter_mut() {
            prune_unset(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use goca_core::{domain::DefaultResolver, error::GocaError};
    use tempfile::tempdir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_document_is_none() {
        let dir = tempdir().unwrap();
        assert!(YamlConfigLoader.load(dir.path()).unwrap().is_none());
        assert!(YamlConfigLoader.discover(dir.path()).is_none());
    }

    #[test]
    fn discovery_order() {
        let dir = tempdir().unwrap();
        write(dir.path(), "goca.yml", "project:\n  name: c\n");
        assert_eq!(
            YamlConfigLoader.discover(dir.path()),
            Some(dir.path().join("goca.yml"))
        );

        write(dir.path(), ".goca.yml", "project:\n  name: b\n");
        write(dir.path(), ".goca.yaml", "project:\n  name: a\n");
        let loaded = YamlConfigLoader.load(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.path, dir.path().join(".goca.yaml"));
        let project = loaded.document.project.unwrap();
        assert_eq!(project.name.as_deref(), Some("a"));
    }

    #[test]
    fn blank_and_comment_only_documents_are_empty() {
        for content in ["", "   \n\t\n", "# nothing here\n"] {
            let doc = YamlConfigLoader::parse_str(content, Path::new(".goca.yaml")).unwrap();
            assert_eq!(doc, ConfigDocument::default());
        }
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let dir = tempdir().unwrap();
        write(dir.path(), ".goca.yaml", "project: [unclosed\n");
        let err = YamlConfigLoader.load(dir.path()).unwrap_err();
        match err {
            GocaError::Application(ApplicationError::ConfigParse { path, .. }) => {
                assert_eq!(path, dir.path().join(".goca.yaml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        for content in ["- a\n- b\n", "database:\n  port: not-a-number\n"] {
            let err = YamlConfigLoader::parse_str(content, Path::new("x.yaml")).unwrap_err();
            assert!(matches!(
                err,
                GocaError::Application(ApplicationError::ConfigParse { .. })
            ));
        }
    }

    #[test]
    fn partial_document_leaves_gaps() {
        let doc = YamlConfigLoader::parse_str(
            "database:\n  type: mongodb\ntesting:\n  coverage:\n    threshold: 150\n",
            Path::new(".goca.yaml"),
        )
        .unwrap();
        let database = doc.database.unwrap();
        assert_eq!(database.kind.as_deref(), Some("mongodb"));
        assert_eq!(database.port, None);
        assert!(doc.project.is_none());
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = YamlConfigLoader
            .load_file(&dir.path().join("custom.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            GocaError::Application(ApplicationError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = DefaultResolver::static_defaults(&ConfigDocument::default());
        let document = ConfigDocument::from_config(&config, []).unwrap();
        let yaml = YamlConfigLoader.serialize(&document).unwrap();
        assert!(yaml.contains("database:"));

        let doc = YamlConfigLoader::parse_str(&yaml, Path::new(".goca.yaml")).unwrap();
        assert_eq!(DefaultResolver::static_defaults(&doc), config);
    }

    #[test]
    fn unset_fields_are_not_written() {
        let config = DefaultResolver::static_defaults(&ConfigDocument::default());
        let document = ConfigDocument::from_config(&config, ["database.port"]).unwrap();
        let yaml = YamlConfigLoader.serialize(&document).unwrap();
        assert!(!yaml.contains("port:"));
        assert!(!yaml.contains("null"));

        let doc = YamlConfigLoader::parse_str(&yaml, Path::new(".goca.yaml")).unwrap();
        assert!(!doc.sets_database_port());
    }
}
