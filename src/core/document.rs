use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "en".to_string()
}

/// The complete configuration state, mirrored 1:1 with the persisted JSON
/// file. Every key is optional on read (missing keys backfill with empty
/// defaults) and always present on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub repos: Vec<Repository>,
    #[serde(default)]
    pub urls: Vec<UrlEntry>,
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
    #[serde(rename = "posixPathExtension", default)]
    pub posix_path_extension: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            urls: Vec::new(),
            servers: Vec::new(),
            posix_path_extension: String::new(),
            language: default_language(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub repo_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub repo_path: String,
    #[serde(default)]
    pub has_core: bool,
    #[serde(default)]
    pub core_path: String,
    #[serde(default)]
    pub data_path: String,
    #[serde(default)]
    pub script_path: String,
    #[serde(default)]
    pub should_update: bool,
    #[serde(default)]
    pub should_read: bool,
}

/// Wire codes are fixed: "pic" | "field" | "cover".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    #[default]
    Pic,
    Field,
    Cover,
}

impl UrlKind {
    pub const ALL: [UrlKind; 3] = [UrlKind::Pic, UrlKind::Field, UrlKind::Cover];
    pub const CODES: &'static [&'static str] = &["pic", "field", "cover"];

    pub fn code(self) -> &'static str {
        match self {
            UrlKind::Pic => "pic",
            UrlKind::Field => "field",
            UrlKind::Cover => "cover",
        }
    }

    pub fn index(self) -> usize {
        match self {
            UrlKind::Pic => 0,
            UrlKind::Field => 1,
            UrlKind::Cover => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlEntry {
    #[serde(rename = "type", default)]
    pub kind: UrlKind,
    #[serde(default)]
    pub url: String,
}

/// `duelport` and `roomlistport` are opaque identifiers from the upstream
/// server ecosystem; the names are persisted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub duelport: i64,
    #[serde(default)]
    pub roomaddress: String,
    #[serde(default)]
    pub roomlistprotocol: String,
    #[serde(default)]
    pub roomlistport: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_backfills_every_key() {
        let document: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(document, Document::default());
        assert_eq!(document.language, "en");
        assert!(document.repos.is_empty());
        assert!(document.posix_path_extension.is_empty());
    }

    #[test]
    fn serialized_document_contains_all_top_level_keys() {
        let json = serde_json::to_string_pretty(&Document::default()).unwrap();
        for key in ["repos", "urls", "servers", "posixPathExtension", "language"] {
            assert!(json.contains(key), "missing key {key}");
        }
    }

    #[test]
    fn partial_repository_defaults_missing_fields() {
        let repo: Repository = serde_json::from_str(r#"{"repo_name": "R1"}"#).unwrap();
        assert_eq!(repo.repo_name, "R1");
        assert_eq!(repo.url, "");
        assert!(!repo.has_core);
    }

    #[test]
    fn url_kind_round_trips_lowercase_codes() {
        for kind in UrlKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
            let back: UrlKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn url_entry_kind_serializes_as_type() {
        let entry = UrlEntry {
            kind: UrlKind::Cover,
            url: "http://example.com".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"type\":\"cover\""));
    }
}
