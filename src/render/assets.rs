//! Build manifest lookups for templates.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::InertiaError;

/// Logical asset path → served path, as written by the bundler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    entries: BTreeMap<String, String>,
}

impl AssetManifest {
    /// Read a `{"/logical": "/served"}` manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InertiaError> {
        let path = path.as_ref();
        let manifest_err = |message: String| InertiaError::Manifest {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| manifest_err(e.to_string()))?;
        let raw: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|e| manifest_err(e.to_string()))?;

        Ok(Self::from_entries(raw))
    }

    /// Build from raw entries; keys are normalized to start with "/".
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (normalize(k.as_ref()), v.into()))
                .collect(),
        }
    }

    /// Served path for `path`, or the logical path when the manifest has no entry.
    pub fn resolve(&self, path: &str) -> String {
        let key = normalize(path);
        match self.entries.get(&key) {
            Some(served) => served.clone(),
            None => key,
        }
    }

    /// `<script type="module">` tag for the resolved asset.
    pub fn script_tag(&self, path: &str) -> String {
        format!(r#"<script type="module" src="{}"></script>"#, self.resolve(path))
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve() {
        let manifest = AssetManifest::from_entries([("js/app.js", "/build/app-3f2a.js")]);

        assert_eq!(manifest.resolve("/js/app.js"), "/build/app-3f2a.js");
        assert_eq!(manifest.resolve("js/app.js"), "/build/app-3f2a.js");
        assert_eq!(manifest.resolve("css/app.css"), "/css/app.css");
        assert_eq!(
            manifest.script_tag("js/app.js"),
            r#"<script type="module" src="/build/app-3f2a.js"></script>"#
        );
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"/js/app.js": "/js/app.123.js"}}"#).unwrap();

        let manifest = AssetManifest::load(file.path()).unwrap();
        assert_eq!(manifest.resolve("js/app.js"), "/js/app.123.js");
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            AssetManifest::load("/missing/manifest.json"),
            Err(InertiaError::Manifest { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(AssetManifest::load(file.path()).is_err());
    }
}
