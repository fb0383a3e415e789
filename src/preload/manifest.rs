use crate::foundation::error::{StageError, StageResult};

/// The fixed, ordered list of media assets preloaded behind the splash
/// screen. Sources are relative paths resolved by the hosting environment;
/// the engine never fetches them itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssetManifest {
    pub sources: Vec<String>,
}

impl AssetManifest {
    pub fn new(sources: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn validate(&self) -> StageResult<()> {
        for source in &self.sources {
            validate_rel_source(source, "manifest source")?;
        }
        Ok(())
    }
}

fn validate_rel_source(source: &str, field: &str) -> StageResult<()> {
    if source.trim().is_empty() {
        return Err(StageError::validation(format!("{field} must be non-empty")));
    }
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(StageError::validation(format!(
            "{field} must be a relative path"
        )));
    }
    for part in s.split('/') {
        if part == ".." {
            return Err(StageError::validation(format!(
                "{field} must not contain '..'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_sources_pass() {
        AssetManifest::new(["images/haircut.webp", "images/beard.webp"])
            .validate()
            .unwrap();
    }

    #[test]
    fn absolute_and_parent_paths_are_rejected() {
        assert!(AssetManifest::new(["/etc/passwd"]).validate().is_err());
        assert!(AssetManifest::new(["../escape.webp"]).validate().is_err());
        assert!(AssetManifest::new([""]).validate().is_err());
    }

    #[test]
    fn empty_manifest_is_valid() {
        AssetManifest::default().validate().unwrap();
    }
}
