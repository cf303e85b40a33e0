//! Screenshot resolution.
//!
//! Steps reference their screenshot by an opaque identifier. Turning it
//! into something displayable is the host's business; the player only
//! shows whatever state the resolver reports.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ExerciseError;

/// Placeholder shown when a step has no screenshot.
pub const NO_IMAGE_TEXT: &str = "Aucune image pour cette étape.";
/// Placeholder shown when the screenshot can't be loaded.
pub const IMAGE_UNAVAILABLE_TEXT: &str = "Image non disponible";

/// Opaque screenshot identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the resolver currently knows about a screenshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ImageState {
    /// Resolution in progress.
    Loading,
    /// Displayable URL.
    Ready {
        /// Image URL.
        url: String,
    },
    /// Resolution failed.
    Failed {
        /// Human-readable reason.
        reason: String,
    },
}

impl From<ExerciseError> for ImageState {
    fn from(error: ExerciseError) -> Self {
        Self::Failed {
            reason: error.to_string(),
        }
    }
}

/// Resolves screenshot identifiers.
pub trait ImageResolver {
    /// Current state of `id`.
    fn resolve(&self, id: &ImageId) -> ImageState;
}

/// Resolver backed by a table of storage paths under a public bucket URL.
#[derive(Debug, Clone, Default)]
pub struct StorageImageResolver {
    public_base: String,
    paths: HashMap<ImageId, String>,
}

impl StorageImageResolver {
    /// Create a resolver serving files from `public_base`.
    #[must_use]
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into(),
            paths: HashMap::new(),
        }
    }

    /// Register the storage path of an image.
    pub fn insert(&mut self, id: ImageId, file_path: impl Into<String>) {
        self.paths.insert(id, file_path.into());
    }
}

impl ImageResolver for StorageImageResolver {
    fn resolve(&self, id: &ImageId) -> ImageState {
        match self.paths.get(id) {
            Some(path) => ImageState::Ready {
                url: format!(
                    "{}/{}",
                    self.public_base.trim_end_matches('/'),
                    path.trim_start_matches('/')
                ),
            },
            None => {
                tracing::warn!("No storage path for image {id}");
                ExerciseError::ImageLoad(format!("{IMAGE_UNAVAILABLE_TEXT}: {id}")).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_public_url() {
        let mut resolver = StorageImageResolver::new("https://cdn.example.org/images/");
        resolver.insert(ImageId::new("img-1"), "/steps/settings.png");
        assert_eq!(
            resolver.resolve(&ImageId::new("img-1")),
            ImageState::Ready {
                url: "https://cdn.example.org/images/steps/settings.png".to_string()
            }
        );
    }

    #[test]
    fn unknown_image_fails() {
        let resolver = StorageImageResolver::new("https://cdn.example.org");
        match resolver.resolve(&ImageId::new("missing")) {
            ImageState::Failed { reason } => assert!(reason.contains("Image non disponible")),
            other => panic!("Expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn image_id_is_transparent_in_json() {
        let id: ImageId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(id.as_str(), "abc");
    }
}
