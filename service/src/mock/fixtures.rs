//! Static JSON fixtures backing the mock resource server.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::catalog::Resource;

/// Fixture loading errors. Both are fatal at startup.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {resource} fixture at {}: {source}", path.display())]
    Read {
        resource: Resource,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{resource} fixture at {} is not valid JSON: {source}", path.display())]
    Parse {
        resource: Resource,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One JSON document per catalog resource, read once and never mutated.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    documents: [Value; 8],
}

impl FixtureSet {
    /// Read `<dir>/<resource>.json` for every resource in the catalog.
    ///
    /// # Errors
    /// Returns the first file that is missing, unreadable, or not JSON.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let dir = dir.as_ref();
        let mut documents: [Value; 8] = Default::default();

        for resource in Resource::ALL {
            let path = dir.join(resource.fixture_file());
            let bytes = std::fs::read(&path).map_err(|source| FixtureError::Read {
                resource,
                path: path.clone(),
                source,
            })?;
            let document = serde_json::from_slice(&bytes).map_err(|source| FixtureError::Parse {
                resource,
                path: path.clone(),
                source,
            })?;
            tracing::debug!(%resource, path = %path.display(), "loaded fixture");
            documents[resource.index()] = document;
        }

        Ok(Self { documents })
    }

    /// Build a fixture set in memory, e.g. for tests.
    pub fn from_fn(f: impl FnMut(Resource) -> Value) -> Self {
        Self {
            documents: Resource::ALL.map(f),
        }
    }

    #[must_use]
    pub fn get(&self, resource: Resource) -> &Value {
        &self.documents[resource.index()]
    }
}
