//! Mock resource provider.
//!
//! Serves the static fixtures with a faking overlay so the frontend can be
//! developed without the real backend. Fixtures are read once at startup;
//! every response is a fresh overlaid copy.
//!
//! The random source is injectable: a configured seed makes the overlay
//! output reproducible.

mod fixtures;
mod overlay;
pub mod server;

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{Map, Value};

use crate::catalog::Resource;
use crate::config::MockConfig;

pub use fixtures::{FixtureError, FixtureSet};
pub use overlay::{Generator, Overlay, OverlayError, OverlayRule};

/// One overlaid value per resource, keyed by resource name.
pub type AggregateMockResponse = Map<String, Value>;

/// Errors raised while building a provider from configuration.
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

/// Fixture set plus overlay template.
pub struct MockProvider {
    fixtures: FixtureSet,
    overlay: Overlay,
    rng: Mutex<StdRng>,
}

impl MockProvider {
    /// Create a provider. `seed` of `None` draws a fresh seed from the OS.
    #[must_use]
    pub fn new(fixtures: FixtureSet, overlay: Overlay, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            fixtures,
            overlay,
            rng: Mutex::new(rng),
        }
    }

    /// Load fixtures from `config.fixtures_dir` and validate `config.overlays`.
    ///
    /// # Errors
    /// Returns an error if any fixture fails to load or any overlay rule is invalid.
    pub fn from_config(config: &MockConfig) -> Result<Self, MockError> {
        let fixtures = FixtureSet::load_dir(Path::new(&config.fixtures_dir))?;
        let overlay = Overlay::new(config.overlays.clone())?;
        tracing::info!(
            fixtures_dir = %config.fixtures_dir,
            overlay_rules = overlay.rules().len(),
            seeded = config.seed.is_some(),
            "mock provider ready"
        );
        Ok(Self::new(fixtures, overlay, config.seed))
    }

    /// Overlaid copy of a single resource.
    pub fn build_resource(&self, resource: Resource) -> Value {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.overlaid(resource, &mut rng)
    }

    /// All eight resources under their fixed keys.
    pub fn build_mock_response(&self) -> AggregateMockResponse {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Resource::ALL
            .into_iter()
            .map(|resource| {
                (
                    resource.name().to_string(),
                    self.overlaid(resource, &mut rng),
                )
            })
            .collect()
    }

    fn overlaid(&self, resource: Resource, rng: &mut StdRng) -> Value {
        let mut document = self.fixtures.get(resource).clone();
        self.overlay.apply(resource, &mut document, rng);
        document
    }
}
