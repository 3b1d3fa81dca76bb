//! Resource fetch operations, one per catalog entry.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};

use super::facade::{ClientError, ClientFacade};
use crate::catalog::Resource;

/// Fetch operations for the eight map resources.
///
/// Each named operation is a pure delegation to [`ResourceApi::get`]: the
/// returned JSON is neither transformed nor validated, and errors are passed
/// through unchanged. Use [`ClientFacade`] for real HTTP calls, or
/// `mock::MockResourceApi` in tests.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Issue a single GET for `resource`.
    async fn get(&self, resource: Resource) -> Result<Value, ClientError>;

    async fn get_metro(&self) -> Result<Value, ClientError> {
        self.get(Resource::Metro).await
    }

    async fn get_bus(&self) -> Result<Value, ClientError> {
        self.get(Resource::Bus).await
    }

    async fn get_route1(&self) -> Result<Value, ClientError> {
        self.get(Resource::Route1).await
    }

    async fn get_route2(&self) -> Result<Value, ClientError> {
        self.get(Resource::Route2).await
    }

    async fn get_route3(&self) -> Result<Value, ClientError> {
        self.get(Resource::Route3).await
    }

    async fn get_landmark1(&self) -> Result<Value, ClientError> {
        self.get(Resource::Landmark1).await
    }

    async fn get_landmark2(&self) -> Result<Value, ClientError> {
        self.get(Resource::Landmark2).await
    }

    async fn get_landmark3(&self) -> Result<Value, ClientError> {
        self.get(Resource::Landmark3).await
    }
}

#[async_trait]
impl ResourceApi for ClientFacade {
    async fn get(&self, resource: Resource) -> Result<Value, ClientError> {
        self.request(resource.path(), Method::GET).await
    }
}

/// Fetch every resource concurrently and key the results by resource name.
///
/// Fetches are independent and may complete in any order; the first failure
/// is returned as-is.
///
/// # Errors
/// Returns the first [`ClientError`] produced by any fetch.
pub async fn fetch_all(api: &dyn ResourceApi) -> Result<Map<String, Value>, ClientError> {
    let (metro, bus, route1, route2, route3, landmark1, landmark2, landmark3) = tokio::try_join!(
        api.get_metro(),
        api.get_bus(),
        api.get_route1(),
        api.get_route2(),
        api.get_route3(),
        api.get_landmark1(),
        api.get_landmark2(),
        api.get_landmark3(),
    )?;

    let values = [
        metro, bus, route1, route2, route3, landmark1, landmark2, landmark3,
    ];
    Ok(Resource::ALL
        .into_iter()
        .zip(values)
        .map(|(resource, value)| (resource.name().to_string(), value))
        .collect())
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{ClientError, Resource, ResourceApi, Value};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock implementation of `ResourceApi` for unit tests.
    ///
    /// Configure responses with `set_result` and verify calls with `calls()`.
    /// A resource without a configured result answers with a 404 `Status` error.
    pub struct MockResourceApi {
        results: Mutex<HashMap<Resource, Result<Value, ClientError>>>,
        calls: Mutex<Vec<Resource>>,
    }

    impl MockResourceApi {
        pub fn new() -> Self {
            Self {
                results: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result returned by the next fetch of `resource`.
        pub fn set_result(&self, resource: Resource, result: Result<Value, ClientError>) {
            self.results.lock().unwrap().insert(resource, result);
        }

        /// All resources fetched so far, in call order.
        pub fn calls(&self) -> Vec<Resource> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockResourceApi {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ResourceApi for MockResourceApi {
        async fn get(&self, resource: Resource) -> Result<Value, ClientError> {
            self.calls.lock().unwrap().push(resource);

            self.results
                .lock()
                .unwrap()
                .remove(&resource)
                .unwrap_or(Err(ClientError::Status {
                    status: 404,
                    body: Value::Null,
                }))
        }
    }
}
