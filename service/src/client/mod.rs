//! Resource fetch client.
//!
//! All map data is retrieved through one configured [`ClientFacade`]. The
//! [`ResourceApi`] trait exposes one zero-argument operation per catalog
//! resource on top of it.
//!
//! # Architecture
//!
//! - [`ClientFacade`] - Base address plus the 200-or-reject unwrap rule
//! - [`ResourceApi`] - Trait with `get_metro`, `get_bus`, `get_route1..3`, `get_landmark1..3`
//! - [`mock::MockResourceApi`] - Recording mock for unit tests (behind `test-utils` feature)
//!
//! # Example
//!
//! ```ignore
//! use routeviz_api::client::{ClientFacade, ResourceApi};
//!
//! let client = ClientFacade::new("http://localhost:8080");
//! let stations = client.get_metro().await?;
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! Use `MockHttpServer` to test `ClientFacade` against stubbed HTTP:
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//! server
//!     .expect_get("/dibiao1")
//!     .respond_with_json(json!({"type": "FeatureCollection", "features": []}))
//!     .mount()
//!     .await;
//!
//! let client = ClientFacade::new(server.url());
//! let landmarks = client.get_landmark1().await.unwrap();
//! ```

mod api;
mod facade;

pub use api::{fetch_all, ResourceApi};
pub use facade::{ClientError, ClientFacade};

#[cfg(any(test, feature = "test-utils"))]
pub use api::mock;
