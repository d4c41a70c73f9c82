//! Back office for a tourism agency.
//!
//! Sellers (vendedores) log in with a session cookie and manage travel
//! packages (pacotes) and their images; administrators also manage sellers.
//!
//! - [`domain`]: entities, merge rules, services and ports.
//! - [`inbound`]: HTTP handlers, session cookie and access control.
//! - [`outbound`]: PostgreSQL and in-memory repositories, session store and
//!   image storage.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
