//! HTTP inbound adapter: handlers, session cookie and access control.

pub mod assets;
pub mod auth;
pub mod authorization;
pub mod error;
pub mod health;
pub mod multipart;
pub mod pacotes;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod vendedores;

pub use crate::domain::ApiResult;
