//! Route table for the `/api` scope.
//!
//! ```text
//! POST   /api/login                 Open
//! POST   /api/logout                Open
//! GET    /api/auth/me               Authenticated
//! GET    /api/pacotes               ADMIN | VENDEDOR
//! GET    /api/pacotes/{id}          ADMIN | VENDEDOR
//! POST   /api/pacotes               ADMIN | VENDEDOR
//! PUT    /api/pacotes/{id}          ADMIN | VENDEDOR
//! DELETE /api/pacotes/{id}          ADMIN | VENDEDOR
//! POST   /api/pacotes/{id}/imagem   ADMIN | VENDEDOR
//! GET    /api/vendedores            ADMIN
//! GET    /api/vendedores/{id}       ADMIN
//! POST   /api/vendedores            ADMIN
//! PUT    /api/vendedores/{id}       ADMIN
//! DELETE /api/vendedores/{id}       ADMIN
//! ```
//!
//! Access rules live in [`AccessPolicy`](super::authorization::AccessPolicy);
//! this module only maps paths to handlers.

use actix_web::web;

use super::auth::{login, logout, me};
use super::error::{json_config, path_config};
use super::pacotes::{
    create_pacote, delete_pacote, get_pacote, list_pacotes, update_pacote, upload_imagem,
};
use super::vendedores::{
    create_vendedor, delete_vendedor, get_vendedor, list_vendedores, update_vendedor,
};

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api";

/// Register the `/api` scope with its extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use agencia::inbound::http::routes::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .app_data(json_config())
            .app_data(path_config())
            .service(login)
            .service(logout)
            .service(me)
            .service(list_pacotes)
            .service(create_pacote)
            .service(get_pacote)
            .service(update_pacote)
            .service(delete_pacote)
            .service(upload_imagem)
            .service(list_vendedores)
            .service(create_vendedor)
            .service(get_vendedor)
            .service(update_vendedor)
            .service(delete_vendedor),
    );
}
