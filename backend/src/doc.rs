//! OpenAPI document for the back office API, served by Swagger UI in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Hospedagem, Pacote, PacoteInput, Passagem, Role};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::pacotes::ImagemForm;
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::vendedores::{VendedorRequest, VendedorResponse};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Agência back office API",
        description = "Session-authenticated management of sellers, travel packages and package images."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::me,
        crate::inbound::http::auth::logout,
        crate::inbound::http::pacotes::list_pacotes,
        crate::inbound::http::pacotes::get_pacote,
        crate::inbound::http::pacotes::create_pacote,
        crate::inbound::http::pacotes::update_pacote,
        crate::inbound::http::pacotes::delete_pacote,
        crate::inbound::http::pacotes::upload_imagem,
        crate::inbound::http::vendedores::list_vendedores,
        crate::inbound::http::vendedores::get_vendedor,
        crate::inbound::http::vendedores::create_vendedor,
        crate::inbound::http::vendedores::update_vendedor,
        crate::inbound::http::vendedores::delete_vendedor,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Pacote,
        PacoteInput,
        Passagem,
        Hospedagem,
        ImagemForm,
        LoginRequest,
        VendedorRequest,
        VendedorResponse,
    )),
    tags(
        (name = "auth", description = "Login and session"),
        (name = "pacotes", description = "Travel packages, ADMIN or VENDEDOR"),
        (name = "vendedores", description = "Seller accounts, ADMIN only"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/login")]
    #[case("/api/auth/me")]
    #[case("/api/logout")]
    #[case("/api/pacotes")]
    #[case("/api/pacotes/{id}")]
    #[case("/api/pacotes/{id}/imagem")]
    #[case("/api/vendedores")]
    #[case("/api/vendedores/{id}")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn registers_the_session_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
        assert!(components.schemas.contains_key("VendedorResponse"));
    }
}
