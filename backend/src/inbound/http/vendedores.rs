//! Seller management handlers (ADMIN only, enforced by the access policy).
//!
//! ```text
//! GET    /api/vendedores
//! GET    /api/vendedores/{id}
//! POST   /api/vendedores       {"nome":"Ana","email":"ana@agencia.com","senha":"123","role":"VENDEDOR"}
//! PUT    /api/vendedores/{id}  {"nome":"Ana Paula","senha":""}
//! DELETE /api/vendedores/{id}
//! ```
//!
//! Responses never carry the stored credential.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, Error, NewVendedor, Role, Vendedor, VendedorId, VendedorUpdate,
    VendedorValidationError,
};
use crate::inbound::http::state::HttpState;

/// Public view of a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VendedorResponse {
    pub id: VendedorId,
    #[schema(example = "Ana")]
    pub nome: String,
    #[schema(example = "ana@agencia.com")]
    pub email: String,
    pub role: Role,
}

impl From<Vendedor> for VendedorResponse {
    fn from(vendedor: Vendedor) -> Self {
        Self {
            id: vendedor.id,
            nome: vendedor.nome,
            email: vendedor.email,
            role: vendedor.role,
        }
    }
}

/// Seller body for create and update. Any `id` in the body is ignored.
///
/// On create `nome`, `email` and `senha` are required and `role` defaults to
/// `VENDEDOR`. On update absent fields keep their stored values and a blank
/// `senha` keeps the current credential.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct VendedorRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    #[schema(example = "123")]
    pub senha: Option<String>,
    pub role: Option<Role>,
}

impl TryFrom<VendedorRequest> for NewVendedor {
    type Error = VendedorValidationError;

    fn try_from(value: VendedorRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.nome.as_deref(),
            value.email.as_deref(),
            value.senha.as_deref(),
            value.role,
        )
    }
}

impl TryFrom<VendedorRequest> for VendedorUpdate {
    type Error = VendedorValidationError;

    fn try_from(value: VendedorRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.nome.as_deref(),
            value.email.as_deref(),
            value.senha,
            value.role,
        )
    }
}

fn map_validation_error(err: VendedorValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

#[utoipa::path(
    get,
    path = "/api/vendedores",
    responses(
        (status = 200, description = "Sellers", body = [VendedorResponse]),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not an admin", body = Error)
    ),
    tags = ["vendedores"],
    operation_id = "listVendedores"
)]
#[get("/vendedores")]
pub async fn list_vendedores(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<VendedorResponse>>> {
    let vendedores = state.vendedores.list().await?;
    Ok(web::Json(
        vendedores.into_iter().map(VendedorResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/vendedores/{id}",
    params(("id" = i64, Path, description = "Seller id")),
    responses(
        (status = 200, description = "Seller", body = VendedorResponse),
        (status = 404, description = "Unknown seller", body = Error)
    ),
    tags = ["vendedores"],
    operation_id = "getVendedor"
)]
#[get("/vendedores/{id}")]
pub async fn get_vendedor(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<VendedorResponse>> {
    let vendedor = state.vendedores.get(VendedorId::new(id.into_inner())).await?;
    Ok(web::Json(vendedor.into()))
}

#[utoipa::path(
    post,
    path = "/api/vendedores",
    request_body = VendedorRequest,
    responses(
        (status = 201, description = "Seller created", body = VendedorResponse),
        (status = 400, description = "Missing nome, email or senha", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["vendedores"],
    operation_id = "createVendedor"
)]
#[post("/vendedores")]
pub async fn create_vendedor(
    state: web::Data<HttpState>,
    payload: web::Json<VendedorRequest>,
) -> ApiResult<HttpResponse> {
    let new_vendedor = NewVendedor::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let vendedor = state.vendedores.create(new_vendedor).await?;
    Ok(HttpResponse::Created().json(VendedorResponse::from(vendedor)))
}

#[utoipa::path(
    put,
    path = "/api/vendedores/{id}",
    params(("id" = i64, Path, description = "Seller id")),
    request_body = VendedorRequest,
    responses(
        (status = 200, description = "Seller updated", body = VendedorResponse),
        (status = 400, description = "Blank nome or email", body = Error),
        (status = 404, description = "Unknown seller", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["vendedores"],
    operation_id = "updateVendedor"
)]
#[put("/vendedores/{id}")]
pub async fn update_vendedor(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: web::Json<VendedorRequest>,
) -> ApiResult<web::Json<VendedorResponse>> {
    let update = VendedorUpdate::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let vendedor = state
        .vendedores
        .update(VendedorId::new(id.into_inner()), update)
        .await?;
    Ok(web::Json(vendedor.into()))
}

#[utoipa::path(
    delete,
    path = "/api/vendedores/{id}",
    params(("id" = i64, Path, description = "Seller id")),
    responses((status = 204, description = "Seller removed (or never existed)")),
    tags = ["vendedores"],
    operation_id = "deleteVendedor"
)]
#[delete("/vendedores/{id}")]
pub async fn delete_vendedor(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .vendedores
        .delete(VendedorId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockLoginService, MockPacoteService, MockSessionStore, MockVendedorService,
    };
    use crate::domain::{ErrorCode, StoredCredential};
    use crate::inbound::http::error::json_config;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    fn ana() -> Vendedor {
        Vendedor {
            id: VendedorId::new(2),
            nome: "Ana".to_owned(),
            email: "ana@agencia.com".to_owned(),
            senha: StoredCredential::normalize("123"),
            role: Role::Vendedor,
        }
    }

    fn state(vendedores: MockVendedorService) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(MockLoginService::new()),
            Arc::new(MockPacoteService::new()),
            Arc::new(vendedores),
            Arc::new(MockSessionStore::new()),
        ))
    }

    #[actix_web::test]
    async fn responses_omit_the_credential() {
        let mut vendedores = MockVendedorService::new();
        vendedores.expect_list().returning(|| Ok(vec![ana()]));
        let app = test::init_service(
            App::new()
                .app_data(state(vendedores))
                .service(web::scope("/api").service(list_vendedores)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/vendedores").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!([{ "id": 2, "nome": "Ana", "email": "ana@agencia.com", "role": "VENDEDOR" }])
        );
    }

    #[actix_web::test]
    async fn create_normalises_and_defaults_before_calling_the_service() {
        let mut vendedores = MockVendedorService::new();
        vendedores
            .expect_create()
            .withf(|new| new.role == Role::Vendedor && new.senha.as_str() == "{noop}123")
            .times(1)
            .returning(|new| Ok(new.with_id(VendedorId::new(5))));
        let app = test::init_service(
            App::new()
                .app_data(state(vendedores))
                .app_data(json_config())
                .service(web::scope("/api").service(create_vendedor)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/vendedores")
                .set_json(json!({ "id": 99, "nome": "Bia", "email": "bia@agencia.com", "senha": "123" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: VendedorResponse = test::read_body_json(res).await;
        assert_eq!(body.id, VendedorId::new(5));
        assert_eq!(body.role, Role::Vendedor);
    }

    #[rstest]
    #[case(json!({ "email": "bia@agencia.com", "senha": "1" }), "nome", "empty_nome")]
    #[case(json!({ "nome": "Bia", "senha": "1" }), "email", "empty_email")]
    #[case(json!({ "nome": "Bia", "email": "bia@agencia.com", "senha": "  " }), "senha", "empty_senha")]
    #[actix_web::test]
    async fn create_rejects_incomplete_bodies(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = test::init_service(
            App::new()
                .app_data(state(MockVendedorService::new()))
                .service(web::scope("/api").service(create_vendedor)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/vendedores")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({ "field": field, "code": code })));
    }

    #[actix_web::test]
    async fn update_forwards_only_present_fields() {
        let mut vendedores = MockVendedorService::new();
        vendedores
            .expect_update()
            .withf(|id, update| {
                *id == VendedorId::new(2)
                    && update.nome.as_deref() == Some("Ana Paula")
                    && update.email.is_none()
                    && update.role.is_none()
            })
            .returning(|_, update| {
                let mut vendedor = ana();
                update.apply_to(&mut vendedor);
                Ok(vendedor)
            });
        let app = test::init_service(
            App::new()
                .app_data(state(vendedores))
                .service(web::scope("/api").service(update_vendedor)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/vendedores/2")
                .set_json(json!({ "nome": "Ana Paula", "senha": "" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: VendedorResponse = test::read_body_json(res).await;
        assert_eq!(body.nome, "Ana Paula");
    }

    #[rstest]
    #[case(json!({ "email": "" }), "email")]
    #[case(json!({ "nome": "  ", "email": "ana@agencia.com" }), "nome")]
    #[actix_web::test]
    async fn update_rejects_blank_nome_or_email(#[case] body: Value, #[case] field: &str) {
        let mut vendedores = MockVendedorService::new();
        vendedores.expect_update().never();
        let app = test::init_service(
            App::new()
                .app_data(state(vendedores))
                .service(web::scope("/api").service(update_vendedor)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/vendedores/2")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!(field)));
    }

    #[actix_web::test]
    async fn missing_sellers_are_not_found() {
        let mut vendedores = MockVendedorService::new();
        vendedores
            .expect_get()
            .returning(|id| Err(Error::not_found(format!("vendedor {id} não encontrado"))));
        let app = test::init_service(
            App::new()
                .app_data(state(vendedores))
                .service(web::scope("/api").service(get_vendedor)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/vendedores/404").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_answers_no_content() {
        let mut vendedores = MockVendedorService::new();
        vendedores.expect_delete().times(1).returning(|_| Ok(()));
        let app = test::init_service(
            App::new()
                .app_data(state(vendedores))
                .service(web::scope("/api").service(delete_vendedor)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete().uri("/api/vendedores/2").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
