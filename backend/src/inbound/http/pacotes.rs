//! Package management handlers (ADMIN or VENDEDOR).
//!
//! ```text
//! GET    /api/pacotes
//! GET    /api/pacotes/{id}
//! POST   /api/pacotes              {"titulo":"Rio","precoBase":1000}
//! PUT    /api/pacotes/{id}         {"titulo":"Rio Beach","passagem":{"companhia":"LATAM"}}
//! DELETE /api/pacotes/{id}
//! POST   /api/pacotes/{id}/imagem  multipart, field "file"
//! ```

use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, post, put, web};
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error, Pacote, PacoteId, PacoteInput};
use crate::inbound::http::multipart::read_image_upload;
use crate::inbound::http::state::HttpState;

/// Multipart form accepted by the image upload.
#[derive(ToSchema)]
pub struct ImagemForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[utoipa::path(
    get,
    path = "/api/pacotes",
    responses(
        (status = 200, description = "All packages", body = [Pacote]),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["pacotes"],
    operation_id = "listPacotes"
)]
#[get("/pacotes")]
pub async fn list_pacotes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Pacote>>> {
    Ok(web::Json(state.pacotes.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/pacotes/{id}",
    params(("id" = i64, Path, description = "Package id")),
    responses(
        (status = 200, description = "Package", body = Pacote),
        (status = 404, description = "Unknown package", body = Error)
    ),
    tags = ["pacotes"],
    operation_id = "getPacote"
)]
#[get("/pacotes/{id}")]
pub async fn get_pacote(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<Pacote>> {
    let pacote = state.pacotes.get(PacoteId::new(id.into_inner())).await?;
    Ok(web::Json(pacote))
}

#[utoipa::path(
    post,
    path = "/api/pacotes",
    request_body = PacoteInput,
    responses((status = 201, description = "Package created", body = Pacote)),
    tags = ["pacotes"],
    operation_id = "createPacote"
)]
#[post("/pacotes")]
pub async fn create_pacote(
    state: web::Data<HttpState>,
    payload: web::Json<PacoteInput>,
) -> ApiResult<HttpResponse> {
    let pacote = state.pacotes.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(pacote))
}

#[utoipa::path(
    put,
    path = "/api/pacotes/{id}",
    params(("id" = i64, Path, description = "Package id")),
    request_body = PacoteInput,
    responses(
        (status = 200, description = "Merged package", body = Pacote),
        (status = 404, description = "Unknown package", body = Error)
    ),
    tags = ["pacotes"],
    operation_id = "updatePacote"
)]
#[put("/pacotes/{id}")]
pub async fn update_pacote(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: web::Json<PacoteInput>,
) -> ApiResult<web::Json<Pacote>> {
    let pacote = state
        .pacotes
        .update(PacoteId::new(id.into_inner()), payload.into_inner())
        .await?;
    Ok(web::Json(pacote))
}

#[utoipa::path(
    delete,
    path = "/api/pacotes/{id}",
    params(("id" = i64, Path, description = "Package id")),
    responses((status = 204, description = "Package removed (or never existed)")),
    tags = ["pacotes"],
    operation_id = "deletePacote"
)]
#[delete("/pacotes/{id}")]
pub async fn delete_pacote(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.pacotes.delete(PacoteId::new(id.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Store an image for the package and point `imagemUrl` at it.
///
/// The previous image file, if any, is left on disk.
#[utoipa::path(
    post,
    path = "/api/pacotes/{id}/imagem",
    params(("id" = i64, Path, description = "Package id")),
    request_body(content = ImagemForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Package with the new image URL", body = Pacote),
        (status = 400, description = "Empty or missing file", body = Error),
        (status = 404, description = "Unknown package", body = Error),
        (status = 413, description = "File above the upload limit", body = Error),
        (status = 415, description = "Declared type is not image/*", body = Error)
    ),
    tags = ["pacotes"],
    operation_id = "uploadPacoteImagem"
)]
#[post("/pacotes/{id}/imagem")]
pub async fn upload_imagem(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: Multipart,
) -> ApiResult<web::Json<Pacote>> {
    let upload = read_image_upload(payload, state.max_upload_bytes).await?;
    let pacote = state
        .pacotes
        .attach_image(PacoteId::new(id.into_inner()), upload)
        .await?;
    Ok(web::Json(pacote))
}
