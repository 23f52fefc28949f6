use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use backoffice_core::DocumentId;
use backoffice_parties::{CreateDocumentRequest, DocumentLookup};

use crate::app::dto::PageParams;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_documents_paged).post(create_document))
        .route("/all", get(list_documents))
        .route("/search", get(search_documents))
        .route("/:id", get(get_document).delete(delete_document))
}

fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<DocumentId, ApiError> {
    let Path(raw) = path?;
    Ok(raw.parse()?)
}

pub async fn list_documents_paged(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let (page, page_size) = params.resolve(&services.config);
    Ok(Json(services.documents.list_page(page, page_size)?))
}

pub async fn list_documents(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(services.documents.list_all()?))
}

pub async fn search_documents(
    Extension(services): Extension<Arc<AppServices>>,
    lookup: Result<Query<DocumentLookup>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(lookup) = lookup?;
    Ok(Json(services.documents.find_by_type_and_number(&lookup)?))
}

pub async fn get_document(
    Extension(services): Extension<Arc<AppServices>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(path)?;
    Ok(Json(services.documents.find_by_id(id)?))
}

pub async fn create_document(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let created = services.documents.create(body)?;
    let location = format!("/documents/{}", created.id.unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

pub async fn delete_document(
    Extension(services): Extension<Arc<AppServices>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(path)?;
    services.documents.delete(id)?;
    Ok((StatusCode::OK, "Document deleted successfully."))
}
