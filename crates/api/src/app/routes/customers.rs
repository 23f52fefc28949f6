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

use backoffice_core::convert::convert;
use backoffice_core::{CustomerId, ServiceError};
use backoffice_parties::{CreateCustomerRequest, CustomerDto};

use crate::app::dto::{FullNameParams, PageParams};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_customers_paged).post(create_customer))
        .route("/all", get(list_customers))
        .route("/search", get(search_customers))
        .route("/national-id/:national_id", get(get_customer_by_national_id))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<CustomerId, ApiError> {
    let Path(raw) = path?;
    Ok(raw.parse()?)
}

pub async fn list_customers_paged(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let (page, page_size) = params.resolve(&services.config);
    Ok(Json(services.customers.list_page(page, page_size)?))
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(services.customers.list_all()?))
}

pub async fn search_customers(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<FullNameParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let found = services
        .customers
        .find_by_full_name(&params.first_name, &params.last_name)?;
    Ok(Json(found))
}

pub async fn get_customer_by_national_id(
    Extension(services): Extension<Arc<AppServices>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(national_id) = path?;
    Ok(Json(services.customers.find_by_national_id(&national_id)?))
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(path)?;
    Ok(Json(services.customers.find_by_id(id)?))
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let candidate: CustomerDto = convert(body).map_err(ServiceError::from)?;
    let created = services.customers.create(candidate)?;
    let location = format!("/customers/{}", created.id.unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<CustomerDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(path)?;
    let Json(mut candidate) = body?;
    candidate.id = Some(id);
    Ok(Json(services.customers.edit(candidate)?))
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(path)?;
    services.customers.delete(id)?;
    Ok((StatusCode::OK, "Customer deleted successfully."))
}
