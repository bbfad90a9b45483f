// Customer API - REST routes over the customer service
//
// /api/health                   GET
// /api/v1/customers             GET, POST
// /api/v1/customers/:id         GET, PUT, DELETE

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::customer::{Customer, CustomerId, CustomerRequest};
use crate::error::CustomerError;
use crate::service::CustomerService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
}

impl AppState {
    pub fn new(customers: CustomerService) -> Self {
        Self { customers }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Customer failure as an HTTP response
pub struct ApiError(CustomerError);

impl From<CustomerError> for ApiError {
    fn from(value: CustomerError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
            CustomerError::Store(e) => {
                error!("Storage failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "OK" })
}

/// GET /api/v1/customers - All customers
async fn list_customers(State(state): State<AppState>) -> ApiResult<Json<Vec<Customer>>> {
    Ok(Json(state.customers.list()?))
}

/// POST /api/v1/customers - Create, empty body on success
async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CustomerRequest>,
) -> ApiResult<StatusCode> {
    state.customers.create(request)?;
    Ok(StatusCode::OK)
}

/// GET /api/v1/customers/:id
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.customers.get(id)?))
}

/// PUT /api/v1/customers/:id - Overwrite all fields, 404 if unknown
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(request): Json<CustomerRequest>,
) -> ApiResult<StatusCode> {
    state.customers.update(id, request)?;
    Ok(StatusCode::OK)
}

/// DELETE /api/v1/customers/:id - Succeeds whether or not the id exists
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> ApiResult<StatusCode> {
    state.customers.delete(id)?;
    Ok(StatusCode::OK)
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(state: AppState) -> Router {
    let customer_routes = Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .with_state(state);

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .nest("/v1", customer_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
