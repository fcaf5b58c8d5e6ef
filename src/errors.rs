use crate::helpers::JsonResponse;
use crate::store::StoreError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
const INTERNAL_ERROR: &str = "Internal server error";

/// Handler-level errors, rendered as `{success: false, message}`.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Store failure. The detail is logged, never sent to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn product_not_found() -> Self {
        Self::NotFound(PRODUCT_NOT_FOUND.to_string())
    }

    fn client_message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) => msg,
            Self::Internal(_) => INTERNAL_ERROR,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store failure: {:?}", err);
        Self::Internal(err.to_string())
    }
}

impl ResponseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(JsonResponse::<()>::error(self.client_message()))
    }
}
