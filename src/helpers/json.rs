use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::fmt;

/// Envelope of every API response: `{success, message, data?}`.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub struct JsonResponseBuilder<T> {
    data: Option<T>,
}

impl<T> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize,
{
    pub fn set_item(mut self, item: T) -> Self {
        self.data = Some(item);
        self
    }

    fn finish(self, message: &str) -> JsonResponse<T> {
        JsonResponse {
            success: true,
            message: message.to_string(),
            data: self.data,
        }
    }

    pub fn ok(self, message: &str) -> web::Json<JsonResponse<T>> {
        web::Json(self.finish(message))
    }

    pub fn created(self, message: &str) -> HttpResponse {
        HttpResponse::Created().json(self.finish(message))
    }
}

impl<T> JsonResponse<T> {
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }

    pub fn error(message: &str) -> Self {
        let message = if message.trim().is_empty() {
            "Error".to_string()
        } else {
            message.to_string()
        };

        Self {
            success: false,
            message,
            data: None,
        }
    }
}

impl<T> fmt::Display for JsonResponse<T>
where
    T: Serialize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_carries_data() {
        let response = JsonResponse::build().set_item(vec!["BOOKS"]).ok("Categories retrieved successfully");
        let value = serde_json::to_value(&response.0).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "success": true,
                "message": "Categories retrieved successfully",
                "data": ["BOOKS"]
            })
        );
    }

    #[test]
    fn error_envelope_has_no_data() {
        let text = JsonResponse::<()>::error("Product not found").to_string();
        assert_eq!(text, r#"{"success":false,"message":"Product not found"}"#);

        let blank = JsonResponse::<()>::error(" ");
        assert_eq!(blank.message, "Error");
    }
}
