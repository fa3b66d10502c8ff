//! Uniform success/error response payload (`spec.md` §4.8).
//!
//! Every HTTP and websocket reply is one `Envelope`, carrying the adapter's
//! `meta` map regardless of whether the request succeeded.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RequestError;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Success {
        success: bool,
        data: Value,
        meta: Map<String, Value>,
    },
    Error {
        success: bool,
        error: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        errors: Option<Vec<Value>>,
        meta: Map<String, Value>,
    },
}

impl Envelope {
    pub fn success(data: Value, meta: Map<String, Value>) -> Self {
        Envelope::Success {
            success: true,
            data,
            meta,
        }
    }

    pub fn from_error(err: &RequestError, meta: Map<String, Value>) -> Self {
        let (message, errors) = match err {
            RequestError::Validation(errors) => (None, Some(errors.clone())),
            RequestError::User(msg) | RequestError::Application(msg) => (Some(msg.clone()), None),
            RequestError::Disconnected => (Some("connection lost".to_string()), None),
            RequestError::QueueClosed => (Some("server is shutting down".to_string()), None),
        };
        Envelope::Error {
            success: false,
            error: err.kind(),
            message,
            errors,
            meta,
        }
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Envelope::Success { .. } => StatusCode::OK,
            Envelope::Error { error, .. } => match *error {
                "VALIDATION" => StatusCode::UNPROCESSABLE_ENTITY,
                "USER" => StatusCode::BAD_REQUEST,
                "DISCONNECTED" => StatusCode::NO_CONTENT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl axum::response::IntoResponse for Envelope {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("model".to_string(), Value::String("dummy".to_string()));
        m
    }

    #[test]
    fn success_envelope_has_model_meta() {
        let env = Envelope::success(serde_json::json!({"generated": "hello"}), meta());
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["meta"]["model"], "dummy");
        assert_eq!(value["data"]["generated"], "hello");
    }

    #[test]
    fn disconnected_envelope_is_204() {
        let env = Envelope::from_error(&RequestError::Disconnected, meta());
        assert_eq!(env.status_code(), axum::http::StatusCode::NO_CONTENT);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["error"], "DISCONNECTED");
        assert_eq!(value["message"], "connection lost");
    }

    #[test]
    fn user_error_is_400() {
        let env = Envelope::from_error(&RequestError::User("bad option".into()), meta());
        assert_eq!(env.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn application_error_is_500() {
        let env = Envelope::from_error(&RequestError::Application("boom".into()), meta());
        assert_eq!(env.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_error_is_422_with_errors_array() {
        let err = RequestError::Validation(vec![serde_json::json!({"loc": ["batch"], "msg": "required"})]);
        let env = Envelope::from_error(&err, meta());
        assert_eq!(env.status_code(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["errors"][0]["msg"], "required");
    }
}
