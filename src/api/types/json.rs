//! JSON body extractor that reports rejections in the API error format

use axum::{
    extract::{rejection::JsonRejection as AxumJsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Wrapper around `axum::Json` whose rejections are [`ApiError`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &AxumJsonRejection) -> ApiError {
    let error = match rejection {
        AxumJsonRejection::JsonDataError(err) => {
            ApiError::unprocessable(format!("Invalid JSON data: {}", err.body_text()))
        }
        AxumJsonRejection::JsonSyntaxError(err) => {
            ApiError::unprocessable(format!("Invalid JSON syntax: {}", err.body_text()))
        }
        AxumJsonRejection::MissingJsonContentType(_) => ApiError::new(
            rejection.status(),
            super::error::ApiErrorType::InvalidRequestError,
            "Missing Content-Type header. Expected 'application/json'.",
        ),
        other => ApiError::new(
            other.status(),
            super::error::ApiErrorType::InvalidRequestError,
            other.body_text(),
        ),
    };

    error.with_code("json_parse_error")
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Json(value)
    }
}
