use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

use super::validation::ValidationError;
use crate::store;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error")]
    DbErr(#[from] DbErr),

    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid URL path: {0}")]
    InvalidPath(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) | Error::InvalidPath(_) => StatusCode::NOT_FOUND,
            Error::BadRequest(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::DbErr(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<store::Error> for Error {
    fn from(value: store::Error) -> Self {
        match value {
            store::Error::NotFound(name) => Error::NotFound(name),
            store::Error::Db(e) => Error::DbErr(e),
        }
    }
}

#[derive(Serialize)]
pub struct SerializableError {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Error::DbErr(e) = &self {
            tracing::warn! {error = %e, "Request failed"};
        }
        let err = SerializableError {
            error: self.to_string(),
        };
        (status, Json(err)).into_response()
    }
}
