use application::transfer::AuthorDto;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::Date;

use crate::controller::Exhaust;
use crate::iso_date;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    name: String,
    #[serde(with = "iso_date")]
    birth_date: Date,
}

impl From<AuthorDto> for AuthorResponse {
    fn from(value: AuthorDto) -> Self {
        Self {
            name: value.name,
            birth_date: value.birth_date,
        }
    }
}

impl IntoResponse for AuthorResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

pub struct AuthorPresenter;

impl Exhaust<AuthorDto> for AuthorPresenter {
    type To = AuthorResponse;
    fn emit(&self, input: AuthorDto) -> Self::To {
        AuthorResponse::from(input)
    }
}

impl Exhaust<Vec<AuthorDto>> for AuthorPresenter {
    type To = Json<Vec<AuthorResponse>>;
    fn emit(&self, input: Vec<AuthorDto>) -> Self::To {
        Json(input.into_iter().map(AuthorResponse::from).collect())
    }
}

pub struct PublisherPresenter;

impl Exhaust<Vec<String>> for PublisherPresenter {
    type To = Json<Vec<String>>;
    fn emit(&self, input: Vec<String>) -> Self::To {
        Json(input)
    }
}
