use application::transfer::BookDto;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::controller::Exhaust;
use crate::response::AuthorResponse;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    isbn: String,
    title: String,
    authors: Vec<AuthorResponse>,
    publisher: String,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            isbn: value.isbn,
            title: value.title,
            authors: value
                .authors
                .into_iter()
                .map(AuthorResponse::from)
                .collect(),
            publisher: value.publisher,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<bool> for BookPresenter {
    type To = Json<bool>;
    fn emit(&self, input: bool) -> Self::To {
        Json(input)
    }
}

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        Json::from(result)
    }
}
