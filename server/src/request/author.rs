use application::transfer::AuthorDto;
use serde::Deserialize;
use time::Date;

use crate::controller::Intake;
use crate::iso_date;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    name: String,
    #[serde(with = "iso_date")]
    birth_date: Date,
}

impl From<AuthorRequest> for AuthorDto {
    fn from(value: AuthorRequest) -> Self {
        AuthorDto {
            name: value.name,
            birth_date: value.birth_date,
        }
    }
}

#[derive(Debug)]
pub struct AuthorNameRequest {
    name: String,
}

impl AuthorNameRequest {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

#[derive(Debug)]
pub struct GetBookAuthorsRequest {
    isbn: String,
}

impl GetBookAuthorsRequest {
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}

pub struct AuthorTransformer;

impl Intake<AuthorNameRequest> for AuthorTransformer {
    type To = String;
    fn emit(&self, input: AuthorNameRequest) -> Self::To {
        input.name
    }
}

impl Intake<GetBookAuthorsRequest> for AuthorTransformer {
    type To = String;
    fn emit(&self, input: GetBookAuthorsRequest) -> Self::To {
        input.isbn
    }
}
