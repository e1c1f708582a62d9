use application::transfer::{AuthorDto, CreateBookDto, UpdateBookDto};
use serde::Deserialize;

use crate::controller::Intake;
use crate::request::AuthorRequest;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    isbn: String,
    title: String,
    authors: Vec<AuthorRequest>,
    publisher: String,
}

#[derive(Debug)]
pub struct GetBookRequest {
    isbn: String,
}

impl GetBookRequest {
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}

#[derive(Debug)]
pub struct UpdateBookTitleRequest {
    isbn: String,
    title: String,
}

impl UpdateBookTitleRequest {
    pub fn new(isbn: String, title: String) -> Self {
        Self { isbn, title }
    }
}

#[derive(Debug)]
pub struct GetBooksByAuthorRequest {
    author: String,
}

impl GetBooksByAuthorRequest {
    pub fn new(author: String) -> Self {
        Self { author }
    }
}

#[derive(Debug)]
pub struct GetBooksByPublisherRequest {
    publisher: String,
}

impl GetBooksByPublisherRequest {
    pub fn new(publisher: String) -> Self {
        Self { publisher }
    }
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            isbn: input.isbn,
            title: input.title,
            publisher: input.publisher,
            authors: input.authors.into_iter().map(AuthorDto::from).collect(),
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = String;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        input.isbn
    }
}

impl Intake<UpdateBookTitleRequest> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: UpdateBookTitleRequest) -> Self::To {
        UpdateBookDto {
            isbn: input.isbn,
            title: input.title,
        }
    }
}

impl Intake<GetBooksByAuthorRequest> for BookTransformer {
    type To = String;
    fn emit(&self, input: GetBooksByAuthorRequest) -> Self::To {
        input.author
    }
}

impl Intake<GetBooksByPublisherRequest> for BookTransformer {
    type To = String;
    fn emit(&self, input: GetBooksByPublisherRequest) -> Self::To {
        input.publisher
    }
}
