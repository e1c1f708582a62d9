use kernel::prelude::entity::{Book, DestructBook};

use crate::transfer::AuthorDto;

/// Flattened view of a book: the publisher is carried by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub authors: Vec<AuthorDto>,
    pub publisher: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            isbn,
            title,
            authors,
            publisher,
        } = value.into_destruct();
        Self {
            isbn: isbn.into(),
            title: title.into(),
            authors: authors.into_iter().map(AuthorDto::from).collect(),
            publisher: publisher.name().clone().into(),
        }
    }
}

pub struct CreateBookDto {
    pub isbn: String,
    pub title: String,
    pub publisher: String,
    pub authors: Vec<AuthorDto>,
}

pub struct UpdateBookDto {
    pub isbn: String,
    pub title: String,
}
