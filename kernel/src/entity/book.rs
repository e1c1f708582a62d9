mod isbn;
mod title;

pub use self::{isbn::*, title::*};
use crate::entity::{Author, AuthorName, Publisher};
use destructure::{Destructure, Mutation};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use vodca::References;

/// A catalog book.
///
/// Two books are the same book when their isbn matches, whatever the rest of
/// their state looks like.
#[derive(Debug, Clone, References, Destructure, Mutation)]
pub struct Book {
    isbn: Isbn,
    title: BookTitle,
    authors: BTreeSet<Author>,
    publisher: Publisher,
}

impl Book {
    pub fn new(
        isbn: Isbn,
        title: BookTitle,
        authors: impl IntoIterator<Item = Author>,
        publisher: Publisher,
    ) -> Self {
        Self {
            isbn,
            title,
            authors: authors.into_iter().collect(),
            publisher,
        }
    }

    /// Drops `name` from the author set and reports whether the book is left
    /// without any author.
    pub fn remove_author(&mut self, name: &AuthorName) -> bool {
        self.authors.retain(|author| author.name() != name);
        self.authors.is_empty()
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state)
    }
}
