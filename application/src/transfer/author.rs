use time::Date;

use kernel::prelude::entity::{Author, AuthorName, BirthDate, DestructAuthor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDto {
    pub name: String,
    pub birth_date: Date,
}

impl From<Author> for AuthorDto {
    fn from(value: Author) -> Self {
        let DestructAuthor { name, birth_date } = value.into_destruct();
        Self {
            name: name.into(),
            birth_date: birth_date.into(),
        }
    }
}

impl From<AuthorDto> for Author {
    fn from(value: AuthorDto) -> Self {
        Author::new(
            AuthorName::new(value.name),
            BirthDate::new(value.birth_date),
        )
    }
}
