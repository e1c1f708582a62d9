mod birth_date;
mod name;

pub use self::{birth_date::*, name::*};
use destructure::Destructure;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use vodca::References;

/// An author, identified by name alone.
#[derive(Debug, Clone, References, Destructure)]
pub struct Author {
    name: AuthorName,
    birth_date: BirthDate,
}

impl Author {
    pub fn new(name: AuthorName, birth_date: BirthDate) -> Self {
        Self { name, birth_date }
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}

impl PartialOrd for Author {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Author {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
