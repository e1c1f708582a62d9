mod name;

pub use self::name::*;
use std::hash::{Hash, Hasher};
use vodca::References;

#[derive(Debug, Clone, References)]
pub struct Publisher {
    name: PublisherName,
}

impl Publisher {
    pub fn new(name: PublisherName) -> Self {
        Self { name }
    }
}

impl PartialEq for Publisher {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Publisher {}

impl Hash for Publisher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}
