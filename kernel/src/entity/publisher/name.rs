use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct PublisherName(String);

impl PublisherName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
