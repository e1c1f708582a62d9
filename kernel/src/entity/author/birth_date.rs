use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct BirthDate(Date);

impl BirthDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}
