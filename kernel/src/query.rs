mod author;
mod book;
mod publisher;

pub use self::{author::*, book::*, publisher::*};
