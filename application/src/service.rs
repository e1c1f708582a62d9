mod author;
mod book;

pub use self::{author::*, book::*};

use error_stack::Report;
use kernel::KernelError;

pub(crate) fn not_found(kind: &str, key: &str) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("{kind} `{key}` does not exist"))
}

pub(crate) fn invalid(reason: &'static str) -> Report<KernelError> {
    Report::new(KernelError::Validation).attach_printable(reason)
}
