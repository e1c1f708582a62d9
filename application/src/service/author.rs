use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{AuthorQuery, BookQuery, DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::{
    AuthorModifier, BookModifier, DependOnAuthorModifier, DependOnBookModifier,
};
use kernel::prelude::entity::AuthorName;
use kernel::KernelError;

use crate::service::not_found;
use crate::transfer::AuthorDto;

#[async_trait::async_trait]
pub trait RemoveAuthorService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnAuthorQuery
    + DependOnAuthorModifier
    + DependOnBookQuery
    + DependOnBookModifier
{
    /// Deletes an author after detaching it from every book it wrote.
    ///
    /// A book whose only author was the removed one is deleted as well. All of
    /// it happens in a single transaction.
    #[tracing::instrument(skip(self))]
    async fn remove_author(&self, name: &str) -> error_stack::Result<AuthorDto, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let author_name = AuthorName::new(name);
        let author = self
            .author_query()
            .find_by_name(&mut transaction, &author_name)
            .await?
            .ok_or_else(|| not_found("author", name))?;

        let books = self
            .book_query()
            .find_by_author_name(&mut transaction, &author_name)
            .await?;
        for mut book in books {
            if book.remove_author(&author_name) {
                tracing::debug!(isbn = ?book.isbn(), "deleting book left without authors");
                self.book_modifier()
                    .delete(&mut transaction, book.isbn())
                    .await?;
            } else {
                tracing::debug!(isbn = ?book.isbn(), "detaching author from book");
                self.book_modifier().update(&mut transaction, &book).await?;
            }
        }
        self.author_modifier()
            .delete(&mut transaction, &author_name)
            .await?;

        transaction.commit().await?;
        Ok(AuthorDto::from(author))
    }
}

impl<T> RemoveAuthorService for T where
    T: DependOnDatabaseConnection
        + DependOnAuthorQuery
        + DependOnAuthorModifier
        + DependOnBookQuery
        + DependOnBookModifier
{
}
