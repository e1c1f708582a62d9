use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{AuthorName, Book, Isbn, PublisherName};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_isbn(
        &self,
        con: &mut Self::Transaction,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    async fn exists(
        &self,
        con: &mut Self::Transaction,
        isbn: &Isbn,
    ) -> error_stack::Result<bool, KernelError>;
    async fn find_by_author_name(
        &self,
        con: &mut Self::Transaction,
        name: &AuthorName,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_publisher_name(
        &self,
        con: &mut Self::Transaction,
        name: &PublisherName,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
