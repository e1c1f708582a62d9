use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Author, AuthorName};
use crate::KernelError;

#[async_trait::async_trait]
pub trait AuthorQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_name(
        &self,
        con: &mut Self::Transaction,
        name: &AuthorName,
    ) -> error_stack::Result<Option<Author>, KernelError>;
}

pub trait DependOnAuthorQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type AuthorQuery: AuthorQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn author_query(&self) -> &Self::AuthorQuery;
}
