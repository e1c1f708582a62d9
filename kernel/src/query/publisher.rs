use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Publisher, PublisherName};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PublisherQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_name(
        &self,
        con: &mut Self::Transaction,
        name: &PublisherName,
    ) -> error_stack::Result<Option<Publisher>, KernelError>;
}

pub trait DependOnPublisherQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type PublisherQuery: PublisherQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn publisher_query(&self) -> &Self::PublisherQuery;
}
