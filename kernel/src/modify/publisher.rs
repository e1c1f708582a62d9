use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Publisher;
use crate::KernelError;

#[async_trait::async_trait]
pub trait PublisherModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Inserts the publisher unless one with the same name is already stored.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        publisher: &Publisher,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnPublisherModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type PublisherModifier: PublisherModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn publisher_modifier(&self) -> &Self::PublisherModifier;
}
