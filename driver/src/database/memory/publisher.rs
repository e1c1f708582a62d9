use kernel::interface::query::PublisherQuery;
use kernel::interface::update::PublisherModifier;
use kernel::prelude::entity::{Publisher, PublisherName};
use kernel::KernelError;

use crate::database::MemoryTransaction;

pub struct MemoryPublisherRepository;

#[async_trait::async_trait]
impl PublisherQuery for MemoryPublisherRepository {
    type Transaction = MemoryTransaction;
    async fn find_by_name(
        &self,
        con: &mut MemoryTransaction,
        name: &PublisherName,
    ) -> error_stack::Result<Option<Publisher>, KernelError> {
        Ok(con.publisher(name))
    }
}

#[async_trait::async_trait]
impl PublisherModifier for MemoryPublisherRepository {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        publisher: &Publisher,
    ) -> error_stack::Result<(), KernelError> {
        con.insert_publisher(publisher);
        Ok(())
    }
}
