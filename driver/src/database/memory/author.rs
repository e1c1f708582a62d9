use kernel::interface::query::AuthorQuery;
use kernel::interface::update::AuthorModifier;
use kernel::prelude::entity::{Author, AuthorName};
use kernel::KernelError;

use crate::database::MemoryTransaction;

pub struct MemoryAuthorRepository;

#[async_trait::async_trait]
impl AuthorQuery for MemoryAuthorRepository {
    type Transaction = MemoryTransaction;
    async fn find_by_name(
        &self,
        con: &mut MemoryTransaction,
        name: &AuthorName,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        Ok(con.author(name))
    }
}

#[async_trait::async_trait]
impl AuthorModifier for MemoryAuthorRepository {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        con.insert_author(author);
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        name: &AuthorName,
    ) -> error_stack::Result<(), KernelError> {
        con.delete_author(name)
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::AuthorQuery;
    use kernel::interface::update::AuthorModifier;
    use kernel::prelude::entity::{Author, AuthorName, BirthDate};
    use kernel::KernelError;

    use crate::database::{MemoryAuthorRepository, MemoryDatabase};

    #[tokio::test]
    async fn create_keeps_existing_author() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let mut con = db.transact().await?;
        let name = AuthorName::new("author");

        let first = Author::new(name.clone(), BirthDate::new(date!(1950 - 05 - 05)));
        MemoryAuthorRepository.create(&mut con, &first).await?;
        let second = Author::new(name.clone(), BirthDate::new(date!(2000 - 01 - 01)));
        MemoryAuthorRepository.create(&mut con, &second).await?;

        let found = MemoryAuthorRepository
            .find_by_name(&mut con, &name)
            .await?
            .expect("author is stored");
        assert_eq!(found.birth_date(), &BirthDate::new(date!(1950 - 05 - 05)));

        MemoryAuthorRepository.delete(&mut con, &name).await?;
        let found = MemoryAuthorRepository.find_by_name(&mut con, &name).await?;
        assert!(found.is_none());
        Ok(())
    }
}
