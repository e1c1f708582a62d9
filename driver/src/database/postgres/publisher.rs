use sqlx::PgConnection;

use kernel::interface::query::PublisherQuery;
use kernel::interface::update::PublisherModifier;
use kernel::prelude::entity::{Publisher, PublisherName};
use kernel::KernelError;

use crate::database::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresPublisherRepository;

#[async_trait::async_trait]
impl PublisherQuery for PostgresPublisherRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_name(
        &self,
        con: &mut PostgresTransaction,
        name: &PublisherName,
    ) -> error_stack::Result<Option<Publisher>, KernelError> {
        PgPublisherInternal::find_by_name(con, name).await
    }
}

#[async_trait::async_trait]
impl PublisherModifier for PostgresPublisherRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        publisher: &Publisher,
    ) -> error_stack::Result<(), KernelError> {
        PgPublisherInternal::create(con, publisher).await
    }
}

#[derive(sqlx::FromRow)]
struct PublisherRow {
    name: String,
}

impl From<PublisherRow> for Publisher {
    fn from(value: PublisherRow) -> Self {
        Publisher::new(PublisherName::new(value.name))
    }
}

pub(in crate::database) struct PgPublisherInternal;

impl PgPublisherInternal {
    async fn find_by_name(
        con: &mut PgConnection,
        name: &PublisherName,
    ) -> error_stack::Result<Option<Publisher>, KernelError> {
        let row = sqlx::query_as::<_, PublisherRow>(
            // language=postgresql
            r#"
            SELECT name
            FROM publishers
            WHERE name = $1
            "#,
        )
        .bind(name.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Publisher::from))
    }

    #[tracing::instrument(skip_all, fields(name = ?publisher.name()))]
    async fn create(
        con: &mut PgConnection,
        publisher: &Publisher,
    ) -> error_stack::Result<(), KernelError> {
        let inserted = sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO publishers (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(publisher.name().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if inserted.rows_affected() == 0 {
            tracing::debug!("publisher already stored");
        }
        Ok(())
    }
}
