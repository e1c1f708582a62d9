use sqlx::PgConnection;
use time::Date;

use kernel::interface::query::AuthorQuery;
use kernel::interface::update::AuthorModifier;
use kernel::prelude::entity::{Author, AuthorName, BirthDate};
use kernel::KernelError;

use crate::database::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresAuthorRepository;

#[async_trait::async_trait]
impl AuthorQuery for PostgresAuthorRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_name(
        &self,
        con: &mut PostgresTransaction,
        name: &AuthorName,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        PgAuthorInternal::find_by_name(con, name).await
    }
}

#[async_trait::async_trait]
impl AuthorModifier for PostgresAuthorRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        PgAuthorInternal::create(con, author).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        name: &AuthorName,
    ) -> error_stack::Result<(), KernelError> {
        PgAuthorInternal::delete(con, name).await
    }
}

#[derive(sqlx::FromRow)]
pub(in crate::database) struct AuthorRow {
    name: String,
    birth_date: Date,
}

impl From<AuthorRow> for Author {
    fn from(value: AuthorRow) -> Self {
        Author::new(
            AuthorName::new(value.name),
            BirthDate::new(value.birth_date),
        )
    }
}

pub(in crate::database) struct PgAuthorInternal;

impl PgAuthorInternal {
    async fn find_by_name(
        con: &mut PgConnection,
        name: &AuthorName,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT name, birth_date
            FROM authors
            WHERE name = $1
            "#,
        )
        .bind(name.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Author::from))
    }

    #[tracing::instrument(skip_all, fields(name = ?author.name()))]
    async fn create(
        con: &mut PgConnection,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        let inserted = sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO authors (name, birth_date)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(author.name().as_ref())
        .bind(author.birth_date().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if inserted.rows_affected() == 0 {
            tracing::debug!("author already stored");
        }
        Ok(())
    }

    #[tracing::instrument(skip(con))]
    async fn delete(
        con: &mut PgConnection,
        name: &AuthorName,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM authors
            WHERE name = $1
            "#,
        )
        .bind(name.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
