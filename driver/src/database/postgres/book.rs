use sqlx::PgConnection;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Author, AuthorName, Book, BookTitle, Isbn, Publisher, PublisherName};
use kernel::KernelError;

use crate::database::postgres::author::AuthorRow;
use crate::database::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_isbn(
        &self,
        con: &mut PostgresTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_isbn(con, isbn).await
    }

    async fn exists(
        &self,
        con: &mut PostgresTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookInternal::exists(con, isbn).await
    }

    async fn find_by_author_name(
        &self,
        con: &mut PostgresTransaction,
        name: &AuthorName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_author_name(con, name).await
    }

    async fn find_by_publisher_name(
        &self,
        con: &mut PostgresTransaction,
        name: &PublisherName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_publisher_name(con, name).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, isbn).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    isbn: String,
    title: String,
    publisher_name: String,
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn assemble(
        con: &mut PgConnection,
        row: BookRow,
    ) -> error_stack::Result<Book, KernelError> {
        let authors = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT a.name, a.birth_date
            FROM authors a
            JOIN book_authors ba ON ba.author_name = a.name
            WHERE ba.book_isbn = $1
            "#,
        )
        .bind(&row.isbn)
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(Book::new(
            Isbn::new(row.isbn),
            BookTitle::new(row.title),
            authors.into_iter().map(Author::from),
            Publisher::new(PublisherName::new(row.publisher_name)),
        ))
    }

    async fn assemble_all(
        con: &mut PgConnection,
        rows: Vec<BookRow>,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(Self::assemble(&mut *con, row).await?);
        }
        Ok(books)
    }

    async fn find_by_isbn(
        con: &mut PgConnection,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT isbn, title, publisher_name
            FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_optional(&mut *con)
        .await
        .convert_error()?;
        match row {
            Some(row) => Ok(Some(Self::assemble(con, row).await?)),
            None => Ok(None),
        }
    }

    async fn exists(con: &mut PgConnection, isbn: &Isbn) -> error_stack::Result<bool, KernelError> {
        let exists = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(exists)
    }

    async fn find_by_author_name(
        con: &mut PgConnection,
        name: &AuthorName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT b.isbn, b.title, b.publisher_name
            FROM books b
            JOIN book_authors ba ON ba.book_isbn = b.isbn
            WHERE ba.author_name = $1
            ORDER BY b.isbn
            "#,
        )
        .bind(name.as_ref())
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble_all(con, rows).await
    }

    async fn find_by_publisher_name(
        con: &mut PgConnection,
        name: &PublisherName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT isbn, title, publisher_name
            FROM books
            WHERE publisher_name = $1
            ORDER BY isbn
            "#,
        )
        .bind(name.as_ref())
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble_all(con, rows).await
    }

    async fn link_authors(
        con: &mut PgConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        for author in book.authors() {
            sqlx::query(
                // language=postgresql
                r#"
                INSERT INTO book_authors (book_isbn, author_name)
                VALUES ($1, $2)
                "#,
            )
            .bind(book.isbn().as_ref())
            .bind(author.name().as_ref())
            .execute(&mut *con)
            .await
            .convert_error()?;
        }
        Ok(())
    }

    async fn unlink_authors(
        con: &mut PgConnection,
        isbn: &Isbn,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM book_authors
            WHERE book_isbn = $1
            "#,
        )
        .bind(isbn.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(isbn = ?book.isbn()))]
    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (isbn, title, publisher_name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(book.isbn().as_ref())
        .bind(book.title().as_ref())
        .bind(book.publisher().name().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        Self::link_authors(con, book).await
    }

    #[tracing::instrument(skip_all, fields(isbn = ?book.isbn()))]
    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let updated = sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $2, publisher_name = $3
            WHERE isbn = $1
            "#,
        )
        .bind(book.isbn().as_ref())
        .bind(book.title().as_ref())
        .bind(book.publisher().name().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        if updated.rows_affected() == 0 {
            return Err(error_stack::Report::new(KernelError::NotFound)
                .attach_printable(format!("book {:?} is not stored", book.isbn())));
        }
        Self::unlink_authors(&mut *con, book.isbn()).await?;
        Self::link_authors(con, book).await
    }

    #[tracing::instrument(skip(con))]
    async fn delete(con: &mut PgConnection, isbn: &Isbn) -> error_stack::Result<(), KernelError> {
        Self::unlink_authors(&mut *con, isbn).await?;
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
