use error_stack::Report;

use kernel::interface::database::{
    DatabaseConnection, DependOnDatabaseConnection, Transaction, TransactionOf,
};
use kernel::interface::query::{
    AuthorQuery, BookQuery, DependOnAuthorQuery, DependOnBookQuery, DependOnPublisherQuery,
    PublisherQuery,
};
use kernel::interface::update::{
    AuthorModifier, BookModifier, DependOnAuthorModifier, DependOnBookModifier,
    DependOnPublisherModifier, PublisherModifier,
};
use kernel::prelude::entity::{Author, AuthorName, Book, BookTitle, Isbn, Publisher, PublisherName};
use kernel::KernelError;

use crate::service::{invalid, not_found};
use crate::transfer::{AuthorDto, BookDto, CreateBookDto, UpdateBookDto};

#[async_trait::async_trait]
pub trait AddBookService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnAuthorQuery
    + DependOnAuthorModifier
    + DependOnPublisherQuery
    + DependOnPublisherModifier
{
    /// Stores a new book, reusing authors and publishers that already exist.
    ///
    /// Returns `false` without touching the store when the isbn is taken.
    /// Fails with [`KernelError::Validation`] when the author list is empty or
    /// the isbn or publisher name is blank.
    #[tracing::instrument(skip_all, fields(isbn = %dto.isbn))]
    async fn add_book(&self, dto: CreateBookDto) -> error_stack::Result<bool, KernelError> {
        if dto.authors.is_empty() {
            return Err(invalid("a book needs at least one author"));
        }
        if dto.isbn.is_empty() || dto.publisher.is_empty() {
            return Err(invalid("isbn and publisher name must not be empty"));
        }

        let mut transaction = self.database_connection().transact().await?;

        let isbn = Isbn::new(dto.isbn);
        if self.book_query().exists(&mut transaction, &isbn).await? {
            tracing::debug!("isbn already taken");
            transaction.roll_back().await?;
            return Ok(false);
        }

        let publisher = Publisher::new(PublisherName::new(dto.publisher));
        let publisher = get_or_create_publisher(self, &mut transaction, publisher).await?;

        let mut authors = Vec::with_capacity(dto.authors.len());
        for author in dto.authors {
            let author = get_or_create_author(self, &mut transaction, Author::from(author)).await?;
            authors.push(author);
        }

        let book = Book::new(isbn, BookTitle::new(dto.title), authors, publisher);
        self.book_modifier().create(&mut transaction, &book).await?;

        transaction.commit().await?;
        Ok(true)
    }
}

impl<T> AddBookService for T where
    T: DependOnDatabaseConnection
        + DependOnBookQuery
        + DependOnBookModifier
        + DependOnAuthorQuery
        + DependOnAuthorModifier
        + DependOnPublisherQuery
        + DependOnPublisherModifier
{
}

async fn get_or_create_publisher<T>(
    module: &T,
    con: &mut TransactionOf<T>,
    publisher: Publisher,
) -> error_stack::Result<Publisher, KernelError>
where
    T: ?Sized + DependOnPublisherQuery + DependOnPublisherModifier,
{
    if let Some(found) = module
        .publisher_query()
        .find_by_name(con, publisher.name())
        .await?
    {
        return Ok(found);
    }
    module.publisher_modifier().create(con, &publisher).await?;
    tracing::debug!(publisher = ?publisher.name(), "created publisher");

    // the stored row wins over the one just offered
    module
        .publisher_query()
        .find_by_name(con, publisher.name())
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable("publisher vanished right after creation")
        })
}

async fn get_or_create_author<T>(
    module: &T,
    con: &mut TransactionOf<T>,
    author: Author,
) -> error_stack::Result<Author, KernelError>
where
    T: ?Sized + DependOnAuthorQuery + DependOnAuthorModifier,
{
    if let Some(found) = module
        .author_query()
        .find_by_name(con, author.name())
        .await?
    {
        return Ok(found);
    }
    module.author_modifier().create(con, &author).await?;
    tracing::debug!(author = ?author.name(), "created author");

    module
        .author_query()
        .find_by_name(con, author.name())
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable("author vanished right after creation")
        })
}

#[async_trait::async_trait]
pub trait GetBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery
{
    async fn find_book_by_isbn(&self, isbn: &str) -> error_stack::Result<BookDto, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let book = self
            .book_query()
            .find_by_isbn(&mut transaction, &Isbn::new(isbn))
            .await?
            .ok_or_else(|| not_found("book", isbn))?;

        transaction.commit().await?;
        Ok(BookDto::from(book))
    }

    async fn find_books_by_author(
        &self,
        author: &str,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let books = self
            .book_query()
            .find_by_author_name(&mut transaction, &AuthorName::new(author))
            .await?;

        transaction.commit().await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn find_books_by_publisher(
        &self,
        publisher: &str,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let books = self
            .book_query()
            .find_by_publisher_name(&mut transaction, &PublisherName::new(publisher))
            .await?;

        transaction.commit().await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn find_book_authors(
        &self,
        isbn: &str,
    ) -> error_stack::Result<Vec<AuthorDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let book = self
            .book_query()
            .find_by_isbn(&mut transaction, &Isbn::new(isbn))
            .await?
            .ok_or_else(|| not_found("book", isbn))?;

        transaction.commit().await?;
        Ok(BookDto::from(book).authors)
    }

    /// One publisher name per book of the author, duplicates included.
    async fn find_publishers_by_author(
        &self,
        author: &str,
    ) -> error_stack::Result<Vec<String>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let books = self
            .book_query()
            .find_by_author_name(&mut transaction, &AuthorName::new(author))
            .await?;

        transaction.commit().await?;
        Ok(books
            .into_iter()
            .map(|book| BookDto::from(book).publisher)
            .collect())
    }
}

impl<T> GetBookService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnBookQuery
    + DependOnBookModifier
{
    #[tracing::instrument(skip_all, fields(isbn = %dto.isbn))]
    async fn update_book_title(
        &self,
        dto: UpdateBookDto,
    ) -> error_stack::Result<BookDto, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let mut book = self
            .book_query()
            .find_by_isbn(&mut transaction, &Isbn::new(&dto.isbn))
            .await?
            .ok_or_else(|| not_found("book", &dto.isbn))?;

        book.substitute(|book| *book.title = BookTitle::new(dto.title));
        self.book_modifier().update(&mut transaction, &book).await?;

        transaction.commit().await?;
        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
}

#[async_trait::async_trait]
pub trait RemoveBookService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnBookQuery
    + DependOnBookModifier
{
    /// Deletes the book only; its authors and publisher stay in the catalog.
    #[tracing::instrument(skip(self))]
    async fn remove_book(&self, isbn: &str) -> error_stack::Result<BookDto, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let book = self
            .book_query()
            .find_by_isbn(&mut transaction, &Isbn::new(isbn))
            .await?
            .ok_or_else(|| not_found("book", isbn))?;
        self.book_modifier()
            .delete(&mut transaction, book.isbn())
            .await?;

        transaction.commit().await?;
        Ok(BookDto::from(book))
    }
}

impl<T> RemoveBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
}
