use std::ops::Deref;
use std::sync::Arc;

use application::service::{
    AddBookService, GetBookService, RemoveAuthorService, RemoveBookService, UpdateBookService,
};
use driver::database::{
    MemoryAuthorRepository, MemoryBookRepository, MemoryDatabase, MemoryPublisherRepository,
    PostgresAuthorRepository, PostgresBookRepository, PostgresDatabase, PostgresPublisherRepository,
};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery, DependOnPublisherQuery};
use kernel::interface::update::{
    DependOnAuthorModifier, DependOnBookModifier, DependOnPublisherModifier,
};

/// Every catalog use case the routes need.
pub trait CatalogModule:
    AddBookService + GetBookService + UpdateBookService + RemoveBookService + RemoveAuthorService
{
}

impl<T> CatalogModule for T where
    T: AddBookService
        + GetBookService
        + UpdateBookService
        + RemoveBookService
        + RemoveAuthorService
{
}

pub struct AppModule<H>(Arc<H>);

impl<H> AppModule<H> {
    pub fn new(handler: H) -> Self {
        Self(Arc::new(handler))
    }
}

impl<H> Clone for AppModule<H> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<H> Deref for AppModule<H> {
    type Target = H;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl<D> Handler<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }
}

impl DependOnDatabaseConnection for Handler<PostgresDatabase> {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl DependOnBookQuery for Handler<PostgresDatabase> {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for Handler<PostgresDatabase> {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnAuthorQuery for Handler<PostgresDatabase> {
    type AuthorQuery = PostgresAuthorRepository;
    fn author_query(&self) -> &Self::AuthorQuery {
        &PostgresAuthorRepository
    }
}

impl DependOnAuthorModifier for Handler<PostgresDatabase> {
    type AuthorModifier = PostgresAuthorRepository;
    fn author_modifier(&self) -> &Self::AuthorModifier {
        &PostgresAuthorRepository
    }
}

impl DependOnPublisherQuery for Handler<PostgresDatabase> {
    type PublisherQuery = PostgresPublisherRepository;
    fn publisher_query(&self) -> &Self::PublisherQuery {
        &PostgresPublisherRepository
    }
}

impl DependOnPublisherModifier for Handler<PostgresDatabase> {
    type PublisherModifier = PostgresPublisherRepository;
    fn publisher_modifier(&self) -> &Self::PublisherModifier {
        &PostgresPublisherRepository
    }
}

impl DependOnDatabaseConnection for Handler<MemoryDatabase> {
    type DatabaseConnection = MemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl DependOnBookQuery for Handler<MemoryDatabase> {
    type BookQuery = MemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MemoryBookRepository
    }
}

impl DependOnBookModifier for Handler<MemoryDatabase> {
    type BookModifier = MemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MemoryBookRepository
    }
}

impl DependOnAuthorQuery for Handler<MemoryDatabase> {
    type AuthorQuery = MemoryAuthorRepository;
    fn author_query(&self) -> &Self::AuthorQuery {
        &MemoryAuthorRepository
    }
}

impl DependOnAuthorModifier for Handler<MemoryDatabase> {
    type AuthorModifier = MemoryAuthorRepository;
    fn author_modifier(&self) -> &Self::AuthorModifier {
        &MemoryAuthorRepository
    }
}

impl DependOnPublisherQuery for Handler<MemoryDatabase> {
    type PublisherQuery = MemoryPublisherRepository;
    fn publisher_query(&self) -> &Self::PublisherQuery {
        &MemoryPublisherRepository
    }
}

impl DependOnPublisherModifier for Handler<MemoryDatabase> {
    type PublisherModifier = MemoryPublisherRepository;
    fn publisher_modifier(&self) -> &Self::PublisherModifier {
        &MemoryPublisherRepository
    }
}
