use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{AuthorName, Book, Isbn, PublisherName};
use kernel::KernelError;

use crate::database::MemoryTransaction;

pub struct MemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for MemoryBookRepository {
    type Transaction = MemoryTransaction;
    async fn find_by_isbn(
        &self,
        con: &mut MemoryTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.book(isbn))
    }

    async fn exists(
        &self,
        con: &mut MemoryTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con.contains_book(isbn))
    }

    async fn find_by_author_name(
        &self,
        con: &mut MemoryTransaction,
        name: &AuthorName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.books_by_author(name))
    }

    async fn find_by_publisher_name(
        &self,
        con: &mut MemoryTransaction,
        name: &PublisherName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.books_by_publisher(name))
    }
}

#[async_trait::async_trait]
impl BookModifier for MemoryBookRepository {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.insert_book(book)
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.update_book(book)
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        isbn: &Isbn,
    ) -> error_stack::Result<(), KernelError> {
        con.delete_book(isbn);
        Ok(())
    }
}
