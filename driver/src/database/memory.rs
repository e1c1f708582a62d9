use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{
    Author, AuthorName, BirthDate, Book, BookTitle, DestructAuthor, Isbn, Publisher, PublisherName,
};
use kernel::KernelError;

pub use self::{author::*, book::*, publisher::*};

mod author;
mod book;
mod publisher;

/// Process-local store.
///
/// A transaction owns the catalog lock for its whole lifetime, so transactions
/// are fully serialized. Reads go straight to the shared catalog; the first
/// write takes a private copy, which replaces the shared one on commit.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    catalog: Arc<Mutex<Catalog>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.catalog).lock_owned().await;
        Ok(MemoryTransaction {
            guard,
            working: None,
        })
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<Catalog>,
    working: Option<Catalog>,
}

impl Deref for MemoryTransaction {
    type Target = Catalog;
    fn deref(&self) -> &Self::Target {
        match &self.working {
            Some(working) => working,
            None => &*self.guard,
        }
    }
}

impl DerefMut for MemoryTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        let Self { guard, working } = self;
        working.get_or_insert_with(|| Catalog::clone(guard))
    }
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self { mut guard, working } = self;
        if let Some(working) = working {
            *guard = working;
        }
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct BookRow {
    title: BookTitle,
    publisher: PublisherName,
}

/// Entity tables keyed by primary key, with book authorship kept as a
/// separate relation of `(isbn, author name)` pairs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: BTreeMap<Isbn, BookRow>,
    authors: BTreeMap<AuthorName, BirthDate>,
    publishers: BTreeSet<PublisherName>,
    book_authors: BTreeSet<(Isbn, AuthorName)>,
}

fn integrity_violation(message: String) -> Report<KernelError> {
    Report::new(KernelError::Internal).attach_printable(message)
}

impl Catalog {
    fn assemble(&self, isbn: &Isbn, row: &BookRow) -> Book {
        let authors = self
            .book_authors
            .iter()
            .filter(|(book, _)| book == isbn)
            .filter_map(|(_, name)| self.author(name));
        Book::new(
            isbn.clone(),
            row.title.clone(),
            authors,
            Publisher::new(row.publisher.clone()),
        )
    }

    pub(in crate::database) fn book(&self, isbn: &Isbn) -> Option<Book> {
        self.books.get(isbn).map(|row| self.assemble(isbn, row))
    }

    pub(in crate::database) fn contains_book(&self, isbn: &Isbn) -> bool {
        self.books.contains_key(isbn)
    }

    pub(in crate::database) fn books_by_author(&self, name: &AuthorName) -> Vec<Book> {
        self.book_authors
            .iter()
            .filter(|(_, author)| author == name)
            .filter_map(|(isbn, _)| self.book(isbn))
            .collect()
    }

    pub(in crate::database) fn books_by_publisher(&self, name: &PublisherName) -> Vec<Book> {
        self.books
            .iter()
            .filter(|(_, row)| &row.publisher == name)
            .map(|(isbn, row)| self.assemble(isbn, row))
            .collect()
    }

    pub(in crate::database) fn author(&self, name: &AuthorName) -> Option<Author> {
        self.authors
            .get(name)
            .map(|birth_date| Author::new(name.clone(), *birth_date))
    }

    pub(in crate::database) fn publisher(&self, name: &PublisherName) -> Option<Publisher> {
        self.publishers
            .get(name)
            .map(|name| Publisher::new(name.clone()))
    }

    fn check_references(&self, book: &Book) -> error_stack::Result<(), KernelError> {
        if book.authors().is_empty() {
            let message = format!("book {:?} has no authors", book.isbn());
            return Err(integrity_violation(message));
        }
        if !self.publishers.contains(book.publisher().name()) {
            return Err(integrity_violation(format!(
                "book {:?} references unknown publisher {:?}",
                book.isbn(),
                book.publisher().name()
            )));
        }
        if let Some(author) = book
            .authors()
            .iter()
            .find(|author| !self.authors.contains_key(author.name()))
        {
            return Err(integrity_violation(format!(
                "book {:?} references unknown author {:?}",
                book.isbn(),
                author.name()
            )));
        }
        Ok(())
    }

    fn link_authors(&mut self, book: &Book) {
        self.book_authors.retain(|(isbn, _)| isbn != book.isbn());
        self.book_authors.extend(
            book.authors()
                .iter()
                .map(|author| (book.isbn().clone(), author.name().clone())),
        );
    }

    pub(in crate::database) fn insert_book(
        &mut self,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if self.books.contains_key(book.isbn()) {
            return Err(Report::new(KernelError::Concurrency)
                .attach_printable(format!("duplicate book key {:?}", book.isbn())));
        }
        self.check_references(book)?;
        self.books.insert(
            book.isbn().clone(),
            BookRow {
                title: book.title().clone(),
                publisher: book.publisher().name().clone(),
            },
        );
        self.link_authors(book);
        tracing::debug!(isbn = ?book.isbn(), "stored book");
        Ok(())
    }

    pub(in crate::database) fn update_book(
        &mut self,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        self.check_references(book)?;
        let row = self.books.get_mut(book.isbn()).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("book {:?} is not stored", book.isbn()))
        })?;
        row.title = book.title().clone();
        row.publisher = book.publisher().name().clone();
        self.link_authors(book);
        tracing::debug!(isbn = ?book.isbn(), "updated book");
        Ok(())
    }

    pub(in crate::database) fn delete_book(&mut self, isbn: &Isbn) {
        if self.books.remove(isbn).is_some() {
            tracing::debug!(?isbn, "deleted book");
        }
        self.book_authors.retain(|(book, _)| book != isbn);
    }

    pub(in crate::database) fn insert_author(&mut self, author: &Author) {
        let DestructAuthor { name, birth_date } = author.clone().into_destruct();
        if let Entry::Vacant(entry) = self.authors.entry(name) {
            tracing::debug!(name = ?entry.key(), "stored author");
            entry.insert(birth_date);
        }
    }

    pub(in crate::database) fn delete_author(
        &mut self,
        name: &AuthorName,
    ) -> error_stack::Result<(), KernelError> {
        if let Some((isbn, _)) = self.book_authors.iter().find(|(_, author)| author == name) {
            return Err(integrity_violation(format!(
                "author {:?} is still referenced by book {:?}",
                name, isbn
            )));
        }
        if self.authors.remove(name).is_some() {
            tracing::debug!(?name, "deleted author");
        }
        Ok(())
    }

    pub(in crate::database) fn insert_publisher(&mut self, publisher: &Publisher) {
        if self.publishers.insert(publisher.name().clone()) {
            tracing::debug!(name = ?publisher.name(), "stored publisher");
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::prelude::entity::{Publisher, PublisherName};
    use kernel::KernelError;

    use crate::database::MemoryDatabase;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            let bytes = self.0.lock().expect("log buffer poisoned");
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .expect("log buffer poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn commit_publishes_changes() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let name = PublisherName::new("publisher");

        let mut con = db.transact().await?;
        con.insert_publisher(&Publisher::new(name.clone()));
        con.commit().await?;

        let con = db.transact().await?;
        assert!(con.publisher(&name).is_some());
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_discards_changes() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let name = PublisherName::new("publisher");

        let mut con = db.transact().await?;
        con.insert_publisher(&Publisher::new(name.clone()));
        drop(con);

        let mut con = db.transact().await?;
        assert!(con.publisher(&name).is_none());

        con.insert_publisher(&Publisher::new(name.clone()));
        con.roll_back().await?;

        let con = db.transact().await?;
        assert!(con.publisher(&name).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn catalog_is_copied_on_first_write() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let name = PublisherName::new("publisher");

        let mut con = db.transact().await?;
        assert!(con.publisher(&name).is_none());
        assert!(con.working.is_none());

        con.insert_publisher(&Publisher::new(name.clone()));
        assert!(con.working.is_some());
        assert!(con.publisher(&name).is_some());
        con.commit().await?;

        let con = db.transact().await?;
        assert!(con.publisher(&name).is_some());
        assert!(con.working.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn mutations_emit_debug_events() -> error_stack::Result<(), KernelError> {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        let db = MemoryDatabase::new();
        let publisher = Publisher::new(PublisherName::new("publisher"));
        let mut con = db.transact().await?;
        con.insert_publisher(&publisher);
        con.insert_publisher(&publisher);
        con.commit().await?;

        assert_eq!(logs.contents().matches("stored publisher").count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn transactions_are_serialized() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let first = db.transact().await?;

        let waiting = tokio::spawn({
            let db = db.clone();
            async move { db.transact().await.map(|_| ()) }
        });
        tokio::task::yield_now().await;
        assert!(!waiting.is_finished());

        first.commit().await?;
        waiting.await.expect("transaction task panicked")?;
        Ok(())
    }
}
