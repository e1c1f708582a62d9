use application::service::{
    AddBookService, GetBookService, RemoveAuthorService, RemoveBookService, UpdateBookService,
};
use application::transfer::{AuthorDto, BookDto, CreateBookDto, UpdateBookDto};
use driver::database::{
    MemoryAuthorRepository, MemoryBookRepository, MemoryDatabase, MemoryPublisherRepository,
};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    DependOnAuthorQuery, DependOnBookQuery, DependOnPublisherQuery, PublisherQuery,
};
use kernel::interface::update::{
    DependOnAuthorModifier, DependOnBookModifier, DependOnPublisherModifier,
};
use kernel::prelude::entity::PublisherName;
use kernel::KernelError;
use time::macros::date;
use time::{Date, Month};

#[derive(Default)]
struct TestModule {
    database: MemoryDatabase,
}

impl DependOnDatabaseConnection for TestModule {
    type DatabaseConnection = MemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl DependOnBookQuery for TestModule {
    type BookQuery = MemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MemoryBookRepository
    }
}

impl DependOnBookModifier for TestModule {
    type BookModifier = MemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MemoryBookRepository
    }
}

impl DependOnAuthorQuery for TestModule {
    type AuthorQuery = MemoryAuthorRepository;
    fn author_query(&self) -> &Self::AuthorQuery {
        &MemoryAuthorRepository
    }
}

impl DependOnAuthorModifier for TestModule {
    type AuthorModifier = MemoryAuthorRepository;
    fn author_modifier(&self) -> &Self::AuthorModifier {
        &MemoryAuthorRepository
    }
}

impl DependOnPublisherQuery for TestModule {
    type PublisherQuery = MemoryPublisherRepository;
    fn publisher_query(&self) -> &Self::PublisherQuery {
        &MemoryPublisherRepository
    }
}

impl DependOnPublisherModifier for TestModule {
    type PublisherModifier = MemoryPublisherRepository;
    fn publisher_modifier(&self) -> &Self::PublisherModifier {
        &MemoryPublisherRepository
    }
}

const BIRTH: Date = date!(1970 - 01 - 01);

fn author(name: &str, birth_date: Date) -> AuthorDto {
    AuthorDto {
        name: name.to_string(),
        birth_date,
    }
}

fn create(isbn: &str, title: &str, publisher: &str, authors: Vec<AuthorDto>) -> CreateBookDto {
    CreateBookDto {
        isbn: isbn.to_string(),
        title: title.to_string(),
        publisher: publisher.to_string(),
        authors,
    }
}

fn names(authors: &[AuthorDto]) -> Vec<&str> {
    authors.iter().map(|author| author.name.as_str()).collect()
}

#[tokio::test]
async fn added_book_round_trips() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();

    let added = module
        .add_book(create("978-0", "X", "P", vec![author("A", BIRTH)]))
        .await?;
    assert!(added);

    let found = module.find_book_by_isbn("978-0").await?;
    assert_eq!(
        found,
        BookDto {
            isbn: "978-0".to_string(),
            title: "X".to_string(),
            authors: vec![author("A", BIRTH)],
            publisher: "P".to_string(),
        }
    );
    Ok(())
}

#[tokio::test]
async fn book_without_authors_is_rejected() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();

    let error = module
        .add_book(create("1", "T", "P", Vec::new()))
        .await
        .expect_err("a book needs an author");
    assert_eq!(error.current_context(), &KernelError::Validation);

    let error = module
        .find_book_by_isbn("1")
        .await
        .expect_err("nothing was stored");
    assert_eq!(error.current_context(), &KernelError::NotFound);
    assert!(module.find_books_by_publisher("P").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn blank_isbn_or_publisher_is_rejected() {
    let module = TestModule::default();

    let error = module
        .add_book(create("", "T", "P", vec![author("A", BIRTH)]))
        .await
        .expect_err("isbn is required");
    assert_eq!(error.current_context(), &KernelError::Validation);

    let error = module
        .add_book(create("1", "T", "", vec![author("A", BIRTH)]))
        .await
        .expect_err("publisher is required");
    assert_eq!(error.current_context(), &KernelError::Validation);

    let error = module
        .remove_author("A")
        .await
        .expect_err("author was never created");
    assert_eq!(error.current_context(), &KernelError::NotFound);
}

#[tokio::test]
async fn duplicate_isbn_is_not_added() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();

    let first = module
        .add_book(create("1", "first", "P", vec![author("A", BIRTH)]))
        .await?;
    let second = module
        .add_book(create("1", "second", "Q", vec![author("B", BIRTH)]))
        .await?;
    assert!(first);
    assert!(!second);

    let found = module.find_book_by_isbn("1").await?;
    assert_eq!(found.title, "first");
    assert_eq!(found.publisher, "P");
    assert_eq!(names(&found.authors), vec!["A"]);

    // nothing from the rejected request reached the store
    assert!(module.find_books_by_publisher("Q").await?.is_empty());
    let error = module
        .remove_author("B")
        .await
        .expect_err("author B was never created");
    assert_eq!(error.current_context(), &KernelError::NotFound);
    Ok(())
}

#[tokio::test]
async fn existing_author_keeps_first_birth_date() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();

    module
        .add_book(create("1", "first", "P", vec![author("A", BIRTH)]))
        .await?;
    module
        .add_book(create(
            "2",
            "second",
            "P",
            vec![author("A", date!(1999 - 12 - 31))],
        ))
        .await?;

    let first = module.find_book_authors("1").await?;
    let second = module.find_book_authors("2").await?;
    assert_eq!(first, vec![author("A", BIRTH)]);
    assert_eq!(second, vec![author("A", BIRTH)]);

    assert_eq!(module.find_books_by_author("A").await?.len(), 2);
    assert_eq!(module.find_books_by_publisher("P").await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn removing_sole_author_deletes_book() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();
    module
        .add_book(create("1", "T", "P", vec![author("A", BIRTH)]))
        .await?;

    let removed = module.remove_author("A").await?;
    assert_eq!(removed, author("A", BIRTH));

    let error = module
        .find_book_by_isbn("1")
        .await
        .expect_err("book without authors is deleted");
    assert_eq!(error.current_context(), &KernelError::NotFound);
    assert!(module.find_books_by_publisher("P").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn removing_one_of_many_authors_keeps_book() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();
    module
        .add_book(create(
            "1",
            "T",
            "P",
            vec![author("A", BIRTH), author("C", BIRTH)],
        ))
        .await?;
    module
        .add_book(create("2", "U", "P", vec![author("A", BIRTH)]))
        .await?;

    module.remove_author("A").await?;

    let book = module.find_book_by_isbn("1").await?;
    assert_eq!(names(&book.authors), vec!["C"]);
    assert!(module.find_book_by_isbn("2").await.is_err());
    assert!(module.find_books_by_author("A").await?.is_empty());
    assert_eq!(module.find_books_by_author("C").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn removing_unknown_author_fails() {
    let module = TestModule::default();
    let error = module
        .remove_author("nobody")
        .await
        .expect_err("author does not exist");
    assert_eq!(error.current_context(), &KernelError::NotFound);
}

#[tokio::test]
async fn removing_book_keeps_authors_and_publisher() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();
    module
        .add_book(create(
            "1",
            "T",
            "P",
            vec![author("A", BIRTH), author("B", BIRTH)],
        ))
        .await?;
    module
        .add_book(create("2", "U", "P", vec![author("B", BIRTH)]))
        .await?;

    let removed = module.remove_book("1").await?;
    assert_eq!(removed.isbn, "1");
    assert_eq!(names(&removed.authors), vec!["A", "B"]);

    assert!(module.find_book_by_isbn("1").await.is_err());
    assert_eq!(
        module.find_book_authors("2").await?,
        vec![author("B", BIRTH)]
    );
    assert_eq!(module.find_books_by_publisher("P").await?.len(), 1);

    // author A is no longer on any book but is still stored
    assert_eq!(module.remove_author("A").await?, author("A", BIRTH));
    Ok(())
}

#[tokio::test]
async fn removing_book_keeps_its_only_publisher() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();
    module
        .add_book(create("1", "T", "Solo", vec![author("A", BIRTH)]))
        .await?;

    module.remove_book("1").await?;
    assert!(module.find_books_by_publisher("Solo").await?.is_empty());

    let mut con = module.database.transact().await?;
    let publisher = MemoryPublisherRepository
        .find_by_name(&mut con, &PublisherName::new("Solo"))
        .await?;
    assert!(publisher.is_some());
    drop(con);

    let added = module
        .add_book(create("2", "U", "Solo", vec![author("A", BIRTH)]))
        .await?;
    assert!(added);
    assert_eq!(module.find_book_by_isbn("2").await?.publisher, "Solo");
    Ok(())
}

#[tokio::test]
async fn removing_unknown_book_fails() {
    let module = TestModule::default();
    let error = module
        .remove_book("missing")
        .await
        .expect_err("book does not exist");
    assert_eq!(error.current_context(), &KernelError::NotFound);
}

#[tokio::test]
async fn update_changes_only_title() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();
    module
        .add_book(create(
            "1",
            "old",
            "P",
            vec![author("A", BIRTH), author("B", BIRTH)],
        ))
        .await?;
    let before = module.find_book_by_isbn("1").await?;

    let updated = module
        .update_book_title(UpdateBookDto {
            isbn: "1".to_string(),
            title: "new".to_string(),
        })
        .await?;
    let after = module.find_book_by_isbn("1").await?;

    assert_eq!(updated, after);
    assert_eq!(after.title, "new");
    assert_eq!(after.isbn, before.isbn);
    assert_eq!(after.authors, before.authors);
    assert_eq!(after.publisher, before.publisher);
    Ok(())
}

#[tokio::test]
async fn updating_unknown_book_fails() {
    let module = TestModule::default();
    let error = module
        .update_book_title(UpdateBookDto {
            isbn: "missing".to_string(),
            title: "title".to_string(),
        })
        .await
        .expect_err("book does not exist");
    assert_eq!(error.current_context(), &KernelError::NotFound);
}

#[tokio::test]
async fn book_authors_of_unknown_book_fails() {
    let module = TestModule::default();
    let error = module
        .find_book_authors("missing")
        .await
        .expect_err("book does not exist");
    assert_eq!(error.current_context(), &KernelError::NotFound);
}

#[tokio::test]
async fn publishers_by_author_keep_duplicates() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();
    module
        .add_book(create("1", "T", "P", vec![author("A", BIRTH)]))
        .await?;
    module
        .add_book(create("2", "U", "P", vec![author("A", BIRTH)]))
        .await?;
    module
        .add_book(create("3", "V", "Q", vec![author("A", BIRTH)]))
        .await?;

    let mut publishers = module.find_publishers_by_author("A").await?;
    publishers.sort();
    assert_eq!(publishers, vec!["P", "P", "Q"]);
    Ok(())
}

#[tokio::test]
async fn queries_with_no_match_are_empty() -> error_stack::Result<(), KernelError> {
    let module = TestModule::default();
    module
        .add_book(create("1", "T", "P", vec![author("A", BIRTH)]))
        .await?;

    assert!(module.find_books_by_author("nobody").await?.is_empty());
    assert!(module.find_books_by_publisher("nobody").await?.is_empty());
    assert!(module.find_publishers_by_author("nobody").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn concurrent_adds_share_new_author() -> error_stack::Result<(), KernelError> {
    let module = std::sync::Arc::new(TestModule::default());

    let tasks = (0..8)
        .map(|index: i32| {
            let module = std::sync::Arc::clone(&module);
            let birth_date = Date::from_calendar_date(1900 + index, Month::January, 1)
                .expect("valid calendar date");
            tokio::spawn(async move {
                module
                    .add_book(create(
                        &index.to_string(),
                        "T",
                        "P",
                        vec![author("A", birth_date)],
                    ))
                    .await
            })
        })
        .collect::<Vec<_>>();
    for task in tasks {
        assert!(task.await.expect("task panicked")?);
    }

    let books = module.find_books_by_author("A").await?;
    assert_eq!(books.len(), 8);
    let birth_dates = books
        .iter()
        .flat_map(|book| book.authors.iter().map(|author| author.birth_date))
        .collect::<std::collections::HashSet<_>>();
    assert_eq!(birth_dates.len(), 1);
    Ok(())
}
