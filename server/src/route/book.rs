use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};

use application::service::{AddBookService, GetBookService, RemoveBookService, UpdateBookService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, CatalogModule};
use crate::request::{
    BookTransformer, CreateBookRequest, GetBookRequest, GetBooksByAuthorRequest,
    GetBooksByPublisherRequest, UpdateBookTitleRequest,
};
use crate::response::BookPresenter;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<H: CatalogModule> BookRouter for Router<AppModule<H>> {
    fn route_book(self) -> Self {
        self.route(
            "/book",
            post(
                |State(module): State<AppModule<H>>, Json(req): Json<CreateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.add_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/book/:isbn",
            get(
                |State(module): State<AppModule<H>>, Path(isbn): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(isbn))
                        .handle(|isbn| async move { module.find_book_by_isbn(&isbn).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule<H>>, Path(isbn): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(isbn))
                        .handle(|isbn| async move { module.remove_book(&isbn).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/book/:isbn/title/:title",
            put(
                |State(module): State<AppModule<H>>,
                 Path((isbn, title)): Path<(String, String)>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(UpdateBookTitleRequest::new(isbn, title))
                        .handle(|dto| async move { module.update_book_title(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/author/:author",
            get(
                |State(module): State<AppModule<H>>, Path(author): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBooksByAuthorRequest::new(author))
                        .handle(|author| async move { module.find_books_by_author(&author).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/publisher/:publisher",
            get(
                |State(module): State<AppModule<H>>, Path(publisher): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBooksByPublisherRequest::new(publisher))
                        .handle(|publisher| async move {
                            module.find_books_by_publisher(&publisher).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
