use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::Router;

use application::service::{GetBookService, RemoveAuthorService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, CatalogModule};
use crate::request::{AuthorNameRequest, AuthorTransformer, GetBookAuthorsRequest};
use crate::response::{AuthorPresenter, PublisherPresenter};

pub trait AuthorRouter {
    fn route_author(self) -> Self;
}

impl<H: CatalogModule> AuthorRouter for Router<AppModule<H>> {
    fn route_author(self) -> Self {
        self.route(
            "/authors/book/:isbn",
            get(
                |State(module): State<AppModule<H>>, Path(isbn): Path<String>| async move {
                    Controller::new(AuthorTransformer, AuthorPresenter)
                        .intake(GetBookAuthorsRequest::new(isbn))
                        .handle(|isbn| async move { module.find_book_authors(&isbn).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/publishers/author/:author",
            get(
                |State(module): State<AppModule<H>>, Path(author): Path<String>| async move {
                    Controller::new(AuthorTransformer, PublisherPresenter)
                        .intake(AuthorNameRequest::new(author))
                        .handle(
                            |author| async move { module.find_publishers_by_author(&author).await },
                        )
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/author/:author",
            delete(
                |State(module): State<AppModule<H>>, Path(author): Path<String>| async move {
                    Controller::new(AuthorTransformer, AuthorPresenter)
                        .intake(AuthorNameRequest::new(author))
                        .handle(|author| async move { module.remove_author(&author).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
