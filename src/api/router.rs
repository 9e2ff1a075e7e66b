use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, book_statistics, count_loaned_books, delete_user, list_users, loan_book,
    register_book, register_user, rename_user, return_book, user_loan_report,
};

/// Creates the API router with all library endpoints
///
/// Book endpoints:
/// - POST /book - Register a book
/// - POST /book/loan - Loan a book to a user
/// - PUT /book/return - Return a loaned book
/// - GET /book/loan - Count loaned books
/// - GET /book/stat - Book counts per type
///
/// User endpoints:
/// - POST /user, GET /user, PUT /user, DELETE /user?name=
/// - GET /user/loan - Loan histories per user
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/book", post(register_book))
        .route("/book/loan", post(loan_book).get(count_loaned_books))
        .route("/book/return", put(return_book))
        .route("/book/stat", get(book_statistics))
        .route(
            "/user",
            post(register_user)
                .get(list_users)
                .put(rename_user)
                .delete(delete_user),
        )
        .route("/user/loan", get(user_loan_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
