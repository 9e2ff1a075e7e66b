mod book_service;
mod dependencies;
mod errors;
mod user_service;

pub use book_service::{book_statistics, count_loaned_books, loan_book, register_book, return_book};
pub use dependencies::ServiceDependencies;
pub use errors::{LibraryApplicationError, Result};
pub use user_service::{delete_user, list_users, register_user, rename_user, user_loan_report};
