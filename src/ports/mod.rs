pub mod book_repository;
pub mod errors;
pub mod loan_history_repository;
pub mod unit_of_work;
pub mod user_repository;

pub use book_repository::*;
pub use errors::StoreError;
pub use loan_history_repository::*;
pub use unit_of_work::*;
pub use user_repository::*;
