pub mod book;
pub mod commands;
pub mod errors;
pub mod loan_history;
pub mod statistics;
pub mod user;
pub mod value_objects;

pub use book::Book;
pub use errors::*;
pub use loan_history::UserLoanHistory;
pub use user::User;
pub use value_objects::*;
