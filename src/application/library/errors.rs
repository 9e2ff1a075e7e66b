use crate::ports::StoreError;
use thiserror::Error;

/// 図書館アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LibraryApplicationError {
    /// 入力値が不正（例: 空の書名）
    #[error("Validation error: {0}")]
    Validation(String),

    /// 書籍が存在しない
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// 利用者が存在しない
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// 返却対象の貸出中履歴が存在しない
    #[error("Loan not found for book: {0}")]
    LoanNotFound(String),

    /// 同じ書名の書籍が既に貸出中
    #[error("already loaned")]
    BookAlreadyLoaned(String),

    /// ストレージのエラー
    #[error("Store error")]
    StoreError(#[from] StoreError),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryApplicationError>;
