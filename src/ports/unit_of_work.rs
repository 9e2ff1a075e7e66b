use async_trait::async_trait;

use super::{
    book_repository::BookRepository, errors::Result,
    loan_history_repository::UserLoanHistoryRepository, user_repository::UserRepository,
};

/// 作業単位（Unit of Work）ポート
///
/// 1つのサービス操作の読み書きをまとめる。`commit`するまで書き込みは
/// 他の作業単位から見えない。`commit`せずに破棄した場合はすべてロールバックされる。
#[async_trait]
pub trait UnitOfWork: BookRepository + UserRepository + UserLoanHistoryRepository + Send {
    /// 書き込みを確定する
    async fn commit(self: Box<Self>) -> Result<()>;
}

/// ストレージのハンドル
///
/// すべてのエンティティのコレクションを所有し、作業単位を開始する。
#[async_trait]
pub trait LibraryStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>>;
}
