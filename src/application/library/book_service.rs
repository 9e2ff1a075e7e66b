use crate::domain::{
    self, BookId, LoanBookError, RegisterBookError, ReturnBookError, UserLoanHistoryId,
    UserLoanStatus,
    commands::{BookLoanRequest, BookRequest, BookReturnRequest},
    statistics::BookStat,
};
use crate::ports::{
    BookRepository, StoreError, UnitOfWork, UserLoanHistoryRepository, UserRepository,
};
use chrono::Utc;

use super::dependencies::{ServiceDependencies, begin};
use super::errors::{LibraryApplicationError, Result};

fn already_loaned_error(e: LoanBookError, book_name: &str) -> LibraryApplicationError {
    match e {
        LoanBookError::AlreadyLoaned => {
            tracing::warn!(book_name = %book_name, "book is already loaned");
            LibraryApplicationError::BookAlreadyLoaned(book_name.to_string())
        }
    }
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - 書名が空でないこと
pub async fn register_book(deps: &ServiceDependencies, cmd: BookRequest) -> Result<BookId> {
    let book = domain::book::register_book(&cmd.name, cmd.book_type).map_err(|e| match e {
        RegisterBookError::BlankName => {
            LibraryApplicationError::Validation("book name must not be blank".to_string())
        }
    })?;

    let mut uow = begin(deps).await?;
    uow.save_book(&book).await?;
    uow.commit().await?;

    tracing::info!(book_id = %book.id.value(), name = %book.name, "book registered");
    Ok(book.id)
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 同じ書名の貸出中履歴がないこと（利用者が存在しなくてもこちらを優先して報告）
/// - 利用者が存在すること
///
/// 貸出中チェックと保存の間の競合は、ストレージ側の一意制約違反として検出し、
/// 同じく`BookAlreadyLoaned`として扱う。
///
/// # 戻り値
/// 作成された貸出履歴のID
pub async fn loan_book(
    deps: &ServiceDependencies,
    cmd: BookLoanRequest,
) -> Result<UserLoanHistoryId> {
    let mut uow = begin(deps).await?;

    // 1. 書籍の存在確認
    let book = uow
        .find_book_by_name(&cmd.book_name)
        .await?
        .ok_or_else(|| LibraryApplicationError::BookNotFound(cmd.book_name.clone()))?;

    // 2. 貸出中履歴の確認（利用者の確認より先に判定する）
    let active_loan = uow
        .find_loan_history_by_book_name_and_status(&cmd.book_name, UserLoanStatus::Loaned)
        .await?;
    domain::loan_history::ensure_not_loaned(active_loan.as_ref())
        .map_err(|e| already_loaned_error(e, &cmd.book_name))?;

    // 3. 利用者の存在確認
    let user = uow
        .find_user_by_name(&cmd.user_name)
        .await?
        .ok_or_else(|| LibraryApplicationError::UserNotFound(cmd.user_name.clone()))?;

    // 4. ドメイン層の純粋関数を呼び出し
    let history = domain::loan_history::loan_book(&user, &book, active_loan.as_ref(), Utc::now())
        .map_err(|e| already_loaned_error(e, &cmd.book_name))?;

    // 5. 保存して確定
    uow.save_loan_history(&history)
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation(_) => {
                LibraryApplicationError::BookAlreadyLoaned(cmd.book_name.clone())
            }
            other => LibraryApplicationError::StoreError(other),
        })?;
    uow.commit().await?;

    tracing::info!(
        history_id = %history.id.value(),
        user_name = %cmd.user_name,
        book_name = %cmd.book_name,
        "book loaned"
    );
    Ok(history.id)
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 利用者が存在すること
/// - 利用者がその書名の貸出中履歴を持っていること
///
/// 該当する履歴1件だけがRETURNEDになり、新しい履歴は作られない。
pub async fn return_book(deps: &ServiceDependencies, cmd: BookReturnRequest) -> Result<()> {
    let mut uow = begin(deps).await?;

    let user = uow
        .find_user_by_name(&cmd.user_name)
        .await?
        .ok_or_else(|| LibraryApplicationError::UserNotFound(cmd.user_name.clone()))?;

    let histories = uow.find_loan_histories_by_user(user.id).await?;
    let active_loan = domain::loan_history::find_active_loan(&histories, &cmd.book_name)
        .ok_or_else(|| LibraryApplicationError::LoanNotFound(cmd.book_name.clone()))?;

    let returned = domain::loan_history::return_book(active_loan, Utc::now()).map_err(|e| {
        match e {
            // find_active_loanがLOANEDのみを返すため通常は発生しない
            ReturnBookError::AlreadyReturned => {
                LibraryApplicationError::LoanNotFound(cmd.book_name.clone())
            }
        }
    })?;

    uow.save_loan_history(&returned).await?;
    uow.commit().await?;

    tracing::info!(
        history_id = %returned.id.value(),
        user_name = %cmd.user_name,
        book_name = %cmd.book_name,
        "book returned"
    );
    Ok(())
}

/// 貸出中（LOANED）の履歴数を数える
pub async fn count_loaned_books(deps: &ServiceDependencies) -> Result<usize> {
    let mut uow = begin(deps).await?;
    let loaned = uow
        .find_loan_histories_by_status(UserLoanStatus::Loaned)
        .await?;

    tracing::debug!(count = loaned.len(), "counted loaned books");
    Ok(loaned.len())
}

/// 分類ごとの蔵書数を集計する
///
/// 分類の並びは最初に登録された順。
pub async fn book_statistics(deps: &ServiceDependencies) -> Result<Vec<BookStat>> {
    let mut uow = begin(deps).await?;
    let books = uow.find_all_books().await?;

    Ok(domain::statistics::book_statistics(&books))
}
