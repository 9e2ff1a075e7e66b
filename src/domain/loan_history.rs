use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Book, LoanBookError, ReturnBookError, User, UserId, UserLoanHistoryId, UserLoanStatus,
};

/// UserLoanHistory - 1人の利用者による1冊の1回の貸出記録
///
/// 書籍への参照は書名の文字列のみ（外部キーではない）。
/// 同じ書名の LOANED 記録は常に高々1件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLoanHistory {
    pub id: UserLoanHistoryId,

    // 所有者への参照（IDのみ）
    pub user_id: UserId,
    pub book_name: String,

    pub status: UserLoanStatus,
    pub loaned_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl UserLoanHistory {
    pub fn is_loaned(&self) -> bool {
        self.status.is_loaned()
    }
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 同じ書名の貸出中履歴（`active_loan`）があれば貸出不可
/// - 新しい履歴は利用者が所有し、状態はLOANED
///
/// 副作用なし。新しい履歴を返す。保存は呼び出し側の責務。
pub fn loan_book(
    user: &User,
    book: &Book,
    active_loan: Option<&UserLoanHistory>,
    loaned_at: DateTime<Utc>,
) -> Result<UserLoanHistory, LoanBookError> {
    ensure_not_loaned(active_loan)?;

    Ok(UserLoanHistory {
        id: UserLoanHistoryId::new(),
        user_id: user.id,
        book_name: book.name.clone(),
        status: UserLoanStatus::Loaned,
        loaned_at,
        returned_at: None,
    })
}

/// 純粋関数：同じ書名の貸出中履歴がないことを確認する
pub fn ensure_not_loaned(active_loan: Option<&UserLoanHistory>) -> Result<(), LoanBookError> {
    if active_loan.is_some_and(UserLoanHistory::is_loaned) {
        return Err(LoanBookError::AlreadyLoaned);
    }
    Ok(())
}

/// 純粋関数：書籍を返却する
///
/// LOANED → RETURNED の一方向の遷移。返却済みの履歴を再度返却することはできない。
pub fn return_book(
    history: &UserLoanHistory,
    returned_at: DateTime<Utc>,
) -> Result<UserLoanHistory, ReturnBookError> {
    if !history.is_loaned() {
        return Err(ReturnBookError::AlreadyReturned);
    }

    Ok(UserLoanHistory {
        status: UserLoanStatus::Returned,
        returned_at: Some(returned_at),
        ..history.clone()
    })
}

/// 利用者の履歴から、指定した書名の貸出中履歴を探す
pub fn find_active_loan<'a>(
    histories: &'a [UserLoanHistory],
    book_name: &str,
) -> Option<&'a UserLoanHistory> {
    histories
        .iter()
        .find(|history| history.is_loaned() && history.book_name == book_name)
}
