use crate::domain::{UserId, UserLoanHistory, UserLoanStatus};
use async_trait::async_trait;

use super::errors::Result;

/// 貸出履歴リポジトリポート
#[async_trait]
pub trait UserLoanHistoryRepository: Send {
    /// 貸出履歴を保存する（同じIDがあれば状態を上書き）
    ///
    /// 同じ書名のLOANED履歴が別に存在する場合は
    /// `StoreError::UniqueViolation`を返さなければならない。
    async fn save_loan_history(&mut self, history: &UserLoanHistory) -> Result<()>;

    async fn save_all_loan_histories(&mut self, histories: &[UserLoanHistory]) -> Result<()> {
        for history in histories {
            self.save_loan_history(history).await?;
        }
        Ok(())
    }

    /// 書名と状態で貸出履歴を1件検索する
    async fn find_loan_history_by_book_name_and_status(
        &mut self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> Result<Option<UserLoanHistory>>;

    async fn find_loan_histories_by_status(
        &mut self,
        status: UserLoanStatus,
    ) -> Result<Vec<UserLoanHistory>>;

    /// 利用者が所有する貸出履歴を取得する
    async fn find_loan_histories_by_user(
        &mut self,
        user_id: UserId,
    ) -> Result<Vec<UserLoanHistory>>;

    async fn find_all_loan_histories(&mut self) -> Result<Vec<UserLoanHistory>>;

    async fn delete_all_loan_histories(&mut self) -> Result<()>;
}
