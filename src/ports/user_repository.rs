use crate::domain::{User, UserId};
use async_trait::async_trait;

use super::errors::Result;

/// 利用者リポジトリポート
#[async_trait]
pub trait UserRepository: Send {
    /// 利用者を保存する（同じIDがあれば上書き）
    ///
    /// 名前変更もこの操作で反映される。
    async fn save_user(&mut self, user: &User) -> Result<()>;

    async fn save_all_users(&mut self, users: &[User]) -> Result<()> {
        for user in users {
            self.save_user(user).await?;
        }
        Ok(())
    }

    async fn find_user_by_id(&mut self, user_id: UserId) -> Result<Option<User>>;

    /// 名前で利用者を検索する（同名が複数あれば最初に登録されたもの）
    async fn find_user_by_name(&mut self, name: &str) -> Result<Option<User>>;

    async fn find_all_users(&mut self) -> Result<Vec<User>>;

    /// 利用者を削除する
    ///
    /// 利用者が所有する貸出履歴もあわせて削除する。
    async fn delete_user(&mut self, user_id: UserId) -> Result<()>;

    /// すべての利用者（と貸出履歴）を削除する
    async fn delete_all_users(&mut self) -> Result<()>;
}
