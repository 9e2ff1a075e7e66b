use serde::{Deserialize, Serialize};

use super::{RegisterUserError, UserId};

/// User集約 - 図書館の利用者
///
/// 貸出履歴（UserLoanHistory）を所有する。履歴側が`user_id`で所有者を参照し、
/// 利用者の削除時には履歴もまとめて削除される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// 年齢（任意）。型により負の値は表現できない。
    pub age: Option<u32>,
}

/// 純粋関数：利用者を登録する
pub fn register_user(name: &str, age: Option<u32>) -> Result<User, RegisterUserError> {
    if name.trim().is_empty() {
        return Err(RegisterUserError::BlankName);
    }

    Ok(User {
        id: UserId::new(),
        name: name.to_string(),
        age,
    })
}

/// 純粋関数：利用者の名前を変更する
///
/// IDと年齢は保持される。所有する貸出履歴はIDで結び付いているため影響を受けない。
pub fn rename_user(user: &User, new_name: &str) -> Result<User, RegisterUserError> {
    if new_name.trim().is_empty() {
        return Err(RegisterUserError::BlankName);
    }

    Ok(User {
        name: new_name.to_string(),
        ..user.clone()
    })
}
