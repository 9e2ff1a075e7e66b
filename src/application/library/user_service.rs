use crate::domain::{
    self, RegisterUserError, User, UserId,
    commands::{UserCreateRequest, UserUpdateRequest},
    statistics::UserLoanReport,
};
use crate::ports::{UnitOfWork, UserLoanHistoryRepository, UserRepository};

use super::dependencies::{ServiceDependencies, begin};
use super::errors::{LibraryApplicationError, Result};

fn blank_name_error(e: RegisterUserError) -> LibraryApplicationError {
    match e {
        RegisterUserError::BlankName => {
            LibraryApplicationError::Validation("user name must not be blank".to_string())
        }
    }
}

/// 利用者を登録する
pub async fn register_user(deps: &ServiceDependencies, cmd: UserCreateRequest) -> Result<UserId> {
    let user = domain::user::register_user(&cmd.name, cmd.age).map_err(blank_name_error)?;

    let mut uow = begin(deps).await?;
    uow.save_user(&user).await?;
    uow.commit().await?;

    tracing::info!(user_id = %user.id.value(), name = %user.name, "user registered");
    Ok(user.id)
}

/// すべての利用者を取得する
pub async fn list_users(deps: &ServiceDependencies) -> Result<Vec<User>> {
    let mut uow = begin(deps).await?;
    Ok(uow.find_all_users().await?)
}

/// 利用者の名前を変更する
///
/// IDと所有する貸出履歴はそのまま保持される。
pub async fn rename_user(deps: &ServiceDependencies, cmd: UserUpdateRequest) -> Result<()> {
    let user_id = UserId::from_uuid(cmd.id);
    let mut uow = begin(deps).await?;

    let user = uow
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| LibraryApplicationError::UserNotFound(cmd.id.to_string()))?;

    let renamed = domain::user::rename_user(&user, &cmd.new_name).map_err(blank_name_error)?;

    uow.save_user(&renamed).await?;
    uow.commit().await?;

    tracing::info!(
        user_id = %user_id.value(),
        old_name = %user.name,
        new_name = %renamed.name,
        "user renamed"
    );
    Ok(())
}

/// 名前を指定して利用者を削除する
///
/// 利用者が所有する貸出履歴もあわせて削除される。
pub async fn delete_user(deps: &ServiceDependencies, name: &str) -> Result<()> {
    let mut uow = begin(deps).await?;

    let user = uow
        .find_user_by_name(name)
        .await?
        .ok_or_else(|| LibraryApplicationError::UserNotFound(name.to_string()))?;

    uow.delete_user(user.id).await?;
    uow.commit().await?;

    tracing::info!(user_id = %user.id.value(), name = %name, "user deleted");
    Ok(())
}

/// 利用者ごとの貸出履歴レポートを取得する
///
/// 履歴のない利用者も空のリストで含まれる。
pub async fn user_loan_report(deps: &ServiceDependencies) -> Result<Vec<UserLoanReport>> {
    let mut uow = begin(deps).await?;
    let users = uow.find_all_users().await?;
    let histories = uow.find_all_loan_histories().await?;

    Ok(domain::statistics::user_loan_report(&users, &histories))
}
