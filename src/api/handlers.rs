use crate::application::library::{
    ServiceDependencies, book_statistics as execute_book_statistics,
    count_loaned_books as execute_count_loaned_books, delete_user as execute_delete_user,
    list_users as execute_list_users, loan_book as execute_loan_book,
    register_book as execute_register_book, register_user as execute_register_user,
    rename_user as execute_rename_user, return_book as execute_return_book,
    user_loan_report as execute_user_loan_report,
};
use crate::domain::commands::{
    BookLoanRequest, BookRequest, BookReturnRequest, UserCreateRequest, UserUpdateRequest,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{BookStatResponse, DeleteUserQuery, IdResponse, UserLoanHistoryResponse, UserResponse},
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Book handlers
// ============================================================================

/// POST /book - 書籍を登録
pub async fn register_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let book_id = execute_register_book(&state.service_deps, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(IdResponse {
            id: book_id.value(),
        }),
    ))
}

/// POST /book/loan - 書籍を貸出
///
/// 同じ書名の書籍が貸出中であれば409を返す。
pub async fn loan_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookLoanRequest>,
) -> Result<StatusCode, ApiError> {
    execute_loan_book(&state.service_deps, req).await?;
    Ok(StatusCode::OK)
}

/// PUT /book/return - 書籍を返却
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookReturnRequest>,
) -> Result<StatusCode, ApiError> {
    execute_return_book(&state.service_deps, req).await?;
    Ok(StatusCode::OK)
}

/// GET /book/loan - 貸出中の冊数
pub async fn count_loaned_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<usize>, ApiError> {
    let count = execute_count_loaned_books(&state.service_deps).await?;
    Ok(Json(count))
}

/// GET /book/stat - 分類ごとの蔵書数
pub async fn book_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookStatResponse>>, ApiError> {
    let stats = execute_book_statistics(&state.service_deps).await?;
    Ok(Json(stats.into_iter().map(BookStatResponse::from).collect()))
}

// ============================================================================
// User handlers
// ============================================================================

/// POST /user - 利用者を登録
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserCreateRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let user_id = execute_register_user(&state.service_deps, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(IdResponse {
            id: user_id.value(),
        }),
    ))
}

/// GET /user - 利用者一覧
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = execute_list_users(&state.service_deps).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT /user - 利用者の名前を変更
pub async fn rename_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    execute_rename_user(&state.service_deps, req).await?;
    Ok(StatusCode::OK)
}

/// DELETE /user?name= - 利用者を削除
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeleteUserQuery>,
) -> Result<StatusCode, ApiError> {
    execute_delete_user(&state.service_deps, &query.name).await?;
    Ok(StatusCode::OK)
}

/// GET /user/loan - 利用者ごとの貸出履歴
pub async fn user_loan_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserLoanHistoryResponse>>, ApiError> {
    let report = execute_user_loan_report(&state.service_deps).await?;
    Ok(Json(
        report
            .into_iter()
            .map(UserLoanHistoryResponse::from)
            .collect(),
    ))
}
