use crate::application::library::LibraryApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LibraryApplicationError);

impl From<LibraryApplicationError> for ApiError {
    fn from(err: LibraryApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let (status, error_type, message) = match self.0 {
            // 400 Bad Request - 入力値の不正
            LibraryApplicationError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // 404 Not Found - 参照先が存在しない
            LibraryApplicationError::BookNotFound(_) => {
                (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", message)
            }
            LibraryApplicationError::UserNotFound(_) => {
                (StatusCode::NOT_FOUND, "USER_NOT_FOUND", message)
            }
            LibraryApplicationError::LoanNotFound(_) => {
                (StatusCode::NOT_FOUND, "LOAN_NOT_FOUND", message)
            }

            // 409 Conflict - 既に貸出中
            LibraryApplicationError::BookAlreadyLoaned(_) => {
                (StatusCode::CONFLICT, "BOOK_ALREADY_LOANED", message)
            }

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LibraryApplicationError::StoreError(ref e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Failed to access storage".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
