use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    BookType, User, UserLoanStatus,
    statistics::{BookStat, LoanRecord, UserLoanReport},
};

/// 利用者削除のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    pub name: String,
}

/// 登録結果レスポンス（POST /book, POST /user）
#[derive(Debug, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: Uuid,
}

/// 分類別蔵書数レスポンス（GET /book/stat）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookStatResponse {
    #[serde(rename = "type")]
    pub book_type: BookType,
    pub count: i64,
}

impl From<BookStat> for BookStatResponse {
    fn from(stat: BookStat) -> Self {
        Self {
            book_type: stat.book_type,
            count: stat.count,
        }
    }
}

/// 利用者レスポンス（GET /user）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub age: Option<u32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            name: user.name,
            age: user.age,
        }
    }
}

/// 利用者ごとの貸出履歴レスポンス（GET /user/loan）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoanHistoryResponse {
    pub name: String,
    pub books: Vec<BookHistoryResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookHistoryResponse {
    pub name: String,
    pub status: UserLoanStatus,
}

impl From<LoanRecord> for BookHistoryResponse {
    fn from(record: LoanRecord) -> Self {
        Self {
            name: record.name,
            status: record.status,
        }
    }
}

impl From<UserLoanReport> for UserLoanHistoryResponse {
    fn from(report: UserLoanReport) -> Self {
        Self {
            name: report.name,
            books: report
                .books
                .into_iter()
                .map(BookHistoryResponse::from)
                .collect(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
