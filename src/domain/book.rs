use serde::{Deserialize, Serialize};

use super::{BookId, BookType, RegisterBookError};

/// Book集約 - 蔵書1冊
///
/// 登録後は変更されない。貸出履歴とは書名の文字列でのみ結び付く。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub book_type: BookType,
}

/// 純粋関数：書籍を登録する
///
/// ビジネスルール：
/// - 書名は空（空白のみを含む）であってはならない
pub fn register_book(name: &str, book_type: BookType) -> Result<Book, RegisterBookError> {
    if name.trim().is_empty() {
        return Err(RegisterBookError::BlankName);
    }

    Ok(Book {
        id: BookId::new(),
        name: name.to_string(),
        book_type,
    })
}
