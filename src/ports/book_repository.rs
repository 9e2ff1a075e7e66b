use crate::domain::{Book, BookId};
use async_trait::async_trait;

use super::errors::Result;

/// 書籍リポジトリポート
///
/// 一覧系の操作は登録順（挿入順）で返す。統計の並び順はこれに依存する。
#[async_trait]
pub trait BookRepository: Send {
    /// 書籍を保存する（同じIDがあれば上書き）
    async fn save_book(&mut self, book: &Book) -> Result<()>;

    async fn save_all_books(&mut self, books: &[Book]) -> Result<()> {
        for book in books {
            self.save_book(book).await?;
        }
        Ok(())
    }

    async fn find_book_by_id(&mut self, book_id: BookId) -> Result<Option<Book>>;

    /// 書名で書籍を検索する
    ///
    /// 同名の書籍が複数ある場合は最初に登録されたものを返す。
    async fn find_book_by_name(&mut self, name: &str) -> Result<Option<Book>>;

    async fn find_all_books(&mut self) -> Result<Vec<Book>>;

    async fn delete_all_books(&mut self) -> Result<()>;
}
