use crate::domain::{Book, BookId, User, UserId, UserLoanHistory, UserLoanStatus};
use crate::ports::{
    BookRepository, LibraryStore as LibraryStoreTrait, StoreError, UnitOfWork,
    UserLoanHistoryRepository, UserRepository, errors::Result,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// インメモリのテーブル群
///
/// `Vec`で保持し、一覧は挿入順で返す。
#[derive(Debug, Clone, Default)]
struct Tables {
    books: Vec<Book>,
    users: Vec<User>,
    loan_histories: Vec<UserLoanHistory>,
}

/// LibraryStoreのインメモリ実装
///
/// 作業単位の開始から終了までテーブル全体のロックを保持するため、
/// 作業単位は直列に実行される。貸出中チェックと保存の間に他の操作が割り込むことはない。
///
/// 同じタスク内で2つ目の作業単位を開始すると、1つ目が破棄されるまで待ち続ける点に注意。
#[derive(Clone, Default)]
pub struct LibraryStore {
    tables: Arc<Mutex<Tables>>,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LibraryStoreTrait for LibraryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let committed = self.tables.clone().lock_owned().await;
        let working = committed.clone();
        Ok(Box::new(MemoryUnitOfWork { committed, working }))
    }
}

/// インメモリの作業単位
///
/// 作業用コピーに書き込み、`commit`で確定済みテーブルへ書き戻す。
/// `commit`せずに破棄すれば作業用コピーごと捨てられる。
struct MemoryUnitOfWork {
    committed: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryUnitOfWork {
            mut committed,
            working,
        } = *self;
        *committed = working;
        Ok(())
    }
}

#[async_trait]
impl BookRepository for MemoryUnitOfWork {
    async fn save_book(&mut self, book: &Book) -> Result<()> {
        let books = &mut self.working.books;
        match books.iter_mut().find(|b| b.id == book.id) {
            Some(existing) => *existing = book.clone(),
            None => books.push(book.clone()),
        }
        Ok(())
    }

    async fn find_book_by_id(&mut self, book_id: BookId) -> Result<Option<Book>> {
        Ok(self.working.books.iter().find(|b| b.id == book_id).cloned())
    }

    async fn find_book_by_name(&mut self, name: &str) -> Result<Option<Book>> {
        Ok(self.working.books.iter().find(|b| b.name == name).cloned())
    }

    async fn find_all_books(&mut self) -> Result<Vec<Book>> {
        Ok(self.working.books.clone())
    }

    async fn delete_all_books(&mut self) -> Result<()> {
        self.working.books.clear();
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUnitOfWork {
    async fn save_user(&mut self, user: &User) -> Result<()> {
        let users = &mut self.working.users;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }

    async fn find_user_by_id(&mut self, user_id: UserId) -> Result<Option<User>> {
        Ok(self.working.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_user_by_name(&mut self, name: &str) -> Result<Option<User>> {
        Ok(self.working.users.iter().find(|u| u.name == name).cloned())
    }

    async fn find_all_users(&mut self) -> Result<Vec<User>> {
        Ok(self.working.users.clone())
    }

    async fn delete_user(&mut self, user_id: UserId) -> Result<()> {
        self.working.users.retain(|u| u.id != user_id);
        self.working.loan_histories.retain(|h| h.user_id != user_id);
        Ok(())
    }

    async fn delete_all_users(&mut self) -> Result<()> {
        self.working.users.clear();
        self.working.loan_histories.clear();
        Ok(())
    }
}

#[async_trait]
impl UserLoanHistoryRepository for MemoryUnitOfWork {
    async fn save_loan_history(&mut self, history: &UserLoanHistory) -> Result<()> {
        // 部分一意インデックス (book_name) WHERE status = 'LOANED' 相当
        let duplicate = history.is_loaned()
            && self
                .working
                .loan_histories
                .iter()
                .any(|h| {
                    h.id != history.id && h.is_loaned() && h.book_name == history.book_name
                });
        if duplicate {
            return Err(StoreError::UniqueViolation(format!(
                "book '{}' already has a loaned history",
                history.book_name
            )));
        }

        let histories = &mut self.working.loan_histories;
        match histories.iter_mut().find(|h| h.id == history.id) {
            Some(existing) => *existing = history.clone(),
            None => histories.push(history.clone()),
        }
        Ok(())
    }

    async fn find_loan_history_by_book_name_and_status(
        &mut self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> Result<Option<UserLoanHistory>> {
        Ok(self
            .working
            .loan_histories
            .iter()
            .find(|h| h.book_name == book_name && h.status == status)
            .cloned())
    }

    async fn find_loan_histories_by_status(
        &mut self,
        status: UserLoanStatus,
    ) -> Result<Vec<UserLoanHistory>> {
        Ok(self
            .working
            .loan_histories
            .iter()
            .filter(|h| h.status == status)
            .cloned()
            .collect())
    }

    async fn find_loan_histories_by_user(
        &mut self,
        user_id: UserId,
    ) -> Result<Vec<UserLoanHistory>> {
        Ok(self
            .working
            .loan_histories
            .iter()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all_loan_histories(&mut self) -> Result<Vec<UserLoanHistory>> {
        Ok(self.working.loan_histories.clone())
    }

    async fn delete_all_loan_histories(&mut self) -> Result<()> {
        self.working.loan_histories.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookType, UserLoanHistoryId, book::register_book, user::register_user};
    use chrono::Utc;

    fn loaned(user: &User, book_name: &str) -> UserLoanHistory {
        UserLoanHistory {
            id: UserLoanHistoryId::new(),
            user_id: user.id,
            book_name: book_name.to_string(),
            status: UserLoanStatus::Loaned,
            loaned_at: Utc::now(),
            returned_at: None,
        }
    }

    #[tokio::test]
    async fn test_commit_makes_writes_visible() {
        let store = LibraryStore::new();
        let book = register_book("A", BookType::Computer).unwrap();

        let mut uow = store.begin().await.unwrap();
        uow.save_book(&book).await.unwrap();
        uow.commit().await.unwrap();

        let mut uow = store.begin().await.unwrap();
        assert_eq!(uow.find_all_books().await.unwrap(), vec![book]);
    }

    #[tokio::test]
    async fn test_drop_without_commit_rolls_back() {
        let store = LibraryStore::new();
        let user = register_user("A", None).unwrap();

        {
            let mut uow = store.begin().await.unwrap();
            uow.save_user(&user).await.unwrap();
            // commitせずに破棄
        }

        let mut uow = store.begin().await.unwrap();
        assert!(uow.find_all_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_user_overwrites_same_id() {
        let store = LibraryStore::new();
        let user = register_user("A", Some(20)).unwrap();
        let renamed = User {
            name: "B".to_string(),
            ..user.clone()
        };

        let mut uow = store.begin().await.unwrap();
        uow.save_user(&user).await.unwrap();
        uow.save_user(&renamed).await.unwrap();

        let users = uow.find_all_users().await.unwrap();
        assert_eq!(users, vec![renamed]);
    }

    #[tokio::test]
    async fn test_delete_user_cascades_loan_histories() {
        let store = LibraryStore::new();
        let a = register_user("A", None).unwrap();
        let b = register_user("B", None).unwrap();

        let mut uow = store.begin().await.unwrap();
        uow.save_all_users(&[a.clone(), b.clone()]).await.unwrap();
        uow.save_all_loan_histories(&[loaned(&a, "本1"), loaned(&b, "本2")])
            .await
            .unwrap();

        uow.delete_user(a.id).await.unwrap();

        assert!(uow.find_user_by_id(a.id).await.unwrap().is_none());
        let remaining = uow.find_all_loan_histories().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_id, b.id);
    }

    #[tokio::test]
    async fn test_second_loaned_history_for_same_book_is_rejected() {
        let store = LibraryStore::new();
        let a = register_user("A", None).unwrap();

        let mut uow = store.begin().await.unwrap();
        uow.save_loan_history(&loaned(&a, "本1")).await.unwrap();

        let result = uow.save_loan_history(&loaned(&a, "本1")).await;
        assert!(matches!(result, Err(StoreError::UniqueViolation(_))));
    }

    #[tokio::test]
    async fn test_returning_history_is_not_a_unique_violation() {
        let store = LibraryStore::new();
        let a = register_user("A", None).unwrap();
        let history = loaned(&a, "本1");

        let mut uow = store.begin().await.unwrap();
        uow.save_loan_history(&history).await.unwrap();

        let returned = UserLoanHistory {
            status: UserLoanStatus::Returned,
            returned_at: Some(Utc::now()),
            ..history.clone()
        };
        uow.save_loan_history(&returned).await.unwrap();
        uow.save_loan_history(&loaned(&a, "本1")).await.unwrap();

        let all = uow.find_all_loan_histories().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].status, UserLoanStatus::Returned);
    }

    #[tokio::test]
    async fn test_find_book_by_name_returns_first_registered() {
        let store = LibraryStore::new();
        let first = register_book("同名", BookType::Computer).unwrap();
        let second = register_book("同名", BookType::Science).unwrap();

        let mut uow = store.begin().await.unwrap();
        uow.save_all_books(&[first.clone(), second]).await.unwrap();

        assert_eq!(uow.find_book_by_name("同名").await.unwrap(), Some(first));
    }
}
