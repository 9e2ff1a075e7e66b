use crate::domain::{
    Book, BookId, BookType, User, UserId, UserLoanHistory, UserLoanHistoryId, UserLoanStatus,
};
use crate::ports::{
    BookRepository, LibraryStore as LibraryStoreTrait, StoreError, UnitOfWork,
    UserLoanHistoryRepository, UserRepository, errors::Result,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};
use std::str::FromStr;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(db_err.message().to_string());
            }
        }
        StoreError::Backend(Box::new(err))
    }
}

/// PostgreSQLの行データをBookに変換する
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    let book_type_str: &str = row.get("book_type");
    let book_type = BookType::from_str(book_type_str).map_err(StoreError::DataIntegrity)?;

    Ok(Book {
        id: BookId::from_uuid(row.get("id")),
        name: row.get("name"),
        book_type,
    })
}

/// PostgreSQLの行データをUserに変換する
///
/// ageはBIGINT（i64）で保存されているため、u32への変換でエラーハンドリングを行う。
fn map_row_to_user(row: &PgRow) -> Result<User> {
    let age: Option<i64> = row.get("age");
    let age = age
        .map(|value| {
            u32::try_from(value)
                .map_err(|_| StoreError::DataIntegrity(format!("age out of range: {}", value)))
        })
        .transpose()?;

    Ok(User {
        id: UserId::from_uuid(row.get("id")),
        name: row.get("name"),
        age,
    })
}

/// PostgreSQLの行データをUserLoanHistoryに変換する
fn map_row_to_loan_history(row: &PgRow) -> Result<UserLoanHistory> {
    let status_str: &str = row.get("status");
    let status = UserLoanStatus::from_str(status_str).map_err(StoreError::DataIntegrity)?;

    Ok(UserLoanHistory {
        id: UserLoanHistoryId::from_uuid(row.get("id")),
        user_id: UserId::from_uuid(row.get("user_id")),
        book_name: row.get("book_name"),
        status,
        loaned_at: row.get("loaned_at"),
        returned_at: row.get("returned_at"),
    })
}

/// u32の全範囲をBIGINTにそのまま保存する
fn age_to_column(age: Option<u32>) -> Option<i64> {
    age.map(i64::from)
}

/// LibraryStoreのPostgreSQL実装
///
/// 作業単位ごとにトランザクションを1つ開始する。
/// 貸出中の重複は部分一意インデックス（uq_user_loan_history_loaned_book）で防ぐ。
#[derive(Clone)]
pub struct LibraryStore {
    pool: PgPool,
}

impl LibraryStore {
    /// PostgreSQLコネクションプールから新しいLibraryStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// マイグレーションを適用する
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(Box::new(e)))
    }
}

#[async_trait]
impl LibraryStoreTrait for LibraryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresUnitOfWork { tx }))
    }
}

/// トランザクションを保持する作業単位
///
/// `commit`されずに破棄されるとsqlxがトランザクションをロールバックする。
struct PostgresUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl BookRepository for PostgresUnitOfWork {
    async fn save_book(&mut self, book: &Book) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO books (id, name, book_type)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                book_type = EXCLUDED.book_type
            "#,
        )
        .bind(book.id.value())
        .bind(&book.name)
        .bind(book.book_type.as_str())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn find_book_by_id(&mut self, book_id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query("SELECT id, name, book_type FROM books WHERE id = $1")
            .bind(book_id.value())
            .fetch_optional(&mut *self.tx)
            .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn find_book_by_name(&mut self, name: &str) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, book_type
            FROM books
            WHERE name = $1
            ORDER BY seq ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn find_all_books(&mut self) -> Result<Vec<Book>> {
        let rows = sqlx::query("SELECT id, name, book_type FROM books ORDER BY seq ASC")
            .fetch_all(&mut *self.tx)
            .await?;

        rows.iter().map(map_row_to_book).collect()
    }

    async fn delete_all_books(&mut self) -> Result<()> {
        sqlx::query("DELETE FROM books")
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUnitOfWork {
    async fn save_user(&mut self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, age)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                age = EXCLUDED.age
            "#,
        )
        .bind(user.id.value())
        .bind(&user.name)
        .bind(age_to_column(user.age))
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn find_user_by_id(&mut self, user_id: UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, name, age FROM users WHERE id = $1")
            .bind(user_id.value())
            .fetch_optional(&mut *self.tx)
            .await?;

        row.as_ref().map(map_row_to_user).transpose()
    }

    async fn find_user_by_name(&mut self, name: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, age
            FROM users
            WHERE name = $1
            ORDER BY seq ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(map_row_to_user).transpose()
    }

    async fn find_all_users(&mut self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT id, name, age FROM users ORDER BY seq ASC")
            .fetch_all(&mut *self.tx)
            .await?;

        rows.iter().map(map_row_to_user).collect()
    }

    /// 貸出履歴はON DELETE CASCADEで削除される
    async fn delete_user(&mut self, user_id: UserId) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.value())
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn delete_all_users(&mut self) -> Result<()> {
        sqlx::query("DELETE FROM users")
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserLoanHistoryRepository for PostgresUnitOfWork {
    async fn save_loan_history(&mut self, history: &UserLoanHistory) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_loan_history (
                id,
                user_id,
                book_name,
                status,
                loaned_at,
                returned_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id)
            DO UPDATE SET
                status = EXCLUDED.status,
                returned_at = EXCLUDED.returned_at
            "#,
        )
        .bind(history.id.value())
        .bind(history.user_id.value())
        .bind(&history.book_name)
        .bind(history.status.as_str())
        .bind(history.loaned_at)
        .bind(history.returned_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn find_loan_history_by_book_name_and_status(
        &mut self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> Result<Option<UserLoanHistory>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, book_name, status, loaned_at, returned_at
            FROM user_loan_history
            WHERE book_name = $1 AND status = $2
            ORDER BY seq ASC
            LIMIT 1
            "#,
        )
        .bind(book_name)
        .bind(status.as_str())
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(map_row_to_loan_history).transpose()
    }

    async fn find_loan_histories_by_status(
        &mut self,
        status: UserLoanStatus,
    ) -> Result<Vec<UserLoanHistory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, book_name, status, loaned_at, returned_at
            FROM user_loan_history
            WHERE status = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&mut *self.tx)
        .await?;

        rows.iter().map(map_row_to_loan_history).collect()
    }

    async fn find_loan_histories_by_user(
        &mut self,
        user_id: UserId,
    ) -> Result<Vec<UserLoanHistory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, book_name, status, loaned_at, returned_at
            FROM user_loan_history
            WHERE user_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&mut *self.tx)
        .await?;

        rows.iter().map(map_row_to_loan_history).collect()
    }

    async fn find_all_loan_histories(&mut self) -> Result<Vec<UserLoanHistory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, book_name, status, loaned_at, returned_at
            FROM user_loan_history
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        rows.iter().map(map_row_to_loan_history).collect()
    }

    async fn delete_all_loan_histories(&mut self) -> Result<()> {
        sqlx::query("DELETE FROM user_loan_history")
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }
}
