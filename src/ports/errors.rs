use thiserror::Error;

/// ストレージポートのエラー
///
/// アダプター固有のエラーはここに分類してからアプリケーション層へ渡す。
#[derive(Debug, Error)]
pub enum StoreError {
    /// 一意制約違反（例: 同じ書名の貸出中履歴が既に存在する）
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// 保存済みデータがドメインの型に変換できない
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// その他のバックエンドのエラー
    #[error("Storage backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// ストレージポートの Result型
pub type Result<T> = std::result::Result<T, StoreError>;
