use crate::ports::{LibraryStore, UnitOfWork};
use std::sync::Arc;

use super::errors::Result;

/// サービスの依存関係
///
/// 暗黙の永続化コンテキストは持たず、ストレージのハンドルを明示的に渡す。
/// 各サービス関数はこのハンドルから作業単位を1つだけ開始する。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub store: Arc<dyn LibraryStore>,
}

impl ServiceDependencies {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }
}

/// 作業単位を開始するヘルパー関数
pub(super) async fn begin(deps: &ServiceDependencies) -> Result<Box<dyn UnitOfWork>> {
    Ok(deps.store.begin().await?)
}
