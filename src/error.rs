use thiserror::Error;

/// 文档存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid document path `{0}`")]
    InvalidPath(String),
}

/// 业务层错误
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 存储读写失败，不重试，直接上抛
    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    #[error("invalid order item: {0}")]
    InvalidOrderItem(String),
}
