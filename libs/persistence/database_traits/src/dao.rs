use async_trait::async_trait;

/// Entity-level persistence contract shared by every store backend.
///
/// `add` and `update` report `Ok(false)` when the write was rejected
/// (constraint violation, missing row) and `Err` when the backend itself
/// failed. `find_by_id` reports absence as `Ok(None)`.
#[async_trait]
pub trait GenericDao: Send + Sync {
    type Model: Send + Sync + 'static;
    type ID: Copy + Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn add(&self, model: &Self::Model) -> Result<bool, Self::Error>;

    async fn delete(&self, id: Self::ID) -> Result<bool, Self::Error>;

    async fn all(&self) -> Result<Vec<Self::Model>, Self::Error>;

    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Option<Self::Model>, Self::Error>;

    async fn update(&self, model: &Self::Model) -> Result<bool, Self::Error>;
}
