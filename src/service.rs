use crate::dto::Bulk;
use crate::error::Result;
use crate::options::{DeleteOneOptions, ServiceOptions, UpdateOneOptions};
use crate::query::{FilterParam, ParsedQuery};
use async_trait::async_trait;

/// The six delegated operations every generated route forwards to.
///
/// The generated handlers do nothing besides one call into this trait:
/// query parsing happens in the interceptors, body validation in the
/// validation pipe, and the service owns retrieval and persistence.
///
/// `delete_one` returns `Some(entity)` when the route's `returnDeleted`
/// option asks for the removed entity back (answered as 200), `None`
/// otherwise (answered as 204).
#[async_trait]
pub trait CrudService<T>: Send + Sync + 'static {
    async fn get_many(&self, query: &ParsedQuery, options: &ServiceOptions) -> Result<Vec<T>>;

    async fn get_one(&self, query: &ParsedQuery, options: &ServiceOptions) -> Result<T>;

    async fn create_one(&self, body: T, params: &[FilterParam]) -> Result<T>;

    async fn create_many(&self, bulk: Bulk<T>, params: &[FilterParam]) -> Result<Vec<T>>;

    async fn update_one(
        &self,
        body: T,
        params: &[FilterParam],
        options: &UpdateOneOptions,
    ) -> Result<T>;

    async fn delete_one(
        &self,
        params: &[FilterParam],
        options: &DeleteOneOptions,
    ) -> Result<Option<T>>;
}
