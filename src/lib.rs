//! # Crudestra
//!
//! Composable CRUD route generation for axum resource controllers.
//!
//! Crudestra turns one options record plus a service implementation into
//! the six classic CRUD endpoints, with per-route interceptor chains,
//! group-scoped body validation, and API documentation metadata — all
//! recorded in an explicit, inspectable route table instead of hidden
//! framework reflection.
//!
//! ## Features
//!
//! - **Fixed route set**: list, get-one, create-one, bulk-create, update,
//!   delete, with conventional paths and verbs
//! - **Interceptors**: a params-materialization interceptor and a RESTful
//!   query interceptor built in, user interceptors appended per route
//! - **Overrides**: replace any generated route with your own handler
//!   while inheriting its path, verb, action tag, and interceptor chain
//! - **Validation pipes**: CREATE/UPDATE group validation on request
//!   bodies, with an explicit off switch
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crudestra::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Widget {
//!     id: Option<i64>,
//!     name: String,
//! }
//!
//! impl CrudDto for Widget {
//!     fn name() -> &'static str {
//!         "Widget"
//!     }
//! }
//!
//! struct WidgetService; // implements CrudService<Widget>
//! # #[async_trait]
//! # impl CrudService<Widget> for WidgetService {
//! #     async fn get_many(&self, _: &ParsedQuery, _: &ServiceOptions) -> crudestra::Result<Vec<Widget>> { Ok(vec![]) }
//! #     async fn get_one(&self, _: &ParsedQuery, _: &ServiceOptions) -> crudestra::Result<Widget> { Err(CrudError::NotFound) }
//! #     async fn create_one(&self, body: Widget, _: &[FilterParam]) -> crudestra::Result<Widget> { Ok(body) }
//! #     async fn create_many(&self, bulk: Bulk<Widget>, _: &[FilterParam]) -> crudestra::Result<Vec<Widget>> { Ok(bulk.bulk) }
//! #     async fn update_one(&self, body: Widget, _: &[FilterParam], _: &UpdateOneOptions) -> crudestra::Result<Widget> { Ok(body) }
//! #     async fn delete_one(&self, _: &[FilterParam], _: &DeleteOneOptions) -> crudestra::Result<Option<Widget>> { Ok(None) }
//! # }
//!
//! #[tokio::main]
//! async fn main() {
//!     let crud = CrudBuilder::<Widget>::new("/widgets", Arc::new(WidgetService))
//!         .options(CrudOptions::default())
//!         .build();
//!
//!     let app: Router = Router::new().merge(crud.into_router());
//!
//!     // Serve your app...
//! }
//! ```

pub mod builder;
pub mod docs;
pub mod dto;
pub mod error;
pub mod interceptor;
pub mod options;
pub mod pipe;
pub mod query;
pub mod routes;
pub mod service;

// Re-export core types
pub use builder::{CrudBuilder, CrudRouter};
pub use dto::{Bulk, CrudDto, ValidationGroup};
pub use error::{CrudError, Result};
pub use options::{
    CrudOptions, DeleteOneOptions, ParamType, RouteOptions, RoutesOptions, ServiceOptions,
    UpdateOneOptions, ValidationMode, normalize, resolve_slug,
};
pub use routes::overrides::OverrideRoute;
pub use routes::{CrudAction, RouteEntry, RouteKind, RouteTable};
pub use service::CrudService;

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use crudestra::prelude::*;
/// ```
pub mod prelude {
    pub use crate::builder::{CrudBuilder, CrudRouter};
    pub use crate::docs::{ApiOperation, RequestShape, ResponseShape};
    pub use crate::dto::{Bulk, CrudDto, ValidationGroup};
    pub use crate::error::{CrudError, Result};
    pub use crate::interceptor::logging::LoggingInterceptor;
    pub use crate::interceptor::{Interceptor, InterceptorResult, Next};
    pub use crate::options::{
        CrudOptions, DeleteOneOptions, ParamType, RouteOptions, RoutesOptions, ServiceOptions,
        UpdateOneOptions, ValidationMode,
    };
    pub use crate::pipe::validation::ValidationPipe;
    pub use crate::pipe::{Pipe, PipeError, PipeResult};
    pub use crate::query::{
        CondOperator, FilterParam, ParamValue, ParsedParams, ParsedQuery, QueryFilter, QuerySort,
        SortOrder,
    };
    pub use crate::routes::overrides::OverrideRoute;
    pub use crate::routes::{CrudAction, RouteEntry, RouteKind, RouteTable};
    pub use crate::service::CrudService;
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        body::Body,
        http::{Request, StatusCode},
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
