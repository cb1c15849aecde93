use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;

pub mod chain;
pub mod logging;
pub mod params;
pub mod query;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// standard return type for Interceptors
pub type InterceptorResult = Result<Response, InterceptorError>;

/// A type-erased error for interceptors
pub type InterceptorError = Box<dyn std::error::Error + Send + Sync>;

/// Represents the rest of the chain: the interceptors after this one,
/// ending in the route handler.
pub struct Next {
    run: Box<dyn FnOnce(Request<Body>) -> BoxFuture<InterceptorResult> + Send>,
}

impl Next {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> BoxFuture<InterceptorResult> + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the rest of the chain
    pub async fn run(self, request: Request<Body>) -> InterceptorResult {
        (self.run)(request).await
    }
}

/// The Interceptor trait
///
/// Interceptors can inspect/modify the request before it reaches the route
/// handler, and inspect/modify the response after the handler returns. The
/// generated CRUD routes carry a parameter-materialization interceptor
/// first, a query interceptor on the read routes, then any user-supplied
/// interceptors from the route's options, in declaration order.
///
/// # Example
/// ```ignore
/// struct AuditInterceptor;
///
/// #[async_trait]
/// impl Interceptor for AuditInterceptor {
///     async fn intercept(&self, req: Request<Body>, next: Next) -> InterceptorResult {
///         let action = req.extensions().get::<CrudAction>().copied();
///         let res = next.run(req).await?;
///         tracing::info!(?action, status = %res.status(), "crud request");
///         Ok(res)
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult;
}
