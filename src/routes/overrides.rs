use crate::interceptor::Interceptor;
use crate::routes::{BoxFuture, HandlerFn, OverrideBinding, RouteKind, RouteTable};
use axum::response::{IntoResponse, Response};
use axum::{body::Body, http::Request};
use std::future::Future;
use std::sync::Arc;

/// A user handler replacing a generated base route's binding.
///
/// The target defaults to the method's own name with `Base` appended, so
/// `OverrideRoute::new("createOne", ..)` overrides `createOneBase`. The
/// override keeps the base route's path, verb, action tag, and interceptor
/// chain, with its own interceptors appended.
pub struct OverrideRoute {
    method_name: String,
    target: Option<String>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    handler: HandlerFn,
}

impl OverrideRoute {
    pub fn new<F, Fut, R>(method_name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        let handler: HandlerFn = Arc::new(move |req: Request<Body>| -> BoxFuture<Response> {
            let fut = handler(req);
            Box::pin(async move { fut.await.into_response() })
        });
        Self {
            method_name: method_name.into(),
            target: None,
            interceptors: vec![],
            handler,
        }
    }

    /// Explicitly name the base route to override instead of relying on
    /// the `<method name>Base` convention.
    pub fn target(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self
    }

    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    fn resolved_target(&self) -> String {
        self.target
            .clone()
            .unwrap_or_else(|| format!("{}Base", self.method_name))
    }
}

/// Re-points every matching override onto its base route. An override
/// whose target names no installed, enabled route is skipped without
/// error.
pub(crate) fn apply(table: &mut RouteTable, overrides: Vec<OverrideRoute>) {
    for route in overrides {
        let target = route.resolved_target();

        let Some(kind) = RouteKind::from_base_name(&target) else {
            tracing::warn!(
                method = route.method_name,
                target,
                "override target is not a base route name, ignoring"
            );
            continue;
        };

        let entry = table.get_mut(kind);
        let enabled = entry.enabled;
        let Some(registration) = entry.registration.as_mut().filter(|_| enabled) else {
            tracing::warn!(
                method = route.method_name,
                target,
                "override target is not an enabled route, ignoring"
            );
            continue;
        };

        // Base interceptors first, then the override's own. No dedup.
        let mut interceptors = registration.interceptors.clone();
        interceptors.extend(route.interceptors);

        registration.override_binding = Some(OverrideBinding {
            method_name: route.method_name.clone(),
            interceptors,
            handler: route.handler,
        });
        entry.overridden = true;

        tracing::debug!(
            method = route.method_name,
            route = kind.base_name(),
            "override bound to base route"
        );
    }
}
