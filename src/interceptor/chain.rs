use crate::error::CrudError;
use crate::interceptor::{BoxFuture, Interceptor, InterceptorResult, Next};
use crate::routes::HandlerFn;
use axum::{body::Body, http::Request, response::IntoResponse, response::Response};
use std::sync::Arc;

/// Runs `request` through `interceptors` in order, ending in `handler`.
///
/// The chain is built back to front: the handler becomes the innermost
/// `Next`, then each interceptor wraps the chain built so far, so
/// `interceptors[0]` ends up outermost.
pub async fn execute(
    interceptors: &[Arc<dyn Interceptor>],
    request: Request<Body>,
    handler: HandlerFn,
) -> Response {
    let mut next = Next::new(move |req: Request<Body>| -> BoxFuture<InterceptorResult> {
        let handler = handler.clone();
        Box::pin(async move { Ok(handler(req).await) })
    });

    for interceptor in interceptors.iter().rev() {
        let interceptor = interceptor.clone();
        let inner = next;
        next = Next::new(move |req: Request<Body>| -> BoxFuture<InterceptorResult> {
            Box::pin(async move { interceptor.intercept(req, inner).await })
        });
    }

    match next.run(request).await {
        Ok(response) => response,
        Err(err) => CrudError::Interceptor(err.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::sync::Mutex;

    struct Recording {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Interceptor for Recording {
        async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
            self.log.lock().unwrap().push(self.label);
            next.run(request).await
        }
    }

    fn noop_handler() -> HandlerFn {
        Arc::new(|_req: Request<Body>| -> BoxFuture<Response> {
            Box::pin(async { StatusCode::OK.into_response() })
        })
    }

    #[tokio::test]
    async fn interceptors_run_in_declaration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let interceptors: Vec<Arc<dyn Interceptor>> = vec![
            Arc::new(Recording { label: "first", log: log.clone() }),
            Arc::new(Recording { label: "second", log: log.clone() }),
        ];

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = execute(&interceptors, request, noop_handler()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn empty_chain_calls_the_handler_directly() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = execute(&[], request, noop_handler()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    struct Failing;

    #[async_trait]
    impl Interceptor for Failing {
        async fn intercept(&self, _request: Request<Body>, _next: Next) -> InterceptorResult {
            Err("boom".into())
        }
    }

    #[tokio::test]
    async fn interceptor_errors_become_500_responses() {
        let interceptors: Vec<Arc<dyn Interceptor>> = vec![Arc::new(Failing)];
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = execute(&interceptors, request, noop_handler()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
