use crate::interceptor::{Interceptor, InterceptorResult, Next};
use async_trait::async_trait;
use axum::{body::Body, http::Request};
use std::time::Instant;

/// An interceptor that logs request timing and status
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let start = Instant::now();

        tracing::debug!(%method, %uri, "--> request");

        match next.run(request).await {
            Ok(response) => {
                tracing::debug!(
                    %method,
                    %uri,
                    status = %response.status(),
                    elapsed = ?start.elapsed(),
                    "<-- response"
                );
                Ok(response)
            }
            Err(err) => {
                tracing::debug!(%method, %uri, error = %err, elapsed = ?start.elapsed(), "<-- error");
                Err(err)
            }
        }
    }
}
