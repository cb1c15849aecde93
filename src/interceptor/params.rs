use crate::interceptor::{Interceptor, InterceptorResult, Next};
use crate::options::{CrudOptions, ParamType, ServiceOptions};
use crate::query::{CondOperator, FilterParam, ParsedParams};
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::response::IntoResponse;
use axum::{body::Body, http::Request};
use std::collections::HashMap;
use std::sync::Arc;

/// Materializes the declared path parameters into typed equality filters
/// and places them, together with the controller-level service options,
/// into the request extensions for the forwarding handler.
///
/// Runs first on every generated route. A segment that fails to parse as
/// its declared type short-circuits the chain with a 400.
pub struct ParamsInterceptor {
    params: Arc<Vec<(String, ParamType)>>,
    service_options: ServiceOptions,
}

impl ParamsInterceptor {
    pub fn new(options: &CrudOptions) -> Self {
        Self {
            params: Arc::new(options.params.clone()),
            service_options: options.service_options.clone(),
        }
    }
}

#[async_trait]
impl Interceptor for ParamsInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let (mut parts, body) = request.into_parts();

        let raw: HashMap<String, String> =
            match Path::<HashMap<String, String>>::from_request_parts(&mut parts, &()).await {
                Ok(Path(map)) => map,
                // Routes without path segments ("/", "/bulk") carry none.
                Err(_) => HashMap::new(),
            };

        let mut filters = Vec::new();
        for (name, param_type) in self.params.iter() {
            if let Some(raw_value) = raw.get(name) {
                match param_type.parse(name, raw_value) {
                    Ok(value) => filters.push(FilterParam {
                        field: name.clone(),
                        operator: CondOperator::Eq,
                        value,
                    }),
                    Err(err) => return Ok(err.into_response()),
                }
            }
        }

        parts.extensions.insert(ParsedParams(filters));
        parts.extensions.insert(self.service_options.clone());

        next.run(Request::from_parts(parts, body)).await
    }
}
