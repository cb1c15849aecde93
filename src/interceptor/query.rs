use crate::interceptor::{Interceptor, InterceptorResult, Next};
use crate::query::{ParsedParams, ParsedQuery, QueryFilter};
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::response::IntoResponse;
use axum::{body::Body, http::Request};

/// Parses the RESTful query string on the read routes and merges the
/// path-derived filters in, so `getOne` receives its id as a query filter
/// the same way `getMany` receives user filters.
///
/// Runs after `ParamsInterceptor`, which must already have materialized
/// `ParsedParams`.
#[derive(Clone, Default)]
pub struct QueryInterceptor;

#[async_trait]
impl Interceptor for QueryInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let (mut parts, body) = request.into_parts();

        let pairs: Vec<(String, String)> =
            match Query::<Vec<(String, String)>>::from_request_parts(&mut parts, &()).await {
                Ok(Query(pairs)) => pairs,
                Err(rejection) => return Ok(rejection.into_response()),
            };

        let mut query = match ParsedQuery::from_pairs(&pairs) {
            Ok(query) => query,
            Err(err) => return Ok(err.into_response()),
        };

        if let Some(params) = parts.extensions.get::<ParsedParams>() {
            query.filter.extend(params.0.iter().map(|param| QueryFilter {
                field: param.field.clone(),
                operator: param.operator,
                value: Some(param.value.to_string()),
            }));
        }

        parts.extensions.insert(query);

        next.run(Request::from_parts(parts, body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::BoxFuture;
    use crate::query::{CondOperator, FilterParam, ParamValue};
    use axum::http::StatusCode;

    fn capture_query_next() -> (Next, std::sync::Arc<std::sync::Mutex<Option<ParsedQuery>>>) {
        let captured = std::sync::Arc::new(std::sync::Mutex::new(None));
        let slot = captured.clone();
        let next = Next::new(move |req: Request<Body>| -> BoxFuture<InterceptorResult> {
            Box::pin(async move {
                *slot.lock().unwrap() = req.extensions().get::<ParsedQuery>().cloned();
                Ok(StatusCode::OK.into_response())
            })
        });
        (next, captured)
    }

    #[tokio::test]
    async fn parses_query_and_merges_path_params() {
        let mut request = Request::builder()
            .uri("/widgets/7?filter=name||cont||bolt&limit=10")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(ParsedParams(vec![FilterParam {
            field: "id".to_string(),
            operator: CondOperator::Eq,
            value: ParamValue::Number(7),
        }]));

        let (next, captured) = capture_query_next();
        QueryInterceptor.intercept(request, next).await.unwrap();

        let query = captured.lock().unwrap().clone().unwrap();
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.filter.len(), 2);
        assert_eq!(query.filter[1].field, "id");
        assert_eq!(query.filter[1].value.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn malformed_filter_answers_400() {
        let request = Request::builder()
            .uri("/widgets?filter=name||similar||x")
            .body(Body::empty())
            .unwrap();

        let (next, _) = capture_query_next();
        let response = QueryInterceptor.intercept(request, next).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
