use crate::dto::{Bulk, CrudDto, ValidationGroup};
use crate::docs;
use crate::error::CrudError;
use crate::interceptor::Interceptor;
use crate::interceptor::params::ParamsInterceptor;
use crate::interceptor::query::QueryInterceptor;
use crate::options::{CrudOptions, ServiceOptions};
use crate::pipe::Pipe;
use crate::pipe::validation::ValidationPipe;
use crate::query::{ParsedParams, ParsedQuery};
use crate::routes::{BoxFuture, HandlerFn, Registration, RouteKind};
use crate::service::CrudService;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, body::Body, http::Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Builds the registration for one enabled route kind: the forwarding
/// handler plus all attached metadata. Never fails; a disabled kind is
/// simply never installed.
pub(crate) fn install<T>(
    kind: RouteKind,
    service: &Arc<dyn CrudService<T>>,
    options: &CrudOptions,
) -> Registration
where
    T: CrudDto + Serialize + DeserializeOwned,
{
    let mut interceptors: Vec<Arc<dyn Interceptor>> =
        vec![Arc::new(ParamsInterceptor::new(options))];
    if kind.is_read() {
        interceptors.push(Arc::new(QueryInterceptor));
    }
    interceptors.extend(options.routes.interceptors_for(kind).iter().cloned());

    Registration {
        action: kind.action(),
        interceptors,
        operation: docs::operation_for::<T>(kind, options.validation),
        handler: forwarding_handler(kind, service.clone(), options),
        override_binding: None,
    }
}

fn handler_fn<F>(f: F) -> HandlerFn
where
    F: Fn(Request<Body>) -> BoxFuture<Response> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn query_of(req: &Request<Body>) -> ParsedQuery {
    req.extensions().get::<ParsedQuery>().cloned().unwrap_or_default()
}

fn service_options_of(req: &Request<Body>) -> ServiceOptions {
    req.extensions()
        .get::<ServiceOptions>()
        .cloned()
        .unwrap_or_default()
}

fn params_of(req: &Request<Body>) -> ParsedParams {
    req.extensions().get::<ParsedParams>().cloned().unwrap_or_default()
}

/// The thin forwarding body installed for a route kind: read what the
/// interceptors materialized, deserialize and validate the body where the
/// kind takes one, then perform exactly one service call.
fn forwarding_handler<T>(
    kind: RouteKind,
    service: Arc<dyn CrudService<T>>,
    options: &CrudOptions,
) -> HandlerFn
where
    T: CrudDto + Serialize + DeserializeOwned,
{
    let mode = options.validation;

    match kind {
        RouteKind::GetMany => handler_fn(move |req: Request<Body>| -> BoxFuture<Response> {
            let service = service.clone();
            Box::pin(async move {
                let query = query_of(&req);
                let options = service_options_of(&req);
                match service.get_many(&query, &options).await {
                    Ok(items) => Json(items).into_response(),
                    Err(err) => err.into_response(),
                }
            })
        }),

        RouteKind::GetOne => handler_fn(move |req: Request<Body>| -> BoxFuture<Response> {
            let service = service.clone();
            Box::pin(async move {
                let query = query_of(&req);
                let options = service_options_of(&req);
                match service.get_one(&query, &options).await {
                    Ok(item) => Json(item).into_response(),
                    Err(err) => err.into_response(),
                }
            })
        }),

        RouteKind::CreateOne => handler_fn(move |req: Request<Body>| -> BoxFuture<Response> {
            let service = service.clone();
            Box::pin(async move {
                let params = params_of(&req);
                let Json(body) = match Json::<T>::from_request(req, &()).await {
                    Ok(json) => json,
                    Err(rejection) => return rejection.into_response(),
                };
                let pipe = ValidationPipe::<T>::new(ValidationGroup::Create, mode);
                let body = match pipe.transform(body).await {
                    Ok(body) => body,
                    Err(err) => return CrudError::from(err).into_response(),
                };
                match service.create_one(body, &params.0).await {
                    Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
                    Err(err) => err.into_response(),
                }
            })
        }),

        RouteKind::CreateMany => handler_fn(move |req: Request<Body>| -> BoxFuture<Response> {
            let service = service.clone();
            Box::pin(async move {
                let params = params_of(&req);
                let Json(bulk) = match Json::<Bulk<T>>::from_request(req, &()).await {
                    Ok(json) => json,
                    Err(rejection) => return rejection.into_response(),
                };
                if mode.is_enabled() {
                    if let Err(err) = bulk.validate_create() {
                        return CrudError::from(err).into_response();
                    }
                }
                match service.create_many(bulk, &params.0).await {
                    Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
                    Err(err) => err.into_response(),
                }
            })
        }),

        RouteKind::UpdateOne => {
            let route_options = options.update_one_options();
            handler_fn(move |req: Request<Body>| -> BoxFuture<Response> {
                let service = service.clone();
                Box::pin(async move {
                    let params = params_of(&req);
                    let Json(body) = match Json::<T>::from_request(req, &()).await {
                        Ok(json) => json,
                        Err(rejection) => return rejection.into_response(),
                    };
                    let pipe = ValidationPipe::<T>::new(ValidationGroup::Update, mode);
                    let body = match pipe.transform(body).await {
                        Ok(body) => body,
                        Err(err) => return CrudError::from(err).into_response(),
                    };
                    match service.update_one(body, &params.0, &route_options).await {
                        Ok(updated) => Json(updated).into_response(),
                        Err(err) => err.into_response(),
                    }
                })
            })
        }

        RouteKind::DeleteOne => {
            let route_options = options.delete_one_options();
            handler_fn(move |req: Request<Body>| -> BoxFuture<Response> {
                let service = service.clone();
                Box::pin(async move {
                    let params = params_of(&req);
                    match service.delete_one(&params.0, &route_options).await {
                        Ok(Some(deleted)) => Json(deleted).into_response(),
                        Ok(None) => StatusCode::NO_CONTENT.into_response(),
                        Err(err) => err.into_response(),
                    }
                })
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::ResponseShape;
    use crate::interceptor::{InterceptorResult, Next};
    use crate::options::{DeleteOneOptions, RouteOptions, RoutesOptions, UpdateOneOptions};
    use crate::query::FilterParam;
    use crate::routes::CrudAction;
    use async_trait::async_trait;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Widget {
        name: String,
    }

    impl CrudDto for Widget {
        fn name() -> &'static str {
            "Widget"
        }
    }

    struct NullService;

    #[async_trait]
    impl CrudService<Widget> for NullService {
        async fn get_many(
            &self,
            _query: &ParsedQuery,
            _options: &ServiceOptions,
        ) -> crate::Result<Vec<Widget>> {
            Ok(vec![])
        }

        async fn get_one(
            &self,
            _query: &ParsedQuery,
            _options: &ServiceOptions,
        ) -> crate::Result<Widget> {
            Err(CrudError::NotFound)
        }

        async fn create_one(&self, body: Widget, _params: &[FilterParam]) -> crate::Result<Widget> {
            Ok(body)
        }

        async fn create_many(
            &self,
            bulk: Bulk<Widget>,
            _params: &[FilterParam],
        ) -> crate::Result<Vec<Widget>> {
            Ok(bulk.bulk)
        }

        async fn update_one(
            &self,
            body: Widget,
            _params: &[FilterParam],
            _options: &UpdateOneOptions,
        ) -> crate::Result<Widget> {
            Ok(body)
        }

        async fn delete_one(
            &self,
            _params: &[FilterParam],
            _options: &DeleteOneOptions,
        ) -> crate::Result<Option<Widget>> {
            Ok(None)
        }
    }

    struct Marker;

    #[async_trait]
    impl crate::interceptor::Interceptor for Marker {
        async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
            next.run(request).await
        }
    }

    fn null_service() -> Arc<dyn CrudService<Widget>> {
        Arc::new(NullService)
    }

    #[test]
    fn read_routes_carry_params_then_query_then_user_interceptors() {
        let user: Arc<dyn crate::interceptor::Interceptor> = Arc::new(Marker);
        let options = CrudOptions {
            routes: RoutesOptions {
                get_many: Some(RouteOptions {
                    interceptors: vec![user.clone()],
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };

        let registration = install(RouteKind::GetMany, &null_service(), &options);
        assert_eq!(registration.interceptors.len(), 3);
        assert!(Arc::ptr_eq(&registration.interceptors[2], &user));
    }

    #[test]
    fn write_routes_skip_the_query_interceptor() {
        let registration = install(RouteKind::CreateOne, &null_service(), &CrudOptions::default());
        assert_eq!(registration.interceptors.len(), 1);
    }

    #[test]
    fn registration_carries_action_and_docs() {
        let registration = install(RouteKind::DeleteOne, &null_service(), &CrudOptions::default());
        assert_eq!(registration.action, CrudAction::DeleteOne);
        assert_eq!(registration.operation.summary, "Delete one Widget");
        assert_eq!(registration.operation.response, ResponseShape::One("Widget"));
        assert!(registration.override_binding.is_none());
    }

    #[tokio::test]
    async fn delete_handler_answers_204_without_return_deleted() {
        let registration = install(RouteKind::DeleteOne, &null_service(), &CrudOptions::default());
        let request = Request::builder()
            .method("DELETE")
            .uri("/widgets/1")
            .body(Body::empty())
            .unwrap();
        let response = (registration.handler)(request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
