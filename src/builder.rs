use crate::dto::CrudDto;
use crate::interceptor::chain;
use crate::options::{self, CrudOptions};
use crate::routes::overrides::{self, OverrideRoute};
use crate::routes::{RouteKind, RouteTable, installer};
use crate::service::CrudService;
use axum::routing::{MethodFilter, on};
use axum::{Router, body::Body, http::Method, http::Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Builds the CRUD route set for one resource controller.
///
/// Runs once, synchronously: normalize the options, resolve the slug,
/// install the enabled base routes, re-point overridden ones, and bind the
/// result onto an `axum::Router`. The produced [`RouteTable`] is the
/// explicit record of everything that was attached.
///
/// ```ignore
/// let crud = CrudBuilder::<Widget>::new("/widgets", service)
///     .options(CrudOptions::default())
///     .override_route(OverrideRoute::new("createOne", my_handler))
///     .build();
/// let app = Router::new().merge(crud.into_router());
/// ```
pub struct CrudBuilder<T> {
    base_path: String,
    options: CrudOptions,
    service: Arc<dyn CrudService<T>>,
    overrides: Vec<OverrideRoute>,
}

impl<T> CrudBuilder<T>
where
    T: CrudDto + Serialize + DeserializeOwned,
{
    pub fn new(base_path: impl Into<String>, service: Arc<dyn CrudService<T>>) -> Self {
        Self {
            base_path: base_path.into(),
            options: CrudOptions::default(),
            service,
            overrides: vec![],
        }
    }

    pub fn options(mut self, options: CrudOptions) -> Self {
        self.options = options;
        self
    }

    pub fn override_route(mut self, route: OverrideRoute) -> Self {
        self.overrides.push(route);
        self
    }

    pub fn build(self) -> CrudRouter {
        let mut options = self.options;
        options::normalize(&mut options);

        let slug = options::resolve_slug(&options, &self.base_path);

        let mut table = RouteTable::base();
        for kind in RouteKind::iter() {
            if !options.routes.is_enabled(kind) {
                tracing::debug!(route = kind.base_name(), "crud route disabled");
                continue;
            }

            let entry = table.get_mut(kind);
            if entry.path.is_empty() {
                entry.path = format!("/{{{slug}}}");
            }
            entry.registration = Some(installer::install(kind, &self.service, &options));
            entry.enabled = true;
            tracing::debug!(
                route = kind.base_name(),
                method = %entry.method,
                path = %entry.path,
                "installed crud route"
            );
        }

        overrides::apply(&mut table, self.overrides);

        let router = bind(&self.base_path, &table);
        CrudRouter { table, router }
    }
}

/// The built route set: the inspectable route table plus the bound router.
pub struct CrudRouter {
    table: RouteTable,
    router: Router,
}

impl CrudRouter {
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    pub fn into_parts(self) -> (RouteTable, Router) {
        (self.table, self.router)
    }
}

/// Binds every registered entry at its final path/verb. Overridden entries
/// bind the override handler under the merged interceptor chain; the base
/// handler is not bound a second time.
fn bind(base_path: &str, table: &RouteTable) -> Router {
    let mut router = Router::new();

    for entry in table.iter() {
        let Some(registration) = &entry.registration else {
            continue;
        };

        let path = join_path(base_path, &entry.path);
        let action = registration.action;
        let interceptors = registration.effective_interceptors().to_vec();
        let handler = registration.effective_handler().clone();

        let endpoint = move |mut req: Request<Body>| {
            let interceptors = interceptors.clone();
            let handler = handler.clone();
            async move {
                req.extensions_mut().insert(action);
                chain::execute(&interceptors, req, handler).await
            }
        };

        router = router.route(&path, on(method_filter(&entry.method), endpoint));
    }

    router
}

fn method_filter(method: &Method) -> MethodFilter {
    match *method {
        Method::GET => MethodFilter::GET,
        Method::POST => MethodFilter::POST,
        Method::PATCH => MethodFilter::PATCH,
        Method::PUT => MethodFilter::PUT,
        Method::DELETE => MethodFilter::DELETE,
        _ => MethodFilter::GET,
    }
}

fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path == "/" || path.is_empty() {
        if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        }
    } else if base.is_empty() {
        path.to_string()
    } else {
        format!("{base}{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::Bulk;
    use crate::error::CrudError;
    use crate::options::{DeleteOneOptions, RoutesOptions, ServiceOptions, UpdateOneOptions};
    use crate::query::{FilterParam, ParsedQuery};
    use async_trait::async_trait;
    use axum::http::Method;
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

    fn builder() -> CrudBuilder<Widget> {
        CrudBuilder::new("/widgets", Arc::new(NullService))
    }

    #[test]
    fn all_six_routes_install_by_default() {
        let crud = builder().build();
        let table = crud.table();

        let expected = [
            (RouteKind::GetMany, Method::GET, "/"),
            (RouteKind::GetOne, Method::GET, "/{id}"),
            (RouteKind::CreateOne, Method::POST, "/"),
            (RouteKind::CreateMany, Method::POST, "/bulk"),
            (RouteKind::UpdateOne, Method::PATCH, "/{id}"),
            (RouteKind::DeleteOne, Method::DELETE, "/{id}"),
        ];
        for (kind, method, path) in expected {
            let entry = table.get(kind);
            assert!(entry.enabled, "{kind:?} should be enabled");
            assert!(!entry.overridden);
            assert_eq!(entry.method, method);
            assert_eq!(entry.path, path);
            assert!(entry.registration.is_some());
        }
    }

    #[test]
    fn declared_slug_shapes_single_entity_paths() {
        let options = CrudOptions {
            params: vec![("uuid".to_string(), crate::options::ParamType::Str)],
            ..Default::default()
        };
        let crud = builder().options(options).build();
        assert_eq!(crud.table().get(RouteKind::GetOne).path, "/{uuid}");
    }

    #[test]
    fn excluded_kind_installs_nothing() {
        let options = CrudOptions {
            routes: RoutesOptions {
                exclude: vec![RouteKind::DeleteOne],
                ..Default::default()
            },
            ..Default::default()
        };
        let crud = builder().options(options).build();

        let entry = crud.table().get(RouteKind::DeleteOne);
        assert!(!entry.enabled);
        assert!(entry.registration.is_none());
    }

    #[test]
    fn join_path_handles_roots_and_nesting() {
        assert_eq!(join_path("/widgets", "/"), "/widgets");
        assert_eq!(join_path("/widgets", "/{id}"), "/widgets/{id}");
        assert_eq!(join_path("/widgets", "/bulk"), "/widgets/bulk");
        assert_eq!(join_path("", "/"), "/");
        assert_eq!(join_path("", "/{id}"), "/{id}");
    }
}
