use crate::docs::ApiOperation;
use crate::interceptor::Interceptor;
use axum::http::Method;
use axum::{body::Body, http::Request, response::Response};
use std::str::FromStr;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};

pub mod installer;
pub mod overrides;

pub use crate::interceptor::BoxFuture;

/// A type-erased route handler: the generated forwarding functions and
/// user override handlers share this shape.
pub type HandlerFn = Arc<dyn Fn(Request<Body>) -> BoxFuture<Response> + Send + Sync>;

/// The six fixed CRUD route kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum RouteKind {
    #[strum(serialize = "getManyBase")]
    GetMany,
    #[strum(serialize = "getOneBase")]
    GetOne,
    #[strum(serialize = "createOneBase")]
    CreateOne,
    #[strum(serialize = "createManyBase")]
    CreateMany,
    #[strum(serialize = "updateOneBase")]
    UpdateOne,
    #[strum(serialize = "deleteOneBase")]
    DeleteOne,
}

impl RouteKind {
    /// Canonical name of the generated base route, the identifier override
    /// targets refer to.
    pub fn base_name(self) -> &'static str {
        match self {
            RouteKind::GetMany => "getManyBase",
            RouteKind::GetOne => "getOneBase",
            RouteKind::CreateOne => "createOneBase",
            RouteKind::CreateMany => "createManyBase",
            RouteKind::UpdateOne => "updateOneBase",
            RouteKind::DeleteOne => "deleteOneBase",
        }
    }

    pub fn from_base_name(name: &str) -> Option<Self> {
        RouteKind::from_str(name).ok()
    }

    pub fn method(self) -> Method {
        match self {
            RouteKind::GetMany | RouteKind::GetOne => Method::GET,
            RouteKind::CreateOne | RouteKind::CreateMany => Method::POST,
            RouteKind::UpdateOne => Method::PATCH,
            RouteKind::DeleteOne => Method::DELETE,
        }
    }

    /// Path template relative to the controller base path. Empty means
    /// "address one entity": filled with `/{slug}` at build time.
    pub fn path_template(self) -> &'static str {
        match self {
            RouteKind::GetMany | RouteKind::CreateOne => "/",
            RouteKind::CreateMany => "/bulk",
            RouteKind::GetOne | RouteKind::UpdateOne | RouteKind::DeleteOne => "",
        }
    }

    pub fn action(self) -> CrudAction {
        match self {
            RouteKind::GetMany => CrudAction::ReadAll,
            RouteKind::GetOne => CrudAction::ReadOne,
            RouteKind::CreateOne => CrudAction::CreateOne,
            RouteKind::CreateMany => CrudAction::CreateMany,
            RouteKind::UpdateOne => CrudAction::UpdateOne,
            RouteKind::DeleteOne => CrudAction::DeleteOne,
        }
    }

    /// The read kinds additionally carry the query interceptor.
    pub fn is_read(self) -> bool {
        matches!(self, RouteKind::GetMany | RouteKind::GetOne)
    }
}

/// Action tag inserted into request extensions before the interceptor
/// chain runs, for permission and audit collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CrudAction {
    ReadAll,
    ReadOne,
    CreateOne,
    CreateMany,
    UpdateOne,
    DeleteOne,
}

/// Everything attached to an installed route: the metadata the original
/// system kept in reflection tables, carried here as plain data.
pub struct Registration {
    pub action: CrudAction,
    pub interceptors: Vec<Arc<dyn Interceptor>>,
    pub operation: ApiOperation,
    pub handler: HandlerFn,
    pub override_binding: Option<OverrideBinding>,
}

impl Registration {
    /// The handler the route is actually bound to.
    pub fn effective_handler(&self) -> &HandlerFn {
        match &self.override_binding {
            Some(binding) => &binding.handler,
            None => &self.handler,
        }
    }

    /// The interceptor list the bound handler runs under.
    pub fn effective_interceptors(&self) -> &[Arc<dyn Interceptor>] {
        match &self.override_binding {
            Some(binding) => &binding.interceptors,
            None => &self.interceptors,
        }
    }
}

/// An override re-pointing the route's path/verb at a user handler.
pub struct OverrideBinding {
    pub method_name: String,
    /// Base interceptors followed by the override's own, duplicates kept.
    pub interceptors: Vec<Arc<dyn Interceptor>>,
    pub handler: HandlerFn,
}

/// One row of the route table.
pub struct RouteEntry {
    pub kind: RouteKind,
    pub path: String,
    pub method: Method,
    pub enabled: bool,
    pub overridden: bool,
    pub registration: Option<Registration>,
}

/// The explicit per-resource route-configuration record: exactly one entry
/// per route kind. A disabled entry carries no registration and no
/// metadata; an enabled one is base-bound or override-bound, never both.
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub(crate) fn base() -> Self {
        use strum::IntoEnumIterator;

        Self {
            entries: RouteKind::iter()
                .map(|kind| RouteEntry {
                    kind,
                    path: kind.path_template().to_string(),
                    method: kind.method(),
                    enabled: false,
                    overridden: false,
                    registration: None,
                })
                .collect(),
        }
    }

    pub fn get(&self, kind: RouteKind) -> &RouteEntry {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind)
            .expect("route table always holds one entry per kind")
    }

    pub(crate) fn get_mut(&mut self, kind: RouteKind) -> &mut RouteEntry {
        self.entries
            .iter_mut()
            .find(|entry| entry.kind == kind)
            .expect("route table always holds one entry per kind")
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }
}
