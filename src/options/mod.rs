use crate::error::CrudError;
use crate::interceptor::Interceptor;
use crate::query::{ParamValue, QuerySort};
use crate::routes::RouteKind;
use std::sync::Arc;
use strum::IntoEnumIterator;
use uuid::Uuid;

mod slug;

pub use slug::resolve_slug;

/// Declared type of a path parameter. A request segment that fails to
/// parse as the declared type answers 400 before the service is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Number,
    Str,
    Uuid,
}

impl ParamType {
    pub fn parse(&self, name: &str, raw: &str) -> Result<ParamValue, CrudError> {
        match self {
            ParamType::Number => raw
                .parse::<i64>()
                .map(ParamValue::Number)
                .map_err(|_| invalid_param(name)),
            ParamType::Str => Ok(ParamValue::Str(raw.to_string())),
            ParamType::Uuid => raw
                .parse::<Uuid>()
                .map(ParamValue::Uuid)
                .map_err(|_| invalid_param(name)),
        }
    }
}

fn invalid_param(name: &str) -> CrudError {
    CrudError::BadRequest(format!("invalid value for path parameter `{name}`"))
}

/// Whether request bodies run through their DTO's validation rules.
///
/// Disabling is explicit and visible in the options record; bulk creation
/// degrades to an untyped body shape when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Enabled,
    Disabled,
}

impl ValidationMode {
    pub fn is_enabled(self) -> bool {
        matches!(self, ValidationMode::Enabled)
    }
}

/// Controller-level options handed to the service on read operations.
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    pub default_limit: Option<u64>,
    pub max_limit: Option<u64>,
    pub default_sort: Vec<QuerySort>,
}

/// Per-route configuration.
#[derive(Clone, Default)]
pub struct RouteOptions {
    pub interceptors: Vec<Arc<dyn Interceptor>>,
    pub allow_params_override: Option<bool>,
    pub return_deleted: Option<bool>,
}

impl RouteOptions {
    fn is_unset(&self) -> bool {
        self.interceptors.is_empty()
            && self.allow_params_override.is_none()
            && self.return_deleted.is_none()
    }
}

/// Route set configuration: per-kind options plus the enable policy.
///
/// Every kind is enabled by default; a kind is suppressed by leaving it out
/// of a non-empty `only` list or naming it in `exclude`.
#[derive(Clone, Default)]
pub struct RoutesOptions {
    pub only: Vec<RouteKind>,
    pub exclude: Vec<RouteKind>,
    pub get_many: Option<RouteOptions>,
    pub get_one: Option<RouteOptions>,
    pub create_one: Option<RouteOptions>,
    pub create_many: Option<RouteOptions>,
    pub update_one: Option<RouteOptions>,
    pub delete_one: Option<RouteOptions>,
}

impl RoutesOptions {
    pub fn is_enabled(&self, kind: RouteKind) -> bool {
        (self.only.is_empty() || self.only.contains(&kind)) && !self.exclude.contains(&kind)
    }

    pub fn options_for(&self, kind: RouteKind) -> Option<&RouteOptions> {
        match kind {
            RouteKind::GetMany => self.get_many.as_ref(),
            RouteKind::GetOne => self.get_one.as_ref(),
            RouteKind::CreateOne => self.create_one.as_ref(),
            RouteKind::CreateMany => self.create_many.as_ref(),
            RouteKind::UpdateOne => self.update_one.as_ref(),
            RouteKind::DeleteOne => self.delete_one.as_ref(),
        }
    }

    pub(crate) fn interceptors_for(&self, kind: RouteKind) -> &[Arc<dyn Interceptor>] {
        self.options_for(kind)
            .map(|options| options.interceptors.as_slice())
            .unwrap_or(&[])
    }

    fn slot_mut(&mut self, kind: RouteKind) -> &mut Option<RouteOptions> {
        match kind {
            RouteKind::GetMany => &mut self.get_many,
            RouteKind::GetOne => &mut self.get_one,
            RouteKind::CreateOne => &mut self.create_one,
            RouteKind::CreateMany => &mut self.create_many,
            RouteKind::UpdateOne => &mut self.update_one,
            RouteKind::DeleteOne => &mut self.delete_one,
        }
    }
}

/// The full configuration record one builder call consumes.
#[derive(Clone, Default)]
pub struct CrudOptions {
    pub params: Vec<(String, ParamType)>,
    pub routes: RoutesOptions,
    pub service_options: ServiceOptions,
    pub validation: ValidationMode,
}

impl CrudOptions {
    /// Resolved update-one route options, after normalization.
    pub fn update_one_options(&self) -> UpdateOneOptions {
        UpdateOneOptions {
            allow_params_override: self
                .routes
                .options_for(RouteKind::UpdateOne)
                .and_then(|options| options.allow_params_override)
                .unwrap_or(false),
        }
    }

    /// Resolved delete-one route options, after normalization.
    pub fn delete_one_options(&self) -> DeleteOneOptions {
        DeleteOneOptions {
            return_deleted: self
                .routes
                .options_for(RouteKind::DeleteOne)
                .and_then(|options| options.return_deleted)
                .unwrap_or(false),
        }
    }
}

/// Resolved per-route options passed to `CrudService::update_one`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOneOptions {
    pub allow_params_override: bool,
}

/// Resolved per-route options passed to `CrudService::delete_one`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOneOptions {
    pub return_deleted: bool,
}

/// Fills every unset sub-record with its default literal.
///
/// A sub-record counts as unset when it is `None` or structurally empty; it
/// is then replaced wholesale, never merged field-by-field.
pub fn normalize(options: &mut CrudOptions) {
    if options.params.is_empty() {
        options.params = vec![("id".to_string(), ParamType::Number)];
    }

    for kind in RouteKind::iter() {
        let slot = options.routes.slot_mut(kind);
        let unset = match slot {
            None => true,
            Some(route_options) => route_options.is_unset(),
        };
        if unset {
            *slot = Some(default_route_options(kind));
        }
    }
}

fn default_route_options(kind: RouteKind) -> RouteOptions {
    match kind {
        RouteKind::UpdateOne => RouteOptions {
            interceptors: vec![],
            allow_params_override: Some(false),
            return_deleted: None,
        },
        RouteKind::DeleteOne => RouteOptions {
            interceptors: vec![],
            allow_params_override: None,
            return_deleted: Some(false),
        },
        _ => RouteOptions::default(),
    }
}
