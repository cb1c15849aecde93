use crate::dto::CrudDto;
use crate::options::ValidationMode;
use crate::routes::RouteKind;

/// API documentation metadata attached to a generated route.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiOperation {
    pub summary: String,
    pub response: ResponseShape,
    pub request_body: Option<RequestShape>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    One(&'static str),
    Many(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    Dto(&'static str),
    /// The bulk envelope: an object with a `bulk` array of the DTO.
    Bulk(&'static str),
    /// Placeholder used for bulk creation when validation is disabled.
    Untyped,
}

pub(crate) fn operation_for<T: CrudDto>(kind: RouteKind, validation: ValidationMode) -> ApiOperation {
    let name = T::name();
    let summary = match kind {
        RouteKind::GetMany => format!("Retrieve many {name}"),
        RouteKind::GetOne => format!("Retrieve one {name}"),
        RouteKind::CreateOne => format!("Create one {name}"),
        RouteKind::CreateMany => format!("Create many {name}"),
        RouteKind::UpdateOne => format!("Update one {name}"),
        RouteKind::DeleteOne => format!("Delete one {name}"),
    };

    let response = match kind {
        RouteKind::GetMany | RouteKind::CreateMany => ResponseShape::Many(name),
        _ => ResponseShape::One(name),
    };

    let request_body = match kind {
        RouteKind::CreateOne | RouteKind::UpdateOne => Some(RequestShape::Dto(name)),
        RouteKind::CreateMany => Some(if validation.is_enabled() {
            RequestShape::Bulk(name)
        } else {
            RequestShape::Untyped
        }),
        _ => None,
    };

    ApiOperation {
        summary,
        response,
        request_body,
    }
}
