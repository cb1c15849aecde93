use crate::error::CrudError;
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Filter condition operators, written in the query string as
/// `filter=field||operator||value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CondOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Starts,
    Ends,
    Cont,
    Excl,
    In,
    NotIn,
    IsNull,
    NotNull,
    Between,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A single filter condition from the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    pub field: String,
    pub operator: CondOperator,
    pub value: Option<String>,
}

impl QueryFilter {
    /// Parses `field||operator||value`; the value part is optional for
    /// operators like `isnull`.
    pub fn parse(raw: &str) -> Result<Self, CrudError> {
        let mut parts = raw.splitn(3, "||");
        let field = parts
            .next()
            .filter(|field| !field.is_empty())
            .ok_or_else(|| CrudError::BadRequest(format!("invalid filter `{raw}`")))?;
        let operator = parts
            .next()
            .ok_or_else(|| CrudError::BadRequest(format!("invalid filter `{raw}`")))?
            .parse::<CondOperator>()
            .map_err(|_| CrudError::BadRequest(format!("unknown filter operator in `{raw}`")))?;
        let value = parts.next().map(str::to_string);

        Ok(QueryFilter {
            field: field.to_string(),
            operator,
            value,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySort {
    pub field: String,
    pub order: SortOrder,
}

impl QuerySort {
    /// Parses `field,ASC` / `field,DESC`.
    pub fn parse(raw: &str) -> Result<Self, CrudError> {
        let (field, order) = raw
            .split_once(',')
            .ok_or_else(|| CrudError::BadRequest(format!("invalid sort `{raw}`")))?;
        let order = order
            .parse::<SortOrder>()
            .map_err(|_| CrudError::BadRequest(format!("invalid sort order in `{raw}`")))?;

        Ok(QuerySort {
            field: field.to_string(),
            order,
        })
    }
}

/// The fully-parsed RESTful query a read handler passes to the service.
#[derive(Debug, Clone, Default)]
pub struct ParsedQuery {
    pub fields: Vec<String>,
    pub filter: Vec<QueryFilter>,
    pub or: Vec<QueryFilter>,
    pub sort: Vec<QuerySort>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub page: Option<u64>,
}

impl ParsedQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, CrudError> {
        let mut query = ParsedQuery::default();

        for (key, value) in pairs {
            match key.as_str() {
                "fields" => query
                    .fields
                    .extend(value.split(',').filter(|f| !f.is_empty()).map(str::to_string)),
                "filter" | "filter[]" => query.filter.push(QueryFilter::parse(value)?),
                "or" | "or[]" => query.or.push(QueryFilter::parse(value)?),
                "sort" | "sort[]" => query.sort.push(QuerySort::parse(value)?),
                "limit" | "per_page" => query.limit = Some(parse_number(key, value)?),
                "offset" => query.offset = Some(parse_number(key, value)?),
                "page" => query.page = Some(parse_number(key, value)?),
                _ => {}
            }
        }

        Ok(query)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64, CrudError> {
    value
        .parse::<u64>()
        .map_err(|_| CrudError::BadRequest(format!("invalid numeric value for `{key}`")))
}

/// A typed value parsed from a path parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(i64),
    Str(String),
    Uuid(Uuid),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Str(s) => write!(f, "{s}"),
            ParamValue::Uuid(u) => write!(f, "{u}"),
        }
    }
}

/// An equality filter derived from a path parameter, handed to the service
/// on create/update/delete and merged into the query filter on reads.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParam {
    pub field: String,
    pub operator: CondOperator,
    pub value: ParamValue,
}

/// Path parameters materialized by the params interceptor, keyed into
/// request extensions for the forwarding handlers.
#[derive(Debug, Clone, Default)]
pub struct ParsedParams(pub Vec<FilterParam>);
