use serde_json::Value;
use std::str::FromStr;

use super::{ApiError, FieldError, ListEpisodesParams};
use crate::constants::query::{DEFAULT_PAGE_SIZE, FIRST_PAGE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::domain::UnknownVariant;
use crate::services::EpisodeQuery;

/// Validates raw query-string pairs. Unknown keys are ignored.
pub fn validate_list_pairs(pairs: Vec<(String, String)>) -> Result<EpisodeQuery, ApiError> {
    let (params, errors) = collect_list_params(pairs);
    check_list_params(params, errors)
}

/// Validates every list parameter, collecting all failures before rejecting.
pub fn validate_list_query(params: ListEpisodesParams) -> Result<EpisodeQuery, ApiError> {
    check_list_params(params, Vec::new())
}

/// A parameter given more than once is reported rather than resolved to one
/// of its values.
pub fn collect_list_params(pairs: Vec<(String, String)>) -> (ListEpisodesParams, Vec<FieldError>) {
    let mut params = ListEpisodesParams::default();
    let mut errors: Vec<FieldError> = Vec::new();

    for (key, value) in pairs {
        let slot = match key.as_str() {
            "sortBy" => &mut params.sort_by,
            "order" => &mut params.order,
            "watched" => &mut params.watched,
            "page" => &mut params.page,
            "pageSize" => &mut params.page_size,
            "search" => &mut params.search,
            _ => continue,
        };

        if slot.is_none() {
            *slot = Some(value);
        } else if !errors.iter().any(|e| e.field == key) {
            errors.push(FieldError::new(
                key,
                "Expected a single value, received several",
            ));
        }
    }

    (params, errors)
}

fn check_list_params(
    params: ListEpisodesParams,
    mut errors: Vec<FieldError>,
) -> Result<EpisodeQuery, ApiError> {
    let defaults = EpisodeQuery::default();

    let sort_by = parse_variant(params.sort_by.as_deref(), "sortBy", &mut errors)
        .unwrap_or(defaults.sort_by);
    let order =
        parse_variant(params.order.as_deref(), "order", &mut errors).unwrap_or(defaults.order);
    let watched = parse_variant(params.watched.as_deref(), "watched", &mut errors)
        .unwrap_or(defaults.watched);

    let page = match params.page.as_deref() {
        None => FIRST_PAGE,
        Some(raw) => match validate_page(raw) {
            Ok(page) => page,
            Err(e) => {
                errors.push(e);
                FIRST_PAGE
            }
        },
    };

    let page_size = match params.page_size.as_deref() {
        None => DEFAULT_PAGE_SIZE,
        Some(raw) => match validate_page_size(raw) {
            Ok(size) => size,
            Err(e) => {
                errors.push(e);
                DEFAULT_PAGE_SIZE
            }
        },
    };

    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    if !errors.is_empty() {
        return Err(ApiError::invalid_fields(errors));
    }

    Ok(EpisodeQuery {
        sort_by,
        order,
        watched,
        page,
        page_size,
        search,
    })
}

fn parse_variant<T>(raw: Option<&str>, field: &str, errors: &mut Vec<FieldError>) -> Option<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    match raw?.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(FieldError::new(field, capitalize(&e.to_string())));
            None
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn parse_integer(raw: &str, field: &str) -> Result<u32, FieldError> {
    raw.trim().parse::<u32>().map_err(|_| {
        FieldError::new(
            field,
            format!("Expected a positive integer, received '{}'", raw),
        )
    })
}

pub fn validate_page(raw: &str) -> Result<u32, FieldError> {
    let page = parse_integer(raw, "page")?;
    if page < FIRST_PAGE {
        return Err(FieldError::new(
            "page",
            format!("Page must be at least {}", FIRST_PAGE),
        ));
    }
    Ok(page)
}

pub fn validate_page_size(raw: &str) -> Result<u32, FieldError> {
    let size = parse_integer(raw, "pageSize")?;
    if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
        return Err(FieldError::new(
            "pageSize",
            format!(
                "Page size must be between {} and {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE
            ),
        ));
    }
    Ok(size)
}

/// Validates a `PATCH .../watched` body and returns the requested flag.
pub fn validate_set_watched(body: &[u8]) -> Result<bool, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| {
        ApiError::invalid_fields(vec![FieldError::new(
            "body",
            "Request body must be a JSON object",
        )])
    })?;

    let Value::Object(map) = value else {
        return Err(ApiError::invalid_fields(vec![FieldError::new(
            "body",
            "Request body must be a JSON object",
        )]));
    };

    match map.get("watched") {
        Some(Value::Bool(watched)) => Ok(*watched),
        None => Err(ApiError::invalid_fields(vec![FieldError::new(
            "watched",
            "Required",
        )])),
        Some(other) => Err(ApiError::invalid_fields(vec![FieldError::new(
            "watched",
            format!("Expected boolean, received {}", json_type_name(other)),
        )])),
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
