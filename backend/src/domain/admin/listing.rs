//! List filtering, search and row decoration for admin listings.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::descriptors::{EntityKind, descriptor};

/// Marker rendered in the status column.
pub const STATUS_SYMBOL: &str = "●";

/// Status filter values accepted by `is_active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Active,
    Inactive,
}

/// Raw query parameters of an admin list request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// `1` for active rows, `0` for inactive rows.
    pub is_active: Option<String>,
    /// `sim`/`true` or `nao`/`false`.
    pub has_content: Option<String>,
    /// Case-insensitive search terms.
    pub q: Option<String>,
}

/// Rejected filter input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListFilterError {
    #[error("{parameter} must be one of {expected}")]
    InvalidValue {
        parameter: &'static str,
        expected: &'static str,
    },
    #[error("{parameter} filter is not available for {entity}")]
    Unsupported {
        parameter: &'static str,
        entity: &'static str,
    },
}

/// Parsed admin list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub status: Option<StatusFilter>,
    pub has_content: Option<bool>,
    pub search: Option<String>,
}

/// Rows the admin listing can filter.
pub trait Listable {
    /// `None` for entities without an active flag.
    fn active_flag(&self) -> Option<bool>;

    /// Text of a named field, as listed in the entity descriptor.
    fn field_text(&self, field: &str) -> Option<&str>;
}

impl TryFrom<ListQuery> for ListFilter {
    type Error = ListFilterError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        let status = match query.is_active.as_deref().map(str::trim) {
            None | Some("") => None,
            Some("1") => Some(StatusFilter::Active),
            Some("0") => Some(StatusFilter::Inactive),
            Some(_) => {
                return Err(ListFilterError::InvalidValue {
                    parameter: "is_active",
                    expected: "1|0",
                });
            }
        };
        let has_content = query
            .has_content
            .as_deref()
            .map(|v| v.trim().to_ascii_lowercase());
        let has_content = match has_content {
            None => None,
            Some(value) => match value.as_str() {
                "" => None,
                "sim" | "true" => Some(true),
                "nao" | "false" => Some(false),
                _ => {
                    return Err(ListFilterError::InvalidValue {
                        parameter: "has_content",
                        expected: "sim|nao|true|false",
                    });
                }
            },
        };
        let search = query
            .q
            .map(|q| q.trim().to_owned())
            .filter(|q| !q.is_empty());
        Ok(Self {
            status,
            has_content,
            search,
        })
    }
}

impl ListFilter {
    /// Check the filter only uses capabilities `kind` declares.
    pub fn supported_by(&self, kind: EntityKind) -> Result<(), ListFilterError> {
        let d = descriptor(kind);
        if self.status.is_some() && !d.has_active_flag {
            return Err(ListFilterError::Unsupported {
                parameter: "is_active",
                entity: d.display_name_plural,
            });
        }
        if self.has_content.is_some() && d.principal_field.is_none() {
            return Err(ListFilterError::Unsupported {
                parameter: "has_content",
                entity: d.display_name_plural,
            });
        }
        Ok(())
    }

    /// Keep the rows of `kind` matching every configured criterion.
    ///
    /// Search splits on whitespace; each term must appear, ignoring case, in
    /// at least one of the descriptor's search fields.
    pub fn apply<T: Listable>(&self, kind: EntityKind, rows: Vec<T>) -> Vec<T> {
        let d = descriptor(kind);
        let terms: Vec<String> = self
            .search
            .as_deref()
            .map(|q| q.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default();

        rows.into_iter()
            .filter(|row| match (self.status, row.active_flag()) {
                (Some(StatusFilter::Active), Some(flag)) => flag,
                (Some(StatusFilter::Inactive), Some(flag)) => !flag,
                _ => true,
            })
            .filter(|row| match (self.has_content, d.principal_field) {
                (Some(wanted), Some(field)) => {
                    let present = row.field_text(field).is_some_and(|t| !t.trim().is_empty());
                    present == wanted
                }
                _ => true,
            })
            .filter(|row| {
                terms.iter().all(|term| {
                    d.search_fields.iter().any(|field| {
                        row.field_text(field)
                            .is_some_and(|text| text.to_lowercase().contains(term.as_str()))
                    })
                })
            })
            .collect()
    }
}

/// Colour of the status marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusColour {
    Green,
    Red,
}

/// Status marker for a row's active flag.
pub fn status_icon(is_active: bool) -> (&'static str, StatusColour) {
    let colour = if is_active {
        StatusColour::Green
    } else {
        StatusColour::Red
    };
    (STATUS_SYMBOL, colour)
}

/// A listed row decorated with its status column when the entity has one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedRow<T> {
    #[serde(flatten)]
    pub row: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_icon: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_colour: Option<StatusColour>,
}

impl<T: Listable> ListedRow<T> {
    pub fn new(kind: EntityKind, row: T) -> Self {
        let status = match (descriptor(kind).status_column, row.active_flag()) {
            (true, Some(flag)) => Some(status_icon(flag)),
            _ => None,
        };
        Self {
            row,
            status_icon: status.map(|(symbol, _)| symbol),
            status_colour: status.map(|(_, colour)| colour),
        }
    }
}

/// Decorate every row of `kind`.
pub fn decorate<T: Listable>(kind: EntityKind, rows: Vec<T>) -> Vec<ListedRow<T>> {
    rows.into_iter().map(|row| ListedRow::new(kind, row)).collect()
}

/// Shorten `text` to `limit` characters, appending `...` when cut.
///
/// # Examples
/// ```
/// use portfolio::domain::admin::preview;
///
/// assert_eq!(preview("Olá mundo", 3), "Olá...");
/// assert_eq!(preview("curto", 50), "curto");
/// ```
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}
