//! Sorting and filtering for the gun list.
//!
//! Every sortable field maps to a fixed column name, so nothing the client
//! sends is ever spliced into SQL text. Filter values are carried as typed
//! data and bound as query parameters by the repository.

use std::fmt;
use std::str::FromStr;

use super::pagination::Pagination;

/// Errors produced while interpreting list query parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListQueryError {
    #[error("invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("invalid value for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{min_field} must not be greater than {max_field}")]
    InvalidRange {
        min_field: &'static str,
        max_field: &'static str,
    },
}

/// Column a gun listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GunSortField {
    #[default]
    Id,
    Name,
    Manufacturer,
    Price,
    Damage,
    CreatedAt,
}

impl GunSortField {
    /// Column name in the `guns` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Manufacturer => "manufacturer",
            Self::Price => "price",
            Self::Damage => "damage",
            Self::CreatedAt => "created_at",
        }
    }
}

impl FromStr for GunSortField {
    type Err = ListQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "manufacturer" => Ok(Self::Manufacturer),
            "price" => Ok(Self::Price),
            "damage" => Ok(Self::Damage),
            "created_at" | "createdat" => Ok(Self::CreatedAt),
            _ => Err(ListQueryError::InvalidSortField(s.to_string())),
        }
    }
}

impl fmt::Display for GunSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Lenient parse: anything other than `desc` sorts ascending.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "desc" => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Optional predicates applied to the gun listing. All bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GunFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the manufacturer
    pub manufacturer: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_damage: Option<i32>,
    pub max_damage: Option<i32>,
}

impl GunFilter {
    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.manufacturer.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_damage.is_none()
            && self.max_damage.is_none()
    }

    /// Check that each lower bound does not exceed its upper bound.
    pub fn validate(&self) -> Result<(), ListQueryError> {
        // "NaN" and "inf" parse as f64 but can never match a price
        for (field, bound) in [("minPrice", self.min_price), ("maxPrice", self.max_price)] {
            if let Some(value) = bound.filter(|v| !v.is_finite()) {
                return Err(ListQueryError::InvalidNumber {
                    field,
                    value: value.to_string(),
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(ListQueryError::InvalidRange {
                    min_field: "minPrice",
                    max_field: "maxPrice",
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min_damage, self.max_damage) {
            if min > max {
                return Err(ListQueryError::InvalidRange {
                    min_field: "minDamage",
                    max_field: "maxDamage",
                });
            }
        }
        Ok(())
    }
}

/// Fully interpreted request for a page of guns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GunListQuery {
    pub filter: GunFilter,
    pub sort: GunSortField,
    pub order: SortOrder,
    pub pagination: Pagination,
}

/// Escape `%`, `_` and `\` so user text matches literally inside a LIKE pattern.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Parse an optional text value, treating blank input as absent.
pub fn parse_optional<T: FromStr>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, ListQueryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ListQueryError::InvalidNumber {
                field,
                value: value.to_string(),
            }),
    }
}
