// src/domain/filters.rs

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::property::fold;

/// What to do with a numeric filter that is present but not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedNumberPolicy {
    /// Behave as if the parameter had not been sent.
    #[default]
    Ignore,
    /// Answer 400 naming the parameter.
    Reject,
}

impl FromStr for MalformedNumberPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            other => Err(format!("expected \"ignore\" or \"reject\", got {other:?}")),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("query parameter {param} must be an integer, got {value:?}")]
pub struct FilterError {
    pub param: &'static str,
    pub value: String,
}

/// Decoded query string. The first occurrence of a repeated key wins.
#[derive(Debug, Default, Clone)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let mut map = HashMap::new();
        if let Some(q) = query {
            for (k, v) in url::form_urlencoded::parse(q.as_bytes()) {
                map.entry(k.into_owned()).or_insert_with(|| v.into_owned());
            }
        }
        Self(map)
    }

    /// Trimmed value, with empty strings treated as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A numeric parameter after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberParam {
    Absent,
    Value(i64),
    Malformed(String),
}

impl NumberParam {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => NumberParam::Absent,
            Some(s) => match s.parse::<i64>() {
                Ok(n) => NumberParam::Value(n),
                Err(_) => NumberParam::Malformed(s.to_string()),
            },
        }
    }

    fn resolve(
        self,
        param: &'static str,
        policy: MalformedNumberPolicy,
    ) -> Result<Option<i64>, FilterError> {
        match (self, policy) {
            (NumberParam::Absent, _) => Ok(None),
            (NumberParam::Value(n), _) => Ok(Some(n)),
            (NumberParam::Malformed(_), MalformedNumberPolicy::Ignore) => Ok(None),
            (NumberParam::Malformed(value), MalformedNumberPolicy::Reject) => {
                Err(FilterError { param, value })
            }
        }
    }
}

/// Inclusive range on a numeric field. Either side may be open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Bounds {
    fn from_params(
        params: &QueryParams,
        min_key: &'static str,
        max_key: &'static str,
        policy: MalformedNumberPolicy,
    ) -> Result<Self, FilterError> {
        Ok(Bounds {
            min: NumberParam::parse(params.get(min_key)).resolve(min_key, policy)?,
            max: NumberParam::parse(params.get(max_key)).resolve(max_key, policy)?,
        })
    }

    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Conditions applied when listing properties. Text fields hold the
/// case-folded needle for a substring match; `None` means no clause.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PropertyFilter {
    pub price: Bounds,
    pub square_meters: Bounds,
    pub category: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

impl PropertyFilter {
    /// Filter for `GET /properties`.
    pub fn from_listing_query(
        params: &QueryParams,
        policy: MalformedNumberPolicy,
    ) -> Result<Self, FilterError> {
        Ok(PropertyFilter {
            price: Bounds::from_params(params, "minPrice", "maxPrice", policy)?,
            square_meters: Bounds::from_params(
                params,
                "minSquareMeters",
                "maxSquareMeters",
                policy,
            )?,
            category: params.get("type").map(fold),
            city: params.get("location").map(fold),
            address: None,
        })
    }

    /// Filter for `GET /properties/search`.
    pub fn from_address_query(params: &QueryParams) -> Self {
        PropertyFilter {
            address: params.get("address").map(fold),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_open()
            && self.square_meters.is_open()
            && self.category.is_none()
            && self.city.is_none()
            && self.address.is_none()
    }
}
