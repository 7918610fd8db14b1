// src/domain/property.rs

use serde::Serialize;

/// A listing as stored and served by the API.
///
/// The JSON shape is the union of every published variant of the listing
/// document: structured address, realtor contact, images and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: i64,
    pub category: String,
    pub square_meters: f64,
    pub description: String,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub address: Address,
    pub realtor: Realtor,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub city: String,
}

impl Address {
    /// Single-line form used for address search, e.g.
    /// "Sveavägen 44, 111 34 Stockholm".
    pub fn full(&self) -> String {
        let mut out = self.street.clone();
        if let Some(number) = &self.street_number {
            out.push(' ');
            out.push_str(number);
        }
        out.push_str(", ");
        if let Some(postal) = &self.postal_code {
            out.push_str(postal);
            out.push(' ');
        }
        out.push_str(&self.city);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Realtor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A validated listing that has not been written yet.
/// `id` is `None` when storage should generate one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub id: Option<i64>,
    pub category: String,
    pub square_meters: f64,
    pub description: String,
    pub price: i64,
    pub currency: Option<String>,
    pub address: Address,
    pub realtor: Realtor,
    pub images: Vec<String>,
    pub coordinates: Option<Coordinates>,
}

/// Case-folded form stored next to searchable text columns.
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}
