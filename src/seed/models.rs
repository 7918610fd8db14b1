use serde::Deserialize;

// Raw seed record, loose enough to accept every published variant:
//
// record
//  ├── _id | id                 (optional; non-integer ids are regenerated)
//  ├── category | type
//  ├── squareMeters
//  ├── description
//  ├── price / currency
//  ├── address                  "Street 1" | { street, streetNumber, postalCode, city }
//  ├── city                     (flat variants)
//  ├── realtor                  "Name" | { name, email, phone, photo }
//  ├── realtorEmail / realtorPhone / realtorPhoto
//  ├── images                   [url, ...]
//  └── coordinates              { lat, lng }  numbers or numeric strings

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<NumberOrText>,
    #[serde(alias = "type")]
    pub category: Option<String>,
    pub square_meters: Option<NumberOrText>,
    pub description: Option<String>,
    pub price: Option<NumberOrText>,
    pub currency: Option<String>,

    pub address: Option<SeedAddress>,
    pub city: Option<String>,

    pub realtor: Option<SeedRealtor>,
    pub realtor_email: Option<String>,
    pub realtor_phone: Option<String>,
    pub realtor_photo: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,
    pub coordinates: Option<SeedCoordinates>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SeedAddress {
    Flat(String),
    Structured(StructuredAddress),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAddress {
    pub street: Option<String>,
    pub street_number: Option<NumberOrText>,
    pub postal_code: Option<NumberOrText>,
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SeedRealtor {
    Name(String),
    Contact(RealtorContact),
}

#[derive(Debug, Deserialize)]
pub struct RealtorContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCoordinates {
    #[serde(alias = "latitude")]
    pub lat: Option<NumberOrText>,
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: Option<NumberOrText>,
}

/// Some variants typed numbers (ids, prices, areas, street numbers,
/// postal codes, coordinates) as JSON strings, others as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    pub fn as_text(&self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s.trim().to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => n.as_f64(),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Integer value; whole-number floats such as `100.0` count.
    pub fn as_i64(&self) -> Option<i64> {
        let whole = |f: f64| {
            (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
        };
        match self {
            NumberOrText::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
            NumberOrText::Text(s) => {
                let s = s.trim();
                s.parse().ok().or_else(|| s.parse().ok().and_then(whole))
            }
        }
    }
}
