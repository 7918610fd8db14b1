use crate::db::connection::Database;
use crate::db::properties::save_properties;
use crate::domain::property::{Address, Coordinates, NewProperty, Realtor};
use crate::errors::ServerError;
use crate::seed::models::{NumberOrText, SeedAddress, SeedRealtor, SeedRecord};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

fn required_text(value: Option<String>, what: &str) -> Result<String, String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing or empty {what}"))
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl NewProperty {
    /// Normalizes a raw seed record into the single listing shape and
    /// validates the fields storage requires.
    pub fn from_seed_record(record: SeedRecord) -> Result<Self, String> {
        let category = required_text(record.category, "category")?;

        let square_meters = record
            .square_meters
            .as_ref()
            .and_then(NumberOrText::as_f64)
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or("squareMeters must be a positive number")?;

        let price = record
            .price
            .as_ref()
            .and_then(NumberOrText::as_i64)
            .filter(|v| *v > 0)
            .ok_or("price must be a positive integer")?;

        // Identifiers minted by another store (e.g. ObjectId strings) are
        // not integers; storage assigns a fresh id instead.
        let id = match record.id {
            None => None,
            Some(raw) => match raw.as_i64() {
                Some(id) => Some(id),
                None => {
                    warn!(id = %raw.as_text(), "Non-integer seed id, a new id will be assigned");
                    None
                }
            },
        };

        let address = match record.address {
            Some(SeedAddress::Flat(street)) => Address {
                street: required_text(Some(street), "address")?,
                street_number: None,
                postal_code: None,
                city: required_text(record.city, "city")?,
            },
            Some(SeedAddress::Structured(a)) => Address {
                street: required_text(a.street, "address.street")?,
                street_number: a
                    .street_number
                    .map(|n| n.as_text())
                    .filter(|s| !s.is_empty()),
                postal_code: a
                    .postal_code
                    .map(|n| n.as_text())
                    .filter(|s| !s.is_empty()),
                // Flat `city` is accepted as a fallback for mixed records.
                city: required_text(a.city.or(record.city), "address.city")?,
            },
            None => return Err("Missing address".to_string()),
        };

        let realtor = match record.realtor {
            Some(SeedRealtor::Name(name)) => Realtor {
                name: required_text(Some(name), "realtor")?,
                email: optional_text(record.realtor_email),
                phone: optional_text(record.realtor_phone),
                photo: optional_text(record.realtor_photo),
            },
            Some(SeedRealtor::Contact(c)) => Realtor {
                name: required_text(c.name, "realtor.name")?,
                email: optional_text(c.email.or(record.realtor_email)),
                phone: optional_text(c.phone.or(record.realtor_phone)),
                photo: optional_text(c.photo.or(record.realtor_photo)),
            },
            None => return Err("Missing realtor".to_string()),
        };

        let coordinates = match record.coordinates {
            None => None,
            Some(c) => {
                let parse = |v: Option<NumberOrText>, what: &str| {
                    v.as_ref()
                        .and_then(NumberOrText::as_f64)
                        .filter(|f| f.is_finite())
                        .ok_or_else(|| format!("Invalid coordinates.{what}"))
                };
                Some(Coordinates {
                    lat: parse(c.lat, "lat")?,
                    lng: parse(c.lng, "lng")?,
                })
            }
        };

        Ok(NewProperty {
            id,
            category,
            square_meters,
            description: record.description.unwrap_or_default(),
            price,
            currency: optional_text(record.currency),
            address,
            realtor,
            images: record
                .images
                .into_iter()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
            coordinates,
        })
    }
}

/// Parses a seed document, skipping records that fail validation.
pub fn parse_seed(json: &str) -> Result<Vec<NewProperty>, ServerError> {
    // Records are decoded one by one so a single mistyped record is
    // skipped instead of failing the whole document.
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;

    let properties = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let id = value.get("_id").or_else(|| value.get("id")).cloned();
            let parsed = serde_json::from_value::<SeedRecord>(value)
                .map_err(|e| e.to_string())
                .and_then(NewProperty::from_seed_record);
            match parsed {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!(index, ?id, "Skipping seed record due to validation error: {e}");
                    None
                }
            }
        })
        .collect();

    Ok(properties)
}

/// Loads the seed file at `path` into the database.
/// Returns the number of stored properties.
pub fn seed_database(db: &Database, path: &Path) -> Result<usize, ServerError> {
    let json = fs::read_to_string(path)?;
    let properties = parse_seed(&json)?;
    let ids = save_properties(db, &properties)?;

    info!(path = %path.display(), stored = ids.len(), "seed file loaded");
    Ok(ids.len())
}
