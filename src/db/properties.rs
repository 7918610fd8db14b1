use crate::db::connection::Database;
use crate::domain::filters::{Bounds, PropertyFilter};
use crate::domain::property::{fold, Address, Coordinates, NewProperty, Property, Realtor};
use crate::errors::ServerError;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use tracing::{debug, info};

const PROPERTY_COLUMNS: &str = r#"
    id, category, square_meters, description, price, currency,
    street, street_number, postal_code, city,
    realtor_name, realtor_email, realtor_phone, realtor_photo,
    latitude, longitude
"#;

/// Builds a parameterised WHERE clause for the filter. Returns an empty
/// string when the filter has no clauses.
fn where_clause(filter: &PropertyFilter) -> (String, Vec<Value>) {
    let mut clauses: Vec<&'static str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    fn push_bounds(
        bounds: &Bounds,
        min_sql: &'static str,
        max_sql: &'static str,
        clauses: &mut Vec<&'static str>,
        values: &mut Vec<Value>,
    ) {
        if let Some(min) = bounds.min {
            clauses.push(min_sql);
            values.push(Value::Integer(min));
        }
        if let Some(max) = bounds.max {
            clauses.push(max_sql);
            values.push(Value::Integer(max));
        }
    }

    push_bounds(
        &filter.price,
        "price >= ?",
        "price <= ?",
        &mut clauses,
        &mut values,
    );
    push_bounds(
        &filter.square_meters,
        "square_meters >= ?",
        "square_meters <= ?",
        &mut clauses,
        &mut values,
    );

    let text_filters = [
        (&filter.category, "category_folded LIKE ? ESCAPE '\\'"),
        (&filter.city, "city_folded LIKE ? ESCAPE '\\'"),
        (&filter.address, "address_folded LIKE ? ESCAPE '\\'"),
    ];
    for (needle, sql) in text_filters {
        if let Some(needle) = needle {
            clauses.push(sql);
            values.push(Value::Text(contains_pattern(needle)));
        }
    }

    if clauses.is_empty() {
        (String::new(), values)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), values)
    }
}

/// LIKE pattern matching `needle` literally anywhere in the column.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn property_from_row(row: &Row<'_>) -> rusqlite::Result<Property> {
    let latitude: Option<f64> = row.get("latitude")?;
    let longitude: Option<f64> = row.get("longitude")?;

    Ok(Property {
        id: row.get("id")?,
        category: row.get("category")?,
        square_meters: row.get("square_meters")?,
        description: row.get("description")?,
        price: row.get("price")?,
        currency: row.get("currency")?,
        address: Address {
            street: row.get("street")?,
            street_number: row.get("street_number")?,
            postal_code: row.get("postal_code")?,
            city: row.get("city")?,
        },
        realtor: Realtor {
            name: row.get("realtor_name")?,
            email: row.get("realtor_email")?,
            phone: row.get("realtor_phone")?,
            photo: row.get("realtor_photo")?,
        },
        images: Vec::new(),
        coordinates: match (latitude, longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        },
    })
}

/// Lists every property matching `filter`, ordered by id.
pub fn find_properties(
    conn: &Connection,
    filter: &PropertyFilter,
) -> Result<Vec<Property>, ServerError> {
    let (where_sql, values) = where_clause(filter);

    let mut stmt = conn.prepare(&format!(
        "SELECT {PROPERTY_COLUMNS} FROM properties {where_sql} ORDER BY id"
    ))?;
    let rows = stmt.query_map(params_from_iter(values.iter()), property_from_row)?;

    let mut properties = Vec::new();
    for row in rows {
        properties.push(row?);
    }

    // Images for the same matched set, in one pass.
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT property_id, url FROM property_images
        WHERE property_id IN (SELECT id FROM properties {where_sql})
        ORDER BY property_id, position
        "#
    ))?;
    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut images: HashMap<i64, Vec<String>> = HashMap::new();
    for row in rows {
        let (property_id, url) = row?;
        images.entry(property_id).or_default().push(url);
    }
    for property in &mut properties {
        if let Some(urls) = images.remove(&property.id) {
            property.images = urls;
        }
    }

    debug!(
        filtered = !filter.is_empty(),
        matched = properties.len(),
        "property query"
    );
    Ok(properties)
}

/// Fetches one property with its images.
pub fn find_property_by_id(conn: &Connection, id: i64) -> Result<Option<Property>, ServerError> {
    let property = conn
        .query_row(
            &format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?1"),
            params![id],
            property_from_row,
        )
        .optional()?;

    let Some(mut property) = property else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT url FROM property_images WHERE property_id = ?1 ORDER BY position",
    )?;
    let rows = stmt.query_map(params![id], |row| row.get::<_, String>(0))?;
    for url in rows {
        property.images.push(url?);
    }

    Ok(Some(property))
}

pub fn count_properties(conn: &Connection) -> Result<i64, ServerError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM properties", [], |row| row.get(0))?)
}

/// Writes the given properties in a single transaction, replacing any
/// existing record with the same id. Returns the stored ids in input order.
pub fn save_properties(db: &Database, properties: &[NewProperty]) -> Result<Vec<i64>, ServerError> {
    let ids = db.with_conn(|conn| {
        let tx = conn.transaction()?;

        let mut ids = Vec::with_capacity(properties.len());
        for prop in properties {
            ids.push(upsert_property(&tx, prop)?);
        }

        tx.commit()?;
        Ok(ids)
    })?;

    info!(count = ids.len(), "saved properties");
    Ok(ids)
}

fn upsert_property(tx: &Connection, prop: &NewProperty) -> Result<i64, ServerError> {
    tx.execute(
        r#"
        INSERT INTO properties (
            id, category, category_folded, square_meters, description, price, currency,
            street, street_number, postal_code, city, city_folded, address_folded,
            realtor_name, realtor_email, realtor_phone, realtor_photo,
            latitude, longitude
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
        ON CONFLICT (id) DO UPDATE SET
            category = excluded.category,
            category_folded = excluded.category_folded,
            square_meters = excluded.square_meters,
            description = excluded.description,
            price = excluded.price,
            currency = excluded.currency,
            street = excluded.street,
            street_number = excluded.street_number,
            postal_code = excluded.postal_code,
            city = excluded.city,
            city_folded = excluded.city_folded,
            address_folded = excluded.address_folded,
            realtor_name = excluded.realtor_name,
            realtor_email = excluded.realtor_email,
            realtor_phone = excluded.realtor_phone,
            realtor_photo = excluded.realtor_photo,
            latitude = excluded.latitude,
            longitude = excluded.longitude
        "#,
        params![
            prop.id,
            &prop.category,
            fold(&prop.category),
            prop.square_meters,
            &prop.description,
            prop.price,
            &prop.currency,
            &prop.address.street,
            &prop.address.street_number,
            &prop.address.postal_code,
            &prop.address.city,
            fold(&prop.address.city),
            fold(&prop.address.full()),
            &prop.realtor.name,
            &prop.realtor.email,
            &prop.realtor.phone,
            &prop.realtor.photo,
            prop.coordinates.map(|c| c.lat),
            prop.coordinates.map(|c| c.lng),
        ],
    )?;

    // last_insert_rowid is only meaningful when storage generated the id.
    let id = prop.id.unwrap_or_else(|| tx.last_insert_rowid());

    tx.execute(
        "DELETE FROM property_images WHERE property_id = ?1",
        params![id],
    )?;
    let mut stmt = tx.prepare(
        "INSERT INTO property_images (property_id, position, url) VALUES (?1, ?2, ?3)",
    )?;
    for (position, url) in prop.images.iter().enumerate() {
        stmt.execute(params![id, position as i64, url])?;
    }

    Ok(id)
}
