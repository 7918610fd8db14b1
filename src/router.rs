use crate::config::ApiOptions;
use crate::db::properties::{find_properties, find_property_by_id};
use crate::db::Database;
use crate::domain::filters::{PropertyFilter, QueryParams};
use crate::domain::property::Property;
use crate::errors::ServerError;
use crate::responses::{error_response, json_response, preflight_response, with_cors, ResultResp};
use crate::routes::{self, Endpoint};
use astra::{Body, Request, Response};
use http::header::ACCESS_CONTROL_REQUEST_HEADERS;
use http::Method;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::info;

/// Everything a request handler needs, built once at startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub api: ApiOptions,
}

/// Entry point for the server: dispatches, maps errors, applies CORS and
/// logs the outcome.
pub fn serve(req: Request, state: &AppState) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = if method == Method::OPTIONS {
        preflight_response(req.headers().get(ACCESS_CONTROL_REQUEST_HEADERS))
    } else {
        handle(req, state).unwrap_or_else(error_response)
    };
    let mut resp = with_cors(resp);
    if method == Method::HEAD {
        *resp.body_mut() = Body::empty();
    }

    info!(%method, %path, status = resp.status().as_u16(), "request");
    resp
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let (endpoint, param) = routes::resolve(req.uri().path()).ok_or(ServerError::NotFound)?;
    if !endpoint.allows(req.method().as_str()) {
        return Err(ServerError::NotFound);
    }

    let params = QueryParams::parse(req.uri().query());

    match endpoint {
        Endpoint::Index => json_response(200, &routes::route_table()),
        Endpoint::ListProperties => list_properties(state, &params),
        Endpoint::SearchProperties => search_properties(state, &params),
        Endpoint::GetProperty => get_property(state, param.unwrap_or_default()),
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    success: bool,
    message: &'static str,
    body: HousingData<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HousingData<'a> {
    housing_data: &'a [Property],
}

fn list_properties(state: &AppState, params: &QueryParams) -> ResultResp {
    let filter = PropertyFilter::from_listing_query(params, state.api.malformed_numbers)?;
    let properties = state.db.with_conn(|conn| find_properties(conn, &filter))?;

    if state.api.list_envelope {
        json_response(
            200,
            &Envelope {
                success: true,
                message: "Properties retrieved successfully",
                body: HousingData {
                    housing_data: &properties,
                },
            },
        )
    } else {
        json_response(200, &properties)
    }
}

fn search_properties(state: &AppState, params: &QueryParams) -> ResultResp {
    let filter = PropertyFilter::from_address_query(params);
    let properties = state.db.with_conn(|conn| find_properties(conn, &filter))?;
    json_response(200, &properties)
}

fn get_property(state: &AppState, raw_id: &str) -> ResultResp {
    let id: i64 = percent_decode_str(raw_id)
        .decode_utf8()
        .ok()
        .and_then(|decoded| decoded.parse().ok())
        .ok_or_else(|| ServerError::InvalidId(raw_id.to_string()))?;

    let property = state
        .db
        .with_conn(|conn| find_property_by_id(conn, id))?
        .ok_or(ServerError::PropertyNotFound(id))?;

    json_response(200, &property)
}
