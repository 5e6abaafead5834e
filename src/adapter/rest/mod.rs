use reqwest::Method;
use serde_json::{Map, Value};
use url::Url;

use super::AdapterSettings;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::Parameters;
use crate::wire::{from_json_fields, Entity};
use crate::{PostNLError, PostNLResult};

mod barcode;
mod confirming;
mod delivery_date;
mod labelling;
mod location;
mod shipping_status;
mod timeframe;

pub use barcode::BarcodeRestAdapter;
pub use confirming::ConfirmingRestAdapter;
pub use delivery_date::DeliveryDateRestAdapter;
pub use labelling::LabellingRestAdapter;
pub use location::LocationRestAdapter;
pub use shipping_status::ShippingStatusRestAdapter;
pub use timeframe::TimeframeRestAdapter;

fn request(
    settings: &AdapterSettings,
    method: Method,
    mut url: Url,
    params: &Parameters,
) -> HttpRequest {
    params.apply_to(&mut url);
    HttpRequest::new(method, url)
        .header("apikey", settings.api_key.expose())
        .header("Accept", "application/json")
}

/// Builds a GET request with the API key and JSON accept headers.
pub(crate) fn get(
    settings: &AdapterSettings,
    path: &str,
    params: &Parameters,
) -> PostNLResult<HttpRequest> {
    Ok(request(settings, Method::GET, settings.endpoint(path)?, params))
}

/// Builds a GET request for an already resolved endpoint.
pub(crate) fn get_url(settings: &AdapterSettings, url: Url, params: &Parameters) -> HttpRequest {
    request(settings, Method::GET, url, params)
}

/// Builds a POST request carrying `body` as JSON.
pub(crate) fn post_json(
    settings: &AdapterSettings,
    path: &str,
    params: &Parameters,
    body: Map<String, Value>,
) -> PostNLResult<HttpRequest> {
    let body = serde_json::to_string(&Value::Object(body))?;
    Ok(request(settings, Method::POST, settings.endpoint(path)?, params)
        .header("Content-Type", "application/json;charset=UTF-8")
        .body(body))
}

/// Checks the status of a REST response and parses its JSON body.
pub(crate) fn decode_body(response: &HttpResponse) -> PostNLResult<Value> {
    match response.status {
        204 | 404 => {
            return Err(PostNLError::NotFound(
                error_message(&response.body).unwrap_or_else(|| "no data for this request".to_string()),
            ))
        }
        status if !response.is_success() => {
            return Err(PostNLError::Response {
                message: error_message(&response.body)
                    .unwrap_or_else(|| format!("unexpected HTTP status {status}")),
                status: Some(status),
            })
        }
        _ => {}
    }

    serde_json::from_str(&response.body).map_err(|error| PostNLError::Response {
        message: format!("invalid JSON body: {error}"),
        status: Some(response.status),
    })
}

/// Decodes the object stored under `key` in a REST body.
pub(crate) fn decode_wrapped<E: Entity>(response: &HttpResponse, key: &str) -> PostNLResult<E> {
    let mut body = decode_body(response)?;
    let value = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| PostNLError::EntityNotFound(key.to_string()))?;
    from_json_fields(value)
}

/// Decodes an unwrapped REST body.
pub(crate) fn decode_unwrapped<E: Entity>(response: &HttpResponse) -> PostNLResult<E> {
    match decode_body(response)? {
        body @ Value::Object(_) => from_json_fields(body),
        _ => Err(PostNLError::EntityNotFound(E::NAME.to_string())),
    }
}

/// Extracts the messages of an `Errors` list or a gateway `fault` from an error body.
fn error_message(body: &str) -> Option<String> {
    let body: Value = serde_json::from_str(body).ok()?;
    if let Some(fault) = body.get("fault") {
        return fault
            .get("faultstring")
            .and_then(Value::as_str)
            .map(str::to_string);
    }

    let errors = body.get("Errors").or_else(|| body.get("Error"))?;
    let errors = match errors {
        Value::Array(errors) => errors.iter().collect::<Vec<_>>(),
        other => vec![other],
    };
    let messages = errors
        .into_iter()
        .filter_map(|error| {
            ["ErrorMsg", "Description", "Error"]
                .into_iter()
                .find_map(|key| error.get(key).and_then(Value::as_str))
        })
        .collect::<Vec<_>>();
    (!messages.is_empty()).then(|| messages.join("; "))
}
