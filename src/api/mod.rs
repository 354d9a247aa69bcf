pub mod endpoint;
pub mod error;
pub mod response;

use crate::model;
pub use error::Error;

pub fn api(address: String, username: String, password: String) -> model::Api {
    model::Api {
        address,
        username,
        password,
    }
}

/// Map non-200 device responses and transport failures to Error
fn map_api_err(error: reqwest::Error) -> Error {
    match error.status() {
        Some(http::StatusCode::UNAUTHORIZED) => Error::LoginError(error.to_string()),
        Some(http::StatusCode::FORBIDDEN) => Error::LoginError(error.to_string()),
        _ => Error::ApiError(error.to_string()),
    }
}

async fn get_str(api: &model::Api, endpoint: &endpoint::Endpoint) -> Result<String, Error> {
    let client = reqwest::ClientBuilder::new()
        .build()
        .or(Err(Error::InternalError))?;
    let url = format!("http://{}{}", api.address, endpoint);

    client
        .get(url)
        .basic_auth(&api.username, Some(&api.password))
        .send()
        .await
        .map_err(map_api_err)?
        .error_for_status()
        .map_err(map_api_err)?
        .text()
        .await
        .map_err(|e| Error::ApiError(format!("Error reading device response: {}", e)))
}

/// Perform one status cycle against the device: fetch `/js/status.js`
/// with the configured Basic credentials and decode the page.
pub async fn status(api: &model::Api) -> Result<model::InverterReading, Error> {
    let response_text = get_str(api, endpoint::STATUS).await?;

    log::trace!(
        "endpoint: {}, response_text: {}",
        endpoint::STATUS,
        response_text
    );

    response::parse(&response_text)
}
