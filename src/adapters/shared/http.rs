//! REST request helper shared by the adapters

use serde::de::DeserializeOwned;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::throttle::RequestThrottle;

/// GET `url` and decode the JSON body into `T`
///
/// Non-2xx statuses become `ExchangeError::Api` carrying the body text;
/// bodies that do not match `T` become `ExchangeError::InvalidResponse`.
pub async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    throttle: &RequestThrottle,
    exchange: &str,
    url: &str,
) -> ExchangeResult<T> {
    throttle.wait().await;

    let response = http.get(url).send().await.map_err(|e| {
        ExchangeError::ConnectionFailed(format!("{} request to {} failed: {}", exchange, url, e))
    })?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!(
            exchange = %exchange,
            status = status.as_u16(),
            url = %url,
            "REST request rejected"
        );
        return Err(ExchangeError::Api {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        ExchangeError::InvalidResponse(format!("{} response from {}: {}", exchange, url, e))
    })
}
