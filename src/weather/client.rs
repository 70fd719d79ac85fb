use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;

use crate::config::ProviderConfig;
use crate::weather::api::{
    Coord, CurrentResponse, ForecastResponse, PollutionResponse, ProviderErrorBody,
};
use crate::weather::error::WeatherError;
use crate::weather::WeatherApi;

/// OpenWeather 2.5 HTTP client.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, WeatherError> {
        let inner = Client::builder().timeout(config.timeout).build()?;

        let retry_policy = ExponentialBackoff::builder()
            .build_with_max_retries(config.max_retries);

        let http = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        city: Option<&str>,
    ) -> Result<T, WeatherError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, endpoint))
            .header("Accept", "application/json")
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        log::debug!("🌐 GET /{} -> {}", endpoint, status);

        decode(status, &text, city)
    }
}

/// Maps a provider response to its payload or a `WeatherError`. A 404 means
/// an unknown city only for the endpoints that look one up.
fn decode<T: DeserializeOwned>(status: StatusCode, text: &str, city: Option<&str>) -> Result<T, WeatherError> {
    if status == StatusCode::NOT_FOUND {
        if let Some(city) = city {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }
    }

    if !status.is_success() {
        let message = serde_json::from_str::<ProviderErrorBody>(text)
            .map(|body| body.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
        return Err(WeatherError::Provider { status: status.as_u16(), message });
    }

    Ok(serde_json::from_str::<T>(text)?)
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<CurrentResponse, WeatherError> {
        let params = [("q", city.to_string()), ("units", "metric".to_string())];
        self.get("weather", &params, Some(city)).await
    }

    async fn forecast(&self, city: &str, points: u32) -> Result<ForecastResponse, WeatherError> {
        let params = [
            ("q", city.to_string()),
            ("units", "metric".to_string()),
            ("cnt", points.to_string()),
        ];
        self.get("forecast", &params, Some(city)).await
    }

    async fn air_pollution(&self, coord: Coord) -> Result<PollutionResponse, WeatherError> {
        let params = [("lat", coord.lat.to_string()), ("lon", coord.lon.to_string())];
        self.get("air_pollution", &params, None).await
    }
}
