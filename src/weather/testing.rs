//! Scripted provider used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::Aqi;
use crate::weather::api::{
    Condition, Coord, CurrentMain, CurrentResponse, ForecastCity, ForecastPoint, ForecastResponse,
    PointMain, PollutionEntry, PollutionMain, PollutionResponse, Wind,
};
use crate::weather::{WeatherApi, WeatherError};

/// Returns the canned payloads; a `None` endpoint fails the way the provider
/// does (unknown city, or an unavailable pollution service).
#[derive(Default)]
pub struct ScriptedApi {
    pub current: Option<CurrentResponse>,
    pub forecast: Option<ForecastResponse>,
    pub pollution: Option<PollutionResponse>,
    pub requested_points: Mutex<Option<u32>>,
}

pub fn point(dt: i64, temp_min: f64, temp_max: f64, description: &str) -> ForecastPoint {
    ForecastPoint {
        dt,
        main: PointMain { temp_min, temp_max },
        weather: vec![Condition { description: description.to_string() }],
    }
}

impl ScriptedApi {
    /// London with light rain and a "Fair" index.
    pub fn london() -> Self {
        let coord = Coord { lat: 51.5085, lon: -0.1257 };
        // 2024-01-01T00:00:00Z
        let day = 1_704_067_200;

        ScriptedApi {
            current: Some(CurrentResponse {
                coord,
                weather: vec![Condition { description: "light rain".to_string() }],
                main: CurrentMain { temp: 15.3, humidity: 80 },
                wind: Wind { speed: 3.2 },
            }),
            forecast: Some(ForecastResponse {
                list: vec![
                    point(day + 3 * 3600, 2.0, 10.0, "overcast clouds"),
                    point(day + 12 * 3600, 1.0, 12.0, "light rain"),
                    point(day + 21 * 3600, 3.0, 8.0, "clear sky"),
                ],
                city: ForecastCity { coord, timezone: 0 },
            }),
            pollution: Some(PollutionResponse {
                list: vec![PollutionEntry { main: PollutionMain { aqi: Aqi(2) } }],
            }),
            requested_points: Mutex::new(None),
        }
    }

    pub fn forecast_points(&self) -> Option<u32> {
        *self.requested_points.lock().unwrap()
    }
}

#[async_trait]
impl WeatherApi for ScriptedApi {
    async fn current(&self, city: &str) -> Result<CurrentResponse, WeatherError> {
        self.current
            .clone()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))
    }

    async fn forecast(&self, city: &str, points: u32) -> Result<ForecastResponse, WeatherError> {
        *self.requested_points.lock().unwrap() = Some(points);
        self.forecast
            .clone()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))
    }

    async fn air_pollution(&self, _coord: Coord) -> Result<PollutionResponse, WeatherError> {
        self.pollution.clone().ok_or_else(|| WeatherError::Provider {
            status: 503,
            message: "Service Unavailable".to_string(),
        })
    }
}
