use serde::{Deserialize, Serialize};

use crate::models::Aqi;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
}

/// `GET /weather`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentResponse {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub main: CurrentMain,
    pub wind: Wind,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// `GET /forecast`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastPoint>,
    pub city: ForecastCity,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub dt: i64,
    pub main: PointMain,
    pub weather: Vec<Condition>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointMain {
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForecastCity {
    pub coord: Coord,
    /// Shift from UTC in seconds.
    #[serde(default)]
    pub timezone: i32,
}

/// `GET /air_pollution`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollutionResponse {
    pub list: Vec<PollutionEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollutionEntry {
    pub main: PollutionMain,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollutionMain {
    pub aqi: Aqi,
}

/// Body the provider sends alongside non-2xx statuses, e.g.
/// `{"cod":"404","message":"city not found"}`.
#[derive(Clone, Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub message: String,
}
