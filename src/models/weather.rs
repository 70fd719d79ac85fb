use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

/// Marker carried in place of an index when the air pollution lookup failed.
pub const AQI_UNAVAILABLE: &str = "Error fetching AQI data";

/// Provider air quality index, 1 (best) to 5 (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aqi(pub i64);

impl Aqi {
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Good",
            2 => "Fair",
            3 => "Moderate",
            4 => "Poor",
            5 => "Very Poor",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for Aqi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Air quality attached to a weather result. A failed lookup does not fail
/// the surrounding query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirQuality {
    Index(Aqi),
    Unavailable(String),
}

impl AirQuality {
    pub fn unavailable() -> Self {
        AirQuality::Unavailable(AQI_UNAVAILABLE.to_string())
    }

    pub fn label(&self) -> &str {
        match self {
            AirQuality::Index(aqi) => aqi.label(),
            AirQuality::Unavailable(marker) => marker,
        }
    }
}

impl fmt::Display for AirQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirQuality::Index(aqi) => write!(f, "{}", aqi),
            AirQuality::Unavailable(marker) => f.write_str(marker),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub air_quality: AirQuality,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub days: Vec<ForecastDay>,
    pub air_quality: AirQuality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiReport {
    pub aqi: Aqi,
}
