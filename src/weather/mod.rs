pub mod api;
pub mod client;
pub mod error;
#[cfg(test)]
pub mod testing;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};

use crate::models::{AirQuality, Aqi, AqiReport, CurrentWeather, Forecast, ForecastDay};
use crate::weather::api::{Coord, CurrentResponse, ForecastPoint, ForecastResponse, PollutionResponse};

pub use client::OpenWeatherClient;
pub use error::WeatherError;

/// Timeline points requested for the 5-day forecast (3-hour steps).
pub const FORECAST_POINTS: u32 = 40;

const MIDDAY_MINUTES: i64 = 12 * 60;

/// Raw provider endpoints.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn current(&self, city: &str) -> Result<CurrentResponse, WeatherError>;

    async fn forecast(&self, city: &str, points: u32) -> Result<ForecastResponse, WeatherError>;

    async fn air_pollution(&self, coord: Coord) -> Result<PollutionResponse, WeatherError>;
}

pub async fn current_weather(api: &dyn WeatherApi, city: &str) -> Result<CurrentWeather, WeatherError> {
    let data = api.current(city).await?;
    let description = first_description(&data.weather)?;
    let air_quality = resolve_air_quality(api, data.coord).await;

    Ok(CurrentWeather {
        temperature: data.main.temp,
        description,
        humidity: data.main.humidity,
        wind_speed: data.wind.speed,
        air_quality,
    })
}

pub async fn forecast(api: &dyn WeatherApi, city: &str) -> Result<Forecast, WeatherError> {
    let data = api.forecast(city, FORECAST_POINTS).await?;
    let days = group_by_date(&data.list, data.city.timezone)?;
    let air_quality = resolve_air_quality(api, data.city.coord).await;

    Ok(Forecast { days, air_quality })
}

/// Unlike the other two queries a failed pollution lookup fails the whole
/// request here, since the index is the only thing being asked for.
pub async fn air_quality(api: &dyn WeatherApi, city: &str) -> Result<AqiReport, WeatherError> {
    let data = api.current(city).await?;
    let aqi = fetch_aqi(api, data.coord).await?;
    Ok(AqiReport { aqi })
}

async fn fetch_aqi(api: &dyn WeatherApi, coord: Coord) -> Result<Aqi, WeatherError> {
    let pollution = api.air_pollution(coord).await?;
    pollution
        .list
        .first()
        .map(|entry| entry.main.aqi)
        .ok_or(WeatherError::MissingField("list"))
}

async fn resolve_air_quality(api: &dyn WeatherApi, coord: Coord) -> AirQuality {
    match fetch_aqi(api, coord).await {
        Ok(aqi) => AirQuality::Index(aqi),
        Err(e) => {
            log::warn!("⚠️ AQI lookup failed for ({}, {}): {}", coord.lat, coord.lon, e);
            AirQuality::unavailable()
        }
    }
}

fn first_description(conditions: &[api::Condition]) -> Result<String, WeatherError> {
    conditions
        .first()
        .map(|c| c.description.clone())
        .ok_or(WeatherError::MissingField("weather"))
}

struct DayAccumulator {
    max_temp: f64,
    min_temp: f64,
    description: String,
    distance_from_midday: i64,
}

/// Collapses the 3-hourly timeline into one entry per local calendar date.
///
/// Each day's description comes from the point nearest local midday; the
/// earliest point wins a tie.
pub fn group_by_date(points: &[ForecastPoint], utc_offset_secs: i32) -> Result<Vec<ForecastDay>, WeatherError> {
    let offset = FixedOffset::east_opt(utc_offset_secs).ok_or(WeatherError::InvalidValue {
        field: "city.timezone",
        value: i64::from(utc_offset_secs),
    })?;

    let mut ordered: Vec<&ForecastPoint> = points.iter().collect();
    ordered.sort_by_key(|p| p.dt);

    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for point in ordered {
        let local = DateTime::from_timestamp(point.dt, 0)
            .ok_or(WeatherError::InvalidValue { field: "list.dt", value: point.dt })?
            .with_timezone(&offset);
        let description = first_description(&point.weather)?;
        let minutes = i64::from(local.hour()) * 60 + i64::from(local.minute());
        let distance = (minutes - MIDDAY_MINUTES).abs();

        days.entry(local.date_naive())
            .and_modify(|day| {
                day.max_temp = day.max_temp.max(point.main.temp_max);
                day.min_temp = day.min_temp.min(point.main.temp_min);
                if distance < day.distance_from_midday {
                    day.description = description.clone();
                    day.distance_from_midday = distance;
                }
            })
            .or_insert_with(|| DayAccumulator {
                max_temp: point.main.temp_max,
                min_temp: point.main.temp_min,
                description: description.clone(),
                distance_from_midday: distance,
            });
    }

    Ok(days
        .into_iter()
        .map(|(date, day)| ForecastDay {
            date,
            max_temp: day.max_temp,
            min_temp: day.min_temp,
            description: day.description,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::testing::{point, ScriptedApi};
    use proptest::prelude::*;

    // 2024-01-01T00:00:00Z
    const NEW_YEAR: i64 = 1_704_067_200;
    const HOUR: i64 = 3600;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn groups_points_sharing_a_date() {
        let points = vec![
            point(NEW_YEAR + 3 * HOUR, 2.0, 10.0, "clear sky"),
            point(NEW_YEAR + 12 * HOUR, 1.0, 12.0, "few clouds"),
            point(NEW_YEAR + 21 * HOUR, 3.0, 8.0, "snow"),
        ];

        let days = group_by_date(&points, 0).unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, date(2024, 1, 1));
        assert_eq!(days[0].max_temp, 12.0);
        assert_eq!(days[0].min_temp, 1.0);
        assert_eq!(days[0].description, "few clouds");
    }

    #[test]
    fn days_are_sorted_even_when_points_are_not() {
        let points = vec![
            point(NEW_YEAR + 30 * HOUR, 4.0, 9.0, "rain"),
            point(NEW_YEAR + 3 * HOUR, 2.0, 10.0, "clear sky"),
            point(NEW_YEAR + 54 * HOUR, 0.0, 5.0, "snow"),
        ];

        let dates: Vec<NaiveDate> = group_by_date(&points, 0).unwrap().iter().map(|d| d.date).collect();

        assert_eq!(dates, [date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
    }

    #[test]
    fn dates_follow_the_city_offset() {
        // 22:00 UTC on Jan 1st is already Jan 2nd at UTC+3.
        let points = vec![
            point(NEW_YEAR + 9 * HOUR, 1.0, 2.0, "fog"),
            point(NEW_YEAR + 22 * HOUR, 3.0, 4.0, "mist"),
        ];

        let days = group_by_date(&points, 3 * 3600).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2024, 1, 1));
        assert_eq!(days[1].date, date(2024, 1, 2));
        assert_eq!(days[1].description, "mist");
    }

    #[test]
    fn midday_tie_keeps_earliest_point() {
        let points = vec![
            point(NEW_YEAR + 9 * HOUR, 1.0, 2.0, "morning"),
            point(NEW_YEAR + 15 * HOUR, 1.0, 2.0, "afternoon"),
        ];

        let days = group_by_date(&points, 0).unwrap();
        assert_eq!(days[0].description, "morning");
    }

    #[test]
    fn timezone_beyond_a_day_is_invalid() {
        let points = vec![point(NEW_YEAR, 1.0, 2.0, "fog")];

        let err = group_by_date(&points, 90_000).unwrap_err();

        assert!(matches!(err, WeatherError::InvalidValue { field: "city.timezone", value: 90_000 }));
        assert_eq!(err.to_string(), "unexpected response: city.timezone out of range (90000)");
    }

    #[test]
    fn point_without_conditions_is_malformed() {
        let mut bare = point(NEW_YEAR, 1.0, 2.0, "x");
        bare.weather.clear();

        let err = group_by_date(&[bare], 0).unwrap_err();
        assert!(matches!(err, WeatherError::MissingField("weather")));
    }

    proptest! {
        #[test]
        fn grouping_is_sorted_unique_and_ordered(
            raw in prop::collection::vec((0i64..40, -30.0f64..30.0, 0.0f64..15.0), 1..40),
            offset_hours in -12i32..=14,
        ) {
            let points: Vec<_> = raw
                .iter()
                .map(|(step, low, spread)| point(NEW_YEAR + step * 3 * HOUR, *low, low + spread, "any"))
                .collect();

            let days = group_by_date(&points, offset_hours * 3600).unwrap();

            prop_assert!(!days.is_empty());
            for pair in days.windows(2) {
                prop_assert!(pair[0].date < pair[1].date);
            }
            for day in &days {
                prop_assert!(day.max_temp >= day.min_temp);
            }
        }
    }

    #[tokio::test]
    async fn current_weather_merges_air_quality() {
        let api = ScriptedApi::london();

        let weather = current_weather(&api, "London").await.unwrap();

        assert_eq!(weather.temperature, 15.3);
        assert_eq!(weather.description, "light rain");
        assert_eq!(weather.humidity, 80);
        assert_eq!(weather.wind_speed, 3.2);
        assert_eq!(weather.air_quality, AirQuality::Index(Aqi(2)));
    }

    #[tokio::test]
    async fn current_weather_degrades_when_aqi_fails() {
        let api = ScriptedApi { pollution: None, ..ScriptedApi::london() };

        let weather = current_weather(&api, "London").await.unwrap();

        assert_eq!(weather.air_quality, AirQuality::unavailable());
    }

    #[tokio::test]
    async fn current_weather_surfaces_primary_failure() {
        let api = ScriptedApi::default();

        let err = current_weather(&api, "Atlantis").await.unwrap_err();
        assert_eq!(err.to_string(), "city not found: Atlantis");
    }

    #[tokio::test]
    async fn forecast_requests_forty_points() {
        let api = ScriptedApi::london();

        let result = forecast(&api, "London").await.unwrap();

        assert_eq!(api.forecast_points(), Some(FORECAST_POINTS));
        assert_eq!(result.days.len(), 1);
        assert_eq!(result.days[0].max_temp, 12.0);
        assert_eq!(result.days[0].min_temp, 1.0);
        assert_eq!(result.air_quality, AirQuality::Index(Aqi(2)));
    }

    #[tokio::test]
    async fn forecast_degrades_when_aqi_fails() {
        let api = ScriptedApi { pollution: None, ..ScriptedApi::london() };

        let result = forecast(&api, "London").await.unwrap();

        assert_eq!(result.air_quality, AirQuality::unavailable());
        assert_eq!(result.days.len(), 1);
    }

    #[tokio::test]
    async fn air_quality_fails_when_pollution_lookup_fails() {
        let api = ScriptedApi { pollution: None, ..ScriptedApi::london() };

        let err = air_quality(&api, "London").await.unwrap_err();
        assert!(matches!(err, WeatherError::Provider { status: 503, .. }));
    }

    #[tokio::test]
    async fn air_quality_rejects_empty_pollution_list() {
        let api = ScriptedApi {
            pollution: Some(PollutionResponse { list: vec![] }),
            ..ScriptedApi::london()
        };

        let err = air_quality(&api, "London").await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingField("list")));
    }
}
