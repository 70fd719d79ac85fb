use crate::models::{AqiReport, CurrentWeather, Forecast};
use crate::weather::WeatherError;

pub const WELCOME: &str = "Welcome to the Weather Forecast Bot!\nPlease enter a city name to get started.";
pub const SELECT_OPTION: &str = "Please select an option:";
pub const RESELECT_OPTION: &str =
    "Please select one of the options below, or send /start to choose another city.";
pub const CONTINUE: &str =
    "Enter another city name to continue or use the same city to check other options.";
pub const TEXT_ONLY: &str = "Please send a city name as a text message.";

pub fn current_weather(city: &str, weather: &CurrentWeather) -> String {
    format!(
        "Current Weather in {}:\n\
        Temperature: {:.1}°C\n\
        Conditions: {}\n\
        Humidity: {}%\n\
        Wind Speed: {} m/s\n\
        Air Quality Index: {} ({})",
        city,
        weather.temperature,
        weather.description,
        weather.humidity,
        weather.wind_speed,
        weather.air_quality,
        weather.air_quality.label()
    )
}

pub fn forecast(city: &str, forecast: &Forecast) -> String {
    let mut out = format!(
        "5-Day Weather Forecast for {}:\nCurrent Air Quality Index: {} ({})\n\n",
        city,
        forecast.air_quality,
        forecast.air_quality.label()
    );

    for day in &forecast.days {
        out.push_str(&format!(
            "Date: {}\n\
            Max Temperature: {:.1}°C\n\
            Min Temperature: {:.1}°C\n\
            Weather: {}\n\n",
            day.date.format("%Y-%m-%d"),
            day.max_temp,
            day.min_temp,
            day.description
        ));
    }

    out
}

pub fn air_quality(city: &str, report: &AqiReport) -> String {
    format!(
        "Air Quality in {}:\nAQI Value: {}\nStatus: {}",
        city,
        report.aqi,
        report.aqi.label()
    )
}

pub fn current_weather_error(err: &WeatherError) -> String {
    format!("Error fetching current weather: {}", err)
}

pub fn forecast_error(err: &WeatherError) -> String {
    format!("Error fetching weather data: {}", err)
}

pub fn air_quality_error(err: &WeatherError) -> String {
    format!("Error fetching AQI data: {}", err)
}
