pub mod menu;
pub mod user_state;
pub mod weather;

pub use menu::MenuOption;
pub use user_state::{ConversationState, Step};
pub use weather::{AirQuality, Aqi, AqiReport, CurrentWeather, Forecast, ForecastDay};
