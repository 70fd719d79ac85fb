/// Options offered on the keyboard once a city has been entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    CurrentWeather,
    Forecast,
    AirQuality,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [
        MenuOption::CurrentWeather,
        MenuOption::Forecast,
        MenuOption::AirQuality,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::CurrentWeather => "Current Weather",
            MenuOption::Forecast => "5 Days Forecast",
            MenuOption::AirQuality => "Air Quality Index",
        }
    }

    /// Exact match against the button labels.
    pub fn from_label(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.label() == text)
    }
}
