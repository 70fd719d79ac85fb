//! Per-chat conversation flow: city name, then one of the menu options.
//!
//! `transition` is pure; `respond` runs the resulting action against the
//! weather provider and produces the replies to send.

use crate::models::{ConversationState, MenuOption};
use crate::replies;
use crate::weather::{self, WeatherApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// `/start` or `/help`.
    Greeting,
    Text(&'a str),
    /// Photo, sticker, location or anything else without text.
    NonText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Welcome,
    PromptOptions,
    RepromptOptions,
    TextOnly,
    Query { option: MenuOption, city: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    Keep,
    Options,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self { text: text.into(), keyboard }
    }
}

#[derive(Debug)]
pub struct Transition {
    pub next: ConversationState,
    pub action: Action,
}

pub fn transition(state: &ConversationState, input: Input<'_>) -> Transition {
    match (state, input) {
        (_, Input::Greeting) => Transition {
            next: ConversationState::AwaitingCity { last_city: state.city().map(str::to_string) },
            action: Action::Welcome,
        },

        (_, Input::NonText) => Transition {
            next: state.clone(),
            action: Action::TextOnly,
        },

        (ConversationState::AwaitingCity { .. }, Input::Text(text)) => Transition {
            next: ConversationState::AwaitingOption { city: text.to_string() },
            action: Action::PromptOptions,
        },

        // Back to AwaitingCity before the query runs, so a failed lookup
        // leaves the chat ready for the next city.
        (ConversationState::AwaitingOption { city }, Input::Text(text)) => match MenuOption::from_label(text) {
            Some(option) => Transition {
                next: ConversationState::AwaitingCity { last_city: Some(city.clone()) },
                action: Action::Query { option, city: city.clone() },
            },
            None => Transition {
                next: state.clone(),
                action: Action::RepromptOptions,
            },
        },
    }
}

pub async fn respond(action: Action, api: &dyn WeatherApi) -> Vec<Reply> {
    match action {
        Action::Welcome => vec![Reply::new(replies::WELCOME, Keyboard::Remove)],
        Action::PromptOptions => vec![Reply::new(replies::SELECT_OPTION, Keyboard::Options)],
        Action::RepromptOptions => vec![Reply::new(replies::RESELECT_OPTION, Keyboard::Options)],
        Action::TextOnly => vec![Reply::new(replies::TEXT_ONLY, Keyboard::Keep)],
        Action::Query { option, city } => {
            let result = run_query(option, &city, api).await;
            vec![
                Reply::new(result, Keyboard::Keep),
                Reply::new(replies::CONTINUE, Keyboard::Remove),
            ]
        }
    }
}

async fn run_query(option: MenuOption, city: &str, api: &dyn WeatherApi) -> String {
    match option {
        MenuOption::CurrentWeather => match weather::current_weather(api, city).await {
            Ok(data) => replies::current_weather(city, &data),
            Err(e) => {
                log::error!("Current weather lookup failed for {:?}: {}", city, e);
                replies::current_weather_error(&e)
            }
        },
        MenuOption::Forecast => match weather::forecast(api, city).await {
            Ok(data) => replies::forecast(city, &data),
            Err(e) => {
                log::error!("Forecast lookup failed for {:?}: {}", city, e);
                replies::forecast_error(&e)
            }
        },
        MenuOption::AirQuality => match weather::air_quality(api, city).await {
            Ok(report) => replies::air_quality(city, &report),
            Err(e) => {
                log::error!("AQI lookup failed for {:?}: {}", city, e);
                replies::air_quality_error(&e)
            }
        },
    }
}
