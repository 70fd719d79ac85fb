/// Which input the conversation is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AwaitingCity,
    AwaitingOption,
}

/// Per-chat conversation state.
///
/// The option step owns its city, so a chat can never be asked to pick an
/// option before it has named a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationState {
    AwaitingCity { last_city: Option<String> },
    AwaitingOption { city: String },
}

impl Default for ConversationState {
    fn default() -> Self {
        ConversationState::AwaitingCity { last_city: None }
    }
}

impl ConversationState {
    pub fn step(&self) -> Step {
        match self {
            ConversationState::AwaitingCity { .. } => Step::AwaitingCity,
            ConversationState::AwaitingOption { .. } => Step::AwaitingOption,
        }
    }

    /// Last city entered in this chat, if any.
    pub fn city(&self) -> Option<&str> {
        match self {
            ConversationState::AwaitingCity { last_city } => last_city.as_deref(),
            ConversationState::AwaitingOption { city } => Some(city),
        }
    }
}
