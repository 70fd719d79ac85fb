use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use async_trait::async_trait;
use teloxide::types::ChatId;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::dialog::{self, Input, Reply};
use crate::models::ConversationState;
use crate::weather::WeatherApi;

/// Backing store for conversation states.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self, chat_id: ChatId) -> Option<ConversationState>;

    async fn save(&self, chat_id: ChatId, state: ConversationState);

    /// Drops entries not written within `ttl`; returns the evicted chats.
    async fn evict_idle(&self, ttl: Duration) -> Vec<ChatId>;
}

type UserCache = RwLock<HashMap<ChatId, (ConversationState, SystemTime)>>;

#[derive(Default)]
pub struct MemoryStorage {
    cache: UserCache,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn load(&self, chat_id: ChatId) -> Option<ConversationState> {
        let cache = self.cache.read().await;
        cache.get(&chat_id).map(|(state, _)| state.clone())
    }

    async fn save(&self, chat_id: ChatId, state: ConversationState) {
        let mut cache = self.cache.write().await;
        cache.insert(chat_id, (state, SystemTime::now()));
    }

    async fn evict_idle(&self, ttl: Duration) -> Vec<ChatId> {
        let mut cache = self.cache.write().await;
        let now = SystemTime::now();

        let expired: Vec<ChatId> = cache
            .iter()
            .filter(|(_, (_, touched))| now.duration_since(*touched).unwrap_or_default() >= ttl)
            .map(|(chat_id, _)| *chat_id)
            .collect();

        for chat_id in &expired {
            cache.remove(chat_id);
        }
        expired
    }
}

/// Shared handler dependencies: the session store and the weather provider.
///
/// Each chat gets its own lock, held from loading the state until the new
/// state is saved, so two quick messages from one chat apply in order while
/// other chats are unaffected.
#[derive(Clone)]
pub struct BotState {
    storage: Arc<dyn SessionStorage>,
    weather: Arc<dyn WeatherApi>,
    locks: Arc<Mutex<HashMap<ChatId, Arc<Mutex<()>>>>>,
}

impl BotState {
    pub fn new(storage: Arc<dyn SessionStorage>, weather: Arc<dyn WeatherApi>) -> Self {
        Self {
            storage,
            weather,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn in_memory(weather: Arc<dyn WeatherApi>) -> Self {
        Self::new(Arc::new(MemoryStorage::new()), weather)
    }

    async fn lock_conversation(&self, chat_id: ChatId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(chat_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    pub async fn get_user_state(&self, chat_id: ChatId) -> ConversationState {
        self.storage.load(chat_id).await.unwrap_or_default()
    }

    pub async fn save_user_state(&self, chat_id: ChatId, state: ConversationState) {
        self.storage.save(chat_id, state).await;
    }

    /// Advances the chat's conversation by one message and returns the
    /// replies to send.
    pub async fn handle(&self, chat_id: ChatId, input: Input<'_>) -> Vec<Reply> {
        let _guard = self.lock_conversation(chat_id).await;
        let start_time = Instant::now();

        let current = self.get_user_state(chat_id).await;
        let step = dialog::transition(&current, input);
        log::debug!("💬 Chat {}: {:?} -> {:?}", chat_id, current.step(), step.next.step());

        self.save_user_state(chat_id, step.next).await;

        let replies = dialog::respond(step.action, self.weather.as_ref()).await;
        log::debug!("Chat {} handled in {:?}", chat_id, start_time.elapsed());

        replies
    }

    pub async fn cleanup_cache(&self, ttl: Duration) {
        let expired = self.storage.evict_idle(ttl).await;
        if expired.is_empty() {
            return;
        }

        let mut locks = self.locks.lock().await;
        for chat_id in &expired {
            // A chat mid-message still holds a clone of its lock.
            if locks.get(chat_id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
                locks.remove(chat_id);
            }
        }

        log::debug!("🧹 Sessions evicted: {}", expired.len());
    }
}
