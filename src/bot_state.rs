//! Shared state passed to every handler through the dispatcher.

use std::collections::HashSet;
use std::sync::Arc;
use teloxide::types::ChatId;
use tokio::sync::{Mutex, RwLock};

use crate::config::Config;
use crate::notifier::NotificationCache;
use crate::sheets::SheetsClient;

#[derive(Clone)]
pub struct BotState {
    pub config: Arc<Config>,
    pub store: Arc<SheetsClient>,
    pub notifications: Arc<Mutex<NotificationCache>>,
    /// Chats that have presented the admin password this session.
    admin_sessions: Arc<RwLock<HashSet<ChatId>>>,
}

impl BotState {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(SheetsClient::new(&config));
        let notifications = Arc::new(Mutex::new(NotificationCache::new(
            config.notify_cooldown_secs,
        )));
        Self {
            config: Arc::new(config),
            store,
            notifications,
            admin_sessions: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub async fn is_admin(&self, chat: ChatId) -> bool {
        self.admin_sessions.read().await.contains(&chat)
    }

    pub async fn grant_admin(&self, chat: ChatId) {
        self.admin_sessions.write().await.insert(chat);
    }
}
