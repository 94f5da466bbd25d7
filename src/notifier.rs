//! Position-based reminder scheduler.
//!
//! A recurring timer re-derives the waiting queue and reminds the first
//! five customers of their place, one message per (customer, tier) within
//! the cooldown window. One customer's send failure never aborts the batch,
//! and a failed fetch skips the tick with the cache left intact.

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Mutex;
use tokio::time;
use tracing::{debug, error, info};

use crate::booking::{self, Booking};
use crate::localization::t_args_lang;
use crate::queue;
use crate::sheets::SheetsClient;

/// Notification thresholds keyed by queue position 0..4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationTier {
    Turn,
    Warning15,
    Warning30,
    Warning45,
    Warning60,
}

impl NotificationTier {
    /// Tier for a 0-based queue position; positions past the fifth get none.
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            0 => Some(NotificationTier::Turn),
            1 => Some(NotificationTier::Warning15),
            2 => Some(NotificationTier::Warning30),
            3 => Some(NotificationTier::Warning45),
            4 => Some(NotificationTier::Warning60),
            _ => None,
        }
    }

    /// Catalog key of the tier's message.
    pub fn message_key(&self) -> &'static str {
        match self {
            NotificationTier::Turn => "notify-turn",
            NotificationTier::Warning15 => "notify-warning-15",
            NotificationTier::Warning30 => "notify-warning-30",
            NotificationTier::Warning45 => "notify-warning-45",
            NotificationTier::Warning60 => "notify-warning-60",
        }
    }
}

/// Remembers when each (customer, tier) message last went out so a tier
/// fires at most once per cooldown window. Clock is injected through the
/// `now` arguments, so the cooldown is testable without sleeping.
#[derive(Debug)]
pub struct NotificationCache {
    cooldown: Duration,
    sent: HashMap<(String, NotificationTier), DateTime<Utc>>,
}

impl NotificationCache {
    pub fn new(cooldown_secs: u64) -> Self {
        Self {
            cooldown: Duration::seconds(cooldown_secs as i64),
            sent: HashMap::new(),
        }
    }

    pub fn was_recently_sent(
        &self,
        customer_id: &str,
        tier: NotificationTier,
        now: DateTime<Utc>,
    ) -> bool {
        match self.sent.get(&(customer_id.to_string(), tier)) {
            Some(sent_at) => now - *sent_at < self.cooldown,
            None => false,
        }
    }

    pub fn mark_sent(&mut self, customer_id: &str, tier: NotificationTier, now: DateTime<Utc>) {
        self.sent.insert((customer_id.to_string(), tier), now);
    }

    /// Drop entries for customers no longer in the waiting subset, so the
    /// map stays bounded and a re-booking customer gets fresh reminders.
    pub fn retain_customers(&mut self, present: &HashSet<String>) {
        self.sent.retain(|(customer_id, _), _| present.contains(customer_id));
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}

/// The (booking, tier) pairs that should fire this tick.
pub fn due_notifications<'a>(
    waiting: &[&'a Booking],
    cache: &NotificationCache,
    now: DateTime<Utc>,
) -> Vec<(&'a Booking, NotificationTier)> {
    waiting
        .iter()
        .enumerate()
        .filter_map(|(position, b)| NotificationTier::for_position(position).map(|t| (*b, t)))
        .filter(|(b, tier)| !cache.was_recently_sent(&b.customer_id, *tier, now))
        .collect()
}

/// One scheduler pass: fetch, garbage-collect, send what is due.
pub async fn tick(
    bot: &Bot,
    store: &SheetsClient,
    cache: &Mutex<NotificationCache>,
) -> anyhow::Result<()> {
    let rows = store.get_all_rows().await?;
    let bookings = booking::parse_sheet(&rows);
    let waiting = queue::waiting_bookings(&bookings);
    let now = Utc::now();

    let mut cache = cache.lock().await;

    let present: HashSet<String> = waiting.iter().map(|b| b.customer_id.clone()).collect();
    cache.retain_customers(&present);

    let due = due_notifications(&waiting, &cache, now);
    debug!(waiting = waiting.len(), due = due.len(), "Notification tick");

    for (booking, tier) in due {
        let chat_id: i64 = match booking.customer_id.parse() {
            Ok(id) => id,
            Err(_) => {
                error!(customer_id = %booking.customer_id, "Customer id is not a chat id, skipping");
                continue;
            }
        };

        let text = t_args_lang(
            tier.message_key(),
            &[("name", &booking.name), ("barber", &booking.barber)],
            None,
        );

        match bot.send_message(ChatId(chat_id), text).await {
            Ok(_) => {
                cache.mark_sent(&booking.customer_id, tier, now);
                info!(customer_id = %booking.customer_id, tier = ?tier, "Sent queue notification");
            }
            Err(e) => {
                // One failed send must not abort the batch.
                error!(customer_id = %booking.customer_id, tier = ?tier, error = %e, "Failed to send notification");
            }
        }
    }

    Ok(())
}

/// Recurring scheduler loop, spawned once from `main`.
pub async fn notification_loop(
    bot: Bot,
    store: Arc<SheetsClient>,
    cache: Arc<Mutex<NotificationCache>>,
    interval_secs: u64,
) {
    let mut interval = time::interval(std::time::Duration::from_secs(interval_secs));
    loop {
        interval.tick().await;
        if let Err(e) = tick(&bot, &store, &cache).await {
            // Fetch failed: skip this tick, cache state is preserved.
            error!(error = %e, "Notification tick skipped");
        }
    }
}
