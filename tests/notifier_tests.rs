use chrono::{Duration, Utc};
use std::collections::HashSet;

use barbershop_bot::booking::{Booking, BookingStatus};
use barbershop_bot::notifier::{due_notifications, NotificationCache, NotificationTier};
use barbershop_bot::queue::waiting_bookings;

fn waiting(customer_id: &str, ticket: u32) -> Booking {
    Booking {
        customer_id: customer_id.to_string(),
        name: format!("Customer {}", customer_id),
        phone: "0677366125".to_string(),
        barber: "حلاق 1".to_string(),
        created_at: "2026-08-23 14:05:00".to_string(),
        status: BookingStatus::Waiting,
        ticket_number: ticket,
    }
}

#[test]
fn only_the_first_five_positions_get_a_tier() {
    let all: Vec<Booking> = (1..=7).map(|i| waiting(&i.to_string(), i)).collect();
    let queue = waiting_bookings(&all);
    let cache = NotificationCache::new(300);

    let due = due_notifications(&queue, &cache, Utc::now());
    assert_eq!(due.len(), 5);

    assert_eq!(due[0].0.customer_id, "1");
    assert_eq!(due[0].1, NotificationTier::Turn);
    assert_eq!(due[1].1, NotificationTier::Warning15);
    assert_eq!(due[4].0.customer_id, "5");
    assert_eq!(due[4].1, NotificationTier::Warning60);
}

#[test]
fn tier_is_suppressed_within_the_cooldown() {
    let all = vec![waiting("1", 1)];
    let queue = waiting_bookings(&all);
    let mut cache = NotificationCache::new(300);
    let t0 = Utc::now();

    assert_eq!(due_notifications(&queue, &cache, t0).len(), 1);
    cache.mark_sent("1", NotificationTier::Turn, t0);

    // A second tick inside the window sends nothing.
    assert!(due_notifications(&queue, &cache, t0 + Duration::seconds(60)).is_empty());

    // Once the cooldown elapses, the reminder is due again.
    assert_eq!(
        due_notifications(&queue, &cache, t0 + Duration::seconds(300)).len(),
        1
    );
}

#[test]
fn advancing_in_the_queue_changes_the_tier() {
    let mut cache = NotificationCache::new(300);
    let t0 = Utc::now();

    let all = vec![waiting("1", 1), waiting("2", 2)];
    let queue = waiting_bookings(&all);
    for (b, tier) in due_notifications(&queue, &cache, t0) {
        cache.mark_sent(&b.customer_id, tier, t0);
    }

    // Customer 1 is served; customer 2 moves to the front and gets the
    // turn message immediately, cooldown notwithstanding.
    let all = vec![waiting("2", 2)];
    let queue = waiting_bookings(&all);
    let due = due_notifications(&queue, &cache, t0 + Duration::seconds(10));
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].0.customer_id, "2");
    assert_eq!(due[0].1, NotificationTier::Turn);
}

#[test]
fn departed_customers_are_garbage_collected() {
    let mut cache = NotificationCache::new(300);
    let t0 = Utc::now();

    cache.mark_sent("1", NotificationTier::Turn, t0);
    cache.mark_sent("2", NotificationTier::Warning15, t0);
    assert_eq!(cache.len(), 2);

    let present: HashSet<String> = ["2".to_string()].into_iter().collect();
    cache.retain_customers(&present);
    assert_eq!(cache.len(), 1);

    // A re-booking customer starts with a clean slate.
    let all = vec![waiting("2", 2), waiting("1", 3)];
    let queue = waiting_bookings(&all);
    let due = due_notifications(&queue, &cache, t0 + Duration::seconds(10));
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].0.customer_id, "1");
    assert_eq!(due[0].1, NotificationTier::Warning15);
}
