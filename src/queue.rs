//! Queue derivation over the full booking sequence.
//!
//! The sheet is the single source of truth and may be mutated by the admin
//! at any time, so everything here is a pure projection recomputed per call;
//! nothing caches queue state.

use crate::booking::{Booking, BookingStatus};

/// The ordered waiting subset, preserving original row order.
pub fn waiting_bookings(all: &[Booking]) -> Vec<&Booking> {
    all.iter().filter(|b| b.is_waiting()).collect()
}

/// 0-based position of a customer within the waiting subset.
pub fn queue_position(all: &[Booking], customer_id: &str) -> Option<usize> {
    waiting_bookings(all)
        .iter()
        .position(|b| b.customer_id == customer_id)
}

/// Whether the customer already holds a Waiting row.
pub fn has_active_booking(all: &[Booking], customer_id: &str) -> bool {
    all.iter()
        .any(|b| b.is_waiting() && b.customer_id == customer_id)
}

/// Next ticket number: data-row count + 1, i.e. the sheet row count with the
/// header included. Two bookings planned against the same snapshot can
/// collide (accepted, low request volume).
pub fn next_ticket_number(all: &[Booking]) -> u32 {
    all.len() as u32 + 1
}

/// A booking ready to append, with its derived queue facts.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPlan {
    pub booking: Booking,
    /// 0-based position the booking will take in the waiting queue.
    pub position: usize,
    pub ticket_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejected {
    /// The customer already has a Waiting row.
    AlreadyWaiting,
}

/// Check-then-plan step for a new booking. The guard is a pre-check over
/// the snapshot, not an atomic insert; the race against a concurrent
/// mutation is a known, accepted gap.
pub fn plan_booking(
    all: &[Booking],
    customer_id: &str,
    name: &str,
    phone: &str,
    barber: &str,
    created_at: String,
) -> Result<BookingPlan, BookingRejected> {
    if has_active_booking(all, customer_id) {
        return Err(BookingRejected::AlreadyWaiting);
    }

    let position = waiting_bookings(all).len();
    let ticket_number = next_ticket_number(all);

    Ok(BookingPlan {
        booking: Booking {
            customer_id: customer_id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            barber: barber.to_string(),
            created_at,
            status: BookingStatus::Waiting,
            ticket_number,
        },
        position,
        ticket_number,
    })
}
