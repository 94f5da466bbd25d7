use barbershop_bot::booking::{parse_sheet, Booking, BookingStatus};
use barbershop_bot::queue::{
    has_active_booking, next_ticket_number, plan_booking, queue_position, waiting_bookings,
    BookingRejected,
};

fn booking(customer_id: &str, status: BookingStatus, ticket: u32) -> Booking {
    Booking {
        customer_id: customer_id.to_string(),
        name: format!("Customer {}", customer_id),
        phone: "0677366125".to_string(),
        barber: "حلاق 1".to_string(),
        created_at: "2026-08-23 14:05:00".to_string(),
        status,
        ticket_number: ticket,
    }
}

#[test]
fn waiting_subset_preserves_row_order() {
    let all = vec![
        booking("100", BookingStatus::Done, 1),
        booking("200", BookingStatus::Waiting, 2),
        booking("300", BookingStatus::Deleted, 3),
        booking("400", BookingStatus::Waiting, 4),
    ];

    let waiting = waiting_bookings(&all);
    assert_eq!(waiting.len(), 2);
    assert_eq!(waiting[0].customer_id, "200");
    assert_eq!(waiting[1].customer_id, "400");
}

#[test]
fn position_counts_waiting_rows_only() {
    let all = vec![
        booking("100", BookingStatus::Done, 1),
        booking("200", BookingStatus::Waiting, 2),
        booking("300", BookingStatus::Waiting, 3),
    ];

    assert_eq!(queue_position(&all, "200"), Some(0));
    assert_eq!(queue_position(&all, "300"), Some(1));
    // Completed customers are no longer in the queue.
    assert_eq!(queue_position(&all, "100"), None);
    assert_eq!(queue_position(&all, "999"), None);
}

#[test]
fn active_booking_guard_ignores_finished_rows() {
    let all = vec![
        booking("100", BookingStatus::Done, 1),
        booking("200", BookingStatus::Waiting, 2),
    ];

    assert!(has_active_booking(&all, "200"));
    // A Done row does not block a new booking.
    assert!(!has_active_booking(&all, "100"));
}

#[test]
fn ticket_numbers_follow_row_count() {
    let all = vec![
        booking("100", BookingStatus::Done, 1),
        booking("200", BookingStatus::Waiting, 2),
    ];
    assert_eq!(next_ticket_number(&all), 3);
    assert_eq!(next_ticket_number(&[]), 1);
}

#[test]
fn booking_into_empty_queue_is_first() {
    let plan = plan_booking(
        &[],
        "5333075597",
        "Karim Benali",
        "0677366125",
        "حلاق 1",
        "2026-08-23 14:05:00".to_string(),
    )
    .unwrap();

    assert_eq!(plan.position, 0);
    assert_eq!(plan.ticket_number, 1);
    assert!(plan.booking.is_waiting());
    assert_eq!(plan.booking.to_row()[6], "1");
}

#[test]
fn booking_joins_behind_the_waiting_queue() {
    let all = vec![
        booking("100", BookingStatus::Done, 1),
        booking("200", BookingStatus::Waiting, 2),
        booking("300", BookingStatus::Waiting, 3),
    ];

    let plan = plan_booking(
        &all,
        "400",
        "Omar Cherif",
        "0555123456",
        "حلاق 2",
        "2026-08-23 15:00:00".to_string(),
    )
    .unwrap();

    assert_eq!(plan.position, 2);
    assert_eq!(plan.ticket_number, 4);
}

#[test]
fn double_booking_is_rejected() {
    let all = vec![booking("200", BookingStatus::Waiting, 1)];

    let result = plan_booking(
        &all,
        "200",
        "Karim Benali",
        "0677366125",
        "حلاق 1",
        "2026-08-23 14:05:00".to_string(),
    );
    assert_eq!(result.unwrap_err(), BookingRejected::AlreadyWaiting);
}

#[test]
fn planned_booking_survives_the_sheet_round_trip() {
    let plan = plan_booking(
        &[],
        "5333075597",
        "Karim Benali",
        "0677366125",
        "حلاق 1",
        "2026-08-23 14:05:00".to_string(),
    )
    .unwrap();

    let sheet = vec![
        vec!["id".to_string(); 7], // header
        plan.booking.to_row(),
    ];

    let parsed = parse_sheet(&sheet);
    assert_eq!(parsed, vec![plan.booking]);
    assert_eq!(queue_position(&parsed, "5333075597"), Some(0));
}
