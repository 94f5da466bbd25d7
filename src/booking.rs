//! Booking model and its mapping to spreadsheet rows.
//!
//! The sheet carries one booking per row, columns A..G in the order of
//! [`Booking::to_row`]. Row 1 is a header and is skipped when parsing.

use chrono::NaiveDateTime;

pub const STATUS_WAITING: &str = "Waiting";
pub const STATUS_DONE: &str = "Done";
pub const STATUS_DELETED: &str = "Deleted";

/// 1-based sheet column holding the status, for `update_cell`.
pub const STATUS_COLUMN: usize = 6;

/// Timestamp format stored in the `created_at` column.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Waiting,
    Done,
    /// Soft-deleted by external tooling; the bot itself removes rows.
    Deleted,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => STATUS_WAITING,
            BookingStatus::Done => STATUS_DONE,
            BookingStatus::Deleted => STATUS_DELETED,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            STATUS_WAITING => Some(BookingStatus::Waiting),
            STATUS_DONE => Some(BookingStatus::Done),
            STATUS_DELETED => Some(BookingStatus::Deleted),
            _ => None,
        }
    }
}

/// One queue entry, as stored in the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Telegram chat id of the customer, kept as text.
    pub customer_id: String,
    pub name: String,
    pub phone: String,
    pub barber: String,
    pub created_at: String,
    pub status: BookingStatus,
    pub ticket_number: u32,
}

impl Booking {
    /// Serialize to a sheet row, column order fixed.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.customer_id.clone(),
            self.name.clone(),
            self.phone.clone(),
            self.barber.clone(),
            self.created_at.clone(),
            self.status.as_str().to_string(),
            self.ticket_number.to_string(),
        ]
    }

    /// Parse a sheet row. Returns `None` for rows that are malformed
    /// beyond recognition (wrong width, unknown status, bad ticket).
    pub fn from_row(row: &[String]) -> Option<Self> {
        if row.len() < 7 {
            return None;
        }
        let status = BookingStatus::parse(&row[5])?;
        let ticket_number = row[6].trim().parse().ok()?;

        Some(Booking {
            customer_id: row[0].trim().to_string(),
            name: row[1].clone(),
            phone: row[2].clone(),
            barber: row[3].clone(),
            created_at: row[4].clone(),
            status,
            ticket_number,
        })
    }

    pub fn is_waiting(&self) -> bool {
        self.status == BookingStatus::Waiting
    }
}

/// Format a timestamp the way the sheet stores it.
pub fn format_created_at(now: NaiveDateTime) -> String {
    now.format(CREATED_AT_FORMAT).to_string()
}

/// Parse the raw sheet (header row included) into bookings, skipping the
/// header and any malformed rows.
pub fn parse_sheet(rows: &[Vec<String>]) -> Vec<Booking> {
    rows.iter()
        .skip(1)
        .filter_map(|row| Booking::from_row(row))
        .collect()
}

/// Sheet row index (1-based, header included) of the booking with the given
/// ticket number, together with the booking itself.
pub fn find_row_by_ticket(rows: &[Vec<String>], ticket: u32) -> Option<(usize, Booking)> {
    rows.iter().enumerate().skip(1).find_map(|(i, row)| {
        let booking = Booking::from_row(row)?;
        if booking.ticket_number == ticket {
            Some((i + 1, booking))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Vec<String> {
        vec![
            "5333075597".to_string(),
            "Karim Benali".to_string(),
            "0677366125".to_string(),
            "حلاق 1".to_string(),
            "2026-08-23 14:05:00".to_string(),
            "Waiting".to_string(),
            "7".to_string(),
        ]
    }

    #[test]
    fn test_row_round_trip() {
        let booking = Booking::from_row(&sample_row()).unwrap();
        assert_eq!(booking.ticket_number, 7);
        assert!(booking.is_waiting());
        assert_eq!(booking.to_row(), sample_row());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let rows = vec![
            vec!["id".to_string(); 7], // header
            sample_row(),
            vec!["short".to_string()],
            {
                let mut bad_status = sample_row();
                bad_status[5] = "???".to_string();
                bad_status
            },
        ];
        assert_eq!(parse_sheet(&rows).len(), 1);
    }

    #[test]
    fn test_find_row_by_ticket() {
        let rows = vec![vec!["header".to_string(); 7], sample_row()];
        let (row_index, booking) = find_row_by_ticket(&rows, 7).unwrap();
        assert_eq!(row_index, 2);
        assert_eq!(booking.name, "Karim Benali");
        assert!(find_row_by_ticket(&rows, 99).is_none());
    }
}
