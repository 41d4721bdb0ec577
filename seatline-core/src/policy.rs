use chrono::Duration;
use crate::seat::{SeatPosition, SeatSide};

pub const DEFAULT_TOTAL_SEATS: u32 = 55;
pub const DEFAULT_WOMEN_ONLY_THROUGH: u32 = 20;
pub const DEFAULT_BACK_ROW_SEATS: u32 = 5;
pub const DEFAULT_RETENTION_HOURS: i64 = 4;

/// Seats per regular row: two left of the aisle, three right of it.
const SEATS_PER_ROW: u32 = 5;
const LEFT_SEATS: u32 = 2;

/// Bus-wide booking policy: seat count, layout, the women-only front rows
/// and how long a booking survives before the sweeper removes it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatingPolicy {
    pub total_seats: u32,
    pub women_only_through: u32,
    pub back_row_seats: u32,
    pub retention: Duration,
}

impl Default for SeatingPolicy {
    fn default() -> Self {
        Self {
            total_seats: DEFAULT_TOTAL_SEATS,
            women_only_through: DEFAULT_WOMEN_ONLY_THROUGH,
            back_row_seats: DEFAULT_BACK_ROW_SEATS,
            retention: Duration::hours(DEFAULT_RETENTION_HOURS),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PolicyError {
    #[error("total seat count must be at least 1")]
    NoSeats,
    #[error("women-only rows end at seat {through}, beyond the {total} seats on the bus")]
    WomenOnlyOutOfRange { through: u32, total: u32 },
    #[error("back row of {back} seats does not fit in {total} seats")]
    BackRowTooLarge { back: u32, total: u32 },
    #[error("retention window must be positive")]
    NonPositiveRetention,
    #[error("retention window of {hours} hours is out of range")]
    RetentionOutOfRange { hours: i64 },
}

impl SeatingPolicy {
    pub fn new(
        total_seats: u32,
        women_only_through: u32,
        back_row_seats: u32,
        retention: Duration,
    ) -> Result<Self, PolicyError> {
        if total_seats == 0 {
            return Err(PolicyError::NoSeats);
        }
        if women_only_through > total_seats {
            return Err(PolicyError::WomenOnlyOutOfRange {
                through: women_only_through,
                total: total_seats,
            });
        }
        if back_row_seats > total_seats {
            return Err(PolicyError::BackRowTooLarge {
                back: back_row_seats,
                total: total_seats,
            });
        }
        if retention <= Duration::zero() {
            return Err(PolicyError::NonPositiveRetention);
        }

        Ok(Self {
            total_seats,
            women_only_through,
            back_row_seats,
            retention,
        })
    }

    /// Builds a policy whose retention is given in whole hours.
    pub fn with_retention_hours(
        total_seats: u32,
        women_only_through: u32,
        back_row_seats: u32,
        retention_hours: i64,
    ) -> Result<Self, PolicyError> {
        let retention = Duration::try_hours(retention_hours)
            .ok_or(PolicyError::RetentionOutOfRange { hours: retention_hours })?;
        Self::new(total_seats, women_only_through, back_row_seats, retention)
    }

    pub fn contains(&self, seat_id: i64) -> bool {
        seat_id >= 1 && seat_id <= self.total_seats as i64
    }

    /// Seats in the front rows reserved for female passengers.
    pub fn is_women_only(&self, seat_id: u32) -> bool {
        seat_id >= 1 && seat_id <= self.women_only_through
    }

    /// Where `seat_id` sits on the bus, or `None` when it is not a seat of this bus.
    pub fn position_of(&self, seat_id: u32) -> Option<SeatPosition> {
        if seat_id == 0 || seat_id > self.total_seats {
            return None;
        }

        let regular = self.total_seats - self.back_row_seats;
        if seat_id > regular {
            return Some(SeatPosition {
                row: regular.div_ceil(SEATS_PER_ROW) + 1,
                side: SeatSide::Back,
                column: seat_id - regular,
            });
        }

        let index = seat_id - 1;
        let column = index % SEATS_PER_ROW;
        Some(SeatPosition {
            row: index / SEATS_PER_ROW + 1,
            side: if column < LEFT_SEATS { SeatSide::Left } else { SeatSide::Right },
            column: column + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let policy = SeatingPolicy::default();

        let first = policy.position_of(1).unwrap();
        assert_eq!((first.row, first.side, first.column), (1, SeatSide::Left, 1));

        let aisle_right = policy.position_of(3).unwrap();
        assert_eq!((aisle_right.row, aisle_right.side), (1, SeatSide::Right));

        let last_regular = policy.position_of(50).unwrap();
        assert_eq!((last_regular.row, last_regular.side, last_regular.column), (10, SeatSide::Right, 5));

        let back = policy.position_of(51).unwrap();
        assert_eq!((back.row, back.side, back.column), (11, SeatSide::Back, 1));
        assert_eq!(policy.position_of(55).unwrap().column, 5);

        assert!(policy.position_of(0).is_none());
        assert!(policy.position_of(56).is_none());
    }

    #[test]
    fn test_women_only_rows() {
        let policy = SeatingPolicy::default();
        assert!(policy.is_women_only(1));
        assert!(policy.is_women_only(20));
        assert!(!policy.is_women_only(21));
        // Seat 20 closes the fourth row
        assert_eq!(policy.position_of(20).unwrap().row, 4);
    }

    #[test]
    fn test_policy_validation() {
        assert_eq!(
            SeatingPolicy::new(0, 0, 0, Duration::hours(4)),
            Err(PolicyError::NoSeats)
        );
        assert_eq!(
            SeatingPolicy::new(10, 20, 0, Duration::hours(4)),
            Err(PolicyError::WomenOnlyOutOfRange { through: 20, total: 10 })
        );
        assert_eq!(
            SeatingPolicy::new(10, 5, 11, Duration::hours(4)),
            Err(PolicyError::BackRowTooLarge { back: 11, total: 10 })
        );
        assert_eq!(
            SeatingPolicy::new(10, 5, 5, Duration::zero()),
            Err(PolicyError::NonPositiveRetention)
        );
        assert!(SeatingPolicy::new(30, 10, 0, Duration::minutes(30)).is_ok());
    }

    #[test]
    fn test_retention_hours_out_of_range() {
        assert_eq!(
            SeatingPolicy::with_retention_hours(55, 20, 5, i64::MAX),
            Err(PolicyError::RetentionOutOfRange { hours: i64::MAX })
        );
        assert_eq!(
            SeatingPolicy::with_retention_hours(55, 20, 5, 4).unwrap(),
            SeatingPolicy::default()
        );
    }

    #[test]
    fn test_layout_without_back_row() {
        let policy = SeatingPolicy::new(12, 0, 0, Duration::hours(1)).unwrap();
        let last = policy.position_of(12).unwrap();
        assert_eq!((last.row, last.side, last.column), (3, SeatSide::Left, 2));
    }
}
