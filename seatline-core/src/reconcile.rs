use tracing::warn;
use crate::policy::SeatingPolicy;
use crate::seat::{BookingRecord, Passenger, Seat};

/// Expands the sparse booking rows into the full seat map, one entry per
/// seat id from 1 to `policy.total_seats`, ordered by id.
///
/// Rows for seats outside the bus are ignored. When two rows claim the same
/// seat the first one wins, so dirty data never breaks the seat display.
pub fn reconcile(records: &[BookingRecord], policy: &SeatingPolicy) -> Vec<Seat> {
    let total = policy.total_seats as usize;
    let mut slots: Vec<Option<&BookingRecord>> = vec![None; total];

    for record in records {
        let Some(slot) = (record.seat_id as usize)
            .checked_sub(1)
            .and_then(|index| slots.get_mut(index))
        else {
            warn!("Ignoring booking {} for unknown seat {}", record.id, record.seat_id);
            continue;
        };

        if let Some(existing) = *slot {
            warn!(
                "Seat {} has duplicate bookings ({} kept, {} ignored)",
                record.seat_id, existing.id, record.id
            );
        } else {
            *slot = Some(record);
        }
    }

    slots
        .into_iter()
        .zip(1..=policy.total_seats)
        .filter_map(|(slot, id)| {
            policy.position_of(id).map(|position| Seat {
                id,
                position,
                passenger: slot.map(Passenger::from),
            })
        })
        .collect()
}
