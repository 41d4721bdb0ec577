use seatline_core::SeatService;

#[derive(Clone)]
pub struct AppState {
    pub seats: SeatService,
}

impl AppState {
    pub fn new(seats: SeatService) -> Self {
        Self { seats }
    }
}
