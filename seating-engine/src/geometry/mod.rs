//! Table and seat geometry
//!
//! Pure layout math: seat positions around a table perimeter and the grid
//! placement of tables on the canvas. Nothing here affects who sits where.

pub mod layout;
pub mod seats;

pub use layout::{GridLayout, grid_layout};
pub use seats::{SeatPosition, build_seats, regenerate_seats, seat_positions};
