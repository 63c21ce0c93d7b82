//! Seat-position geometry
//!
//! Seat layouts are a pure function of `(capacity, shape, arrangement,
//! width, height)`: identical inputs always produce identical seat lists.
//! Positions are relative to the table center; angles point inward so the
//! renderer can face chairs toward the table.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{Seat, TableShape};

/// Distance from the table edge to a seat center
const SEAT_OFFSET: f64 = 18.0;

/// A computed seat slot, before materialization into a [`Seat`] record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatPosition {
    /// 1-based
    pub seat_number: u32,
    pub relative_x: f64,
    pub relative_y: f64,
    /// Facing direction in degrees (0 = +x, 90 = +y), pointing at the center
    pub angle: f64,
}

/// Compute seat positions around a table perimeter.
///
/// Round and oval tables distribute seats at equal angular increments
/// around an ellipse sized to the table. Rectangular and square tables
/// distribute seats along the four edges proportionally to edge length,
/// spaced to stay off the corners. The `arrangement` hint currently only
/// distinguishes the default even spacing; unknown hints fall back to it.
pub fn seat_positions(
    capacity: u32,
    shape: TableShape,
    _arrangement: &str,
    width: f64,
    height: f64,
) -> Vec<SeatPosition> {
    if capacity == 0 {
        return Vec::new();
    }
    match shape {
        TableShape::Circle | TableShape::Oval => ellipse_positions(capacity, width, height),
        TableShape::Rectangle | TableShape::Square => edge_positions(capacity, width, height),
    }
}

fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

fn ellipse_positions(capacity: u32, width: f64, height: f64) -> Vec<SeatPosition> {
    let radius_x = width / 2.0 + SEAT_OFFSET;
    let radius_y = height / 2.0 + SEAT_OFFSET;
    let step = 360.0 / capacity as f64;

    (0..capacity)
        .map(|i| {
            // First seat at the top, then clockwise
            let position_angle = i as f64 * step - 90.0;
            let radians = position_angle.to_radians();
            SeatPosition {
                seat_number: i + 1,
                relative_x: radius_x * radians.cos(),
                relative_y: radius_y * radians.sin(),
                angle: normalize_angle(position_angle + 180.0),
            }
        })
        .collect()
}

/// Split `capacity` across the four edges proportionally to edge length,
/// using largest-remainder rounding so the counts always sum exactly.
fn edge_counts(capacity: u32, width: f64, height: f64) -> [u32; 4] {
    let perimeter = 2.0 * (width + height);
    // Edge order: top, right, bottom, left
    let lengths = [width, height, width, height];

    let exact: Vec<f64> = lengths
        .iter()
        .map(|len| capacity as f64 * len / perimeter)
        .collect();
    let mut counts: [u32; 4] = [0; 4];
    for (i, value) in exact.iter().enumerate() {
        counts[i] = value.floor() as u32;
    }

    let mut assigned: u32 = counts.iter().sum();
    // Hand out the rounding remainder to the largest fractional parts,
    // ties resolved by edge order
    let mut order: Vec<usize> = (0..4).collect();
    order.sort_by(|&a, &b| {
        let fa = exact[a] - exact[a].floor();
        let fb = exact[b] - exact[b].floor();
        fb.partial_cmp(&fa).unwrap_or(std::cmp::Ordering::Equal).then(a.cmp(&b))
    });
    let mut cursor = 0usize;
    while assigned < capacity {
        counts[order[cursor % 4]] += 1;
        assigned += 1;
        cursor += 1;
    }
    counts
}

fn edge_positions(capacity: u32, width: f64, height: f64) -> Vec<SeatPosition> {
    let [top, right, bottom, left] = edge_counts(capacity, width, height);
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let mut seats = Vec::with_capacity(capacity as usize);
    let mut number = 0u32;

    // Fractions (i+1)/(n+1) keep seats off the corners.
    // Clockwise walk: top left-to-right, right top-to-bottom,
    // bottom right-to-left, left bottom-to-top.
    for i in 0..top {
        number += 1;
        let t = (i + 1) as f64 / (top + 1) as f64;
        seats.push(SeatPosition {
            seat_number: number,
            relative_x: -half_w + width * t,
            relative_y: -(half_h + SEAT_OFFSET),
            angle: 90.0,
        });
    }
    for i in 0..right {
        number += 1;
        let t = (i + 1) as f64 / (right + 1) as f64;
        seats.push(SeatPosition {
            seat_number: number,
            relative_x: half_w + SEAT_OFFSET,
            relative_y: -half_h + height * t,
            angle: 180.0,
        });
    }
    for i in 0..bottom {
        number += 1;
        let t = (i + 1) as f64 / (bottom + 1) as f64;
        seats.push(SeatPosition {
            seat_number: number,
            relative_x: half_w - width * t,
            relative_y: half_h + SEAT_OFFSET,
            angle: 270.0,
        });
    }
    for i in 0..left {
        number += 1;
        let t = (i + 1) as f64 / (left + 1) as f64;
        seats.push(SeatPosition {
            seat_number: number,
            relative_x: -(half_w + SEAT_OFFSET),
            relative_y: half_h - height * t,
            angle: 0.0,
        });
    }

    seats
}

/// Materialize fresh, unoccupied seat records for a table
pub fn build_seats(
    table_id: Uuid,
    capacity: u32,
    shape: TableShape,
    arrangement: &str,
    width: f64,
    height: f64,
) -> Vec<Seat> {
    seat_positions(capacity, shape, arrangement, width, height)
        .into_iter()
        .map(|pos| Seat {
            id: Uuid::new_v4(),
            table_id,
            seat_number: pos.seat_number,
            relative_x: pos.relative_x,
            relative_y: pos.relative_y,
            angle: pos.angle,
            guest_id: None,
        })
        .collect()
}

/// Regenerate a table's seats after a capacity/shape/size edit.
///
/// All geometry is recomputed from scratch. Guest-to-seat bindings are
/// preserved by seat number where the number survives into the new
/// layout; occupants of seats that no longer exist are unseated (their
/// table Assignment is untouched, they just lose the specific chair).
pub fn regenerate_seats(
    table_id: Uuid,
    capacity: u32,
    shape: TableShape,
    arrangement: &str,
    width: f64,
    height: f64,
    previous: &[Seat],
) -> Vec<Seat> {
    let mut seats = build_seats(table_id, capacity, shape, arrangement, width, height);
    for seat in seats.iter_mut() {
        if let Some(prior) = previous
            .iter()
            .find(|p| p.seat_number == seat.seat_number && p.guest_id.is_some())
        {
            seat.guest_id = prior.guest_id;
        }
    }
    seats
}
