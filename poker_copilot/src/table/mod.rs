//! Table geometry: seats, the dealer button and derived positions.
//!
//! Seats are fixed once assigned. Positions are never stored; they are a
//! pure function of (seat, button seat, table size) and are recomputed
//! whenever the button moves.

pub mod errors;
pub mod geometry;

pub use errors::{GeometryError, GeometryResult};
pub use geometry::{Position, SeatIndex, TableGeometry, assign_seats, position_of};
