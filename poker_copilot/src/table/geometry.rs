use serde::{Serialize, Serializer};
use std::{collections::BTreeSet, fmt};

use super::errors::{GeometryError, GeometryResult};

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

/// Tables larger than this use the full-ring labels (UTG+1, generic MPs).
const SHORT_HANDED_MAX: usize = 6;

/// Betting position relative to the button.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Position {
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    UnderTheGunPlusOne,
    /// Middle position `k`; `k == 1` is the plain "MP".
    Middle(usize),
    Cutoff,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button => write!(f, "BTN"),
            Self::SmallBlind => write!(f, "SB"),
            Self::BigBlind => write!(f, "BB"),
            Self::UnderTheGun => write!(f, "UTG"),
            Self::UnderTheGunPlusOne => write!(f, "UTG+1"),
            Self::Middle(1) => write!(f, "MP"),
            Self::Middle(k) => write!(f, "MP{k}"),
            Self::Cutoff => write!(f, "CO"),
        }
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Position of `seat` given the button seat and table size.
///
/// Offsets clockwise from the button: 0 BTN, 1 SB, 2 BB. Up to six seats
/// the rest are UTG, MP, CO. Larger tables use UTG, UTG+1, CO for the offset
/// `total_seats - 2`, and numbered middle positions everywhere else.
/// Fewer than two seats is always the button.
#[must_use]
pub fn position_of(seat: SeatIndex, button_seat: SeatIndex, total_seats: usize) -> Position {
    if total_seats < 2 {
        return Position::Button;
    }
    let offset = (seat % total_seats + total_seats - button_seat % total_seats) % total_seats;
    match offset {
        0 => Position::Button,
        1 => Position::SmallBlind,
        2 => Position::BigBlind,
        3 => Position::UnderTheGun,
        4 if total_seats <= SHORT_HANDED_MAX => Position::Middle(1),
        5 if total_seats <= SHORT_HANDED_MAX => Position::Cutoff,
        4 => Position::UnderTheGunPlusOne,
        o if o == total_seats - 2 => Position::Cutoff,
        o => Position::Middle(o - 4),
    }
}

/// Table size and the button, the only stored geometry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TableGeometry {
    total_seats: usize,
    button_seat: SeatIndex,
}

impl TableGeometry {
    pub fn new(total_seats: usize, button_seat: SeatIndex) -> GeometryResult<Self> {
        if total_seats < 2 {
            return Err(GeometryError::TooFewSeats(total_seats));
        }
        if button_seat >= total_seats {
            return Err(GeometryError::SeatOutOfRange {
                seat: button_seat,
                max_seats: total_seats,
            });
        }
        Ok(Self {
            total_seats,
            button_seat,
        })
    }

    #[must_use]
    pub const fn total_seats(&self) -> usize {
        self.total_seats
    }

    #[must_use]
    pub const fn button_seat(&self) -> SeatIndex {
        self.button_seat
    }

    #[must_use]
    pub fn position(&self, seat: SeatIndex) -> Position {
        position_of(seat, self.button_seat, self.total_seats)
    }

    /// Every seat with its position for the current hand, in seat order.
    #[must_use]
    pub fn positions(&self) -> Vec<(SeatIndex, Position)> {
        (0..self.total_seats)
            .map(|seat| (seat, self.position(seat)))
            .collect()
    }

    /// Move the button one seat clockwise and return the new button seat.
    ///
    /// Must happen exactly once per hand boundary; the session's new-hand
    /// transition is the only caller.
    pub fn rotate_button(&mut self) -> SeatIndex {
        self.button_seat = (self.button_seat + 1) % self.total_seats;
        self.button_seat
    }
}

/// Assign seats for players in list order.
///
/// Requested seats are honored first; players without one fill the lowest
/// free seats in order. Returns the seat for each request and the table
/// size, which is the larger of the player count and the highest seat + 1.
pub fn assign_seats(
    requested: &[Option<SeatIndex>],
    max_seats: usize,
) -> GeometryResult<(Vec<SeatIndex>, usize)> {
    let mut taken = BTreeSet::new();
    for &seat in requested.iter().flatten() {
        if seat >= max_seats {
            return Err(GeometryError::SeatOutOfRange { seat, max_seats });
        }
        if !taken.insert(seat) {
            return Err(GeometryError::SeatTaken(seat));
        }
    }

    let mut free = (0..max_seats).filter(|seat| !taken.contains(seat));
    let mut seats = Vec::with_capacity(requested.len());
    for request in requested {
        let seat = match request {
            Some(seat) => *seat,
            None => free.next().ok_or(GeometryError::SeatOutOfRange {
                seat: max_seats,
                max_seats,
            })?,
        };
        seats.push(seat);
    }

    let highest = seats.iter().max().map_or(0, |seat| seat + 1);
    Ok((seats, highest.max(requested.len())))
}
