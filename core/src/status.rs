use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// What the status line should show.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusReadout {
    /// Mines not yet marked, negative when the player over-marked
    MinesLeft(isize),
    Won,
    Lost,
}

impl StatusReadout {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MinesLeft(_) => "Mines left: ",
            Self::Won | Self::Lost => "",
        }
    }

    /// The part shown after the label: the count, or the end-of-game message.
    pub const fn value(self) -> StatusValue {
        match self {
            Self::MinesLeft(count) => StatusValue::Count(count),
            Self::Won => StatusValue::Message("You Win"),
            Self::Lost => StatusValue::Message("You Lose"),
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for StatusReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label(), self.value())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusValue {
    Count(isize),
    Message(&'static str),
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Message(message) => f.write_str(message),
        }
    }
}

/// Receives every status change a game produces.
pub trait StatusSink {
    fn publish(&mut self, status: &StatusReadout);
}

impl StatusSink for Vec<StatusReadout> {
    fn publish(&mut self, status: &StatusReadout) {
        self.push(*status);
    }
}
