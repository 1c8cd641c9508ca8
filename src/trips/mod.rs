use std::fmt::{self, Display};

mod date_format;
mod row;

pub use date_format::DateFormat;
pub use row::{RowError, TripRow};

/// A finished line handed to the list renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRow {
    pub display_text: String,
}

impl DisplayRow {
    pub fn new(display_text: String) -> Self {
        Self { display_text }
    }
}

impl Display for DisplayRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.display_text.fmt(f)
    }
}
