//! Display rows rendered by the list views.
//!
//! Views render these verbatim; no sorting happens here, rows keep the order
//! the data store returned.
use crate::records::{Match, Standing};

/// Shown on the home view when nothing is scheduled today.
pub const HOME_EMPTY_MESSAGE: &str = "No matches scheduled for today.";

/// Standings table header, in column order.
pub const STANDINGS_HEADERS: [&str; 6] = ["Team", "Played", "Won", "Drawn", "Lost", "Points"];

/// Borrowed view of a match for list rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchSummary<'a> {
    pub fixture: &'a Match,
}

impl<'a> MatchSummary<'a> {
    pub fn new(fixture: &'a Match) -> Self {
        Self { fixture }
    }

    /// `TeamA vs TeamB`
    pub fn headline(&self) -> String {
        format!("{} vs {}", self.fixture.team1, self.fixture.team2)
    }

    /// Single-line form used by the home view: `TeamA vs TeamB, 19:00, Court 1`.
    pub fn home_line(&self) -> String {
        format!("{}, {}, {}", self.headline(), self.fixture.time, self.fixture.location)
    }

    /// Labelled detail lines shown under the headline on the matches view.
    pub fn details(&self) -> [String; 3] {
        [
            format!("Date: {}", self.fixture.date),
            format!("Time: {}", self.fixture.time),
            format!("Location: {}", self.fixture.location),
        ]
    }
}

/// What the home view shows for today's fixtures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodayListing {
    Empty,
    Lines(Vec<String>),
}

impl TodayListing {
    pub fn from_matches(matches: &[Match]) -> Self {
        if matches.is_empty() {
            TodayListing::Empty
        } else {
            TodayListing::Lines(matches.iter().map(|m| MatchSummary::new(m).home_line()).collect())
        }
    }
}

/// One row of the standings table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandingRow {
    pub cells: [String; 6],
}

impl From<&Standing> for StandingRow {
    fn from(standing: &Standing) -> Self {
        Self {
            cells: [
                standing.name.clone(),
                standing.played.to_string(),
                standing.won.to_string(),
                standing.drawn.to_string(),
                standing.lost.to_string(),
                standing.points.to_string(),
            ],
        }
    }
}
