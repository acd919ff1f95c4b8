//! Checking a drawn pattern against the expected silhouette.

use std::fmt;

use serde::Serialize;

use crate::{lattice::GridCell, projection::Silhouette};

/// The outcome of comparing a drawing with a silhouette.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Nothing was drawn, so there was nothing to compare.
    NothingDrawn,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Correct => "Correct! Your drawing matches the selected view.",
            Verdict::Incorrect => "Incorrect. Your drawing does not match the selected view.",
            Verdict::NothingDrawn => "Please draw some squares on the grid.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A [`Verdict`] together with both sides of the comparison.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub verdict: Verdict,
    pub expected: Silhouette,
    pub drawn: Silhouette,
}

/// Compare the cells in `drawn`, at any offset, against `expected`.
pub fn verify<I>(expected: &Silhouette, drawn: I) -> Verdict
where
    I: IntoIterator<Item = GridCell>,
{
    verify_report(expected, drawn).verdict
}

/// Like [`verify`], but keep the normalized drawing for display.
pub fn verify_report<I>(expected: &Silhouette, drawn: I) -> Report
where
    I: IntoIterator<Item = GridCell>,
{
    let drawn = Silhouette::normalized(drawn);

    let verdict = if drawn.is_empty() {
        Verdict::NothingDrawn
    } else if &drawn == expected {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    };

    tracing::debug!(
        expected = ?expected.sorted(),
        drawn = ?drawn.sorted(),
        ?verdict,
        "Verified drawing"
    );

    Report {
        verdict,
        expected: expected.clone(),
        drawn,
    }
}
