//! Book-wide progress reconciliation
//!
//! Engines differ in what they report about the reading position. Progress is
//! derived from the first source that applies, in this order:
//!
//! 1. the locator's `totalProgression`
//! 2. the locator's index in the precomputed positions list
//! 3. the current chapter's index in the reading order, refined by the
//!    in-chapter progression (needs a locator)
//! 4. the current chapter's index alone (no locator)
//!
//! The tiers can disagree near chapter boundaries; the order is kept as is.

use crate::engine::{Link, Locator, ReadingEngine};
use crate::error::ProgressError;

/// Engine state read for one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressInputs {
    pub locator: Option<Locator>,
    pub positions: Vec<Locator>,
    pub reading_order: Vec<Link>,
    pub current_chapter: Option<Link>,
}

impl ProgressInputs {
    /// Snapshot the engine's current position state
    pub fn from_engine(engine: &dyn ReadingEngine) -> Self {
        Self {
            locator: engine.current_locator(),
            positions: engine.positions(),
            reading_order: engine.reading_order(),
            current_chapter: engine.current_chapter_link(),
        }
    }
}

/// Which tier produced a progress value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSource {
    TotalProgression,
    Positions { index: usize, count: usize },
    Chapter { index: usize, count: usize },
    ChapterIndex { index: usize, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciled {
    /// Whole-book progress in [0, 1]
    pub value: f64,
    pub source: ProgressSource,
}

/// Derive book-wide progress from engine state.
///
/// `Ok(None)` means no tier applied and the previous value should stay.
pub fn reconcile(inputs: &ProgressInputs) -> Result<Option<Reconciled>, ProgressError> {
    if let Some(locator) = &inputs.locator {
        if let Some(total) = locator.locations.total_progression {
            return Ok(Some(Reconciled {
                value: clamp_unit(finite("totalProgression", total)?),
                source: ProgressSource::TotalProgression,
            }));
        }

        if let Some(reconciled) = from_positions(locator, &inputs.positions)? {
            return Ok(Some(reconciled));
        }

        if let Some((index, count)) = chapter_index(inputs) {
            let progression = finite("progression", locator.locations.progression.unwrap_or(0.0))?;
            let count_f = count as f64;
            return Ok(Some(Reconciled {
                value: clamp_unit(index as f64 / count_f + progression / count_f),
                source: ProgressSource::Chapter { index, count },
            }));
        }
    }

    if let Some((index, count)) = chapter_index(inputs) {
        let denominator = count.saturating_sub(1).max(1) as f64;
        return Ok(Some(Reconciled {
            value: clamp_unit(index as f64 / denominator),
            source: ProgressSource::ChapterIndex { index, count },
        }));
    }

    Ok(None)
}

fn from_positions(
    locator: &Locator,
    positions: &[Locator],
) -> Result<Option<Reconciled>, ProgressError> {
    let Some(index) = positions.iter().position(|p| p.href == locator.href) else {
        return Ok(None);
    };

    let count = positions.len();
    let base = if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    };
    let intra = finite("progression", locator.locations.progression.unwrap_or(0.0))?;

    Ok(Some(Reconciled {
        value: clamp_unit(base + intra / count as f64),
        source: ProgressSource::Positions { index, count },
    }))
}

/// Index of the current chapter link in the reading order, with the order's length
fn chapter_index(inputs: &ProgressInputs) -> Option<(usize, usize)> {
    let chapter = inputs.current_chapter.as_ref()?;
    let count = inputs.reading_order.len();
    let index = inputs
        .reading_order
        .iter()
        .position(|link| link.href == chapter.href)?;
    Some((index, count))
}

fn finite(field: &'static str, value: f64) -> Result<f64, ProgressError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProgressError::NonFinite { field, value })
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
