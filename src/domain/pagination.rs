use std::ops::Range;

use clap::ValueEnum;

use crate::errors::AppError;

/// Distance both window bounds move on every page turn.
pub const PAGE_STEP: usize = 10;

/// The first window is one record wider than every later step.
pub const FIRST_WINDOW_END: usize = 11;

// Backing up from any window starting at or below this index underflows,
// which covers pages 1 and 2.
const UNDERFLOW_THRESHOLD: usize = 11;

/// What `page_backward` does when it cannot move further back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Underflow {
    /// Reset to the first page without rendering
    #[default]
    Clamp,
    /// Fail with a page underflow error
    Error,
    /// Leave the cursor where it is
    Noop,
}

/// Outcome of a backward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved,
    Reset,
    Stayed,
}

/// Current page number and the half-open window `[start, end)` into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    page: usize,
    window_start: usize,
    window_end: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::first()
    }
}

impl Cursor {
    pub fn first() -> Self {
        Cursor {
            page: 1,
            window_start: 0,
            window_end: FIRST_WINDOW_END,
        }
    }

    /// Position reached from the first page by `page - 1` forward steps.
    pub fn at_page(page: usize) -> Result<Self, AppError> {
        if page < 1 {
            return Err(AppError::Validation("Page numbers start at 1".to_string()));
        }

        let too_large = || AppError::Validation("Page number too large".to_string());
        let offset = (page - 1).checked_mul(PAGE_STEP).ok_or_else(too_large)?;
        let window_end = offset.checked_add(FIRST_WINDOW_END).ok_or_else(too_large)?;

        Ok(Cursor {
            page,
            window_start: offset,
            window_end,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn window(&self) -> Range<usize> {
        self.window_start..self.window_end
    }

    /// Unbounded: running past the collection is caught when rendering.
    pub fn advance(&mut self) {
        self.page += 1;
        self.window_start += PAGE_STEP;
        self.window_end += PAGE_STEP;
    }

    pub fn retreat(&mut self, strategy: Underflow) -> Result<Retreat, AppError> {
        if self.window_start > UNDERFLOW_THRESHOLD {
            self.page -= 1;
            self.window_start -= PAGE_STEP;
            self.window_end -= PAGE_STEP;
            return Ok(Retreat::Moved);
        }

        match strategy {
            Underflow::Clamp => {
                *self = Cursor::first();
                Ok(Retreat::Reset)
            }
            Underflow::Error => Err(AppError::PageUnderflow { page: self.page }),
            Underflow::Noop => Ok(Retreat::Stayed),
        }
    }

    /// Slice bounds for a collection of `len` records, or `None` when the
    /// window starts past the end. The cursor itself is never clamped.
    pub fn visible(&self, len: usize) -> Option<Range<usize>> {
        if self.window_start > len {
            return None;
        }
        Some(self.window_start..self.window_end.min(len))
    }
}
