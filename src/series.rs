//! Generator of stepped numbers series.

use crate::field::FieldValue;

/// Generator (iterator) state: `start, start + step, ...` up to `end` inclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct StepSeries {
    end: FieldValue,
    step: FieldValue,
    next: Option<FieldValue>,
}

impl StepSeries {
    /// Panics if `step` is zero, parser rejects such steps before.
    #[inline]
    pub(crate) fn new(start: FieldValue, end: FieldValue, step: FieldValue) -> Self {
        if step == 0 {
            panic!("step value is 0");
        }

        Self {
            end,
            step,
            next: Some(start),
        }
    }
}

impl Iterator for StepSeries {
    type Item = FieldValue;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|value| *value <= self.end)?;
        self.next = current.checked_add(self.step);
        Some(current)
    }
}
