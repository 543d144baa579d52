//! Year filtering for event batches

use arrow::array::{BooleanArray, Int32Array};
use arrow::compute::kernels::cmp;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::filter::core::BatchFilter;
use crate::schema::YEAR;
use crate::utils::arrow::int32_column;

/// A filter that keeps only the events of one year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearFilter {
    year: i32,
}

impl YearFilter {
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

impl BatchFilter for YearFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let years = int32_column(batch, YEAR)?;
        // Vectorized comparison: year == self.year
        Ok(cmp::eq(years, &Int32Array::new_scalar(self.year))?)
    }
}
