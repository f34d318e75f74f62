//! The append-only columnar sample store (spec §3, Component 2).

/// One observed row: the measurements taken around a single sample of
/// `evaluations` back-to-back evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRow {
    /// Inner loop count used for this sample. Always `>= 1`.
    pub evaluations: f64,
    /// Total wall time for this sample, in nanoseconds.
    pub elapsed_time: f64,
    /// Portion of `elapsed_time` spent in runtime-managed reclamation.
    pub gc_time: f64,
    /// Total heap bytes requested during this sample.
    pub bytes_allocated: u64,
    /// Count of allocator operations during this sample.
    pub allocations: u64,
}

/// Five parallel columns, extended one row at a time.
///
/// [`SampleStore::push`] is the only way to grow the store, and it always
/// extends all five columns together, so the "equal length" invariant (P1)
/// holds at every point a caller can observe the store from outside this
/// module.
#[derive(Debug, Default, Clone)]
pub struct SampleStore {
    evaluations: Vec<f64>,
    elapsed_time: Vec<f64>,
    gc_time: Vec<f64>,
    bytes_allocated: Vec<u64>,
    allocations: Vec<u64>,
}

impl SampleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one row.
    ///
    /// Debug-asserts `0 <= gc_time <= elapsed_time` (P2) and `evaluations >=
    /// 1` (P3); both are contract obligations of the benchmarkable that
    /// produced `row`, not of the store itself.
    pub fn push(&mut self, row: SampleRow) {
        debug_assert!(row.evaluations >= 1.0, "evaluations must be >= 1");
        debug_assert!(row.gc_time >= 0.0 && row.gc_time <= row.elapsed_time, "0 <= gc_time <= elapsed_time");

        self.evaluations.push(row.evaluations);
        self.elapsed_time.push(row.elapsed_time);
        self.gc_time.push(row.gc_time);
        self.bytes_allocated.push(row.bytes_allocated);
        self.allocations.push(row.allocations);
    }

    /// Truncates every column back to length 0.
    pub fn clear(&mut self) {
        self.evaluations.clear();
        self.elapsed_time.clear();
        self.gc_time.clear();
        self.bytes_allocated.clear();
        self.allocations.clear();
    }

    /// Shared column length.
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// `true` iff `len() == 0`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `evaluations` column: inner loop count used for each sample.
    pub fn evaluations(&self) -> &[f64] {
        &self.evaluations
    }

    /// The `elapsed_time` column: total wall time per sample, in nanoseconds.
    pub fn elapsed_time(&self) -> &[f64] {
        &self.elapsed_time
    }

    /// The `gc_time` column: portion of each sample's `elapsed_time` spent in
    /// runtime-managed reclamation.
    pub fn gc_time(&self) -> &[f64] {
        &self.gc_time
    }

    /// The `bytes_allocated` column: heap bytes requested per sample.
    pub fn bytes_allocated(&self) -> &[u64] {
        &self.bytes_allocated
    }

    /// The `allocations` column: allocator operation count per sample.
    pub fn allocations(&self) -> &[u64] {
        &self.allocations
    }

    /// Iterates over rows by index, reconstructing each as a [`SampleRow`].
    pub fn rows(&self) -> impl Iterator<Item = SampleRow> + '_ {
        (0..self.len()).map(move |i| SampleRow {
            evaluations: self.evaluations[i],
            elapsed_time: self.elapsed_time[i],
            gc_time: self.gc_time[i],
            bytes_allocated: self.bytes_allocated[i],
            allocations: self.allocations[i],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(evals: f64, elapsed: f64) -> SampleRow {
        SampleRow { evaluations: evals, elapsed_time: elapsed, gc_time: 0.0, bytes_allocated: 0, allocations: 0 }
    }

    #[test]
    fn columns_stay_parallel() {
        let mut store = SampleStore::new();
        for i in 1..=5 {
            store.push(row(i as f64, i as f64 * 10.0));
        }
        assert_eq!(store.len(), 5);
        assert_eq!(store.evaluations().len(), store.elapsed_time().len());
        assert_eq!(store.bytes_allocated().len(), store.allocations().len());
        assert_eq!(store.evaluations().len(), store.gc_time().len());
    }

    #[test]
    fn clear_resets_length() {
        let mut store = SampleStore::new();
        store.push(row(1.0, 1.0));
        store.clear();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }
}
