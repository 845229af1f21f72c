use serde::Serialize;

/// One classified sample: a label and a flat data vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledRecord {
    label: i32,
    data: Vec<i32>,
}

impl LabeledRecord {
    pub(crate) fn new(label: i32, data: Vec<i32>) -> Self {
        Self { label, data }
    }

    pub fn label(&self) -> i32 {
        self.label
    }

    pub fn data(&self) -> &[i32] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)` when the data is laid out as a row-major matrix
    /// with `cols` columns.
    pub fn at(&self, row: usize, col: usize, cols: usize) -> Option<i32> {
        if col >= cols {
            return None;
        }
        self.data.get(row * cols + col).copied()
    }
}
