//! A small compressed sparse row matrix, enough to hand Laplacians to callers.

/// A `rows x cols` matrix of `f64` in CSR layout.
///
/// Column indices within a row are strictly ascending and no explicit zero is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    rows: usize,
    cols: usize,
    row_ptrs: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Builds a matrix from `(row, col, value)` triplets.
    /// Values at the same position are summed; entries summing to zero are dropped.
    ///
    /// Triplets out of bounds are ignored.
    pub fn from_triplets<I>(rows: usize, cols: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut per_row: Vec<Vec<(usize, f64)>> = vec![vec![]; rows];
        for (i, j, x) in triplets.into_iter() {
            if i < rows && j < cols {
                per_row[i].push((j, x));
            }
        }
        let mut row_ptrs = Vec::with_capacity(rows + 1);
        let mut col_indices = vec![];
        let mut values = vec![];
        row_ptrs.push(0);
        for mut row in per_row.into_iter() {
            row.sort_by_key(|(j, _)| *j);
            let mut iter = row.into_iter().peekable();
            while let Some((j, mut x)) = iter.next() {
                while let Some((_, y)) = iter.next_if(|(k, _)| *k == j) {
                    x += y;
                }
                if x != 0.0 {
                    col_indices.push(j);
                    values.push(x);
                }
            }
            row_ptrs.push(col_indices.len());
        }
        Self {
            rows,
            cols,
            row_ptrs,
            col_indices,
            values,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i >= self.rows {
            return 0.0;
        }
        let (cols, vals) = self.row_slices(i);
        match cols.binary_search(&j) {
            Ok(k) => vals[k],
            Err(_) => 0.0,
        }
    }

    /// Stored entries of a row as `(col, value)` in ascending column order.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let (cols, vals) = if i < self.rows {
            self.row_slices(i)
        } else {
            (&[][..], &[][..])
        };
        cols.iter().copied().zip(vals.iter().copied())
    }

    /// Stored entries as `(row, col, value)` in row-major order.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.rows).flat_map(move |i| self.row(i).map(move |(j, x)| (i, j, x)))
    }

    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.rows).map(|i| self.row(i).map(|(_, x)| x).sum()).collect()
    }

    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let mut res = vec![vec![0.0; self.cols]; self.rows];
        for (i, j, x) in self.triplets() {
            res[i][j] = x;
        }
        res
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.rows == self.cols
            && self
                .triplets()
                .all(|(i, j, x)| (self.get(j, i) - x).abs() <= tolerance)
    }

    /// A square matrix whose entry `(i, j)` is entry `(perm[i], perm[j])` of this one.
    pub fn permuted(&self, perm: &[usize]) -> Self {
        let mut inverse = vec![usize::MAX; self.rows.max(self.cols)];
        for (new, old) in perm.iter().enumerate() {
            if *old < inverse.len() {
                inverse[*old] = new;
            }
        }
        let triplets = self
            .triplets()
            .filter(|(i, j, _)| inverse[*i] != usize::MAX && inverse[*j] != usize::MAX)
            .map(|(i, j, x)| (inverse[i], inverse[j], x));
        Self::from_triplets(perm.len(), perm.len(), triplets)
    }

    /// `D * self * D` for the diagonal matrix `D = diag(scale)`.
    pub(crate) fn scaled_symmetric(&self, scale: &[f64]) -> Self {
        let triplets: Vec<_> = self
            .triplets()
            .map(|(i, j, x)| (i, j, x * scale[i] * scale[j]))
            .collect();
        Self::from_triplets(self.rows, self.cols, triplets)
    }

    fn row_slices(&self, i: usize) -> (&[usize], &[f64]) {
        let start = self.row_ptrs[i];
        let end = self.row_ptrs[i + 1];
        (&self.col_indices[start..end], &self.values[start..end])
    }
}
