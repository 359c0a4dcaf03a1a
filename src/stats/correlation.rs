//! Correlation Module
//! Pairwise Pearson correlation over the selected series, with the
//! degenerate-data gate the dashboard needs.

use statrs::statistics::Statistics;

/// Pairwise Pearson coefficients for a set of equally long series.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Compute the matrix for the given (label, column) pairs. Degenerate
    /// pairs (zero variance, fewer than two observations) come out NaN, the
    /// same way a dataframe correlation leaves them missing.
    pub fn compute(labels: &[String], columns: &[Vec<f64>]) -> Self {
        debug_assert_eq!(labels.len(), columns.len());
        let n = labels.len().min(columns.len());

        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            labels: labels[..n].to_vec(),
            values,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Coefficient at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// Whether the matrix carries anything worth plotting: every row must
    /// sum to something non-zero, with NaN entries skipped the way a
    /// dataframe sum skips missing values. A constant series zeroes out its
    /// whole row and fails this gate.
    pub fn has_signal(&self) -> bool {
        self.values
            .iter()
            .all(|row| row.iter().filter(|v| !v.is_nan()).sum::<f64>() != 0.0)
    }
}

/// Pearson's r for two equally long samples. NaN when either side has no
/// variance or fewer than two points.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    let covariance = xs.covariance(ys);
    covariance / (xs.std_dev() * ys.std_dev())
}
