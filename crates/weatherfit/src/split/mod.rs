//! Seeded train/test partitioning.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherfitError};
use crate::features::FeatureVector;

/// Fraction of rows assigned to training by default.
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Seed used when the caller does not choose one.
pub const DEFAULT_SEED: u64 = 42;

/// Disjoint train and test index sets covering every input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Split {
    /// Materialize the two subsets from the vectors the split was drawn over.
    pub fn partition(&self, vectors: &[FeatureVector]) -> (Vec<FeatureVector>, Vec<FeatureVector>) {
        let pick = |indices: &[usize]| {
            indices
                .iter()
                .filter_map(|&i| vectors.get(i).cloned())
                .collect::<Vec<_>>()
        };
        (pick(&self.train), pick(&self.test))
    }

    /// Total number of indices.
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition vectors into train and test subsets.
///
/// The partition is a Fisher-Yates permutation seeded with `seed`, so the same
/// seed and input order always give the same split. Both subsets are
/// non-empty: the test size is `ceil(n * (1 - ratio))` clamped to `1..n`.
pub fn split(vectors: &[FeatureVector], ratio: f64, seed: u64) -> Result<Split> {
    split_indices(vectors.len(), ratio, seed)
}

/// Index-level form of [`split`].
pub fn split_indices(n: usize, ratio: f64, seed: u64) -> Result<Split> {
    if !ratio.is_finite() || ratio <= 0.0 || ratio >= 1.0 {
        return Err(WeatherfitError::Config(format!(
            "split ratio must be in (0, 1), got {}",
            ratio
        )));
    }
    if n < 2 {
        return Err(WeatherfitError::InsufficientData {
            required: 2,
            actual: n,
            context: "train/test split".to_string(),
        });
    }

    // Guard against 0.3 being stored as 0.30000000000000004.
    let exact = n as f64 * (1.0 - ratio);
    let n_test = ((exact - 1e-9).ceil() as usize).clamp(1, n - 1);
    let n_train = n - n_test;

    let mut order: Vec<usize> = (0..n).collect();
    fastrand::Rng::with_seed(seed).shuffle(&mut order);

    let test = order.split_off(n_train);
    tracing::debug!(n, n_train, n_test, seed, "split rows");

    Ok(Split { train: order, test })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn vectors(n: usize) -> Vec<FeatureVector> {
        (0..n)
            .map(|i| FeatureVector::new(i, vec![i as f64], i as f64 * 2.0))
            .collect()
    }

    #[test]
    fn test_ten_rows_split_eight_two() {
        let split = split(&vectors(10), 0.8, 1).unwrap();
        assert_eq!(split.train.len(), 8);
        assert_eq!(split.test.len(), 2);
    }

    #[test]
    fn test_split_is_deterministic() {
        let data = vectors(50);
        assert_eq!(split(&data, 0.8, 7).unwrap(), split(&data, 0.8, 7).unwrap());
    }

    #[test]
    fn test_different_seeds_differ() {
        let data = vectors(50);
        assert_ne!(split(&data, 0.8, 7).unwrap(), split(&data, 0.8, 8).unwrap());
    }

    #[test]
    fn test_disjoint_and_exhaustive() {
        let split = split(&vectors(37), 0.7, 3).unwrap();
        let train: HashSet<usize> = split.train.iter().copied().collect();
        let test: HashSet<usize> = split.test.iter().copied().collect();

        assert!(train.is_disjoint(&test));
        let union: HashSet<usize> = train.union(&test).copied().collect();
        assert_eq!(union, (0..37).collect::<HashSet<_>>());
        assert_eq!(split.len(), 37);
    }

    #[test]
    fn test_float_noise_in_ratio() {
        let split = split_indices(10, 0.7, 0).unwrap();
        assert_eq!(split.test.len(), 3);
    }

    #[test]
    fn test_two_rows_both_non_empty() {
        for ratio in [0.01, 0.5, 0.99] {
            let split = split_indices(2, ratio, 0).unwrap();
            assert_eq!(split.train.len(), 1);
            assert_eq!(split.test.len(), 1);
        }
    }

    #[test]
    fn test_insufficient_data() {
        let err = split(&vectors(1), 0.8, 1).unwrap_err();
        assert!(matches!(
            err,
            WeatherfitError::InsufficientData { actual: 1, .. }
        ));
    }

    #[test]
    fn test_invalid_ratio() {
        for ratio in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                split_indices(10, ratio, 1),
                Err(WeatherfitError::Config(_))
            ));
        }
    }

    #[test]
    fn test_partition() {
        let data = vectors(10);
        let split = split(&data, 0.8, 1).unwrap();
        let (train, test) = split.partition(&data);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(test[0], data[split.test[0]]);
    }
}
