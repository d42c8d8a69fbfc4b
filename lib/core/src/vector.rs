use serde::{Deserialize, Serialize};

/// A sparse vector over a shared vocabulary space.
///
/// Entries are (term index, weight) pairs kept sorted by index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Build from (index, weight) pairs; entries are sorted on construction.
    #[must_use]
    pub fn new(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_unstable_by_key(|&(idx, _)| idx);
        Self { entries }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Dot product by merging the two sorted entry lists.
    #[must_use]
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let a = &self.entries;
        let b = &other.entries;
        let (mut i, mut j) = (0usize, 0usize);
        let mut sum = 0.0f32;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    #[inline]
    #[must_use]
    pub fn norm(&self) -> f32 {
        self.entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f32>()
            .sqrt()
    }

    /// Scale to unit length; zero vectors are left untouched.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv = 1.0 / norm;
            for entry in &mut self.entries {
                entry.1 *= inv;
            }
        }
    }

    /// Get normalized copy
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Cosine similarity; zero when either vector has no weight.
    #[must_use]
    pub fn cosine_similarity(&self, other: &SparseVector) -> f32 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        self.dot(other) / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = SparseVector::new(vec![(0, 1.0), (3, 2.0)]);
        let v2 = SparseVector::new(vec![(0, 1.0), (3, 2.0)]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-6);

        let v3 = SparseVector::new(vec![(0, 1.0)]);
        let v4 = SparseVector::new(vec![(1, 1.0)]);
        assert!((v3.cosine_similarity(&v4) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_skips_disjoint_indexes() {
        let v1 = SparseVector::new(vec![(0, 2.0), (2, 3.0), (5, 1.0)]);
        let v2 = SparseVector::new(vec![(2, 4.0), (4, 9.0), (5, 2.0)]);
        assert!((v1.dot(&v2) - 14.0).abs() < 1e-6);
    }

    #[test]
    fn test_new_sorts_entries() {
        let v = SparseVector::new(vec![(5, 1.0), (1, 2.0), (3, 3.0)]);
        let idxs: Vec<u32> = v.entries().iter().map(|&(i, _)| i).collect();
        assert_eq!(idxs, vec![1, 3, 5]);
    }

    #[test]
    fn test_normalize_unit_length() {
        let mut v = SparseVector::new(vec![(0, 3.0), (1, 4.0)]);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);

        let mut zero = SparseVector::default();
        zero.normalize();
        assert!(zero.is_empty());
        assert_eq!(zero.cosine_similarity(&v), 0.0);
    }
}
