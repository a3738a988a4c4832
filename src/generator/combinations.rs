//! Lexicographic k-combinations.
//!
//! Yields every size-`k` subset of a slice, preserving slice order inside
//! each subset and enumerating subsets in lexicographic order of their
//! index tuples (the order Python's `itertools.combinations` uses).
//!
//! # Complexity
//! C(n, k) items, O(k) work per item.

/// Iterator over the size-`k` combinations of a slice.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    pool: &'a [T],
    indices: Vec<usize>,
    first: bool,
    done: bool,
}

impl<'a, T: Copy> Combinations<'a, T> {
    /// Creates the iterator. `k > pool.len()` yields nothing; `k == 0`
    /// yields one empty combination.
    pub fn new(pool: &'a [T], k: usize) -> Self {
        Self {
            pool,
            indices: (0..k).collect(),
            first: true,
            done: k > pool.len(),
        }
    }

    /// Advances `indices` to the next combination; `false` when exhausted.
    fn advance(&mut self) -> bool {
        let n = self.pool.len();
        let k = self.indices.len();
        // Rightmost index that can still move right
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != i + n - k) else {
            return false;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl<T: Copy> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
        } else if !self.advance() {
            self.done = true;
            return None;
        }
        Some(self.indices.iter().map(|&i| self.pool[i]).collect())
    }
}

/// All combinations of size `k` of `pool`, in lexicographic order.
pub fn combinations<T: Copy>(pool: &[T], k: usize) -> Combinations<'_, T> {
    Combinations::new(pool, k)
}

/// Number of size-`k` subsets of an `n`-set; saturates on overflow.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: usize = 1;
    for i in 0..k {
        acc = match acc.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return usize::MAX,
        };
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_of_four() {
        let got: Vec<_> = combinations(&[1, 2, 3, 4], 2).collect();
        assert_eq!(
            got,
            vec![
                vec![1, 2],
                vec![1, 3],
                vec![1, 4],
                vec![2, 3],
                vec![2, 4],
                vec![3, 4],
            ]
        );
    }

    #[test]
    fn test_preserves_pool_order() {
        let got: Vec<_> = combinations(&['c', 'a', 'b'], 2).collect();
        assert_eq!(got, vec![vec!['c', 'a'], vec!['c', 'b'], vec!['a', 'b']]);
    }

    #[test]
    fn test_edge_sizes() {
        let empty: [u8; 0] = [];
        assert_eq!(combinations(&empty, 0).count(), 1);
        assert_eq!(combinations(&[1, 2], 0).collect::<Vec<_>>(), vec![Vec::<i32>::new()]);
        assert_eq!(combinations(&[1, 2], 3).count(), 0);
        assert_eq!(combinations(&[1, 2, 3], 3).collect::<Vec<_>>(), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_count_matches_binomial() {
        let pool: Vec<u32> = (0..9).collect();
        for k in 0..=10 {
            assert_eq!(combinations(&pool, k).count(), binomial(9, k), "k={k}");
        }
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(10, 0), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(52, 5), 2_598_960);
    }
}
