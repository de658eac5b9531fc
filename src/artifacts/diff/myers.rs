//! Myers shortest edit script
//!
//! Greedy forward search over the edit graph (one `v` snapshot per edit cost),
//! then a backtrack from the bottom-right corner to recover the path.

use derive_new::new;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { value: T },
    Insert { value: T },
    Equal { value: T },
}

impl<T> Edit<T> {
    pub fn value(&self) -> &T {
        match self {
            Edit::Delete { value } | Edit::Insert { value } | Edit::Equal { value } => value,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, Edit::Equal { .. })
    }

    pub fn prefix(&self) -> char {
        match self {
            Edit::Delete { .. } => '-',
            Edit::Insert { .. } => '+',
            Edit::Equal { .. } => ' ',
        }
    }
}

impl<T: Display> Display for Edit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.prefix(), self.value())
    }
}

/// One step of the edit path: `(prev_x, prev_y, x, y)`
type Step = (isize, isize, isize, isize);

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<T: Eq + Clone> MyersDiff<'_, T> {
    fn offset(&self) -> usize {
        self.a.len() + self.b.len()
    }

    fn compute_shortest_edit(&self) -> Vec<Vec<isize>> {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = self.offset() as isize;

        // one spare slot: at d = 0 the k = -d branch reads v[offset + 1]
        let mut v = vec![0; 2 * offset as usize + 2];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset + k) as usize;

                let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                    // came down from k + 1: an insertion
                    v[idx + 1]
                } else {
                    // came right from k - 1: a deletion
                    v[idx - 1] + 1
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    fn backtrack(&self) -> Vec<Step> {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let offset = self.offset() as isize;
        let mut path = Vec::new();

        for (d, v) in self.compute_shortest_edit().iter().enumerate().rev() {
            let d = d as isize;
            let k = x - y;

            let prev_k = if k == -d || (k != d && v[(offset + k - 1) as usize] < v[(offset + k + 1) as usize])
            {
                k + 1
            } else {
                k - 1
            };

            let prev_x = v[(offset + prev_k) as usize];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                path.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                path.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        path.reverse();
        path
    }

    /// Edit script turning `a` into `b`
    pub fn diff(&self) -> Vec<Edit<T>> {
        self.backtrack()
            .into_iter()
            .map(|(prev_x, prev_y, x, y)| {
                if x == prev_x {
                    Edit::Insert {
                        value: self.b[prev_y as usize].clone(),
                    }
                } else if y == prev_y {
                    Edit::Delete {
                        value: self.a[prev_x as usize].clone(),
                    }
                } else {
                    Edit::Equal {
                        value: self.a[prev_x as usize].clone(),
                    }
                }
            })
            .collect()
    }

    /// Index pairs `(i, j)` with `a[i] == b[j]` kept by the edit script, ascending
    pub fn matches(&self) -> Vec<(usize, usize)> {
        self.backtrack()
            .into_iter()
            .filter(|(prev_x, prev_y, x, y)| x != prev_x && y != prev_y)
            .map(|(prev_x, prev_y, _, _)| (prev_x as usize, prev_y as usize))
            .collect()
    }
}
