//! Longest common subsequence recovery.

/// Returns a longest common subsequence of `first` and `second`.
///
/// When several subsequences share the maximum length, the one returned is
/// decided by the backtracking walk: starting from the bottom-right of the
/// length table, a cell strictly greater than both the cell above and the
/// cell to the left records its character and steps diagonally; otherwise
/// the walk steps left when the cell does not exceed its left neighbour and
/// up in every remaining case, so ties with the cell above move up.
pub fn longest_common_subsequence(first: &str, second: &str) -> String {
    let a: Vec<char> = first.chars().collect();
    let b: Vec<char> = second.chars().collect();
    let cols = b.len() + 1;

    // Row-major (|a| + 1) x (|b| + 1) table; row and column zero stay 0.
    let mut lengths = vec![0usize; (a.len() + 1) * cols];
    let at = |r: usize, c: usize| r * cols + c;

    for r in 1..=a.len() {
        for c in 1..=b.len() {
            lengths[at(r, c)] = if a[r - 1] == b[c - 1] {
                lengths[at(r - 1, c - 1)] + 1
            } else {
                lengths[at(r - 1, c)].max(lengths[at(r, c - 1)])
            };
        }
    }

    let (mut r, mut c) = (a.len(), b.len());
    let mut reversed = Vec::with_capacity(lengths[at(r, c)]);
    while r > 0 && c > 0 {
        let current = lengths[at(r, c)];
        if current > lengths[at(r - 1, c)] {
            if current > lengths[at(r, c - 1)] {
                reversed.push(a[r - 1]);
                r -= 1;
                c -= 1;
            } else {
                c -= 1;
            }
        } else {
            r -= 1;
        }
    }

    reversed.iter().rev().collect()
}
