//! Closed-form ranking of 4-part splits.
//!
//! A split of `t` is a tuple `(a, b, c, d)` of non-negative integers
//! summing to `t`. For every `t` in `1..=8` the splits are ranked in
//! lexicographic order of `(a, b, c)`, and the blocks for successive totals
//! are laid end to end:
//!
//! ```text
//! offset(t)  = C(t+3, 4) - 1
//! rank(a,b,c)= [C(t+3,3) - C(t-a+3,3)] + [C(r+2,2) - C(r-b+2,2)] + c,  r = t - a
//! ```
//!
//! so membership and lookup are O(1) in both directions and nothing is
//! enumerated at run time.
//!
//! ```
//! use innovation_rules::catalog::split;
//!
//! let index = split::rank([2, 1, 1, 1]).unwrap();
//! assert_eq!(split::unrank(index), Some([2, 1, 1, 1]));
//! assert_eq!(split::SPLIT_COUNT, 494);
//! ```

/// Largest total with a block in the range.
pub const MAX_TOTAL: u32 = 8;

/// Size of the whole range: `C(12, 4) - 1`.
pub const SPLIT_COUNT: u16 = (binomial(MAX_TOTAL + 4, 4) - 1) as u16;

/// `C(n, k)` for the small arguments used here.
#[must_use]
pub const fn binomial(n: u32, k: u32) -> u32 {
    if k > n {
        return 0;
    }
    let mut result = 1u32;
    let mut i = 0;
    while i < k {
        result = result * (n - i) / (i + 1);
        i += 1;
    }
    result
}

/// Number of splits of `total`.
#[must_use]
pub const fn count(total: u32) -> u32 {
    binomial(total + 3, 3)
}

/// First index of the block for `total` (`total >= 1`).
#[must_use]
pub const fn offset(total: u32) -> u32 {
    binomial(total + 3, 4) - 1
}

/// Index of a split in the whole range, or `None` if its total is 0 or
/// above `MAX_TOTAL`.
#[must_use]
pub fn rank(split: [u32; 4]) -> Option<u16> {
    let total: u32 = split.iter().sum();
    if total == 0 || total > MAX_TOTAL {
        return None;
    }
    let [a, b, c, _] = split;
    let r = total - a;
    let within = (count(total) - binomial(r + 3, 3))
        + (binomial(r + 2, 2) - binomial(r - b + 2, 2))
        + c;
    u16::try_from(offset(total) + within).ok()
}

/// Inverse of `rank`.
#[must_use]
pub fn unrank(index: u16) -> Option<[u32; 4]> {
    let index = u32::from(index);
    let total = (1..=MAX_TOTAL).find(|&t| index < offset(t) + count(t))?;
    let mut rest = index - offset(total);

    let mut a = 0;
    loop {
        let block = binomial(total - a + 2, 2);
        if rest < block {
            break;
        }
        rest -= block;
        a += 1;
    }
    let r = total - a;
    let mut b = 0;
    loop {
        let block = r - b + 1;
        if rest < block {
            break;
        }
        rest -= block;
        b += 1;
    }
    let c = rest;
    Some([a, b, c, r - b - c])
}

/// Every split of `total`, in rank order.
pub fn splits(total: u32) -> impl Iterator<Item = [u32; 4]> {
    (0..=total).flat_map(move |a| {
        (0..=total - a).flat_map(move |b| (0..=total - a - b).map(move |c| [a, b, c, total - a - b - c]))
    })
}
