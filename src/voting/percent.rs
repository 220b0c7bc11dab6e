use crate::models::Percentages;

// Used when nobody has voted yet
const EVEN_SPLIT: Percentages = Percentages { a: 50, b: 50 };

/// Splits 100% between the two options.
///
/// The share of `a` is rounded half up and `b` gets the complement, so the
/// two always add up to exactly 100.
pub fn compute_percentages(a: u64, b: u64) -> Percentages {
    let total = a as u128 + b as u128;
    if total == 0 {
        return EVEN_SPLIT;
    }

    // round(100 * a / total) without going through floats
    let a_share = (200 * a as u128 + total) / (2 * total);
    let a_percent = a_share as u8;

    Percentages {
        a: a_percent,
        b: 100 - a_percent,
    }
}
