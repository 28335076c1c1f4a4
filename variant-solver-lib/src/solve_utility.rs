//! Pure functions on candidate value masks.
//!
//! A value mask is a `u32` where bit `k` means the value `k + 1` is still a
//! candidate. Bit `size` is reserved for the given flag ([`given_bit`]); the
//! functions in this module operate on the candidate bits only, so callers
//! strip the given flag first where it may be present.

use rand::Rng;

/// The mask with just the bit for `val` set.
pub fn value_mask(val: usize) -> u32 {
    1u32 << (val - 1)
}

/// The mask with the bit for each of `vals` set.
pub fn values_mask(vals: &[usize]) -> u32 {
    vals.iter().fold(0u32, |acc, &val| acc | value_mask(val))
}

/// The mask with every value of a `size`-sized board set.
pub fn all_values_mask(size: usize) -> u32 {
    (1u32 << size) - 1
}

/// The flag bit marking a cell as given. This is the bit directly above the
/// highest candidate bit, so it depends on the board size.
pub fn given_bit(size: usize) -> u32 {
    1u32 << size
}

/// The number of values in the mask.
pub fn value_count(mask: u32) -> usize {
    mask.count_ones() as usize
}

/// The single value of the mask. Assumes exactly one value remains; with more
/// than one this behaves like [`min_value`].
pub fn get_value(mask: u32) -> usize {
    mask.trailing_zeros() as usize + 1
}

/// The smallest value in the mask. Undefined for an empty mask.
pub fn min_value(mask: u32) -> usize {
    mask.trailing_zeros() as usize + 1
}

/// The largest value in the mask. Undefined for an empty mask.
pub fn max_value(mask: u32) -> usize {
    32 - mask.leading_zeros() as usize
}

/// Whether the mask contains `val`.
pub fn has_value(mask: u32, val: usize) -> bool {
    (mask & value_mask(val)) != 0
}

/// Iterates the values of the mask in ascending order.
///
/// # Example
/// ```
/// # use variant_solver_lib::solve_utility::*;
/// let mask = values_mask(&[2, 5, 9]);
/// assert_eq!(values_from_mask(mask).collect::<Vec<_>>(), vec![2, 5, 9]);
/// ```
pub fn values_from_mask(mask: u32) -> ValuesIter {
    ValuesIter { mask }
}

/// Iterator over the values of a mask. See [`values_from_mask`].
pub struct ValuesIter {
    mask: u32,
}

impl Iterator for ValuesIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.mask == 0 {
            None
        } else {
            let index = self.mask.trailing_zeros() as usize;
            self.mask &= !(1 << index);
            Some(index + 1)
        }
    }
}

/// A uniformly random value from the mask. Assumes a non-empty mask.
pub fn random_value<R: Rng + ?Sized>(mask: u32, rng: &mut R) -> usize {
    let skip = rng.gen_range(0..value_count(mask));
    values_from_mask(mask)
        .nth(skip)
        .unwrap_or_else(|| min_value(mask))
}

/// Renders the values of the mask.
///
/// For boards up to 9x9 the digits are concatenated; larger boards join the
/// (multi-digit) values with commas.
///
/// # Example
/// ```
/// # use variant_solver_lib::solve_utility::*;
/// assert_eq!(mask_to_string(values_mask(&[1, 2, 5]), 9), "125");
/// assert_eq!(mask_to_string(values_mask(&[1, 12]), 16), "1,12");
/// ```
pub fn mask_to_string(mask: u32, size: usize) -> String {
    let separator = if size <= 9 { "" } else { "," };
    let mut s = String::new();
    for val in values_from_mask(mask) {
        if !s.is_empty() {
            s.push_str(separator);
        }
        s.push_str(&val.to_string());
    }
    s
}

/// Returns the default box region assignment for each cell of a board of the
/// given size, as a flat row-major list of region indices.
///
/// The box height is the largest factor of `size` that is at most its square
/// root; the box width is `size` divided by that.
///
/// # Example
/// ```
/// # use variant_solver_lib::solve_utility::default_regions;
/// let regions = default_regions(6);
/// assert_eq!(regions, vec![
///     0, 0, 0, 1, 1, 1,
///     0, 0, 0, 1, 1, 1,
///     2, 2, 2, 3, 3, 3,
///     2, 2, 2, 3, 3, 3,
///     4, 4, 4, 5, 5, 5,
///     4, 4, 4, 5, 5, 5,
/// ]);
/// ```
pub fn default_regions(size: usize) -> Vec<usize> {
    if size == 0 {
        return Vec::new();
    }

    let mut region_height = (size as f64).sqrt().floor() as usize;
    while size % region_height != 0 {
        region_height -= 1;
    }
    let region_width = size / region_height;

    let mut regions = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            regions.push((row / region_height) * region_height + (col / region_width));
        }
    }
    regions
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_masks() {
        assert_eq!(value_mask(1), 0b1);
        assert_eq!(value_mask(9), 0b1_0000_0000);
        assert_eq!(values_mask(&[1, 3, 5]), 0b10101);
        assert_eq!(all_values_mask(9), 0b1_1111_1111);
        assert_eq!(given_bit(9), 0b10_0000_0000);
        assert_eq!(value_count(values_mask(&[2, 4, 8])), 3);
        assert_eq!(min_value(values_mask(&[3, 5, 8])), 3);
        assert_eq!(max_value(values_mask(&[3, 5, 8])), 8);
        assert_eq!(get_value(value_mask(7)), 7);
        assert!(has_value(values_mask(&[1, 9]), 9));
        assert!(!has_value(values_mask(&[1, 9]), 5));
    }

    #[test]
    fn test_mask_to_string() {
        assert_eq!(mask_to_string(0, 9), "");
        assert_eq!(mask_to_string(values_mask(&[4]), 9), "4");
        assert_eq!(mask_to_string(values_mask(&[1, 2, 9]), 9), "129");
        assert_eq!(mask_to_string(values_mask(&[2, 10, 16]), 16), "2,10,16");
    }

    #[test]
    fn test_random_value() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mask = values_mask(&[2, 5, 9]);
        for _ in 0..100 {
            let val = random_value(mask, &mut rng);
            assert!(has_value(mask, val));
        }
    }

    #[test]
    fn test_default_regions() {
        let regions = default_regions(9);
        assert_eq!(regions.len(), 81);
        assert_eq!(regions[0], 0);
        assert_eq!(regions[8], 2);
        assert_eq!(regions[30], 4);
        assert_eq!(regions[80], 8);

        // 4x4 boxes are 2x2
        let regions = default_regions(4);
        assert_eq!(
            regions,
            vec![0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3]
        );
    }
}
