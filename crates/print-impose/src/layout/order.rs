//! Page ordering for folded signatures
//!
//! Both generators return 1-based page numbers in print order: the first
//! entries fill the front of the first sheet, then its back, and so on.
//!
//! **Saddle stitch (two up):**
//! - 8 pages: Front [8, 1], Back [2, 7], Front [6, 3], Back [4, 5]
//!
//! **Quarter fold (four up, TL TR BL BR per side):**
//! - 8 pages: Front [8, 1, 2, 7], Back [6, 3, 4, 5]

use crate::constants::{PAGES_PER_FOLIO_SHEET, PAGES_PER_QUARTO_SHEET};
use crate::types::{ImposeError, Result};

/// Two-up saddle-stitch order.
///
/// Printed two up, duplex and flipped on the short edge, then folded once
/// and stapled through the fold, the sheets read 1..n in order.
/// `mirror_back` swaps the pair on every back side.
pub fn saddle_order(pages: usize, mirror_back: bool) -> Result<Vec<usize>> {
    if pages % PAGES_PER_FOLIO_SHEET != 0 {
        return Err(ImposeError::InvalidPageCount {
            count: pages,
            multiple: PAGES_PER_FOLIO_SHEET,
        });
    }

    let mut order = Vec::with_capacity(pages);
    if pages == 0 {
        return Ok(order);
    }

    let (mut left, mut right) = (0, pages - 1);
    while left < right {
        // Front
        order.push(right + 1);
        order.push(left + 1);
        // Back
        if mirror_back {
            order.push(right);
            order.push(left + 2);
        } else {
            order.push(left + 2);
            order.push(right);
        }
        left += 2;
        right -= 2;
    }
    Ok(order)
}

/// Four-up quarter-fold order (TL, TR, BL, BR on each side).
pub fn quarter_fold_order(pages: usize) -> Result<Vec<usize>> {
    if pages % PAGES_PER_QUARTO_SHEET != 0 {
        return Err(ImposeError::InvalidPageCount {
            count: pages,
            multiple: PAGES_PER_QUARTO_SHEET,
        });
    }

    let n = pages;
    let mut order = Vec::with_capacity(n);
    for k in 0..n / PAGES_PER_QUARTO_SHEET {
        // Each sheet consumes four pages from the front half, so inner
        // pages advance by 4k, outer pages retreat by 4k.
        order.extend_from_slice(&[n - 4 * k, 4 * k + 1, 4 * k + 2, n - (4 * k + 1)]);
        order.extend_from_slice(&[n - (4 * k + 2), 4 * k + 3, 4 * k + 4, n - (4 * k + 3)]);
    }
    Ok(order)
}

/// Saddle order applied independently to consecutive signatures of
/// `signature_pages` each. `pages` must be a multiple of `signature_pages`.
pub fn multi_signature_order(
    pages: usize,
    signature_pages: usize,
    mirror_back: bool,
) -> Result<Vec<usize>> {
    if signature_pages == 0 || pages % signature_pages != 0 {
        return Err(ImposeError::InvalidPageCount {
            count: pages,
            multiple: signature_pages,
        });
    }

    let single = saddle_order(signature_pages, mirror_back)?;
    Ok((0..pages / signature_pages)
        .flat_map(|sig| single.iter().map(move |page| sig * signature_pages + page))
        .collect())
}

/// Convert a 1-based page order into 0-based indices
pub fn to_zero_based(order: &[usize]) -> Vec<usize> {
    order.iter().map(|page| page - 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fold nested two-up sheets and read the pages in book order
    fn read_folded_booklet(order: &[usize]) -> Vec<usize> {
        let sheets: Vec<&[usize]> = order.chunks(4).collect();
        let mut reading = Vec::with_capacity(order.len());
        // Right halves, outermost sheet first: front-right, then the back-left behind it
        for sheet in &sheets {
            reading.push(sheet[1]);
            reading.push(sheet[2]);
        }
        // Left halves, innermost sheet first: back-right, then the front-left behind it
        for sheet in sheets.iter().rev() {
            reading.push(sheet[3]);
            reading.push(sheet[0]);
        }
        reading
    }

    fn is_permutation(order: &[usize], n: usize) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted == (1..=n).collect::<Vec<_>>()
    }

    #[test]
    fn test_saddle_order_8() {
        assert_eq!(saddle_order(8, false).unwrap(), vec![8, 1, 2, 7, 6, 3, 4, 5]);
    }

    #[test]
    fn test_saddle_order_mirrored_back() {
        assert_eq!(saddle_order(8, true).unwrap(), vec![8, 1, 7, 2, 6, 3, 5, 4]);
    }

    #[test]
    fn test_saddle_order_folds_into_reading_order() {
        for n in [4, 8, 12] {
            let order = saddle_order(n, false).unwrap();
            assert!(is_permutation(&order, n));
            assert_eq!(read_folded_booklet(&order), (1..=n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_saddle_order_rejects_odd_counts() {
        match saddle_order(6, false) {
            Err(ImposeError::InvalidPageCount { count, multiple }) => {
                assert_eq!(count, 6);
                assert_eq!(multiple, 4);
            }
            other => panic!("Expected InvalidPageCount, got {:?}", other),
        }
    }

    #[test]
    fn test_saddle_order_empty() {
        assert!(saddle_order(0, false).unwrap().is_empty());
    }

    #[test]
    fn test_quarter_fold_order_8() {
        assert_eq!(quarter_fold_order(8).unwrap(), vec![8, 1, 2, 7, 6, 3, 4, 5]);
    }

    #[test]
    fn test_quarter_fold_order_is_permutation() {
        for n in [8, 16, 24, 32] {
            let order = quarter_fold_order(n).unwrap();
            assert!(is_permutation(&order, n), "not a permutation for {}", n);
        }
    }

    #[test]
    fn test_quarter_fold_order_rejects_non_multiple_of_8() {
        assert!(matches!(
            quarter_fold_order(12),
            Err(ImposeError::InvalidPageCount { multiple: 8, .. })
        ));
    }

    #[test]
    fn test_multi_signature_order() {
        let order = multi_signature_order(8, 4, false).unwrap();
        assert_eq!(order, vec![4, 1, 2, 3, 8, 5, 6, 7]);
        assert!(multi_signature_order(10, 4, false).is_err());
    }
}
