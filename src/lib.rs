// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! The Unicode normalization core: decomposition and composition of UTF-16
//! code unit sequences into NFD, NFC, NFKD, NFKC, or NFKC_CF, driven by a
//! precompiled binary data table (see [`data`]).
//!
//! This crate intentionally does not load data files from disk, does not
//! select a normalizer by name, and does not cache process-wide singletons
//! beyond the three named shortcuts in [`singleton`]. Those concerns belong
//! to a higher-level wrapper; see spec.md §1 for the boundary.
//!
//! ```
//! use nrm2::nfc;
//! let normalizer = nfc();
//! let nfd = normalizer.normalize(&[0x0065, 0x0301]).unwrap(); // e + combining acute
//! let nfc_form = normalizer.normalize(&nfd).unwrap();
//! assert_eq!(nfc_form, vec![0x00E9]); // é
//! ```

mod blob_builder;
pub mod buffer;
pub mod comp_table;
pub mod compose;
mod compiled_data;
pub mod data;
pub mod decomp_table;
pub mod decompose;
pub mod error;
pub mod hangul;
pub mod props;
pub mod singleton;
pub mod trie;

#[cfg(any(test, feature = "testutil"))]
pub mod testdata;

pub use compose::{compose, compose_and_append, ComposingNormalizer};
pub use data::DataBlob;
pub use decompose::{decompose, decompose_and_append, DecomposingNormalizer};
pub use error::NormalizerError;
pub use singleton::{nfc, nfkc, nfkc_cf};

/// A single Unicode scalar or unpaired-surrogate value, always in
/// `0..=0x10FFFF`. Spec.md §3 calls this "code point"; unlike [`char`] this
/// type is allowed to be a surrogate, since the core's input/output surface
/// is raw UTF-16 code units and an unpaired surrogate must pass through
/// unchanged rather than be rejected (spec.md §8, Boundary behaviors).
pub type CodePoint = u32;

pub(crate) const HANGUL_S_BASE: u32 = 0xAC00;
pub(crate) const HANGUL_L_BASE: u32 = 0x1100;
pub(crate) const HANGUL_V_BASE: u32 = 0x1161;
pub(crate) const HANGUL_T_BASE: u32 = 0x11A7;
pub(crate) const HANGUL_L_COUNT: u32 = 19;
pub(crate) const HANGUL_V_COUNT: u32 = 21;
pub(crate) const HANGUL_T_COUNT: u32 = 28;
pub(crate) const HANGUL_N_COUNT: u32 = HANGUL_V_COUNT * HANGUL_T_COUNT;
pub(crate) const HANGUL_S_COUNT: u32 = HANGUL_L_COUNT * HANGUL_N_COUNT;

/// Decodes one code point from UTF-16 `input` starting at `index`, merging a
/// valid surrogate pair. Returns the code point and the number of code units
/// consumed (1 or 2). An unpaired lead surrogate, an unpaired trail
/// surrogate, or a lone non-surrogate unit is returned as-is with a
/// consumed count of 1 (spec.md §4.5: "for an unpaired lead surrogate use
/// the BMP-code-point lookup").
#[inline]
pub fn decode_utf16_at(input: &[u16], index: usize) -> (CodePoint, usize) {
    let unit = input[index];
    if is_lead_surrogate(unit) {
        if let Some(&trail) = input.get(index + 1) {
            if is_trail_surrogate(trail) {
                let c = 0x10000
                    + ((unit as u32 - 0xD800) << 10)
                    + (trail as u32 - 0xDC00);
                return (c, 2);
            }
        }
    }
    (unit as u32, 1)
}

#[inline(always)]
pub(crate) fn is_lead_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

#[inline(always)]
pub(crate) fn is_trail_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_utf16_merges_surrogate_pair() {
        // U+1F600 GRINNING FACE
        let units = [0xD83D, 0xDE00];
        assert_eq!(decode_utf16_at(&units, 0), (0x1F600, 2));
    }

    #[test]
    fn decode_utf16_unpaired_lead_passes_through() {
        let units = [0xD83D, 0x0041];
        assert_eq!(decode_utf16_at(&units, 0), (0xD83D, 1));
    }

}
