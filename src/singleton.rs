// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! Process-wide singleton caching of the three named normalizers
//! (spec.md §5, "Process-wide state"; §6.2, "Named shortcuts"): `nfc()`,
//! `nfkc()`, `nfkc_cf()`.
//!
//! Each is backed by a [`crate::data::DataBlob`] validated at most once,
//! the first time any thread calls the corresponding function
//! (double-checked-publication semantics, spec.md §9). The three blobs
//! never get rebuilt or mutated after that first validation, so any number
//! of threads can call `nfc()`/`nfkc()`/`nfkc_cf()` concurrently and share
//! the one validated blob; a [`crate::compose::ComposingNormalizer`] is a
//! cheap `Copy` view over it, so each call just copies a few words rather
//! than contending on a lock.
//!
//! This crate has no deterministic library-unload hook (spec.md §9); the
//! three `static`s simply live for the process's lifetime, which spec.md §9
//! calls out as an acceptable substitute for explicit teardown on a
//! platform that offers none.

use crate::compiled_data;
use crate::compose::ComposingNormalizer;
use crate::data::DataBlob;
use once_cell::sync::Lazy;

static NFC: Lazy<DataBlob<'static>> =
    Lazy::new(|| DataBlob::try_new(compiled_data::nfc_bytes()).expect("bundled nfc data must validate"));
static NFKC: Lazy<DataBlob<'static>> = Lazy::new(|| {
    DataBlob::try_new(compiled_data::nfkc_bytes()).expect("bundled nfkc data must validate")
});
static NFKC_CF: Lazy<DataBlob<'static>> = Lazy::new(|| {
    DataBlob::try_new(compiled_data::nfkc_cf_bytes()).expect("bundled nfkc_cf data must validate")
});

/// The shared NFC normalizer, lazily validated on first use.
pub fn nfc() -> ComposingNormalizer<'static> {
    ComposingNormalizer::new(*NFC)
}

/// The shared NFKC normalizer, lazily validated on first use.
pub fn nfkc() -> ComposingNormalizer<'static> {
    ComposingNormalizer::new(*NFKC)
}

/// The shared NFKC_CF (NFKC plus Unicode caseless-matching case folding)
/// normalizer, lazily validated on first use. Case folding is baked into
/// this data set's mapping records rather than applied as a separate pass
/// (see [`crate::compiled_data`], DESIGN.md).
pub fn nfkc_cf() -> ComposingNormalizer<'static> {
    ComposingNormalizer::new(*NFKC_CF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nfc_singleton_composes() {
        assert_eq!(nfc().normalize(&[0x0065, 0x0301]).unwrap(), vec![0x00E9]);
    }

    #[test]
    fn nfkc_singleton_composes_and_shares_state_across_calls() {
        let a = nfkc();
        let b = nfkc();
        assert_eq!(
            a.normalize(&[0x1100, 0x1161]).unwrap(),
            b.normalize(&[0x1100, 0x1161]).unwrap()
        );
    }

    #[test]
    fn nfkc_cf_singleton_case_folds() {
        assert_eq!(
            nfkc_cf().normalize(&[0x0041, 0x0042]).unwrap(),
            vec!['a' as u16, 'b' as u16]
        );
    }
}
