// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! The bundled default data sets backing [`crate::singleton`]'s `nfc()`,
//! `nfkc()`, and `nfkc_cf()` shortcuts.
//!
//! Loading a `DataBlob` from disk or a memory map is out of scope for this
//! crate (spec.md §1); the teacher crate's answer to "what data does the
//! named-shortcut constructor actually load" is a sibling `*_data` crate
//! compiled in via Cargo (`icu_normalizer_data`, generated from the full
//! UCD by ICU4X's data exporter). This crate has no such generator, so the
//! bundled set here is a small, hand-assembled stand-in covering the same
//! scenarios as [`crate::testdata`] (itself standing in for
//! `icu_testdata`) — real coverage of the full Unicode repertoire is a
//! matter of swapping these bytes for a generated blob, not of changing
//! any code in `singleton.rs` or below. See DESIGN.md.
//!
//! Always compiled in: unlike a full UCD-generated `*_data` crate, this
//! stand-in is small enough that there is no size cost to gating it behind
//! a feature the way some ICU4X component crates do for their generated
//! data dependencies.

use crate::blob_builder::{assemble_blob, write_mapping_record, TrieBuilder, FAST_SHIFT};
use crate::comp_table;
use once_cell::sync::Lazy;

const MIN_YES_NO: u16 = 0x0100;
const MIN_NO_NO: u16 = 0x0200;
const LIMIT_NO_NO: u16 = MIN_NO_NO + 1;
const MIN_MAYBE_YES: u16 = 0x0300;

const E_CEDILLA_AS_COMPOSITE: u32 = 0x1E09;

/// `with_fb01`: add U+FB01's compatibility decomposition (NFKC/NFKC_CF).
/// `with_casefold`: add a one-way ASCII-uppercase-to-lowercase mapping
/// (NFKC_CF only). Real `nfkc_cf.nrm`-style data bakes full Unicode case
/// folding into mapping records exactly like this, rather than running a
/// separate case-folding pass over the composed result (DESIGN.md).
fn build_blob(with_fb01: bool, with_casefold: bool) -> Vec<u8> {
    let mut trie = TrieBuilder::new();
    let mut compositions = vec![0u8; 2];

    let e_list_offset = compositions.len();
    let unit0 = comp_table::encode_unit0(false, 0x0327, E_CEDILLA_AS_COMPOSITE);
    compositions.extend_from_slice(&unit0.to_le_bytes());
    compositions.extend_from_slice(&(E_CEDILLA_AS_COMPOSITE as u16).to_le_bytes());
    let unit0 = comp_table::encode_unit0(true, 0x0301, 0x00E9);
    compositions.extend_from_slice(&unit0.to_le_bytes());
    compositions.extend_from_slice(&0x00E9u16.to_le_bytes());

    let e_cedilla_list_offset = compositions.len();
    let unit0 = comp_table::encode_unit0(true, 0x0301, E_CEDILLA_AS_COMPOSITE);
    compositions.extend_from_slice(&unit0.to_le_bytes());
    compositions.extend_from_slice(&(E_CEDILLA_AS_COMPOSITE as u16).to_le_bytes());

    let e_norm16 = (e_list_offset / 2) as u16;
    let e_cedilla_norm16 = (e_cedilla_list_offset / 2) as u16;

    trie.set('a' as u16, 0);
    trie.set('e' as u16, e_norm16);
    trie.set(0x0301, MIN_YES_NO + 230); // combining acute
    trie.set(0x0327, MIN_YES_NO + 202); // combining cedilla
    trie.set(0x00E9, LIMIT_NO_NO); // é, first mapping record
    trie.set(0x1E09, e_cedilla_norm16);

    // See testdata.rs: L keeps norm16 0 (true composition starter); V and T
    // get a yes-with-zero-CCC norm16 since they combine backward into LV
    // and LVT respectively.
    trie.set(0x1100, 0); // Hangul L
    trie.set(0x1161, MIN_YES_NO); // Hangul V
    trie.set(0x11A8, MIN_YES_NO); // Hangul T

    let first_block = 0xAC00usize >> FAST_SHIFT;
    let last_block = 0xD7A3usize >> FAST_SHIFT;
    trie.set_shared_block_range(first_block..=last_block, MIN_NO_NO);

    let mut mappings = Vec::new();
    write_mapping_record(&mut mappings, 0, 230, &[0x0065, 0x0301]);
    if with_fb01 {
        let fb01_offset = mappings.len();
        write_mapping_record(&mut mappings, 0, 0, &[0x0066, 0x0069]);
        trie.set(0xFB01, LIMIT_NO_NO + (fb01_offset / 2) as u16);
    }
    if with_casefold {
        for c in b'A'..=b'Z' {
            let offset = mappings.len();
            write_mapping_record(&mut mappings, 0, 0, &[(c - b'A' + b'a') as u16]);
            trie.set(c as u16, LIMIT_NO_NO + (offset / 2) as u16);
        }
    }

    let trie_bytes = trie.build();
    assemble_blob(
        &trie_bytes,
        &compositions,
        &mappings,
        0x00C0,
        0x0300,
        MIN_YES_NO,
        MIN_NO_NO,
        LIMIT_NO_NO,
        MIN_MAYBE_YES,
    )
}

static NFC_BYTES: Lazy<Vec<u8>> = Lazy::new(|| build_blob(false, false));
static NFKC_BYTES: Lazy<Vec<u8>> = Lazy::new(|| build_blob(true, false));
static NFKC_CF_BYTES: Lazy<Vec<u8>> = Lazy::new(|| build_blob(true, true));

pub(crate) fn nfc_bytes() -> &'static [u8] {
    &NFC_BYTES
}

pub(crate) fn nfkc_bytes() -> &'static [u8] {
    &NFKC_BYTES
}

pub(crate) fn nfkc_cf_bytes() -> &'static [u8] {
    &NFKC_CF_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataBlob;

    #[test]
    fn nfkc_cf_blob_case_folds_ascii_uppercase() {
        let blob = DataBlob::try_new(nfkc_cf_bytes()).expect("bundled data must validate");
        let v = blob.trie().get('A' as u32);
        let rec = blob.props().get_mapping(v).unwrap();
        assert_eq!(rec.iter().collect::<Vec<_>>(), vec!['a' as u16]);
    }

    #[test]
    fn all_three_bundled_blobs_validate() {
        assert!(DataBlob::try_new(nfc_bytes()).is_ok());
        assert!(DataBlob::try_new(nfkc_bytes()).is_ok());
        assert!(DataBlob::try_new(nfkc_cf_bytes()).is_ok());
    }
}
