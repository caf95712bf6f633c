// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! Hand-assembled synthetic data blobs for tests and doctests, playing the
//! role `icu_testdata` plays for the rest of the workspace: a small,
//! compiled-in fixture so unit tests don't need a multi-megabyte generated
//! UCD data file. Covers the code points exercised by the conformance
//! scenarios in spec.md §8 — not a general-purpose Unicode data set.

use crate::blob_builder::{assemble_blob, write_mapping_record, TrieBuilder, FAST_SHIFT};
use crate::comp_table;
use once_cell::sync::Lazy;

// norm16 thresholds for the synthetic data set (spec.md §3, §6.1). Chosen so
// every subrange has at least one occupied entry without colliding with the
// defaults used for ordinary, uninteresting code points (which are all 0).
const MIN_YES_NO: u16 = 0x0100;
const MIN_NO_NO: u16 = 0x0200; // also the Hangul marker value
const LIMIT_NO_NO: u16 = MIN_NO_NO + 1;
const MIN_MAYBE_YES: u16 = 0x0300;

/// Builds the full data blob. `with_fb01` adds the compatibility
/// decomposition of U+FB01 (LATIN SMALL LIGATURE FI) used by the NFKC
/// scenario in spec.md §8, row 7.
fn build_blob(with_fb01: bool) -> Vec<u8> {
    let mut trie = TrieBuilder::new();

    // Composition-starter norm16 values below `MIN_YES_NO` double as a
    // direct `offset / 2` into the compositions table (spec.md §4.1's
    // `maybeYesCompositions` formula generalizes to this range too), so the
    // table is laid out first and the starters' norm16 values are derived
    // from the resulting byte offsets rather than picked up front. Offset 0
    // is reserved (norm16 0 means "no composition list") so the table opens
    // with two bytes of padding.
    let mut compositions = vec![0u8; 2];

    // 'e' (U+0065) combines with cedilla into an intermediate, then
    // (checked second) with acute straight into é.
    let e_list_offset = compositions.len();
    let unit0 = comp_table::encode_unit0(false, 0x0327, E_CEDILLA_AS_COMPOSITE);
    compositions.extend_from_slice(&unit0.to_le_bytes());
    compositions.extend_from_slice(&(E_CEDILLA_AS_COMPOSITE as u16).to_le_bytes());
    let unit0 = comp_table::encode_unit0(true, 0x0301, 0x00E9);
    compositions.extend_from_slice(&unit0.to_le_bytes());
    compositions.extend_from_slice(&0x00E9u16.to_le_bytes());

    // The e-cedilla intermediate (standing in for the real U+1E07 e-with-
    // cedilla precomposed character, to keep the fixture small) combines
    // with acute into U+1E09 (scenario 3/4 in spec.md §8).
    let e_cedilla_list_offset = compositions.len();
    let unit0 = comp_table::encode_unit0(true, 0x0301, E_CEDILLA_AS_COMPOSITE);
    compositions.extend_from_slice(&unit0.to_le_bytes());
    compositions.extend_from_slice(&(E_CEDILLA_AS_COMPOSITE as u16).to_le_bytes());

    let e_norm16 = (e_list_offset / 2) as u16;
    let e_cedilla_norm16 = (e_cedilla_list_offset / 2) as u16;

    trie.set('a' as u16, 0);
    trie.set('e' as u16, e_norm16);

    // Combining acute (U+0301, ccc 230) and cedilla (U+0327, ccc 202): yes,
    // non-zero CCC, encoded directly in the low byte of norm16.
    trie.set(0x0301, MIN_YES_NO + 230);
    trie.set(0x0327, MIN_YES_NO + 202);

    // é (U+00E9): has a canonical decomposition, norm16 = LIMIT_NO_NO + 0
    // (first mapping record).
    const E_ACUTE_MAPPING_V: u16 = LIMIT_NO_NO;
    trie.set(0x00E9, E_ACUTE_MAPPING_V);

    // e with cedilla and acute: the composite needs its own composition-
    // starter norm16 so the second step's lookup succeeds.
    trie.set(0x1E09, e_cedilla_norm16);

    // Hangul jamo: composition/decomposition is special-cased via arithmetic
    // (hangul.rs), not the compositions/mapping tables, so none of these
    // norm16 values point anywhere — only their subrange matters. L can
    // never follow another starter, so it keeps norm16 0 (a true
    // composition starter). V and T *can* combine backward (into LV and
    // LVT respectively), so they get a yes-with-zero-CCC norm16 instead:
    // still `isDecompYes` with CCC 0, but no longer `isCompYesAndZeroCC`,
    // so `isCompStarter` correctly reports them as continuing a span rather
    // than starting one (SPEC_FULL.md §11, Hangul fast paths).
    trie.set(0x1100, 0); // L
    trie.set(0x1161, MIN_YES_NO); // V
    trie.set(0x11A8, MIN_YES_NO); // T (first trailing consonant)

    // All Hangul syllables (U+AC00..U+D7A4) share the Hangul-marker value.
    let first_block = 0xAC00usize >> FAST_SHIFT;
    let last_block = 0xD7A3usize >> FAST_SHIFT;
    trie.set_shared_block_range(first_block..=last_block, MIN_NO_NO);

    // Mapping records: é -> e, combining-acute; and (optionally) FB01 ->
    // f, i. A mapping's norm16 is `limit_no_no + byte_offset_within_mappings
    // / 2` (the same offset-as-value scheme as the compositions table
    // above), so lay the records out before assigning norm16 values.
    let mut mappings = Vec::new();
    write_mapping_record(&mut mappings, 0, 230, &[0x0065, 0x0301]);
    if with_fb01 {
        let fb01_offset = mappings.len();
        write_mapping_record(&mut mappings, 0, 0, &[0x0066, 0x0069]);
        trie.set(0xFB01, LIMIT_NO_NO + (fb01_offset / 2) as u16);
    }

    let trie_bytes = trie.build();

    assemble_blob(
        &trie_bytes,
        &compositions,
        &mappings,
        0x00C0,  // IX_MIN_DECOMP_NO_CP
        0x0300,  // IX_MIN_COMP_NO_MAYBE_CP
        MIN_YES_NO,
        MIN_NO_NO,
        LIMIT_NO_NO,
        MIN_MAYBE_YES,
    )
}

/// U+1E09 treated as an intermediate composite reachable from e+cedilla in
/// this fixture (the fixture does not model the real U+1E07 e-with-cedilla
/// precomposed character, to keep the trie small).
const E_CEDILLA_AS_COMPOSITE: u32 = 0x1E09;

static NFC_BLOB: Lazy<Vec<u8>> = Lazy::new(|| build_blob(false));
static NFKC_BLOB: Lazy<Vec<u8>> = Lazy::new(|| build_blob(true));

/// A synthetic canonical-only (NFC/NFD) data blob covering the code points
/// used throughout this crate's tests and doctests.
pub fn nfc_blob() -> &'static [u8] {
    &NFC_BLOB
}

/// A synthetic blob that additionally carries U+FB01's compatibility
/// decomposition, for NFKC/NFKC_CF tests.
pub fn nfkc_blob() -> &'static [u8] {
    &NFKC_BLOB
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataBlob;

    #[test]
    fn nfc_blob_parses_and_resolves_e_acute() {
        let blob = DataBlob::try_new(nfc_blob()).expect("fixture must validate");
        let trie = blob.trie();
        assert_eq!(trie.get(0x0061), 0);
        assert_eq!(trie.get(0x1100), 0);
        assert!(blob.props().is_hangul(trie.get(0xAC00)));
    }

    #[test]
    fn nfkc_blob_adds_fb01_mapping() {
        let blob = DataBlob::try_new(nfkc_blob()).expect("fixture must validate");
        let v = blob.trie().get(0xFB01);
        let rec = blob.props().get_mapping(v).unwrap();
        assert_eq!(rec.iter().collect::<Vec<_>>(), vec![0x0066, 0x0069]);
    }
}
