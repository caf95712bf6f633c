// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! The composing half of the normalization core (spec.md §4.6): decomposes
//! first, exactly like [`crate::decompose`], then scans the result for
//! adjacent (starter, combining mark) pairs to recombine into primary
//! composites.
//!
//! spec.md §9 notes that the composition path in `original_source/` is an
//! explicitly-flagged unfinished copy of the decomposition path; the
//! recombination scan below is this crate's own, following spec.md §4.6
//! rather than that truncated source.

use crate::buffer::{CodeUnitSink, ReorderingBuffer};
use crate::data::DataBlob;
use crate::decompose::decompose_into;
use crate::error::NormalizerError;
use crate::props::Props;
use crate::trie::{BackwardTrieIter, ForwardTrieIter};
use crate::CodePoint;
use smallvec::SmallVec;

/// One pending, not-yet-combined mark carried since the current span's
/// starter (spec.md §4.6, the "blocked" predicate needs only the most
/// recent pending mark's CCC, since the span is already canonically
/// ordered by the time recombination runs).
struct PendingMark {
    c: CodePoint,
    cc: u8,
}

/// Recombines an already-decomposed (NFD/NFKD) code point sequence into its
/// composed form, appending into `buffer` (spec.md §4.6, steps 1-3).
fn recompose<S: CodeUnitSink>(
    props: Props<'_>,
    decomposed: &[u16],
    buffer: &mut ReorderingBuffer<'_, '_, S>,
) -> Result<(), NormalizerError> {
    let mut pos = 0usize;
    if pos >= decomposed.len() {
        return Ok(());
    }
    let (first, width) = crate::decode_utf16_at(decomposed, 0);
    pos = width;
    let mut starter = first;
    // `decomposed` is not guaranteed to begin with a true CCC-0 starter
    // (spec.md §8, Boundary behaviors: a lone leading combining mark must
    // pass through unchanged); this tracks the first element's actual CCC
    // so `flush` doesn't mislabel it as a starter when it is only acting
    // as one for bookkeeping purposes.
    let mut starter_cc = {
        let v = props.trie_get(first);
        props.get_cc_from_yes_or_maybe(v)
    };
    let mut pending: SmallVec<[PendingMark; 4]> = SmallVec::new();

    while pos < decomposed.len() {
        let (c, width) = crate::decode_utf16_at(decomposed, pos);
        pos += width;
        let v = props.trie_get(c);
        let cc = props.get_cc_from_yes_or_maybe(v);

        // A pending mark with CCC >= `cc` stands between `starter` and `c`
        // and blocks combination (spec.md §4.6, step 3); for a CCC-0 `c`
        // (Hangul's L+V / LV+T, the only case where two zero-CCC code
        // points combine) any pending mark at all blocks it, which this
        // same check already expresses since every `u8` CCC is `>= 0`.
        let blocked = pending.last().is_some_and(|m| m.cc >= cc);
        if !blocked && starter_cc == 0 {
            if let Some(composite) = props.compose(starter, c) {
                log::debug!(
                    "nrm2: composer falls off the fast path, recombining U+{starter:04X} + U+{c:04X} -> U+{composite:04X}"
                );
                starter = composite;
                continue;
            }
        }

        if cc == 0 {
            flush(starter, starter_cc, &pending, buffer)?;
            pending.clear();
            starter = c;
            starter_cc = 0;
        } else {
            pending.push(PendingMark { c, cc });
        }
    }
    flush(starter, starter_cc, &pending, buffer)
}

fn flush<S: CodeUnitSink>(
    starter: CodePoint,
    starter_cc: u8,
    pending: &[PendingMark],
    buffer: &mut ReorderingBuffer<'_, '_, S>,
) -> Result<(), NormalizerError> {
    buffer.append(starter, starter_cc)?;
    for mark in pending {
        buffer.append(mark.c, mark.cc)?;
    }
    Ok(())
}

/// Whether `c` (with `norm16` value `v`) begins a new composition span
/// (spec.md §4.6, `isCompStarter`).
fn is_comp_starter(props: Props<'_>, c: CodePoint, v: u16) -> Result<bool, NormalizerError> {
    if props.is_comp_yes_and_zero_cc(v) {
        return Ok(true);
    }
    if props.is_maybe_or_non_zero_cc(v) {
        return Ok(false);
    }
    if props.is_hangul(v) {
        // Every Hangul syllable (LV or LVT) is a composition starter: an LV
        // syllable may still combine with a following T jamo into LVT
        // (spec.md §4.6, Hangul handled inline alongside the table-driven
        // case, same as `Props::compose`/`hangul::compose_pair`).
        return Ok(true);
    }
    if props.is_decomp_no_algorithmic(v) {
        let mapped = props.map_algorithmic(c, v);
        return is_comp_starter(props, mapped, props.trie_get(mapped));
    }
    let rec = props.get_mapping(v)?;
    if rec.lead_ccc != 0 || rec.is_empty() {
        return Ok(false);
    }
    let first = rec.unit(0);
    // Mapping records hold NFD code units; a lead surrogate here is always
    // paired (a mapping never ends mid-surrogate), so a plain BMP-style
    // decode of the first unit already yields the first mapped code point
    // or, for a surrogate pair, the raw lead unit re-decoded below.
    let (first_c, _) = crate::decode_utf16_at(&[first], 0);
    is_comp_starter(props, first_c, props.trie_get(first_c))
}

/// Walks `buf` backward from `limit` to the start of its last composition
/// span (spec.md §4.6, `findPreviousCompStarter`).
fn find_previous_comp_starter(
    props: Props<'_>,
    buf: &[u16],
    limit: usize,
) -> Result<usize, NormalizerError> {
    let trie = props.trie();
    let mut iter = BackwardTrieIter::new(trie, buf, limit);
    loop {
        let (c, v) = iter.previous().expect("buf must contain at least one starter");
        if is_comp_starter(props, c, v)? {
            return Ok(iter.pos());
        }
    }
}

/// Walks `buf` forward from `start` to the start of its first composition
/// span (spec.md §4.6, `findNextCompStarter`).
fn find_next_comp_starter(
    props: Props<'_>,
    buf: &[u16],
    start: usize,
) -> Result<usize, NormalizerError> {
    let trie = props.trie();
    let mut iter = ForwardTrieIter::new(trie, buf, start);
    loop {
        let pos_before = iter.pos();
        match iter.next() {
            None => return Ok(buf.len()),
            Some((c, v)) => {
                if is_comp_starter(props, c, v)? {
                    return Ok(pos_before);
                }
            }
        }
    }
}

/// Composes `input` into a fresh buffer, producing NFC or NFKC depending on
/// which `data` set is loaded (spec.md §6.2, `compose`).
pub fn compose(data: &DataBlob<'_>, input: &[u16]) -> Result<Vec<u16>, NormalizerError> {
    let props = data.props();
    let decomposed = {
        let mut scratch = Vec::new();
        let mut buffer = ReorderingBuffer::new(props, &mut scratch)?;
        decompose_into(props, input, &mut buffer)?;
        scratch
    };
    let mut out = Vec::new();
    {
        let mut buffer = ReorderingBuffer::new(props, &mut out)?;
        recompose(props, &decomposed, &mut buffer)?;
    }
    Ok(out)
}

/// Composes (or verbatim-appends) `input` onto the end of `dest`, stitching
/// the seam between existing content and newly appended input so the result
/// equals normalizing the whole concatenation (spec.md §4.6,
/// `composeAndAppend`; §8 algebraic law 4).
pub fn compose_and_append(
    data: &DataBlob<'_>,
    input: &[u16],
    dest: &mut Vec<u16>,
    do_compose: bool,
) -> Result<(), NormalizerError> {
    let props = data.props();

    let mut input = input;
    if do_compose && !dest.is_empty() {
        let first_starter_in_src = find_next_comp_starter(props, input, 0)?;
        if first_starter_in_src != 0 {
            let last_starter_in_dest = find_previous_comp_starter(props, dest, dest.len())?;

            let mut middle: Vec<u16> = dest[last_starter_in_dest..].to_vec();
            dest.truncate(last_starter_in_dest);
            middle.extend_from_slice(&input[..first_starter_in_src]);

            let composed_middle = compose(data, &middle)?;
            dest.extend_from_slice(&composed_middle);

            input = &input[first_starter_in_src..];
        }
    }

    let mut buffer = ReorderingBuffer::new(props, dest)?;
    if do_compose {
        let decomposed = {
            let mut scratch = Vec::new();
            let mut scratch_buf = ReorderingBuffer::new(props, &mut scratch)?;
            decompose_into(props, input, &mut scratch_buf)?;
            scratch
        };
        recompose(props, &decomposed, &mut buffer)
    } else {
        append_verbatim_preserving_order(props, input, &mut buffer)
    }
}

/// Appends `input` without composing, but still reading each code point's
/// real CCC so it interleaves correctly with whatever combining sequence is
/// already at the end of `buffer` (spec.md §4.6 `composeAndAppend`, the
/// `doCompose == false` branch — the mirror of `decompose_and_append`'s own
/// verbatim path, since neither may invoke `Props::compose`).
fn append_verbatim_preserving_order<S: CodeUnitSink>(
    props: Props<'_>,
    input: &[u16],
    buffer: &mut ReorderingBuffer<'_, '_, S>,
) -> Result<(), NormalizerError> {
    let mut pos = 0;
    while pos < input.len() {
        let (c, width) = crate::decode_utf16_at(input, pos);
        pos += width;
        let v = props.trie_get(c);
        let cc = props.get_cc_from_yes_or_maybe(v);
        buffer.append(c, cc)?;
    }
    Ok(())
}

/// The NFC/NFKC/NFKC_CF half of the public surface: a data set bound once,
/// reused across any number of `normalize` calls. Mirrors
/// `icu_normalizer::ComposingNormalizer` in shape.
#[derive(Clone, Copy)]
pub struct ComposingNormalizer<'a> {
    data: DataBlob<'a>,
}

impl<'a> ComposingNormalizer<'a> {
    /// Binds a validated data set: an NFC-only set for NFC, a set carrying
    /// compatibility mappings for NFKC, or a set whose mappings additionally
    /// bake in Unicode case folding for NFKC_CF. Which of the three a given
    /// blob produces is entirely a property of the blob it was built from,
    /// the way [`crate::singleton::nfc`]/[`crate::singleton::nfkc`]/
    /// [`crate::singleton::nfkc_cf`] each bind a different bundled data set
    /// rather than passing a runtime flag.
    pub fn new(data: DataBlob<'a>) -> Self {
        ComposingNormalizer { data }
    }

    /// Returns the composed form of `input`.
    pub fn normalize(&self, input: &[u16]) -> Result<Vec<u16>, NormalizerError> {
        compose(&self.data, input)
    }

    /// Appends the composed form of `input` onto `dest`, merging the seam.
    pub fn normalize_to(&self, input: &[u16], dest: &mut Vec<u16>) -> Result<(), NormalizerError> {
        compose_and_append(&self.data, input, dest, true)
    }

    /// The length, in code units, of the longest prefix of `input` that is
    /// already in this normal form (SPEC_FULL.md §11, `spanQuickCheckYes`).
    /// A code point that is "maybe" (could combine with what follows) ends
    /// the normalized span conservatively, since confirming it requires
    /// looking ahead.
    pub fn is_normalized_up_to(&self, input: &[u16]) -> usize {
        let props = self.data.props();
        let mut pos = 0usize;
        let mut last_cc = 0u8;
        while pos < input.len() {
            let (c, width) = crate::decode_utf16_at(input, pos);
            let v = props.trie_get(c);
            if props.is_comp_yes_and_zero_cc(v) {
                last_cc = 0;
                pos += width;
                continue;
            }
            if props.is_maybe_or_non_zero_cc(v) {
                let cc = props.get_cc_from_yes_or_maybe(v);
                if props.is_maybe(v) {
                    // A maybe-yes code point still combines forward with
                    // whatever follows; resolving that needs lookahead this
                    // scan doesn't do, so stop short rather than risk a
                    // false "normalized" (DESIGN.md).
                    return pos;
                }
                if cc != 0 && cc < last_cc {
                    return pos;
                }
                last_cc = cc;
                pos += width;
                continue;
            }
            return pos;
        }
        pos
    }

    /// Whether `input` is already in this normal form in its entirety.
    pub fn is_normalized(&self, input: &[u16]) -> bool {
        self.is_normalized_up_to(input) == input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::nfc_blob;

    #[test]
    fn composes_split_combining_marks_into_precomposed() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        assert_eq!(compose(&data, &[0x0065, 0x0301]).unwrap(), vec![0x00E9]);
    }

    #[test]
    fn composes_out_of_order_marks_into_double_diacritic() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        // e + acute + cedilla (wrong order) must reorder then compose fully
        // through the e-cedilla intermediate into U+1E09.
        assert_eq!(
            compose(&data, &[0x0065, 0x0301, 0x0327]).unwrap(),
            vec![0x1E09]
        );
        assert_eq!(
            compose(&data, &[0x0065, 0x0327, 0x0301]).unwrap(),
            vec![0x1E09]
        );
    }

    #[test]
    fn composes_hangul_jamo_into_syllable() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        assert_eq!(compose(&data, &[0x1100, 0x1161]).unwrap(), vec![0xAC00]);
        assert_eq!(
            compose(&data, &[0x1100, 0x1161, 0x11A8]).unwrap(),
            vec![0xAC01]
        );
    }

    #[test]
    fn already_precomposed_input_is_idempotent() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        assert_eq!(compose(&data, &[0x00E9]).unwrap(), vec![0x00E9]);
    }

    #[test]
    fn compose_and_append_merges_split_composition_at_seam() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        let mut dest = vec![0x0065]; // dest ends with the starter 'e'
        compose_and_append(&data, &[0x0301], &mut dest, true).unwrap();
        assert_eq!(dest, vec![0x00E9]);
    }

    #[test]
    fn compose_and_append_without_composing_is_verbatim() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        let mut dest = vec![0x0065];
        compose_and_append(&data, &[0x0301], &mut dest, false).unwrap();
        assert_eq!(dest, vec![0x0065, 0x0301]);
    }

    #[test]
    fn compose_and_append_merges_trailing_jamo_onto_hangul_syllable_seam() {
        // dest ends with the LV syllable GA (U+AC00); appending the T jamo
        // U+11A8 across the seam must walk back into dest, find that
        // syllable as a composition starter, and fold it into GAG (U+AC01)
        // rather than looping forever trying to resolve its norm16.
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        let mut dest = vec![0xAC00];
        compose_and_append(&data, &[0x11A8], &mut dest, true).unwrap();
        assert_eq!(dest, vec![0xAC01]);
    }

    #[test]
    fn lone_leading_combining_mark_passes_through_unchanged() {
        // No preceding starter exists anywhere in the input, so the
        // combining acute must come out exactly as it went in rather than
        // being folded into a bogus zero-CCC "starter".
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        assert_eq!(compose(&data, &[0x0301]).unwrap(), vec![0x0301]);
    }

    #[test]
    fn lone_leading_marks_stay_in_canonical_order() {
        // Two stray combining marks with no starter: already sorted by CCC
        // coming out of decomposition (cedilla 202 before acute 230), and
        // recompose must not reorder or merge them absent a real starter.
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        assert_eq!(
            compose(&data, &[0x0301, 0x0327]).unwrap(),
            vec![0x0327, 0x0301]
        );
    }

    #[test]
    fn compose_and_append_without_composing_still_reorders_by_ccc() {
        // Appending verbatim must not mean "blindly copy": an out-of-order
        // mark appended across the seam still has to land ahead of a
        // higher-CCC mark already at the end of `dest`, the same as a
        // composing append would, just without ever calling `Props::compose`.
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        let mut dest = vec![0x0065, 0x0301]; // e + acute (ccc 230)
        compose_and_append(&data, &[0x0327], &mut dest, false).unwrap(); // cedilla (ccc 202)
        assert_eq!(dest, vec![0x0065, 0x0327, 0x0301]);
    }
}
