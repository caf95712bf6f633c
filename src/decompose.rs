// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! The decomposing half of the normalization core (spec.md §4.5): turns a
//! UTF-16 code unit sequence into NFD or NFKD by streaming already-inert runs
//! verbatim and expanding everything else into a [`ReorderingBuffer`].

use crate::buffer::{CodeUnitSink, ReorderingBuffer};
use crate::data::DataBlob;
use crate::error::NormalizerError;
use crate::hangul;
use crate::props::Props;
use crate::CodePoint;
use smallvec::SmallVec;

/// Runs the decomposition loop, appending into an already-initialized
/// `buffer`. Shared with [`crate::compose`], which runs this exact pass
/// before its own recombination scan (spec.md §4.6).
pub(crate) fn decompose_into<S: CodeUnitSink>(
    props: Props<'_>,
    input: &[u16],
    buffer: &mut ReorderingBuffer<'_, '_, S>,
) -> Result<(), NormalizerError> {
    let min_no_cp = props.min_decomp_no_cp();
    let mut pos = 0usize;
    loop {
        let run_start = pos;
        while pos < input.len() {
            let unit = input[pos];
            if crate::is_lead_surrogate(unit) {
                break;
            }
            let c = unit as CodePoint;
            if c < min_no_cp {
                pos += 1;
                continue;
            }
            let v = props.trie_get(c);
            if is_most_decomp_yes_and_zero_cc(&props, v) {
                pos += 1;
                continue;
            }
            break;
        }
        if pos > run_start {
            buffer.append_zero_cc(&input[run_start..pos])?;
        }
        if pos >= input.len() {
            return Ok(());
        }
        let (c, width) = crate::decode_utf16_at(input, pos);
        pos += width;
        let norm16 = props.trie_get(c);
        log::debug!("nrm2: U+{c:04X} falls off the decompose fast path (norm16={norm16:#06x})");
        decompose_code_point(props, c, norm16, buffer)?;
    }
}

#[inline]
fn is_most_decomp_yes_and_zero_cc(props: &Props<'_>, v: u16) -> bool {
    props.is_decomp_yes(v) && props.get_cc_from_yes_or_maybe(v) == 0
}

/// Expands one above-threshold code point into `buffer` (spec.md §4.5,
/// `decomposeCodePoint`). Loops only for chained algorithmic mappings.
fn decompose_code_point<S: CodeUnitSink>(
    props: Props<'_>,
    mut c: CodePoint,
    mut v: u16,
    buffer: &mut ReorderingBuffer<'_, '_, S>,
) -> Result<(), NormalizerError> {
    loop {
        if props.is_decomp_yes(v) {
            return buffer.append(c, props.get_cc_from_yes_or_maybe(v));
        } else if props.is_hangul(v) {
            let (l, vowel, t) = hangul::decompose_syllable(c);
            let mut units = [0u16; 3];
            units[0] = l as u16;
            units[1] = vowel as u16;
            let n = if let Some(t) = t {
                units[2] = t as u16;
                3
            } else {
                2
            };
            return buffer.append_zero_cc(&units[..n]);
        } else if props.is_decomp_no_algorithmic(v) {
            c = props.map_algorithmic(c, v);
            v = props.trie_get(c);
            continue;
        } else {
            let rec = props.get_mapping(v)?;
            let units: SmallVec<[u16; 4]> = rec.iter().collect();
            return buffer.append_string(&units, rec.lead_ccc, rec.trail_ccc);
        }
    }
}

/// Finds the boundary up to which `input`'s prefix must be merged into an
/// existing reordering span rather than copied verbatim, and the `norm16` of
/// `input`'s first code point (spec.md §4.5, `decomposeAndAppend`'s
/// `doDecompose == false` seam-merge path).
fn find_decompose_yes_zero_cc_cut(props: &Props<'_>, input: &[u16]) -> (usize, u16) {
    let (first_c, _) = crate::decode_utf16_at(input, 0);
    let first_v = props.trie_get(first_c);
    let mut pos = 0usize;
    let mut v = first_v;
    loop {
        if props.is_decomp_yes(v) && props.get_cc_from_yes_or_maybe(v) == 0 {
            return (pos, first_v);
        }
        let (_, width) = crate::decode_utf16_at(input, pos);
        pos += width;
        if pos >= input.len() {
            return (pos, first_v);
        }
        let (c, _) = crate::decode_utf16_at(input, pos);
        v = props.trie_get(c);
    }
}

/// Decomposes `input` into a fresh buffer, producing NFD or NFKD depending
/// on which `data` set is loaded (spec.md §6.2, `decompose`).
pub fn decompose(data: &DataBlob<'_>, input: &[u16]) -> Result<Vec<u16>, NormalizerError> {
    let mut out = Vec::new();
    {
        let mut buffer = ReorderingBuffer::new(data.props(), &mut out)?;
        decompose_into(data.props(), input, &mut buffer)?;
    }
    Ok(out)
}

/// Decomposes (or verbatim-appends) `input` onto the end of `dest`, merging
/// the seam correctly either way (spec.md §6.2, `decomposeAndAppend`).
pub fn decompose_and_append(
    data: &DataBlob<'_>,
    input: &[u16],
    dest: &mut Vec<u16>,
    do_decompose: bool,
) -> Result<(), NormalizerError> {
    let props = data.props();
    let mut buffer = ReorderingBuffer::new(props, dest)?;
    if do_decompose {
        return decompose_into(props, input, &mut buffer);
    }
    if input.is_empty() {
        return Ok(());
    }
    let (cut, first_v) = find_decompose_yes_zero_cc_cut(&props, input);
    let lead_cc = props.get_cc_from_yes_or_maybe(first_v);
    buffer.append_string(&input[..cut], lead_cc, 0)?;
    buffer.append_zero_cc(&input[cut..])
}

/// The NFD/NFKD half of the public surface: a data set bound once, reused
/// across any number of `normalize` calls (spec.md §5, "immutable after
/// loading"). Mirrors `icu_normalizer::DecomposingNormalizer` in shape, minus
/// the by-name data loading this crate leaves to its caller.
#[derive(Clone, Copy)]
pub struct DecomposingNormalizer<'a> {
    data: DataBlob<'a>,
}

impl<'a> DecomposingNormalizer<'a> {
    /// Binds a validated data set. Use an NFC-only data set for NFD, or a
    /// data set carrying compatibility mappings for NFKD (which decompositions
    /// are reachable is entirely a property of which blob this is
    /// constructed from; there is no separate runtime flag).
    pub fn new(data: DataBlob<'a>) -> Self {
        DecomposingNormalizer { data }
    }

    /// Returns the decomposed form of `input`.
    pub fn normalize(&self, input: &[u16]) -> Result<Vec<u16>, NormalizerError> {
        decompose(&self.data, input)
    }

    /// Appends the decomposed form of `input` onto `dest`, merging the seam.
    pub fn normalize_to(&self, input: &[u16], dest: &mut Vec<u16>) -> Result<(), NormalizerError> {
        decompose_and_append(&self.data, input, dest, true)
    }

    /// The length, in code units, of the longest prefix of `input` that is
    /// already in this normal form (spec.md §9 / SPEC_FULL.md §11,
    /// `spanQuickCheckYes`).
    pub fn is_normalized_up_to(&self, input: &[u16]) -> usize {
        let props = self.data.props();
        let mut pos = 0usize;
        let mut last_cc = 0u8;
        while pos < input.len() {
            let (c, width) = crate::decode_utf16_at(input, pos);
            let v = props.trie_get(c);
            if !props.is_decomp_yes(v) {
                return pos;
            }
            let cc = props.get_cc_from_yes_or_maybe(v);
            if cc != 0 && cc < last_cc {
                return pos;
            }
            last_cc = cc;
            pos += width;
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
    use crate::testdata::{nfc_blob, nfkc_blob};

    #[test]
    fn decomposes_precomposed_e_acute() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        assert_eq!(decompose(&data, &[0x00E9]).unwrap(), vec![0x0065, 0x0301]);
    }

    #[test]
    fn leaves_already_decomposed_input_alone() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        assert_eq!(
            decompose(&data, &[0x0065, 0x0301]).unwrap(),
            vec![0x0065, 0x0301]
        );
    }

    #[test]
    fn reorders_out_of_order_combining_marks() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        // cedilla (ccc 202) then acute (ccc 230), fed in the wrong order.
        assert_eq!(
            decompose(&data, &[0x0065, 0x0301, 0x0327]).unwrap(),
            vec![0x0065, 0x0327, 0x0301]
        );
    }

    #[test]
    fn decomposes_hangul_syllable_with_trailing_consonant() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        assert_eq!(
            decompose(&data, &[0xAC01]).unwrap(),
            vec![0x1100, 0x1161, 0x11A8]
        );
    }

    #[test]
    fn decomposes_fb01_ligature_under_nfkd_data() {
        let data = DataBlob::try_new(nfkc_blob()).unwrap();
        assert_eq!(decompose(&data, &[0xFB01]).unwrap(), vec![0x0066, 0x0069]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        assert_eq!(decompose(&data, &[]).unwrap(), Vec::<u16>::new());
    }

    #[test]
    fn decompose_and_append_merges_seam_without_decomposing_input() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        let mut dest = vec![0x0065, 0x0327]; // e + cedilla, already in dest
        decompose_and_append(&data, &[0x0301], &mut dest, false).unwrap();
        assert_eq!(dest, vec![0x0065, 0x0327, 0x0301]);
    }

    #[test]
    fn normalizer_reports_quick_check_span() {
        let data = DataBlob::try_new(nfc_blob()).unwrap();
        let norm = DecomposingNormalizer::new(data);
        assert!(norm.is_normalized(&[0x0065, 0x0327, 0x0301]));
        assert!(!norm.is_normalized(&[0x00E9]));
        assert_eq!(norm.is_normalized_up_to(&[0x0065, 0x00E9]), 1);
    }
}
