// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! Parses the precompiled binary data blob described in spec.md §6.1: a
//! fixed header, an indexes array of norm16 thresholds and section offsets,
//! a serialized [`crate::trie::Trie`], and an extra-data region holding the
//! composition table immediately followed by decomposition mapping records.
//!
//! Loading the bytes from disk or a memory map is out of scope for this
//! crate (spec.md §1); callers hand us a byte slice they already own or
//! have mapped.

use crate::error::NormalizerError;
use crate::props::Props;
use crate::trie::Trie;
use byteorder::{ByteOrder, LittleEndian};

/// `b"Nrm2"`, the data format tag (spec.md §6.1).
pub const DATA_FORMAT: [u8; 4] = *b"Nrm2";
/// The only format-version major byte this build understands.
pub const FORMAT_VERSION_MAJOR: u8 = 1;

/// Byte size of the fixed portion of the header, before the indexes array.
const FIXED_HEADER_SIZE: usize = 16;

// Named positions within the indexes array (spec.md §6.1).
const IX_NORM_TRIE_OFFSET: usize = 0;
const IX_EXTRA_DATA_OFFSET: usize = 1;
const IX_MIN_DECOMP_NO_CP: usize = 2;
const IX_MIN_COMP_NO_MAYBE_CP: usize = 3;
const IX_MIN_YES_NO: usize = 4;
const IX_MIN_NO_NO: usize = 5;
const IX_LIMIT_NO_NO: usize = 6;
const IX_MIN_MAYBE_YES: usize = 7;
const IX_COMPOSITIONS_LENGTH: usize = 8;
/// Number of indexes this build reads; anything beyond this in the data is
/// ignored, anything missing up to this is zero-filled (spec.md §4.1).
const IX_COUNT: usize = 9;

/// A fixed anchor used only to compute [`DataBlob::maybe_yes_compositions_base`];
/// see spec.md §4.1. Independent of any particular data set's
/// `indexes[IX_MIN_MAYBE_YES]`.
const MIN_NORMAL_MAYBE_YES: u16 = 0x0300;

/// A validated view over a normalization data blob.
///
/// `DataBlob` owns nothing beyond the borrowed byte slice; [`Trie`] and
/// [`Props`] borrow from it in turn (spec.md §3, Ownership). Cheap to copy:
/// every field is either a shared slice reference or a plain integer.
#[derive(Clone, Copy)]
pub struct DataBlob<'a> {
    bytes: &'a [u8],
    indexes: [u32; IX_COUNT],
    payload_base: usize,
    /// Absolute byte offset of the start of the compositions table.
    compositions_base: usize,
    /// Absolute byte offset of the start of decomposition mapping records.
    mapping_base: usize,
    /// Signed byte delta such that for a maybe-yes norm16 `v`, the
    /// composition list starts at `maybe_yes_compositions_base + 2*v as i64`
    /// (spec.md §4.1).
    maybe_yes_compositions_base: i64,
}

impl<'a> DataBlob<'a> {
    /// Validates and wraps `bytes` (spec.md §4.1).
    pub fn try_new(bytes: &'a [u8]) -> Result<Self, NormalizerError> {
        if bytes.len() < FIXED_HEADER_SIZE {
            log::trace!("nrm2: data blob shorter than the fixed header");
            return Err(NormalizerError::InvalidFormat);
        }
        if bytes[0..4] != DATA_FORMAT {
            log::trace!("nrm2: data format tag mismatch");
            return Err(NormalizerError::InvalidFormat);
        }
        if bytes[4] != FORMAT_VERSION_MAJOR {
            log::trace!("nrm2: unsupported format version {}", bytes[4]);
            return Err(NormalizerError::InvalidFormat);
        }
        if bytes[8] != 0 {
            // is_big_endian: this build only supports little-endian data.
            return Err(NormalizerError::InvalidFormat);
        }
        if bytes[9] != 0 {
            // charset_family: this build only supports ASCII-compatible data.
            return Err(NormalizerError::InvalidFormat);
        }

        let indexes_length = LittleEndian::read_u32(&bytes[12..16]) as usize;
        if indexes_length <= IX_MIN_MAYBE_YES {
            log::trace!("nrm2: indexes array too short ({indexes_length} entries)");
            return Err(NormalizerError::InvalidFormat);
        }
        let indexes_bytes_len = indexes_length * 4;
        if bytes.len() < FIXED_HEADER_SIZE + indexes_bytes_len {
            return Err(NormalizerError::InvalidFormat);
        }

        let mut indexes = [0u32; IX_COUNT];
        let copy_count = indexes_length.min(IX_COUNT);
        for (i, slot) in indexes.iter_mut().take(copy_count).enumerate() {
            let at = FIXED_HEADER_SIZE + i * 4;
            *slot = LittleEndian::read_u32(&bytes[at..at + 4]);
        }
        // Indexes beyond `copy_count` (if any are present in the file but
        // this build doesn't read them) and beyond `indexes_length` (if the
        // file simply didn't provide them) are both already zero from the
        // array initializer.

        let payload_base = FIXED_HEADER_SIZE + indexes_bytes_len;
        let trie_offset = indexes[IX_NORM_TRIE_OFFSET] as usize;
        let extra_data_offset = indexes[IX_EXTRA_DATA_OFFSET] as usize;
        let compositions_length = indexes[IX_COMPOSITIONS_LENGTH] as usize;

        let trie_base = payload_base
            .checked_add(trie_offset)
            .ok_or(NormalizerError::InvalidFormat)?;
        if trie_base > bytes.len() {
            return Err(NormalizerError::InvalidFormat);
        }
        let compositions_base = payload_base
            .checked_add(extra_data_offset)
            .ok_or(NormalizerError::InvalidFormat)?;
        let mapping_base = compositions_base
            .checked_add(compositions_length)
            .ok_or(NormalizerError::InvalidFormat)?;
        if mapping_base > bytes.len() {
            return Err(NormalizerError::InvalidFormat);
        }

        let min_maybe_yes = indexes[IX_MIN_MAYBE_YES] as u16;
        let maybe_yes_compositions_base = compositions_base as i64
            + 2 * (MIN_NORMAL_MAYBE_YES as i64 - min_maybe_yes as i64);

        Ok(DataBlob {
            bytes,
            indexes,
            payload_base,
            compositions_base,
            mapping_base,
            maybe_yes_compositions_base,
        })
    }

    #[inline(always)]
    pub(crate) fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline(always)]
    pub(crate) fn trie_bytes(&self) -> &'a [u8] {
        &self.bytes[self.payload_base + self.indexes[IX_NORM_TRIE_OFFSET] as usize..]
    }

    #[inline(always)]
    pub(crate) fn compositions_base(&self) -> usize {
        self.compositions_base
    }

    #[inline(always)]
    pub(crate) fn mapping_base(&self) -> usize {
        self.mapping_base
    }

    #[inline(always)]
    pub(crate) fn maybe_yes_compositions_base(&self) -> i64 {
        self.maybe_yes_compositions_base
    }

    #[inline(always)]
    pub(crate) fn min_yes_no(&self) -> u16 {
        self.indexes[IX_MIN_YES_NO] as u16
    }

    #[inline(always)]
    pub(crate) fn min_no_no(&self) -> u16 {
        self.indexes[IX_MIN_NO_NO] as u16
    }

    #[inline(always)]
    pub(crate) fn limit_no_no(&self) -> u16 {
        self.indexes[IX_LIMIT_NO_NO] as u16
    }

    #[inline(always)]
    pub(crate) fn min_maybe_yes(&self) -> u16 {
        self.indexes[IX_MIN_MAYBE_YES] as u16
    }

    /// Code points below this never decompose; the decomposer's fast path
    /// can skip straight to the next code point without a trie lookup at
    /// all for them if it already knows the run is ASCII, but in general it
    /// still needs `norm16` to know the CCC, so this is primarily useful as
    /// a documented contract rather than a literal skip (spec.md §4.3).
    #[inline(always)]
    pub fn min_decomp_no_cp(&self) -> u32 {
        self.indexes[IX_MIN_DECOMP_NO_CP]
    }

    #[inline(always)]
    pub fn min_comp_no_maybe_cp(&self) -> u32 {
        self.indexes[IX_MIN_COMP_NO_MAYBE_CP]
    }

    /// Returns the serialized trie over this blob.
    pub fn trie(&self) -> Trie<'a> {
        Trie::new(self.trie_bytes())
    }

    /// Returns the `norm16` property decoder over this blob.
    pub fn props(&self) -> Props<'a> {
        Props::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::nfc_blob;

    #[test]
    fn rejects_short_buffer() {
        assert_eq!(
            DataBlob::try_new(&[0u8; 4]),
            Err(NormalizerError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = nfc_blob().to_vec();
        bytes[0] = b'X';
        assert_eq!(
            DataBlob::try_new(&bytes),
            Err(NormalizerError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_truncated_indexes() {
        // indexes_length = 3, which is <= IX_MIN_MAYBE_YES (7).
        let mut bytes = vec![0u8; FIXED_HEADER_SIZE + 12];
        bytes[0..4].copy_from_slice(&DATA_FORMAT);
        bytes[4] = FORMAT_VERSION_MAJOR;
        LittleEndian::write_u32(&mut bytes[12..16], 3);
        assert_eq!(
            DataBlob::try_new(&bytes),
            Err(NormalizerError::InvalidFormat)
        );
    }

    #[test]
    fn accepts_well_formed_blob() {
        assert!(DataBlob::try_new(nfc_blob()).is_ok());
    }
}
