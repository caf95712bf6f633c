// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! The canonical reordering buffer (spec.md §4.4): an append-only output
//! buffer that keeps combining marks sorted by canonical combining class
//! within each combining sequence, while still supporting out-of-order
//! insertion.
//!
//! The buffer borrows the caller's growable storage through [`CodeUnitSink`]
//! rather than owning a string type itself — string representation and
//! growable storage are out of scope for this crate (spec.md §1).

use crate::error::NormalizerError;
use crate::props::Props;
use crate::CodePoint;

/// The contract a caller's output storage must satisfy: a raw code-unit
/// array with a resize hook and a length accessor (spec.md §1).
pub trait CodeUnitSink {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn code_unit(&self, i: usize) -> u16;
    /// Appends `units` at the end, growing storage first if needed.
    fn push_units(&mut self, units: &[u16]) -> Result<(), NormalizerError>;
    /// Inserts `units` starting at code-unit index `at`, shifting everything
    /// from `at` onward forward.
    fn insert_units(&mut self, at: usize, units: &[u16]) -> Result<(), NormalizerError>;
    /// Shrinks the sink to `new_len` code units.
    fn truncate(&mut self, new_len: usize);
    /// Grows backing storage to at least `max(len()+extra, 2*capacity, 1024)`
    /// (spec.md §4.4, `resize`).
    fn reserve(&mut self, extra: usize) -> Result<(), NormalizerError>;
}

impl CodeUnitSink for Vec<u16> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn code_unit(&self, i: usize) -> u16 {
        self[i]
    }

    fn push_units(&mut self, units: &[u16]) -> Result<(), NormalizerError> {
        self.reserve(units.len())?;
        self.extend_from_slice(units);
        Ok(())
    }

    fn insert_units(&mut self, at: usize, units: &[u16]) -> Result<(), NormalizerError> {
        self.reserve(units.len())?;
        self.splice(at..at, units.iter().copied());
        Ok(())
    }

    fn truncate(&mut self, new_len: usize) {
        Vec::truncate(self, new_len);
    }

    fn reserve(&mut self, extra: usize) -> Result<(), NormalizerError> {
        let target_len = self.len() + extra;
        let target_cap = target_len.max(2 * self.capacity()).max(1024);
        let additional = target_cap.saturating_sub(self.len());
        self.try_reserve(additional)
            .map_err(|_| NormalizerError::OutOfMemory)
    }
}

/// The canonical reordering buffer. Borrows `props` to look up CCC values
/// for code points it did not just append itself (spec.md §4.4,
/// `appendString`'s interior-CCC re-reads) and borrows the caller's `sink`
/// for storage.
pub struct ReorderingBuffer<'p, 's, S: CodeUnitSink> {
    props: Props<'p>,
    sink: &'s mut S,
    start: usize,
    limit: usize,
    reorder_start: usize,
    last_cc: u8,
}

impl<'p, 's, S: CodeUnitSink> ReorderingBuffer<'p, 's, S> {
    /// Acquires `sink` as backing storage, scanning any existing tail to
    /// establish `last_cc` and `reorder_start` (spec.md §4.4, `init`).
    pub fn new(props: Props<'p>, sink: &'s mut S) -> Result<Self, NormalizerError> {
        sink.reserve(16)?;
        let start = sink.len();
        let mut buf = ReorderingBuffer {
            props,
            sink,
            start,
            limit: start,
            reorder_start: start,
            last_cc: 0,
        };
        if start > 0 {
            buf.rescan_tail();
        }
        Ok(buf)
    }

    fn rescan_tail(&mut self) {
        if let Some(cc) = self.previous_cc_from(self.limit) {
            self.last_cc = cc;
        }
        let mut pos = self.limit;
        self.reorder_start = 0;
        while pos > 0 {
            match self.previous_cc_from(pos) {
                Some(cc) if cc <= 1 => {
                    self.reorder_start = pos;
                    return;
                }
                Some(_) => {
                    pos = self.step_back(pos);
                }
                None => {
                    self.reorder_start = 0;
                    return;
                }
            }
        }
    }

    /// Decodes the code point immediately before `pos` and returns its CCC,
    /// or `None` at the start of the buffer (spec.md §4.4, `previousCC`).
    fn previous_cc_from(&self, pos: usize) -> Option<u8> {
        if pos == 0 {
            return None;
        }
        let (c, _) = self.decode_before(pos);
        let v = self.props.trie_get(c);
        Some(self.props.get_cc_from_yes_or_maybe(v))
    }

    fn step_back(&self, pos: usize) -> usize {
        let (_, width) = self.decode_before(pos);
        pos - width
    }

    fn decode_before(&self, pos: usize) -> (CodePoint, usize) {
        let unit = self.sink.code_unit(pos - 1);
        if crate::is_trail_surrogate(unit) && pos >= 2 {
            let lead = self.sink.code_unit(pos - 2);
            if crate::is_lead_surrogate(lead) {
                let c = 0x10000 + ((lead as u32 - 0xD800) << 10) + (unit as u32 - 0xDC00);
                return (c, 2);
            }
        }
        (unit as u32, 1)
    }

    /// Appends `c`, placing it in canonical order (spec.md §4.4, `append`).
    pub fn append(&mut self, c: CodePoint, cc: u8) -> Result<(), NormalizerError> {
        if cc == 0 || cc >= self.last_cc {
            let mut units = [0u16; 2];
            let len = encode(&mut units, c);
            self.sink.push_units(&units[..len])?;
            self.limit += len;
            self.last_cc = cc;
            if cc <= 1 {
                self.reorder_start = self.limit;
            }
            Ok(())
        } else {
            self.insert(c, cc)
        }
    }

    /// Copies `units` verbatim and resets CCC tracking to zero (spec.md
    /// §4.4, `appendZeroCC`).
    pub fn append_zero_cc(&mut self, units: &[u16]) -> Result<(), NormalizerError> {
        self.sink.push_units(units)?;
        self.limit += units.len();
        self.last_cc = 0;
        self.reorder_start = self.limit;
        Ok(())
    }

    /// Bulk-appends a substring whose first code point has CCC `lead_cc`
    /// and last has CCC `trail_cc` (spec.md §4.4, `appendString`).
    pub fn append_string(
        &mut self,
        units: &[u16],
        lead_cc: u8,
        trail_cc: u8,
    ) -> Result<(), NormalizerError> {
        if units.is_empty() {
            return Ok(());
        }
        if self.last_cc <= lead_cc || lead_cc == 0 {
            let before = self.limit;
            self.sink.push_units(units)?;
            self.limit += units.len();
            self.last_cc = trail_cc;
            if trail_cc <= 1 {
                self.reorder_start = self.limit;
            } else if lead_cc <= 1 {
                // Not necessarily a code-point boundary, but a valid lower
                // bound (spec.md §4.4).
                self.reorder_start = before + 1;
            }
            Ok(())
        } else {
            let (first, width) = crate::decode_utf16_at(units, 0);
            self.insert(first, lead_cc)?;
            let mut pos = width;
            while pos < units.len() {
                let (c, w) = crate::decode_utf16_at(units, pos);
                let v = self.props.trie_get(c);
                let cc = self.props.get_cc_from_yes_or_maybe(v);
                self.append(c, cc)?;
                pos += w;
            }
            Ok(())
        }
    }

    /// Inserts `c` out of order: precondition `0 < cc < last_cc` (spec.md
    /// §4.4, `insert`).
    fn insert(&mut self, c: CodePoint, cc: u8) -> Result<(), NormalizerError> {
        debug_assert!(cc > 0 && cc < self.last_cc);
        let mut pos = self.limit;
        while pos > self.reorder_start {
            let (prev_c, width) = self.decode_before(pos);
            let v = self.props.trie_get(prev_c);
            let prev_cc = self.props.get_cc_from_yes_or_maybe(v);
            if prev_cc <= cc {
                break;
            }
            pos -= width;
        }
        let mut units = [0u16; 2];
        let len = encode(&mut units, c);
        self.sink.insert_units(pos, &units[..len])?;
        self.limit += len;
        if cc <= 1 {
            self.reorder_start = pos + len;
        }
        Ok(())
    }

    /// Shrinks the buffer by up to `n` code units, all of which the caller
    /// guarantees are part of a zero-CCC suffix, and resets `reorder_start`
    /// to the new end (spec.md §4.4, `removeZeroCCSuffix`).
    pub fn remove_zero_cc_suffix(&mut self, n: usize) {
        let new_limit = self.limit.saturating_sub(n).max(self.start);
        self.sink.truncate(new_limit);
        self.limit = new_limit;
        self.reorder_start = new_limit;
    }

    /// The code units appended so far, relative to where this buffer began.
    pub fn len(&self) -> usize {
        self.limit - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current CCC of the last appended code point, or 0 if empty.
    pub fn last_cc(&self) -> u8 {
        self.last_cc
    }
}

#[inline]
fn encode(units: &mut [u16; 2], c: CodePoint) -> usize {
    if c <= 0xFFFF {
        units[0] = c as u16;
        1
    } else {
        let v = c - 0x10000;
        units[0] = 0xD800 + (v >> 10) as u16;
        units[1] = 0xDC00 + (v & 0x3FF) as u16;
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataBlob;
    use crate::testdata::nfc_blob;

    #[test]
    fn append_in_order_is_verbatim() {
        let blob = DataBlob::try_new(nfc_blob()).unwrap();
        let mut out: Vec<u16> = Vec::new();
        {
            let mut buf = ReorderingBuffer::new(blob.props(), &mut out).unwrap();
            buf.append(0x0065, 0).unwrap();
            buf.append(0x0327, 202).unwrap();
            buf.append(0x0301, 230).unwrap();
        }
        assert_eq!(out, vec![0x0065, 0x0327, 0x0301]);
    }

    #[test]
    fn append_out_of_order_reorders_by_ccc() {
        let blob = DataBlob::try_new(nfc_blob()).unwrap();
        let mut out: Vec<u16> = Vec::new();
        {
            let mut buf = ReorderingBuffer::new(blob.props(), &mut out).unwrap();
            buf.append(0x0065, 0).unwrap();
            buf.append(0x0301, 230).unwrap();
            buf.append(0x0327, 202).unwrap();
        }
        assert_eq!(out, vec![0x0065, 0x0327, 0x0301]);
    }

    #[test]
    fn remove_zero_cc_suffix_truncates() {
        let blob = DataBlob::try_new(nfc_blob()).unwrap();
        let mut out: Vec<u16> = Vec::new();
        {
            let mut buf = ReorderingBuffer::new(blob.props(), &mut out).unwrap();
            buf.append_zero_cc(&[0x0041, 0x0042]).unwrap();
            buf.remove_zero_cc_suffix(1);
        }
        assert_eq!(out, vec![0x0041]);
    }
}
