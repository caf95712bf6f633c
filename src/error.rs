// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! Error taxonomy for the normalization core (spec.md §7).

use displaydoc::Display;

/// The error type for fallible operations in this crate.
#[derive(Display, Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum NormalizerError {
    /// the data blob's header, indexes array, or trie failed to validate
    InvalidFormat,
    /// an allocation failed while growing the reordering buffer or output
    OutOfMemory,
    /// the caller's output string was poisoned by a previous failed append
    InvalidArgument,
    /// the data's complex-decomposition table exceeds the offsets this build supports
    FutureExtension,
}

impl std::error::Error for NormalizerError {}
