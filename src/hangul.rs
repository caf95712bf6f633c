// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! Algorithmic Hangul syllable decomposition and composition (spec.md §3).
//! Kept separate from the general mapping-record machinery, the way
//! `original_source/source/common/normalizer2.cpp` hand-inlines it rather
//! than routing it through `getDecomposition`.

use crate::{
    CodePoint, HANGUL_L_BASE, HANGUL_L_COUNT, HANGUL_S_BASE, HANGUL_S_COUNT, HANGUL_T_BASE,
    HANGUL_T_COUNT, HANGUL_V_BASE, HANGUL_V_COUNT,
};

/// True if `c` is a precomposed Hangul syllable in `[U+AC00, U+D7A4)`.
#[inline]
pub fn is_hangul_syllable(c: CodePoint) -> bool {
    (HANGUL_S_BASE..HANGUL_S_BASE + HANGUL_S_COUNT).contains(&c)
}

/// The algorithmic decomposition of a Hangul syllable into L, V, and
/// (if present) T jamo, per spec.md §3.
///
/// # Panics
///
/// Panics if `s` is not a Hangul syllable; callers must check
/// [`is_hangul_syllable`] (or consult `norm16` via [`crate::props::Props`])
/// first.
#[inline]
pub fn decompose_syllable(s: CodePoint) -> (CodePoint, CodePoint, Option<CodePoint>) {
    debug_assert!(is_hangul_syllable(s));
    let mut s = s - HANGUL_S_BASE;
    let t = s % HANGUL_T_COUNT;
    s /= HANGUL_T_COUNT;
    let l = HANGUL_L_BASE + s / HANGUL_V_COUNT;
    let v = HANGUL_V_BASE + s % HANGUL_V_COUNT;
    let t = if t != 0 { Some(HANGUL_T_BASE + t) } else { None };
    (l, v, t)
}

/// Composes a leading L jamo with a following V jamo into an LV syllable,
/// or an LV syllable with a following T jamo into an LVT syllable. Returns
/// `None` if `starter`/`second` do not form a valid Hangul composition
/// (spec.md §4.6, Hangul handled inline alongside the table-driven case).
#[inline]
pub fn compose_pair(starter: CodePoint, second: CodePoint) -> Option<CodePoint> {
    let l_index = starter.wrapping_sub(HANGUL_L_BASE);
    if l_index < HANGUL_L_COUNT {
        let v_index = second.wrapping_sub(HANGUL_V_BASE);
        if v_index < HANGUL_V_COUNT {
            return Some(HANGUL_S_BASE + (l_index * HANGUL_V_COUNT + v_index) * HANGUL_T_COUNT);
        }
        return None;
    }
    let lv_index = starter.wrapping_sub(HANGUL_S_BASE);
    if lv_index < HANGUL_S_COUNT && lv_index % HANGUL_T_COUNT == 0 {
        let t_index = second.wrapping_sub(HANGUL_T_BASE);
        if t_index > 0 && t_index < HANGUL_T_COUNT {
            return Some(starter + t_index);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_ga_without_trailing_consonant() {
        // U+AC00 GA = L(0x1100) + V(0x1161)
        assert_eq!(decompose_syllable(0xAC00), (0x1100, 0x1161, None));
    }

    #[test]
    fn decomposes_gag_with_trailing_consonant() {
        // U+AC01 GAG = L + V + T(0x11A8)
        assert_eq!(decompose_syllable(0xAC01), (0x1100, 0x1161, Some(0x11A8)));
    }

    #[test]
    fn composes_l_v_to_lv() {
        assert_eq!(compose_pair(0x1100, 0x1161), Some(0xAC00));
    }

    #[test]
    fn composes_lv_t_to_lvt() {
        assert_eq!(compose_pair(0xAC00, 0x11A8), Some(0xAC01));
    }

    #[test]
    fn rejects_non_hangul_pair() {
        assert_eq!(compose_pair('a' as u32, 'b' as u32), None);
    }

    #[test]
    fn round_trips_every_syllable_shape() {
        for s in [0xAC00u32, 0xAC01, 0xD7A3] {
            let (l, v, t) = decompose_syllable(s);
            let lv = compose_pair(l, v).unwrap();
            let result = match t {
                Some(t) => compose_pair(lv, t).unwrap(),
                None => lv,
            };
            assert_eq!(result, s);
        }
    }
}
