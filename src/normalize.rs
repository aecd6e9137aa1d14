//! Length-preserving, BMP-only lowercasing.
//!
//! Matching is case-insensitive, but the dictionary only ever stores lowered
//! code units, so every text entering a lookup has to be lowered the same
//! way the builder lowered its word list. Full Unicode case folding can
//! change the number of code units (`İ` becomes two code units, `ß` behaves
//! specially under some tailorings); that would break the 1:1 relationship
//! between a matched span's code-unit length and the original text's, which
//! `mask` depends on. So lowering here is deliberately narrower: a code unit
//! lowers to exactly one code unit, or it is left unchanged.

/// Lowers a single BMP code unit, leaving it unchanged if lowering it would
/// not stay a single code unit (surrogate halves, and the rare expanding
/// lowercase mappings).
#[inline]
pub fn lower_code_unit(unit: u16) -> u16 {
    if unit >= 0xD800 && unit <= 0xDFFF {
        return unit; // surrogate half: leave astral text untouched
    }
    match char::from_u32(unit as u32) {
        Some(c) => {
            let mut it = c.to_lowercase();
            match (it.next(), it.next()) {
                (Some(lower), None) => {
                    let mut buf = [0u16; 1];
                    match lower.encode_utf16(&mut buf).len() {
                        1 => buf[0],
                        _ => unit,
                    }
                }
                _ => unit,
            }
        }
        None => unit,
    }
}

/// Lowers `src` into `dst`, code unit by code unit. `dst` is cleared first.
/// One rent (by the caller, if `dst` is pooled) covers the whole call.
pub fn normalize(src: &[u16], dst: &mut Vec<u16>) {
    dst.clear();
    dst.reserve(src.len());
    dst.extend(src.iter().map(|&u| lower_code_unit(u)));
}

/// Transcodes `src` to UTF-16 and lowers it in the same pass, writing into
/// `dst`. Used by the `&str` convenience API so that the fused
/// transcode-then-lower operation still costs exactly one rent of `dst`,
/// rather than one for transcoding and a second for lowering.
pub fn normalize_str(src: &str, dst: &mut Vec<u16>) {
    dst.clear();
    dst.reserve(src.len());
    dst.extend(src.encode_utf16().map(lower_code_unit));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowers_ascii() {
        let src: Vec<u16> = "BadWord".encode_utf16().collect();
        let mut dst = Vec::new();
        normalize(&src, &mut dst);
        assert_eq!(String::from_utf16(&dst).unwrap(), "badword");
    }

    #[test]
    fn preserves_length_for_expanding_lowercase() {
        // 'İ' (U+0130) lowercases to two code units in full Unicode case
        // folding; here it must be left alone so length is preserved.
        let src: Vec<u16> = "İ".encode_utf16().collect();
        let mut dst = Vec::new();
        normalize(&src, &mut dst);
        assert_eq!(dst.len(), src.len());
    }

    #[test]
    fn leaves_surrogates_untouched() {
        let src: Vec<u16> = "a😀b".encode_utf16().collect();
        assert_eq!(src.len(), 4); // 'a', high surrogate, low surrogate, 'b'
        let mut dst = Vec::new();
        normalize(&src, &mut dst);
        assert_eq!(dst.len(), src.len());
        assert_eq!(dst[1], src[1]);
        assert_eq!(dst[2], src[2]);
    }

    #[test]
    fn normalize_str_matches_transcode_then_normalize() {
        let mut fused = Vec::new();
        normalize_str("Shout LOUDLY", &mut fused);

        let units: Vec<u16> = "Shout LOUDLY".encode_utf16().collect();
        let mut staged = Vec::new();
        normalize(&units, &mut staged);

        assert_eq!(fused, staged);
    }
}
