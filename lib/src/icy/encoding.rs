//! Windows-1252 single byte text codec, as used for ICY metadata blocks
//!
//! <https://en.wikipedia.org/wiki/Windows-1252>

/// Mapping of bytes `0x80..=0x9F`, the only range where Windows-1252 differs from Latin-1.
///
/// The unassigned bytes (`0x81`, `0x8D`, `0x8F`, `0x90`, `0x9D`) map to the C1 control with the same value,
/// so that decoding never fails (same as the WHATWG encoding standard does).
const C1_TABLE: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

#[inline]
fn decode_byte(byte: u8) -> char {
    match byte {
        0x80..=0x9F => C1_TABLE[usize::from(byte - 0x80)],
        _ => char::from(byte),
    }
}

/// Decode bytes as Windows-1252, every byte maps to exactly one [`char`]
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes.iter().copied().map(decode_byte).collect()
}

/// Encode a string back into Windows-1252
///
/// Returns [`None`] if any character has no representation in the code page.
pub fn encode_windows_1252(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|ch| match u8::try_from(u32::from(ch)) {
            Ok(byte) if !(0x80..=0x9F).contains(&byte) => Some(byte),
            _ => C1_TABLE
                .iter()
                .position(|v| *v == ch)
                // the table only has 32 entries
                .and_then(|idx| u8::try_from(idx).ok())
                .map(|idx| 0x80 + idx),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_decode_ascii_unchanged() {
        assert_eq!("StreamTitle='Hello';", decode_windows_1252(b"StreamTitle='Hello';"));
    }

    #[test]
    fn should_decode_c1_range() {
        assert_eq!("\u{20AC}", decode_windows_1252(&[0x80]));
        assert_eq!("\u{2019}", decode_windows_1252(&[0x92]));
        assert_eq!("\u{0178}", decode_windows_1252(&[0x9F]));
        // unassigned bytes still decode
        assert_eq!("\u{0081}\u{009D}", decode_windows_1252(&[0x81, 0x9D]));
    }

    #[test]
    fn should_decode_latin1_range() {
        // "Björk - Jóga"
        let bytes = b"Bj\xF6rk - J\xF3ga";
        assert_eq!("Björk - Jóga", decode_windows_1252(bytes));
    }

    #[test]
    fn should_round_trip_every_printable_byte() {
        for byte in 0x20..=0xFFu8 {
            let decoded = decode_windows_1252(&[byte]);
            assert_eq!(1, decoded.chars().count());
            assert_eq!(Some(vec![byte]), encode_windows_1252(&decoded), "byte {byte:#04x}");
        }
    }

    #[test]
    fn should_round_trip_nul_padded_blocks() {
        let printable: Vec<u8> = (0x20..=0xFFu8).collect();

        // k * 16 sized blocks with NUL bytes spread at different places
        for k in 1..=4usize {
            let mut block = Vec::with_capacity(k * 16);
            let mut expected = Vec::new();
            for idx in 0..(k * 16) {
                if idx % 3 == 0 {
                    block.push(0);
                } else {
                    let byte = printable[(idx * 7) % printable.len()];
                    block.push(byte);
                    expected.push(byte);
                }
            }

            block.retain(|v| *v != 0);
            let decoded = decode_windows_1252(&block);

            assert_eq!(Some(expected), encode_windows_1252(&decoded));
        }
    }

    #[test]
    fn should_not_encode_outside_code_page() {
        assert_eq!(None, encode_windows_1252("\u{3042}"));
        // 0x80 is "€" in this code page, not U+0080
        assert_eq!(None, encode_windows_1252("\u{0080}"));
    }
}
