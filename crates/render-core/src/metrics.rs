//! Advance widths for the two standard Type1 faces the reports use.
//!
//! Widths are in 1/1000 em for the printable ASCII range (32..=126), taken
//! from the Adobe Helvetica and Helvetica-Bold AFM files. Anything outside
//! that range is measured as a digit.

/// The standard-14 faces used by the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// Resource name in the page's /Font dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            FontFace::Regular => &HELVETICA,
            FontFace::Bold => &HELVETICA_BOLD,
        }
    }
}

const FALLBACK_WIDTH: u16 = 556;
const ELLIPSIS: &str = "...";

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(c: char, face: FontFace) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        face.widths()[(code - 32) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` in points at `size`.
pub fn text_width(text: &str, face: FontFace, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, face))).sum();
    units as f32 * size / 1000.0
}

/// Shortens `text` so it fits in `max_width`, ending in `...` when cut.
///
/// Returns the text unchanged when it already fits. When even the ellipsis
/// does not fit, returns an empty string.
pub fn truncate_to_width(text: &str, face: FontFace, size: f32, max_width: f32) -> String {
    if text_width(text, face, size) <= max_width {
        return text.to_string();
    }

    let budget = max_width - text_width(ELLIPSIS, face, size);
    if budget < 0.0 {
        return String::new();
    }

    let mut used = 0.0;
    let mut kept = String::new();
    for c in text.chars() {
        let w = f32::from(char_width(c, face)) * size / 1000.0;
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(c);
    }
    let mut out = kept.trim_end().to_string();
    out.push_str(ELLIPSIS);
    out
}

/// Encodes `text` for a simple font with /WinAnsiEncoding.
///
/// Latin-1 maps directly; the typographic characters WinAnsi places in
/// 0x80..0x9F are translated; everything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(text_width("W", FontFace::Regular, 1000.0), 944.0);
        assert_eq!(text_width("i", FontFace::Regular, 1000.0), 222.0);
        assert_eq!(text_width("i", FontFace::Bold, 1000.0), 278.0);
        assert_eq!(text_width("100.0%", FontFace::Regular, 10.0), 23.12);
    }

    #[test]
    fn test_bold_is_never_narrower() {
        let text = "Security awareness campaign";
        assert!(
            text_width(text, FontFace::Bold, 9.0) >= text_width(text, FontFace::Regular, 9.0)
        );
    }

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("TI", FontFace::Regular, 9.0, 100.0), "TI");
    }

    #[test]
    fn test_truncate_adds_ellipsis_within_width() {
        let long = "Quarterly invoice lure for the finance department";
        let cut = truncate_to_width(long, FontFace::Regular, 9.0, 80.0);
        assert!(cut.ends_with("..."));
        assert!(cut.len() < long.len());
        assert!(text_width(&cut, FontFace::Regular, 9.0) <= 80.0);
    }

    #[test]
    fn test_truncate_too_narrow_for_ellipsis() {
        assert_eq!(truncate_to_width("abc", FontFace::Regular, 9.0, 1.0), "");
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Ação"), vec![b'A', 0xE7, 0xE3, b'o']);
        assert_eq!(encode_win_ansi("a\u{2013}b"), vec![b'a', 0x96, b'b']);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }
}
