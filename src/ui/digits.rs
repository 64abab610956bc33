use crate::display::two_digits;

pub const GLYPH_HEIGHT: usize = 5;
pub const GLYPH_WIDTH: usize = 3;
/// Two glyphs and the gap between them
pub const NUMBER_WIDTH: usize = GLYPH_WIDTH * 2 + 1;

const GLYPHS: [[&str; GLYPH_HEIGHT]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    [" █ ", "██ ", " █ ", " █ ", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

pub fn glyph(digit: char) -> Option<&'static [&'static str; GLYPH_HEIGHT]> {
    digit
        .to_digit(10)
        .and_then(|d| GLYPHS.get(d as usize))
}

/// Rows of a zero-padded two digit number in block glyphs
pub fn big_number(value: u32) -> Vec<String> {
    let text = two_digits(value);
    (0..GLYPH_HEIGHT)
        .map(|row| {
            text.chars()
                .filter_map(glyph)
                .map(|g| g[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// The middle `height` rows, which reads as the card folding toward its hinge
pub fn squashed(rows: &[String], height: usize) -> &[String] {
    if height >= rows.len() {
        return rows;
    }
    let skip = (rows.len() - height) / 2;
    &rows[skip..skip + height]
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn test_every_digit_has_a_glyph() {
        for c in '0'..='9' {
            let g = glyph(c).unwrap();
            assert!(g.iter().all(|row| row.width() == GLYPH_WIDTH));
        }
        assert!(glyph('x').is_none());
    }

    #[test]
    fn test_big_number_pads_to_two_digits() {
        let rows = big_number(5);
        assert_eq!(rows.len(), GLYPH_HEIGHT);
        assert_eq!(rows[0], "███ ███");
        assert_eq!(rows[1], "█ █ █  ");
        assert!(rows.iter().all(|r| r.width() == NUMBER_WIDTH));
    }

    #[test]
    fn test_squashed_keeps_middle_rows() {
        let rows = big_number(88);
        assert_eq!(squashed(&rows, 5).len(), 5);
        assert_eq!(squashed(&rows, 1), &rows[2..3]);
        assert_eq!(squashed(&rows, 3), &rows[1..4]);
        assert!(squashed(&rows, 0).is_empty());
    }
}
