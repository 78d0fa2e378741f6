//! Chunky block digits for the position indicator.

pub const FONT_HEIGHT: usize = 5;
const FONT_WIDTH: usize = 3;
const SPACING: usize = 1;
const FILL_CHAR: char = '█';

type Glyph = [&'static str; FONT_HEIGHT];

const DIGITS: [Glyph; 10] = [
    ["111", "1 1", "1 1", "1 1", "111"],
    [" 1 ", "11 ", " 1 ", " 1 ", "111"],
    ["111", "  1", "111", "1  ", "111"],
    ["111", "  1", " 11", "  1", "111"],
    ["1 1", "1 1", "111", "  1", "  1"],
    ["111", "1  ", "111", "  1", "111"],
    ["111", "1  ", "111", "1 1", "111"],
    ["111", "  1", "  1", " 1 ", " 1 "],
    ["111", "1 1", "111", "1 1", "111"],
    ["111", "1 1", "111", "  1", "111"],
];

/// Render a decimal string as block digits, or `None` if it holds anything else.
pub fn render_digits(text: &str) -> Option<Vec<String>> {
    let glyphs = text
        .chars()
        .map(|ch| ch.to_digit(10).map(|digit| &DIGITS[digit as usize]))
        .collect::<Option<Vec<_>>>()?;
    if glyphs.is_empty() {
        return None;
    }

    let rows = (0..FONT_HEIGHT)
        .map(|row| {
            let mut line = String::new();
            for (index, glyph) in glyphs.iter().enumerate() {
                if index > 0 {
                    line.push_str(&" ".repeat(SPACING));
                }
                // double width so cells look roughly square
                for symbol in glyph[row].chars() {
                    let cell = if symbol == '1' { FILL_CHAR } else { ' ' };
                    line.push(cell);
                    line.push(cell);
                }
            }
            line.trim_end().to_string()
        })
        .collect();
    Some(rows)
}

/// Columns needed to draw `digits` characters.
pub fn width_for(digits: usize) -> usize {
    digits * FONT_WIDTH * 2 + digits.saturating_sub(1) * SPACING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_single_digit() {
        let rows = render_digits("1").expect("digit");
        assert_eq!(rows.len(), FONT_HEIGHT);
        assert_eq!(rows[0], "  ██");
        assert_eq!(rows[4], "██████");
    }

    #[test]
    fn multi_digit_width_includes_spacing() {
        let rows = render_digits("10").expect("digits");
        let widest = rows.iter().map(|row| row.chars().count()).max();
        assert_eq!(widest, Some(width_for(2)));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(render_digits("1a").is_none());
        assert!(render_digits("").is_none());
    }
}
