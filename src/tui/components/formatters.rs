// Text helpers shared by the views
//
// Widths are terminal cells (unicode-width), so labels like "Braços" and
// "Terça-feira" line up with their ASCII neighbours.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pad with spaces on the right to exactly `width` cells, truncating with
/// an ellipsis when the text is wider
pub fn fit_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current <= width {
        return format!("{}{}", text, " ".repeat(width - current));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Widest label of a set, in cells
pub fn max_label_width<'a>(labels: impl IntoIterator<Item = &'a str>) -> usize {
    labels.into_iter().map(|l| l.width()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_width_pads_by_cells() {
        assert_eq!(fit_width("Braços", 8), "Braços  ");
        assert_eq!(fit_width("Braços", 8).width(), 8);
    }

    #[test]
    fn test_fit_width_truncates() {
        assert_eq!(fit_width("Quarta-feira", 6), "Quart…");
        assert_eq!(fit_width("Quarta-feira", 0), "");
    }

    #[test]
    fn test_max_label_width() {
        assert_eq!(max_label_width(["Peito", "Terça-feira"]), 11);
        assert_eq!(max_label_width(Vec::<&str>::new()), 0);
    }
}
