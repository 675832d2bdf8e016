/// Display width in characters; superscripts and box glyphs count as one.
pub fn width(s: &str) -> usize {
    s.chars().count()
}

/// Greedy word wrap. Words longer than `max` are split across lines.
pub fn wrap(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..max).collect());
        }
        if word.is_empty() {
            continue;
        }

        let needed = if line.is_empty() { word.len() } else { width(&line) + 1 + word.len() };
        if needed > max {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Shortens `s` to at most `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if width(s) <= max {
        return s.to_string();
    }
    match max {
        0 => String::new(),
        _ => s.chars().take(max - 1).chain(['…']).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_between_words() {
        assert_eq!(wrap("ΔS = 0 and ΔL = 0, ±1", 10), ["ΔS = 0 and", "ΔL = 0, ±1"]);
    }

    #[test]
    fn wrap_splits_long_urls() {
        assert_eq!(
            wrap("see https://henke.lbl.gov/x", 10),
            ["see", "https://he", "nke.lbl.go", "v/x"]
        );
    }

    #[test]
    fn wrap_empty_gives_one_line() {
        assert_eq!(wrap("   ", 5), [""]);
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("1s² 2s² 2p⁶", 11), "1s² 2s² 2p⁶");
        assert_eq!(truncate("1s² 2s² 2p⁶ 3s¹", 8), "1s² 2s²…");
        assert_eq!(truncate("abc", 1), "…");
        assert_eq!(truncate("abc", 0), "");
    }
}
