//! Piece-aware line wrapping.
//!
//! Report lines are assembled from pieces: a styled branch name, a hash, a
//! date, the separators between them. A piece is never broken; when the
//! next piece does not fit, the line ends and the piece starts the next
//! one. Lengths are measured in visible characters, so escape sequences
//! embedded by a styler do not count against the width.

/// Number of characters `s` occupies on screen, ignoring ANSI CSI escape
/// sequences (`ESC [ ... <final byte>`).
pub fn visible_len(s: &str) -> usize {
    let mut count = 0;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Parameter and intermediate bytes run until a final byte in @..=~.
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            continue;
        }
        count += 1;
    }
    count
}

/// Lay `pieces` out into lines no wider than `width` visible characters.
///
/// The first line starts with `first_prefix`, later lines with
/// `next_prefix`. Pieces must carry their own separators (e.g. `"  "`).
/// Empty pieces are skipped. A piece that cannot fit even on a fresh line
/// is emitted alone on its own line, unbroken, and the piece after it
/// starts the next line as is. Leading whitespace is dropped only from a
/// piece that forces a line break; trailing whitespace is dropped from
/// every emitted line.
///
/// ```
/// use tips_ui::wrap::wrap_pieces;
///
/// let lines = wrap_pieces(["AAA", "  ", "BBB"], 10, "  ", "    ");
/// assert_eq!(lines, vec!["  AAA  BBB"]);
/// ```
pub fn wrap_pieces<I, S>(pieces: I, width: usize, first_prefix: &str, next_prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = Vec::new();
    let mut current = first_prefix.to_string();
    // Visible length of the prefix the current line started with; while
    // `current` is no longer than this it holds nothing but that prefix.
    let mut prefix_len = visible_len(first_prefix);

    for piece in pieces {
        let piece = piece.as_ref();
        if piece.is_empty() {
            continue;
        }

        let current_len = visible_len(&current);
        let line_is_bare = current_len <= prefix_len;
        if current_len + visible_len(piece) <= width || line_is_bare {
            current.push_str(piece);
            continue;
        }

        if !current.trim().is_empty() {
            lines.push(current.trim_end().to_string());
        }
        current = next_prefix.to_string();
        prefix_len = visible_len(next_prefix);

        let body = piece.trim_start();
        if body.is_empty() {
            continue;
        }
        current.push_str(body);

        if visible_len(&current) > width {
            lines.push(current.trim_end().to_string());
            current = next_prefix.to_string();
        }
    }

    if !current.trim().is_empty() {
        lines.push(current.trim_end().to_string());
    }

    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";

    fn red(s: &str) -> String {
        format!("{RED}{s}{RESET}")
    }

    fn strip(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' && chars.peek() == Some(&'[') {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) && c != '[' {
                        break;
                    }
                }
                continue;
            }
            out.push(c);
        }
        out
    }

    #[test]
    fn visible_len_ignores_escapes() {
        assert_eq!(visible_len("plain"), 5);
        assert_eq!(visible_len(&red("abc")), 3);
        assert_eq!(visible_len("\x1b[38;2;194;217;76m\x1b[1mmain\x1b[0m"), 4);
        assert_eq!(visible_len(""), 0);
    }

    #[test]
    fn visible_len_counts_chars_not_bytes() {
        assert_eq!(visible_len("héllo"), 5);
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        let lines = wrap_pieces(["AAA", "  ", "BBB"], 10, "  ", "    ");
        assert_eq!(lines, vec!["  AAA  BBB"]);
        assert_eq!(visible_len(&lines[0]), 10);
    }

    #[test]
    fn oversize_piece_is_emitted_unbroken() {
        let long = "x".repeat(50);
        let lines = wrap_pieces([long.as_str()], 10, "", "");
        assert_eq!(lines, vec![long]);
    }

    #[test]
    fn overflow_moves_piece_to_continuation_line() {
        let lines = wrap_pieces(["origin/main", "  ", "0123456789ab", "  ", "Ada"], 21, "  ", "    ");
        assert_eq!(lines, vec!["  origin/main", "    0123456789ab  Ada"]);
    }

    #[test]
    fn separator_at_break_is_dropped() {
        let lines = wrap_pieces(["AAAA", "  ", "BBBB"], 6, "", "  ");
        assert_eq!(lines, vec!["AAAA", "  BBBB"]);
    }

    #[test]
    fn oversize_piece_after_content_gets_own_line() {
        let long = "y".repeat(30);
        let lines = wrap_pieces(["aa", " ", long.as_str(), " ", "bb"], 10, "", "  ");
        assert_eq!(lines, vec!["aa".to_string(), format!("  {long}"), "   bb".to_string()]);
    }

    #[test]
    fn separator_after_oversize_piece_is_kept() {
        let long = "y".repeat(30);
        let pieces = ["aa", " ", long.as_str(), "  ", "bb"];
        let lines = wrap_pieces(pieces, 10, "", "  ");
        assert_eq!(lines, vec!["aa".to_string(), format!("  {long}"), "    bb".to_string()]);
        assert_reassembles(&pieces, &lines, 10, "", "  ");
    }

    #[test]
    fn separator_alone_after_oversize_piece_vanishes_at_next_break() {
        let y = "y".repeat(30);
        let z = "z".repeat(30);
        let pieces = ["aa", " ", y.as_str(), "  ", z.as_str(), "  ", "cc"];
        let lines = wrap_pieces(pieces, 10, "", "  ");
        assert_eq!(
            lines,
            vec!["aa".to_string(), format!("  {y}"), format!("  {z}"), "    cc".to_string()]
        );
        assert_reassembles(&pieces, &lines, 10, "", "  ");
    }

    #[test]
    fn styled_pieces_measure_by_visible_width() {
        let a = red("AAA");
        let b = red("BBB");
        let lines = wrap_pieces([a.as_str(), "  ", b.as_str()], 10, "  ", "    ");
        assert_eq!(lines.len(), 1);
        assert_eq!(visible_len(&lines[0]), 10);
        assert_eq!(strip(&lines[0]), "  AAA  BBB");
    }

    #[test]
    fn empty_pieces_are_skipped() {
        let lines = wrap_pieces(["", "a", "", "b", ""], 80, "", "");
        assert_eq!(lines, vec!["ab"]);
    }

    #[test]
    fn no_pieces_no_lines() {
        let lines = wrap_pieces(Vec::<String>::new(), 80, "  ", "    ");
        assert!(lines.is_empty());
    }

    #[test]
    fn zero_width_puts_every_piece_on_its_own_line() {
        let lines = wrap_pieces(["a", " ", "b", " ", "c"], 0, "", "");
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn lines_respect_width_unless_single_oversize_piece() {
        let pieces = [
            "feature/very-long-branch-name",
            "  ",
            "0123456789ab",
            "  ",
            "Jan. 1st, 2024, 01:05:09 PM, GMT+0",
            "  ",
            "Ada Lovelace",
            "  ",
            "Refactor the frobnicator",
        ];
        for width in [1, 5, 16, 20, 33, 40, 60, 200] {
            let lines = wrap_pieces(pieces, width, "  ", "    ");
            for line in &lines {
                if visible_len(line) > width {
                    let body = line.trim_start();
                    assert!(
                        pieces.contains(&body),
                        "width {width}: overlong line {line:?} is not a single piece"
                    );
                }
            }
        }
    }

    #[test]
    fn pieces_come_out_in_order_and_whole() {
        let long = "y".repeat(30);
        let oversize = ["aa", " ", long.as_str(), "  ", "bb", "  ", long.as_str(), "  ", "cc"];
        let inputs: [&[&str]; 3] = [
            &["alpha", " ", "beta", " ", "gamma", " ", "delta", " ", "epsilon"],
            &[
                "feature/very-long-branch-name",
                "  ",
                "0123456789ab",
                "  ",
                "Jan. 1st, 2024, 01:05:09 PM, GMT+0",
                "  ",
                "Ada Lovelace",
                "  ",
                "Refactor the frobnicator",
            ],
            &oversize,
        ];
        for pieces in inputs {
            for (first, next) in [("", ""), ("  ", "    ")] {
                for width in 0..90 {
                    let lines = wrap_pieces(pieces, width, first, next);
                    assert_reassembles(pieces, &lines, width, first, next);
                }
            }
        }
    }

    /// Checks that `lines` hold exactly the non-empty `pieces`, in order and
    /// unsplit. Only whitespace at a line break may disappear: trailing
    /// whitespace of a line, leading whitespace of the piece that forced the
    /// break, and a whitespace piece that itself forced the break.
    fn assert_reassembles(
        pieces: &[&str],
        lines: &[String],
        width: usize,
        first_prefix: &str,
        next_prefix: &str,
    ) {
        let mut queue: VecDeque<&str> = pieces.iter().copied().filter(|p| !p.is_empty()).collect();
        let mut after_break = false;

        for (n, line) in lines.iter().enumerate() {
            let prefix = if n == 0 { first_prefix } else { next_prefix };
            let mut rest = line
                .strip_prefix(prefix)
                .unwrap_or_else(|| panic!("width {width}: line {line:?} lacks prefix {prefix:?}"));
            let mut at_start = true;
            let mut broke = after_break;
            let mut used = visible_len(prefix);

            while !rest.is_empty() {
                let raw = queue
                    .pop_front()
                    .unwrap_or_else(|| panic!("width {width}: extra text {rest:?} in {line:?}"));
                let piece = if at_start && broke { raw.trim_start() } else { raw };
                // A separator alone on a fresh line vanishes when the piece
                // after it does not fit there either.
                let stranded = at_start
                    && piece.trim().is_empty()
                    && !rest.starts_with(piece)
                    && queue
                        .front()
                        .is_some_and(|next| used + visible_len(raw) + visible_len(next) > width);
                if stranded {
                    broke = true;
                    continue;
                }
                at_start = false;

                if let Some(tail) = rest.strip_prefix(piece) {
                    rest = tail;
                } else if piece.starts_with(rest) && piece[rest.len()..].trim().is_empty() {
                    rest = "";
                } else {
                    panic!("width {width}: line {line:?} has {rest:?} where {piece:?} belongs");
                }
                used += visible_len(piece);
            }

            // A break line that overflows is closed at once; the next line
            // then starts without a break.
            let reset = n > 0 && broke && visible_len(line) > width;
            after_break = !reset;
            if !reset {
                while let Some(ws) = queue.front().copied().filter(|p| p.trim().is_empty()) {
                    queue.pop_front();
                    if used + visible_len(ws) > width {
                        after_break = false;
                        break;
                    }
                    used += visible_len(ws);
                }
            }
        }

        assert!(queue.is_empty(), "width {width}: pieces never emitted: {queue:?}");
    }
}
