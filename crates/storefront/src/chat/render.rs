//! Chat message markup.
//!
//! Replies use a tiny subset of markdown: `\n` separates lines and
//! `**text**` is bold. Everything else is plain text.

use serde::Serialize;

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Plain(String),
    Bold(String),
}

/// Split `text` into lines of styled segments.
///
/// An unmatched `**` is kept as plain text. Empty plain runs are omitted.
#[must_use]
pub fn segments(text: &str) -> Vec<Vec<Segment>> {
    text.split('\n').map(line_segments).collect()
}

fn line_segments(line: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut rest = line;

    while let Some((before, after_open)) = rest.split_once("**") {
        let Some((strong, after)) = after_open.split_once("**") else {
            break;
        };
        push_plain(&mut out, before);
        out.push(Segment::Bold(strong.to_owned()));
        rest = after;
    }
    push_plain(&mut out, rest);
    out
}

fn push_plain(out: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        out.push(Segment::Plain(text.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> Segment {
        Segment::Plain(s.to_owned())
    }

    fn bold(s: &str) -> Segment {
        Segment::Bold(s.to_owned())
    }

    #[test]
    fn test_bold_runs() {
        assert_eq!(
            segments("• **Xtorm Rugged 20K** (54,89€) - IP65"),
            vec![vec![plain("• "), bold("Xtorm Rugged 20K"), plain(" (54,89€) - IP65")]]
        );
    }

    #[test]
    fn test_lines() {
        let lines = segments("**Livraison :**\n\n• 24h");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![bold("Livraison :")]);
        assert!(lines[1].is_empty());
        assert_eq!(lines[2], vec![plain("• 24h")]);
    }

    #[test]
    fn test_unmatched_marker_stays_plain() {
        assert_eq!(segments("a **b"), vec![vec![plain("a **b")]]);
        assert_eq!(
            segments("**a** et **b"),
            vec![vec![bold("a"), plain(" et **b")]]
        );
    }
}
