//! Suppresses comment-like lines when comments are hidden.
//!
//! This is a coarse substring heuristic, not a tokenizer: a line that uses an
//! excluded character outside a comment (a division, a URL) is hidden too.

/// Characters that mark a line as a comment or path, hidden unless comments are shown.
pub const DEFAULT_EXCLUDED_CHARACTERS: &[char] = &['/', '#'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFilter {
    excluded: Vec<char>,
}

impl Default for CommentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_CHARACTERS.iter().copied())
    }
}

impl CommentFilter {
    pub fn new(excluded: impl IntoIterator<Item = char>) -> Self {
        Self {
            excluded: excluded.into_iter().collect(),
        }
    }

    pub fn excluded_characters(&self) -> &[char] {
        &self.excluded
    }

    /// `true` iff none of the excluded characters appear in `line`.
    pub fn is_line_valid(&self, line: &str) -> bool {
        !line.contains(self.excluded.as_slice())
    }

    /// Whether a matched line may be displayed given the "show comments" option.
    pub fn allows(&self, line: &str, show_comments: bool) -> bool {
        show_comments || self.is_line_valid(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_lines_are_invalid() {
        let filter = CommentFilter::default();
        assert!(!filter.is_line_valid("    # return early"));
        assert!(!filter.is_line_valid("path = 'a/b'"));
        assert!(filter.is_line_valid("    return value"));
    }

    #[test]
    fn show_comments_lets_everything_through() {
        let filter = CommentFilter::default();
        assert!(!filter.allows("x = 1  # note", false));
        assert!(filter.allows("x = 1  # note", true));
    }

    #[test]
    fn custom_characters_replace_the_defaults() {
        let filter = CommentFilter::new([';']);
        assert!(filter.is_line_valid("# not excluded any more"));
        assert!(!filter.is_line_valid("mov ax, 1 ; comment"));
    }

    #[test]
    fn empty_set_accepts_all_lines() {
        let filter = CommentFilter::new(Vec::<char>::new());
        assert!(filter.is_line_valid("// anything # goes"));
    }

    #[test]
    fn division_is_a_known_false_negative() {
        let filter = CommentFilter::default();
        assert!(!filter.is_line_valid("ratio = a / b"));
    }
}
