//! Extracts the lines surrounding a match from the same file.

/// A numbered line, 1-based.
pub type NumberedLine = (usize, String);

/// Up to `n` lines before and after a matched line, clipped at the file edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWindow {
    pub before: Vec<NumberedLine>,
    pub after: Vec<NumberedLine>,
}

impl ContextWindow {
    /// Builds the window around `line_number` (1-based) in `lines`.
    ///
    /// `before` covers `[line_number - n, line_number - 1]` and `after` covers
    /// `[line_number + 1, line_number + n]`, both ascending. A line number
    /// outside the file yields an empty window.
    pub fn around<S: AsRef<str>>(lines: &[S], line_number: usize, n: usize) -> Self {
        if n == 0 || line_number == 0 || line_number > lines.len() {
            return Self::default();
        }

        let first = line_number.saturating_sub(n).max(1);
        let last = line_number.saturating_add(n).min(lines.len());

        let numbered = |number: usize| (number, lines[number - 1].as_ref().to_string());

        Self {
            before: (first..line_number).map(numbered).collect(),
            after: (line_number + 1..=last).map(numbered).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twenty_lines() -> Vec<String> {
        (1..=20).map(|i| format!("line {i}")).collect()
    }

    fn numbers(lines: &[NumberedLine]) -> Vec<usize> {
        lines.iter().map(|(n, _)| *n).collect()
    }

    #[test]
    fn window_in_the_middle_of_the_file() {
        let window = ContextWindow::around(&twenty_lines(), 10, 2);
        assert_eq!(numbers(&window.before), vec![8, 9]);
        assert_eq!(numbers(&window.after), vec![11, 12]);
        assert_eq!(window.before[0].1, "line 8");
        assert_eq!(window.after[1].1, "line 12");
    }

    #[test]
    fn first_line_has_nothing_before() {
        let window = ContextWindow::around(&twenty_lines(), 1, 2);
        assert!(window.before.is_empty());
        assert_eq!(numbers(&window.after), vec![2, 3]);
    }

    #[test]
    fn last_line_has_nothing_after() {
        let window = ContextWindow::around(&twenty_lines(), 20, 2);
        assert_eq!(numbers(&window.before), vec![18, 19]);
        assert!(window.after.is_empty());
    }

    #[test]
    fn window_is_clipped_near_the_edges() {
        let window = ContextWindow::around(&twenty_lines(), 2, 5);
        assert_eq!(numbers(&window.before), vec![1]);
        assert_eq!(numbers(&window.after), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn zero_size_and_out_of_range_are_empty() {
        let lines = twenty_lines();
        assert!(ContextWindow::around(&lines, 10, 0).is_empty());
        assert!(ContextWindow::around(&lines, 0, 2).is_empty());
        assert!(ContextWindow::around(&lines, 21, 2).is_empty());
    }

    #[test]
    fn huge_size_is_clipped_to_the_whole_file() {
        let lines = ["a", "b", "c"];
        let window = ContextWindow::around(&lines, 2, usize::MAX);
        assert_eq!(window.before, vec![(1, "a".to_string())]);
        assert_eq!(window.after, vec![(3, "c".to_string())]);
    }

    #[test]
    fn works_on_borrowed_lines() {
        let text = "def foo():\n    return 1\n";
        let lines: Vec<&str> = text.lines().collect();
        let window = ContextWindow::around(&lines, 2, 1);
        assert_eq!(window.before, vec![(1, "def foo():".to_string())]);
        assert!(window.after.is_empty());
    }
}
