//! Syntax-style coloring of matched lines for a rich-text surface.
//!
//! Coloring is regex substitution, not lexing. Rules run in a fixed order
//! (regex rules, then the token table, then the search term) and each rule
//! colors at most its first occurrence. If that occurrence is empty or
//! partially overlaps an earlier span, the rule colors nothing. All rules look at the raw line, so a later rule
//! can never match inside markup produced by an earlier one. Spans may nest
//! but never partially overlap; the innermost color is the one rendered last,
//! which is why the search term is applied last.

use regex::Regex;
use std::sync::LazyLock;

/// Color of the user's search term.
pub const SEARCH_TERM_COLOR: &str = "#40D139";

/// (pattern, capture group, color)
const REGEX_RULES: &[(&str, &str, &str)] = &[
    (
        r"(?:[(])(?P<arguments>[\w\[\]: ,*.']*)(?:[)])",
        "arguments",
        "#f2a049",
    ),
    (r"\b(?P<Union>Union)\b", "Union", "#fff566"),
    (r"\b(?P<Callable>Callable)\b", "Callable", "#fff566"),
    (r"\b(?P<Mapping>Mapping)\b", "Mapping", "#fff566"),
    (r"\b(?P<str>str)\b", "str", "#31aade"),
    (r"\b(?P<int>int)\b", "int", "#31aade"),
    (r"\b(?P<float>float)\b", "float", "#31aade"),
    (r"\b(?P<list>list)\b", "list", "#31aade"),
    (r"\b(?P<List>List)\b", "List", "#fff566"),
    (r"\b(?P<tuple>tuple)\b", "tuple", "#31aade"),
    (r"\b(?P<Tuple>Tuple)\b", "Tuple", "#fff566"),
];

/// Exact-substring keywords and operators.
const TOKEN_RULES: &[(&str, &str)] = &[
    ("def", "#e35bba"),
    ("return", "#db8823"),
    ("pass", "#d6882f"),
    ("None", "#B97F39"),
    ("self", "#de31aa"),
    ("->", "#d6882f"),
    ("*args", "#db8823"),
    ("**kwargs", "#db8823"),
];

#[derive(Debug, Clone)]
pub struct RegexRule {
    regex: Regex,
    group: String,
    color: String,
}

static PYTHON_REGEX_RULES: LazyLock<Vec<RegexRule>> = LazyLock::new(|| {
    REGEX_RULES
        .iter()
        .filter_map(|(pattern, group, color)| match Regex::new(pattern) {
            Ok(regex) => Some(RegexRule {
                regex,
                group: group.to_string(),
                color: color.to_string(),
            }),
            Err(e) => {
                tracing::error!("Failed to compile highlight rule {}: {}", pattern, e);
                None
            }
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span<'a> {
    start: usize,
    end: usize,
    color: &'a str,
}

impl Span<'_> {
    /// Partial overlap is the only forbidden layout; containment either way is fine.
    fn conflicts_with(&self, other: &Span<'_>) -> bool {
        let overlaps = self.start < other.end && other.start < self.end;
        let nested = (other.start <= self.start && self.end <= other.end)
            || (self.start <= other.start && other.end <= self.end);
        overlaps && !nested
    }
}

#[derive(Debug, Clone)]
pub struct Highlighter {
    regex_rules: Vec<RegexRule>,
    tokens: Vec<(String, String)>,
    term_color: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self {
            regex_rules: PYTHON_REGEX_RULES.clone(),
            tokens: TOKEN_RULES
                .iter()
                .map(|(token, color)| (token.to_string(), color.to_string()))
                .collect(),
            term_color: SEARCH_TERM_COLOR.to_string(),
        }
    }
}

impl Highlighter {
    /// A highlighter that only colors the search term.
    pub fn term_only() -> Self {
        Self {
            regex_rules: Vec::new(),
            tokens: Vec::new(),
            term_color: SEARCH_TERM_COLOR.to_string(),
        }
    }

    /// Returns `line` as markup with tokens and the first occurrence of `term` colored.
    pub fn highlight(&self, line: &str, term: &str) -> String {
        let mut spans: Vec<Span<'_>> = Vec::new();

        for rule in &self.regex_rules {
            let first = rule
                .regex
                .captures(line)
                .and_then(|caps| caps.name(&rule.group))
                .map(|m| (m.start(), m.end()));
            Self::place(&mut spans, first, &rule.color);
        }

        for (token, color) in &self.tokens {
            Self::place(&mut spans, Self::first_occurrence(line, token), color);
        }

        Self::place(&mut spans, Self::first_occurrence(line, term), &self.term_color);

        render(line, &spans)
    }

    fn first_occurrence(line: &str, needle: &str) -> Option<(usize, usize)> {
        if needle.is_empty() {
            return None;
        }
        line.find(needle).map(|start| (start, start + needle.len()))
    }

    fn place<'c>(spans: &mut Vec<Span<'c>>, candidate: Option<(usize, usize)>, color: &'c str) {
        let Some((start, end)) = candidate else {
            return;
        };
        let span = Span { start, end, color };
        if start < end && !spans.iter().any(|existing| span.conflicts_with(existing)) {
            spans.push(span);
        }
    }
}

/// Renders properly nested spans as `<font color=..>` markup, escaping the text.
fn render(line: &str, spans: &[Span<'_>]) -> String {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    // Outer spans first; for identical ranges the later rule ends up innermost.
    order.sort_by(|&a, &b| {
        spans[a]
            .start
            .cmp(&spans[b].start)
            .then(spans[b].end.cmp(&spans[a].end))
            .then(a.cmp(&b))
    });

    let mut out = String::with_capacity(line.len() + spans.len() * 32);
    let mut open_ends: Vec<usize> = Vec::new();
    let mut cursor = 0;

    for index in order {
        let span = spans[index];
        while let Some(&end) = open_ends.last() {
            if end > span.start {
                break;
            }
            push_escaped(&mut out, &line[cursor..end]);
            out.push_str("</font>");
            cursor = end;
            open_ends.pop();
        }
        push_escaped(&mut out, &line[cursor..span.start]);
        cursor = span.start;
        out.push_str("<font color=");
        out.push_str(span.color);
        out.push('>');
        open_ends.push(span.end);
    }

    while let Some(end) = open_ends.pop() {
        push_escaped(&mut out, &line[cursor..end]);
        out.push_str("</font>");
        cursor = end;
    }
    push_escaped(&mut out, &line[cursor..]);

    out
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_is_wrapped_after_keywords() {
        let html = Highlighter::default().highlight("return self.value", "value");
        insta::assert_snapshot!(html, @"<font color=#db8823>return</font> <font color=#de31aa>self</font>.<font color=#40D139>value</font>");
    }

    #[test]
    fn arguments_nest_type_and_term_colors() {
        let html = Highlighter::default().highlight("def foo(self, name: str) -> None:", "name");
        insta::assert_snapshot!(html, @"<font color=#e35bba>def</font> foo(<font color=#f2a049><font color=#de31aa>self</font>, <font color=#40D139>name</font>: <font color=#31aade>str</font></font>) <font color=#d6882f>-&gt;</font> <font color=#B97F39>None</font>:");
    }

    #[test]
    fn term_inside_a_keyword_is_innermost() {
        let html = Highlighter::default().highlight("self.x = 1", "self");
        assert_eq!(
            html,
            "<font color=#de31aa><font color=#40D139>self</font></font>.x = 1"
        );
    }

    #[test]
    fn only_the_first_occurrence_is_colored() {
        let html = Highlighter::term_only().highlight("a = a + a", "a");
        assert_eq!(html, "<font color=#40D139>a</font> = a + a");
    }

    #[test]
    fn raw_text_is_escaped() {
        let html = Highlighter::term_only().highlight("if a < b and c > d:", "b");
        assert_eq!(html, "if a &lt; <font color=#40D139>b</font> and c &gt; d:");
    }

    #[test]
    fn empty_captures_and_terms_color_nothing() {
        let html = Highlighter::default().highlight("run()", "");
        assert_eq!(html, "run()");
    }

    #[test]
    fn term_straddling_a_keyword_is_not_colored() {
        // "urn s" straddles the "return" span.
        let html = Highlighter::default().highlight("return self", "urn s");
        assert!(!html.contains(SEARCH_TERM_COLOR));
        assert!(html.starts_with("<font color=#db8823>return</font>"));
    }

    #[test]
    fn later_occurrences_are_not_tried_when_the_first_is_blocked() {
        let html = Highlighter::default().highlight("return x = urn x", "urn x");
        assert!(!html.contains(SEARCH_TERM_COLOR));
        assert_eq!(html, "<font color=#db8823>return</font> x = urn x");
    }

    #[test]
    fn empty_first_argument_list_skips_the_rule() {
        let html = Highlighter::default().highlight("run() or go(a)", "");
        assert_eq!(html, "run() or go(a)");
    }

    #[test]
    fn term_containing_markup_words_does_not_break_tags() {
        let html = Highlighter::default().highlight("color = self.font", "font");
        assert_eq!(
            html,
            "color = <font color=#de31aa>self</font>.<font color=#40D139>font</font>"
        );
    }
}
