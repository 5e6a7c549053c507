//! Escaping utilities for Markdown report generation.
//!
//! Record files are community contributed, so names, descriptions and tags
//! may contain characters that break Markdown tables or inject links. All
//! record data MUST go through one of these helpers before it is embedded.

/// Escape a string for safe inclusion in Markdown table cells.
///
/// Markdown tables use `|` as column separators and can be broken
/// by unescaped pipe characters. This function also handles newlines
/// and backticks that could break formatting.
///
/// # Examples
///
/// ```
/// use lolreg::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("a | b"), "a \\| b");
/// assert_eq!(escape_markdown_table("line1\nline2"), "line1 line2");
/// ```
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for safe inclusion in Markdown inline content.
///
/// Backslashes are escaped too, so registry paths survive rendering.
///
/// # Examples
///
/// ```
/// use lolreg::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("**bold**"), "\\*\\*bold\\*\\*");
/// assert_eq!(escape_markdown_inline(r"HKLM\Run"), r"HKLM\\Run");
/// ```
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '#' => result.push_str("\\#"),
            '!' => result.push_str("\\!"),
            '~' => result.push_str("\\~"),
            '|' => result.push_str("\\|"),
            '<' => result.push_str("\\<"),
            '>' => result.push_str("\\>"),
            '\n' => result.push(' '),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Wrap a string in a Markdown code span.
///
/// The fence is one backtick longer than the longest backtick run inside,
/// and padded with spaces when the content touches a backtick.
///
/// # Examples
///
/// ```
/// use lolreg::reports::escape::code_span;
///
/// assert_eq!(code_span(r"HKLM\SOFTWARE"), r"`HKLM\SOFTWARE`");
/// assert_eq!(code_span("a`b"), "``a`b``");
/// ```
pub fn code_span(s: &str) -> String {
    let longest_run = s
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let pad = if s.starts_with('`') || s.ends_with('`') {
        " "
    } else {
        ""
    };
    let flat: String = s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();
    format!("{fence}{pad}{flat}{pad}{fence}")
}

/// Fence for a code block that can hold `s` unchanged.
pub fn code_fence(s: &str) -> String {
    let longest_run = s
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest_run.max(2) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown_table_malicious() {
        // Pipe injection to break table structure
        assert_eq!(
            escape_markdown_table("name|tag|evil"),
            "name\\|tag\\|evil"
        );

        // Newline injection to escape table row
        assert_eq!(
            escape_markdown_table("row1\n| new | row |"),
            "row1 \\| new \\| row \\|"
        );

        // Link injection
        assert_eq!(
            escape_markdown_table("[evil](http://malware.com)"),
            "\\[evil\\](http://malware.com)"
        );
    }

    #[test]
    fn test_escape_markdown_inline() {
        assert_eq!(escape_markdown_inline("plain text"), "plain text");
        assert_eq!(escape_markdown_inline("# heading"), "\\# heading");
        assert_eq!(escape_markdown_inline("<img>"), "\\<img\\>");
        assert_eq!(escape_markdown_inline("a\r\nb"), "a b");
    }

    #[test]
    fn test_code_span_fences() {
        assert_eq!(code_span("plain"), "`plain`");
        assert_eq!(code_span("``x"), "``` ``x ```");
        assert_eq!(code_span("two\nlines"), "`two lines`");
    }

    #[test]
    fn test_code_fence() {
        assert_eq!(code_fence("reg add ..."), "```");
        assert_eq!(code_fence("has ``` inside"), "````");
    }
}
