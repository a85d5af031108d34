//! Comment source builders: block and javadoc reformatting, line comments,
//! TODO markers and empty-comment classification.

use super::context::GeneratorContext;
use once_cell::sync::Lazy;
use regex::Regex;

/// A line carrying only whitespace and asterisk decoration (`*`, `**`, or
/// nothing at all).
static EMPTY_DECORATION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*\**[ \t]*$").expect("invalid decoration pattern"));

/// A line carrying only a comment delimiter (`/*`, `/**`, `*/`, `**/`).
static EMPTY_DELIMITER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*(/\*+|\*+/)[ \t]*$").expect("invalid delimiter pattern"));

/// Whether a comment line carries no narrative text.
pub fn is_empty_comment_line(line: &str) -> bool {
    EMPTY_DECORATION_LINE.is_match(line) || EMPTY_DELIMITER_LINE.is_match(line)
}

/// Whether a whole comment block carries no narrative text. Such a block is
/// eligible for stripping and regeneration instead of preservation.
pub fn is_empty_comment(block: &str) -> bool {
    block.lines().all(is_empty_comment_line)
}

/// Strips comment decoration from one line of an existing comment.
fn narrative_of(line: &str) -> &str {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix("/**").unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix("/*").unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("*/").unwrap_or(trimmed);
    trimmed.trim_start_matches('*').trim()
}

/// Reformat arbitrary multi-line text into a canonical block comment,
/// line by line. Lines that are empty decoration artifacts are skipped;
/// malformed lines degrade to their trimmed text, never failing the block.
pub fn block_comment(text: &str, ctx: &GeneratorContext) -> String {
    reformat(text, "/*", ctx)
}

/// Reformat arbitrary multi-line text into a canonical javadoc comment.
pub fn javadoc_comment(text: &str, ctx: &GeneratorContext) -> String {
    reformat(text, "/**", ctx)
}

fn reformat(text: &str, opener: &str, ctx: &GeneratorContext) -> String {
    let nl = ctx.line_delimiter.as_str();
    let mut out = String::from(opener);
    out.push_str(nl);
    for line in text.lines() {
        if is_empty_comment_line(line) {
            continue;
        }
        out.push_str(" * ");
        out.push_str(narrative_of(line));
        out.push_str(nl);
    }
    out.push_str(" */");
    out
}

/// Render text as single-line comments, one per input line.
pub fn line_comment(text: &str, ctx: &GeneratorContext) -> String {
    let nl = ctx.line_delimiter.as_str();
    text.lines()
        .map(|l| format!("// {}", l.trim()))
        .collect::<Vec<_>>()
        .join(nl)
}

/// A TODO marker, tagged with the invoking user when the context knows one.
pub fn todo_comment(message: &str, ctx: &GeneratorContext) -> String {
    match &ctx.todo_user {
        Some(user) => format!("// TODO [{}] {}", user, message),
        None => format!("// TODO {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GeneratorContext {
        GeneratorContext::new("test")
    }

    #[test]
    fn test_empty_javadoc_detection() {
        assert!(is_empty_comment("/**\n *\n */"));
        assert!(is_empty_comment("/** \n * \t \n **/"));
        assert!(is_empty_comment("\t/**\n\t *\n\t */"));
        assert!(!is_empty_comment("/**\n * Some narrative.\n */"));
        assert!(!is_empty_comment("/* inline */"));
    }

    #[test]
    fn test_reformat_skips_decoration_lines() {
        let out = javadoc_comment("/**\n * First line.\n *\n * Second line.\n */", &ctx());
        assert_eq!(out, "/**\n * First line.\n * Second line.\n */");
    }

    #[test]
    fn test_reformat_plain_text() {
        let out = block_comment("one\ntwo", &ctx());
        assert_eq!(out, "/*\n * one\n * two\n */");
    }

    #[test]
    fn test_todo_comment_user_tag() {
        assert_eq!(
            todo_comment("verify mapping", &ctx().with_todo_user("jd")),
            "// TODO [jd] verify mapping"
        );
        assert_eq!(todo_comment("verify mapping", &ctx()), "// TODO verify mapping");
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(line_comment("a\nb", &ctx()), "// a\n// b");
    }
}
