use std::sync::OnceLock;

use chrono::{DateTime, NaiveDateTime};
use ratatui::{prelude::*, widgets::*};
use regex::Regex;

use crate::constants::EXCERPT_MAX_CHARS;
use crate::models::PostStatus;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"))
}

fn block_break_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</p\s*>|</h[1-6]\s*>|</li\s*>|</div\s*>")
            .expect("valid break regex")
    })
}

fn blank_lines_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n(\s*\n)+").expect("valid blank line regex"))
}

/// Decode the handful of entities a rich-text editor emits
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Plain text of HTML post content on a single line
pub fn strip_html(html: &str) -> String {
    let text = tag_regex().replace_all(html, " ");
    let text = decode_entities(&text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain text of HTML post content, keeping paragraph breaks
pub fn html_to_text(html: &str) -> String {
    let text = block_break_regex().replace_all(html, "\n");
    let text = tag_regex().replace_all(&text, "");
    let text = decode_entities(&text);
    let text = blank_lines_regex().replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// List excerpt: plain text, cut to the last whole word within the limit
pub fn create_excerpt(content: &str) -> String {
    let text = strip_html(content);
    if text.chars().count() <= EXCERPT_MAX_CHARS {
        return text;
    }
    let head: String = text.chars().take(EXCERPT_MAX_CHARS).collect();
    let mut words: Vec<&str> = head.split(' ').collect();
    words.pop();
    format!("{}...", words.join(" "))
}

/// Backend timestamps as `May 1, 2024`; unparseable input is shown as-is
pub fn format_date(timestamp: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format("%B %-d, %Y").to_string();
    }
    match NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format("%B %-d, %Y").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Renders tabs
pub fn render_tabs<'a>(titles: Vec<String>, selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.into_iter().map(Line::from).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Status badge color
pub fn status_color(status: Option<PostStatus>) -> Color {
    match status {
        Some(PostStatus::Draft) => Color::Magenta,
        Some(PostStatus::Published) => Color::Green,
        None => Color::DarkGray,
    }
}

/// Pagination footer, e.g. `< Page 2 of 5 >`
pub fn pagination_line(page: u32, total_pages: u32) -> Line<'static> {
    let prev = if page > 1 { "< " } else { "  " };
    let next = if page < total_pages { " >" } else { "  " };
    Line::from(vec![
        Span::styled(prev, Style::default().fg(Color::Cyan)),
        Span::raw(format!("Page {} of {}", page, total_pages)),
        Span::styled(next, Style::default().fg(Color::Cyan)),
    ])
    .centered()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_excerpt_is_plain_text() {
        let html = "<p>Hello <strong>world</strong> &amp; friends</p>";
        assert_eq!(create_excerpt(html), "Hello world & friends");
    }

    #[test]
    fn test_long_excerpt_cut_at_word() {
        let words = "lorem ".repeat(60);
        let excerpt = create_excerpt(&format!("<p>{}</p>", words));
        assert!(excerpt.ends_with("lorem..."));
        assert!(excerpt.chars().count() <= EXCERPT_MAX_CHARS + 3);
        assert!(!excerpt.contains("  "));
    }

    #[test]
    fn test_html_to_text_keeps_paragraphs() {
        let html = "<h1>Title</h1><p>One<br>Two</p><p></p><p>Three</p>";
        assert_eq!(html_to_text(html), "Title\nOne\nTwo\n\nThree");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-05-01T10:00:00"), "May 1, 2024");
        assert_eq!(format_date("2023-12-24T08:30:00.123456"), "December 24, 2023");
        assert_eq!(format_date("2024-02-03T00:00:00Z"), "February 3, 2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
