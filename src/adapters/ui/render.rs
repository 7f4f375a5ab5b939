//! Plain-text rendering of analysis results for the terminal.
//!
//! Everything here comes from the service and is treated as untrusted: the summary HTML is
//! reduced to text, and control characters (terminal escape sequences) are removed from every
//! field. `<b>`/`<strong>` emphasis is re-applied as terminal bold only after sanitizing.

use crate::domain::AnalysisResult;
use crossterm::style::Stylize;

/// Tags that end a line of text.
const BREAK_TAGS: &[&str] = &["br", "p", "div", "li", "h1", "h2", "h3", "tr"];
const BOLD_TAGS: &[&str] = &["b", "strong"];

/// Run of summary text with uniform emphasis.
struct Span {
    text: String,
    bold: bool,
}

/// Drop control characters except newline and tab.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect()
}

/// Reduce an HTML fragment to plain text: tags removed, block tags become line breaks,
/// common entities decoded, whitespace collapsed per line.
pub fn plain_text(html: &str) -> String {
    render_html(html, false)
}

/// Same as `plain_text`, with bold tags rendered as terminal bold.
pub fn styled_text(html: &str) -> String {
    render_html(html, true)
}

fn render_html(html: &str, emphasize: bool) -> String {
    let text: String = scan(html)
        .into_iter()
        .map(|span| {
            let text = sanitize(&decode_entities(&span.text));
            if emphasize && span.bold {
                embolden(&text)
            } else {
                text
            }
        })
        .collect();

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bold the text, leaving surrounding whitespace unstyled.
fn embolden(text: &str) -> String {
    let (lead, rest) = text.split_at(text.len() - text.trim_start().len());
    let (core, trail) = rest.split_at(rest.trim_end().len());
    if core.is_empty() {
        return text.to_string();
    }
    format!("{}{}{}", lead, core.bold(), trail)
}

/// Split HTML into text spans. A `<` opens a tag only when followed by a letter, `/` or `!`;
/// otherwise, or when the tag is never closed, it is kept as text.
fn scan(html: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    let mut bold_depth = 0usize;
    let mut chars = html.chars().peekable();

    while let Some(ch) = chars.next() {
        let opens_tag = ch == '<'
            && chars
                .peek()
                .is_some_and(|&c| c.is_ascii_alphabetic() || c == '/' || c == '!');
        if !opens_tag {
            push_text(&mut spans, bold_depth > 0, &ch.to_string());
            continue;
        }

        let mut tag = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == '>' {
                closed = true;
                break;
            }
            tag.push(c);
        }
        if !closed {
            push_text(&mut spans, bold_depth > 0, &format!("<{}", tag));
            break;
        }

        let closing = tag.starts_with('/');
        let name = tag_name(&tag);
        if BREAK_TAGS.contains(&name.as_str()) {
            push_text(&mut spans, bold_depth > 0, "\n");
        }
        if BOLD_TAGS.contains(&name.as_str()) {
            if closing {
                bold_depth = bold_depth.saturating_sub(1);
            } else if !tag.ends_with('/') {
                bold_depth += 1;
            }
        }
    }
    spans
}

fn push_text(spans: &mut Vec<Span>, bold: bool, text: &str) {
    match spans.last_mut() {
        Some(last) if last.bold == bold => last.text.push_str(text),
        _ => spans.push(Span {
            text: text.to_string(),
            bold,
        }),
    }
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn decode_entities(text: &str) -> String {
    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Render all result sections, or nothing until a summary is present. With `emphasize`,
/// highlighted keywords in the summary are shown bold.
pub fn render_result(result: &AnalysisResult, emphasize: bool) -> Option<String> {
    if !result.is_displayable() {
        return None;
    }

    let sections = [
        ("Summary:", render_html(&result.summary_html, emphasize)),
        ("Bullet Points:", sanitize(&result.bullets)),
        ("FAQs:", sanitize(&result.faq)),
        ("Keywords:", sanitize(&result.keywords.join(", "))),
        ("Citations:", sanitize(&result.citations.join(", "))),
        (
            "Readability Score:",
            sanitize(&result.readability_score.to_string()),
        ),
    ];

    let mut out = String::new();
    for (heading, body) in sections {
        out.push_str(heading);
        out.push('\n');
        out.push_str(&body);
        out.push_str("\n\n");
    }
    Some(out.trim_end().to_string())
}

/// Render the answer section, or nothing while there is no answer.
pub fn render_answer(answer: &str) -> Option<String> {
    if answer.is_empty() {
        return None;
    }
    Some(format!("Answer:\n{}", sanitize(answer)))
}
