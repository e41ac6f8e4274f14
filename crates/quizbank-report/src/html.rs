//! HTML results page.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use quizbank_core::model::Theme;
use quizbank_core::report::SessionReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render question text for display.
///
/// Fenced blocks (```` ```code``` ````) become `<pre><code>` tagged with the
/// theme's language, and `` `inline` `` spans become `<code>`. Everything
/// else is escaped.
pub fn format_text(text: &str, theme: &Theme) -> String {
    if !text.contains("```") {
        return format_inline(text);
    }

    let language = theme.code_language();
    let segments: Vec<&str> = text.split("```").collect();
    let last = segments.len() - 1;
    let mut html = String::new();

    for (i, segment) in segments.iter().enumerate() {
        let inside_fence = i % 2 == 1;
        // An odd number of fences leaves the final one unclosed.
        let unclosed = inside_fence && i == last;

        if inside_fence && !unclosed {
            html.push_str(&format!(
                "<pre class=\"language-{language}\"><code class=\"language-{language}\">{}</code></pre>",
                html_escape(segment.trim())
            ));
        } else {
            if unclosed {
                html.push_str("```");
            }
            html.push_str(&format_inline(segment));
        }
    }
    html
}

fn format_inline(text: &str) -> String {
    let escaped = html_escape(text);
    let mut html = String::with_capacity(escaped.len());
    let mut rest = escaped.as_str();

    while let Some(start) = rest.find('`') {
        let after = &rest[start + 1..];
        match after.find('`') {
            Some(end) if end > 0 => {
                html.push_str(&rest[..start]);
                html.push_str("<code>");
                html.push_str(&after[..end]);
                html.push_str("</code>");
                rest = &after[end + 1..];
            }
            // "``" is not a span; keep the first tick and retry from the second.
            Some(_) => {
                html.push_str(&rest[..=start]);
                rest = after;
            }
            None => break,
        }
    }
    html.push_str(rest);
    html
}

fn theme_class(theme: &Theme) -> &'static str {
    match theme {
        Theme::Databases => "theme-sql",
        Theme::Html => "theme-html",
        Theme::Css => "theme-css",
        Theme::JavaScript => "theme-js",
        Theme::Php => "theme-php",
        Theme::Other(_) => "theme-other",
    }
}

/// Generate the results page for a finished quiz.
pub fn generate_html(report: &SessionReport) -> String {
    let score = &report.score;
    let themes: Vec<&str> = report.quiz.themes.iter().map(Theme::label).collect();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>quizbank results</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Quiz results</h1>\n");
    let level = report
        .quiz
        .level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());
    html.push_str(&format!(
        "<p class=\"meta\">Themes: <strong>{}</strong> | Level: {} | {}</p>\n",
        html_escape(&themes.join(", ")),
        html_escape(&level),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str(&format!(
        "<p class=\"score\" id=\"final-score\">{} / {}</p>\n",
        score.total_correct, score.total_questions
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{:.1}% | Finished in {} | {} skipped</p>\n",
        score.percentage(),
        report.elapsed_display(),
        report.skipped
    ));
    if report.quiz.delivered < report.quiz.requested {
        html.push_str(&format!(
            "<p class=\"notice\">Only {} of the {} requested questions were available.</p>\n",
            report.quiz.delivered, report.quiz.requested
        ));
    }

    html.push_str("<h2>Score by theme</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Theme</th><th>Correct</th><th>Total</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for theme in &score.per_theme {
        let class = if theme.correct == theme.total {
            "pass"
        } else {
            "fail"
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td><span class=\"badge {}\">{}</span></td><td>{}</td><td>{}</td></tr>\n",
            class,
            theme_class(&theme.theme),
            html_escape(theme.theme.label()),
            theme.correct,
            theme.total
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Mistakes
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Mistakes</h2>\n");
    if score.wrong_entries.is_empty() {
        html.push_str("<p>No mistakes.</p>\n");
    }
    for entry in &score.wrong_entries {
        html.push_str(&format!(
            "<div class=\"wrong\" id=\"q-{}\">\n",
            html_escape(&entry.question_id)
        ));
        html.push_str(&format!(
            "<div class=\"question\"><span class=\"badge {}\">{}</span> {}</div>\n",
            theme_class(&entry.theme),
            html_escape(entry.theme.label()),
            format_text(&entry.question, &entry.theme)
        ));
        html.push_str(&format!(
            "<p class=\"yours\"><strong>Your answer:</strong> {}</p>\n",
            format_text(&entry.user_answer_text(), &entry.theme)
        ));
        html.push_str(&format!(
            "<p class=\"expected\"><strong>Correct answer:</strong> {}</p>\n",
            format_text(&entry.correct_answer_text(), &entry.theme)
        ));
        if !entry.explanation.is_empty() {
            html.push_str(&format!(
                "<p class=\"explanation\"><em>{}</em></p>\n",
                format_text(&entry.explanation, &entry.theme)
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write the results page to a file.
pub fn write_html_report(report: &SessionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #0f172a; --fg: #f9fafb; --border: #334155; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 2.5rem; font-weight: bold; margin: 0.5rem 0; }
.notice { color: #b45309; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.badge { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 999px; color: #fff; font-size: 0.8rem; }
.theme-html { background: #dc2626; }
.theme-css { background: #2563eb; }
.theme-js { background: #ca8a04; }
.theme-php { background: #4f46e5; }
.theme-sql { background: #16a34a; }
.theme-other { background: #64748b; }
.wrong { border: 1px solid var(--border); border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.question { font-weight: bold; margin-bottom: 0.5rem; }
.yours { color: #dc2626; }
.expected { color: #16a34a; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizbank_core::scoring::{ScoreReport, ThemeScore, WrongEntry};

    fn make_test_report() -> SessionReport {
        SessionReport::from_score(ScoreReport {
            total_correct: 1,
            total_questions: 2,
            per_theme: vec![ThemeScore {
                theme: Theme::Html,
                correct: 1,
                total: 2,
            }],
            wrong_entries: vec![WrongEntry {
                question_id: "html-7".into(),
                theme: Theme::Html,
                question: "Which tag embeds a `<script>`?".into(),
                user_answer: None,
                correct_answer: vec!["<script>".into()],
                explanation: "```<script src=\"app.js\"></script>```".into(),
            }],
        })
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("1 / 2"));
        assert!(html.contains("q-html-7"));
        assert!(html.contains("(no answer)"));
        assert!(html.contains("theme-html"));
    }

    #[test]
    fn question_text_is_escaped() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("<code>&lt;script&gt;</code>"));
        assert!(!html.contains("<script src"));
    }

    #[test]
    fn fenced_blocks_use_theme_language() {
        let html = format_text("Run:\n```\nSELECT * FROM t;\n```\ndone", &Theme::Databases);
        assert_eq!(
            html,
            "Run:\n<pre class=\"language-sql\"><code class=\"language-sql\">SELECT * FROM t;</code></pre>\ndone"
        );
    }

    #[test]
    fn unclosed_fence_stays_text() {
        let html = format_text("a ```b", &Theme::Css);
        assert_eq!(html, "a ```b");
    }

    #[test]
    fn inline_code_spans() {
        assert_eq!(
            format_text("use `let` or `const`", &Theme::JavaScript),
            "use <code>let</code> or <code>const</code>"
        );
        assert_eq!(format_text("empty `` tick", &Theme::JavaScript), "empty `` tick");
        assert_eq!(format_text("``x`", &Theme::Php), "`<code>x</code>");
        assert_eq!(format_text("a < b", &Theme::Php), "a &lt; b");
        assert_eq!(format_text("", &Theme::Php), "");
    }

    #[test]
    fn shortfall_notice() {
        let mut report = make_test_report();
        report.quiz.requested = 20;
        let html = generate_html(&report);
        assert!(html.contains("Only 2 of the 20 requested questions were available."));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
