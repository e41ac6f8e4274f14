//! Markdown summary, for pasting into issues or chat.

use quizbank_core::report::SessionReport;

/// Escape characters that would break a Markdown table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

pub fn generate_markdown(report: &SessionReport) -> String {
    let score = &report.score;
    let mut md = String::new();

    md.push_str("# Quiz results\n\n");
    md.push_str(&format!(
        "**Score:** {} / {} ({:.1}%)\n\n",
        score.total_correct,
        score.total_questions,
        score.percentage()
    ));
    if report.elapsed_secs > 0 {
        md.push_str(&format!("**Time:** {}\n\n", report.elapsed_display()));
    }

    md.push_str("## Score by theme\n\n");
    md.push_str("| Theme | Correct | Total |\n");
    md.push_str("|-------|---------|-------|\n");
    for theme in &score.per_theme {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            cell(theme.theme.label()),
            theme.correct,
            theme.total
        ));
    }

    if !score.wrong_entries.is_empty() {
        md.push_str("\n## Mistakes\n");
        for (i, entry) in score.wrong_entries.iter().enumerate() {
            md.push_str(&format!(
                "\n### {}. {} ({})\n\n",
                i + 1,
                entry.question_id,
                entry.theme
            ));
            md.push_str(&entry.question);
            md.push_str("\n\n");
            md.push_str(&format!("- Your answer: {}\n", entry.user_answer_text()));
            md.push_str(&format!("- Correct answer: {}\n", entry.correct_answer_text()));
            if !entry.explanation.is_empty() {
                md.push_str(&format!("\n> {}\n", entry.explanation.replace('\n', "\n> ")));
            }
        }
    }

    md
}
