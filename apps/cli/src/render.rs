//! Plain-text rendering of the screen view-models.

use std::fmt::Write as _;

use client_core::views::{DeleteDecision, DeletePrompt, DetailView, PostRow};

pub fn list(rows: &[PostRow]) -> String {
    if rows.is_empty() {
        return "No posts.\n".to_string();
    }

    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "#{} {}", row.post_id, row.title);
        for line in row.body.lines() {
            let _ = writeln!(out, "    {line}");
        }
        if let Some(author) = &row.author {
            let _ = writeln!(out, "    by {author}");
        }
        let _ = writeln!(
            out,
            "    [details {}] [delete {}]",
            row.show_path, row.delete_path
        );
        out.push('\n');
    }
    out
}

pub fn detail(view: &DetailView) -> String {
    let mut out = String::from("Show Item\n");
    if !view.is_empty() {
        let _ = writeln!(out, "{}\n{}", view.title, view.body);
    }
    out
}

pub fn delete_prompt(prompt: &DeletePrompt, decision: DeleteDecision) -> String {
    let outcome = match decision {
        DeleteDecision::Confirm => "confirmed (logged only)",
        DeleteDecision::Cancel => "cancelled",
    };
    format!(
        "== {} ==\n{}\n[{outcome}]\n\n",
        prompt.heading, prompt.message
    )
}

pub fn not_found(path: &str) -> String {
    format!("Nothing here: {path}\n")
}
