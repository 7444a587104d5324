//! Colored terminal output helpers.

use colored::{Color, Colorize};
use quiz_core::{Quiz, QuizId};
use std::fmt::Display;
use std::io::{self, Write};

pub fn print_line(out: &mut impl Write, message: impl Display) -> io::Result<()> {
    writeln!(out, "{message}")
}

pub fn print_error(out: &mut impl Write, message: impl Display) -> io::Result<()> {
    writeln!(out, "{} {}", "Error:".red().bold(), message.to_string().red())
}

/// Emphasized one-line banner, used for verdicts and final scores.
pub fn print_banner(out: &mut impl Write, message: impl Display, color: Color) -> io::Result<()> {
    writeln!(out, "  {}", message.to_string().to_uppercase().color(color).bold())
}

pub fn id_tag(id: QuizId) -> String {
    format!("[{}]", id.to_string().magenta())
}

pub fn quiz_line(quiz: &Quiz) -> String {
    format!(
        " {}:  {} {} {}",
        id_tag(quiz.id),
        quiz.question,
        "=>".magenta(),
        quiz.answer
    )
}

pub fn prompt_label(text: &str) -> String {
    format!(" {} ", text.red())
}
