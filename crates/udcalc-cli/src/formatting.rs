//! Terminal output for reports

use crate::session::Report;
use nu_ansi_term::{Color, Style};
use std::fmt::Write;

/// How reports are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Plain,
    Color,
    Json,
}

impl OutputStyle {
    pub fn new(json: bool, color: bool) -> Self {
        if json {
            OutputStyle::Json
        } else if color {
            OutputStyle::Color
        } else {
            OutputStyle::Plain
        }
    }
}

pub fn render_report(report: &Report, style: OutputStyle) -> anyhow::Result<String> {
    if style == OutputStyle::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let paint = |s: Style, text: &str| match style {
        OutputStyle::Color => s.paint(text).to_string(),
        _ => text.to_string(),
    };

    let mut out = String::new();
    for line in &report.transcript {
        writeln!(out, "{}", paint(Color::DarkGray.normal(), &line.to_string()))?;
    }
    for (i, entry) in report.stack.iter().enumerate().skip(1).rev() {
        writeln!(out, "{}: {}", stack_label(i), entry)?;
    }

    let display_style = if report.value.is_error() {
        Color::Red.bold()
    } else {
        Color::Green.bold()
    };
    write!(out, "{}", paint(display_style, &report.display))?;
    Ok(out)
}

/// X, Y, Z, T, then numbered levels
fn stack_label(level: usize) -> String {
    match level {
        0 => "X".to_string(),
        1 => "Y".to_string(),
        2 => "Z".to_string(),
        3 => "T".to_string(),
        _ => format!("{}", level + 1),
    }
}

pub fn error_text(message: &str, style: OutputStyle) -> String {
    match style {
        OutputStyle::Color => Color::Red.paint(message).to_string(),
        _ => message.to_string(),
    }
}
