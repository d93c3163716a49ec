use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

use crate::keys;
use nu_ansi_term::Color;

/// REPL commands that are not calculator keys
pub const REPL_COMMANDS: &[&str] = &[":help", ":quit", ":stack", ":tape", ":clear-tape", ":eval"];

pub struct ReplHelper {
    names: Vec<&'static str>,
}

impl ReplHelper {
    pub fn new() -> Self {
        let mut names: Vec<&'static str> = keys::key_names()
            .chain(REPL_COMMANDS.iter().copied())
            .collect();
        names.sort_unstable();
        names.dedup();
        Self { names }
    }

    /// Prefix matches first, then close misspellings
    pub fn candidates(&self, word: &str) -> Vec<&'static str> {
        if word.is_empty() {
            return vec![];
        }

        let word_lower = word.to_lowercase();
        let mut matches: Vec<(f64, &'static str)> = self
            .names
            .iter()
            .filter_map(|&name| {
                if name.starts_with(&word_lower) {
                    Some((1.0, name))
                } else {
                    let score = strsim::jaro_winkler(name, &word_lower);
                    (score > 0.8).then_some((score * 0.8, name))
                }
            })
            .collect();

        matches.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        matches.into_iter().map(|(_, name)| name).collect()
    }
}

impl Default for ReplHelper {
    fn default() -> Self {
        Self::new()
    }
}

/// Start of the token under the cursor
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .rfind(char::is_whitespace)
        .map(|i| i + 1)
        .unwrap_or(0)
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = word_start(line, pos);
        let pairs = self
            .candidates(&line[start..pos])
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }
        let word = &line[word_start(line, pos)..pos];
        self.names
            .iter()
            .find(|name| word.len() >= 2 && name.starts_with(word) && name.len() > word.len())
            .map(|name| name[word.len()..].to_string())
    }
}

impl Highlighter for ReplHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(Color::DarkGray.paint(hint).to_string())
    }
}

impl Validator for ReplHelper {}
