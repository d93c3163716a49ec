//! Interactive keystroke session

use crate::formatting::{error_text, render_report, OutputStyle};
use crate::repl_helper::ReplHelper;
use crate::session::Session;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::fmt::Write;
use std::path::PathBuf;

const HELP: &str = "\
Type keys separated by spaces, e.g. `2 + 3 * 4 =` or `5 enter 3 +`.

  digits . ee +/- bs      number entry (hex digits in hex base)
  + - * / ^ % ! ( )       operators; also names like sqrt, sin, and, shl
  = enter                 evaluate / RPN enter
  c ac                    clear entry / clear all
  swap drop rdn rup       RPN stack
  m+ m- mr mc rand        memory and random number
  basic scientific programmer   modes
  bin oct dec hex deg rad rpn algebraic   settings

  :eval <expr>   evaluate a typed-out expression
  :stack :tape :clear-tape :help :quit";

/// What the REPL does after a line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplAction {
    Print(String),
    Quit,
}

pub fn run(session: &mut Session, style: OutputStyle, debug_bytecode: bool) -> anyhow::Result<()> {
    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    let history = history_path();
    if let Some(path) = &history {
        if rl.load_history(path).is_err() {
            log::debug!("no history at {}", path.display());
        }
    }

    let calc = session.calculator();
    println!(
        "udcalc {} ({} mode, {} entry). Type :help for help.",
        env!("CARGO_PKG_VERSION"),
        calc.mode(),
        calc.entry_style()
    );

    loop {
        let prompt = format!("{}> ", session.calculator().mode());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = rl.add_history_entry(line) {
                    log::warn!("cannot record history: {}", e);
                }

                match handle_line(session, line, style, debug_bytecode) {
                    Ok(ReplAction::Print(text)) => println!("{}", text),
                    Ok(ReplAction::Quit) => break,
                    Err(e) => eprintln!("{}", error_text(&format!("{:#}", e), style)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        rl.save_history(path)?;
    }
    Ok(())
}

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("udcalc").join("history.txt"))
}

/// Run one REPL line: a command or a keystroke script
pub fn handle_line(
    session: &mut Session,
    line: &str,
    style: OutputStyle,
    debug_bytecode: bool,
) -> anyhow::Result<ReplAction> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        ":quit" | ":q" => return Ok(ReplAction::Quit),
        ":help" => return Ok(ReplAction::Print(HELP.to_string())),
        ":tape" => {
            let report = session.report();
            let lines: Vec<String> = report.transcript.iter().map(|l| l.to_string()).collect();
            return Ok(ReplAction::Print(lines.join("\n")));
        }
        ":clear-tape" => {
            session.clear_transcript();
            return Ok(ReplAction::Print(String::new()));
        }
        ":stack" => {
            let calc = session.calculator();
            let values: Vec<String> = calc
                .current_stack_values()
                .iter()
                .map(|value| {
                    udcalc_types::format_value(
                        value,
                        calc.base(),
                        calc.settings().thousands_separators,
                        None,
                    )
                })
                .collect();
            return Ok(ReplAction::Print(values.join("\n")));
        }
        ":eval" => {
            let evaluation = session.eval(rest)?;
            return print_evaluations(session, &[evaluation], style, debug_bytecode);
        }
        _ => {}
    }

    let evaluations = session.run_keys(line)?;
    print_evaluations(session, &evaluations, style, debug_bytecode)
}

fn print_evaluations(
    session: &Session,
    evaluations: &[udcalc_core::Evaluation],
    style: OutputStyle,
    debug_bytecode: bool,
) -> anyhow::Result<ReplAction> {
    let mut out = String::new();
    if debug_bytecode {
        for evaluation in evaluations {
            write!(out, "{}", session.bytecode(evaluation)?)?;
        }
    }

    // only this line's results, not the whole tape
    let calc = session.calculator();
    let mut report = session.report();
    report.transcript = evaluations
        .iter()
        .map(|e| e.transcript_line(calc.base(), calc.settings().thousands_separators))
        .collect();
    out.push_str(&render_report(&report, style)?);
    Ok(ReplAction::Print(out))
}
