use clap::{Args, Parser, Subcommand};
use udcalc_core::CalculatorSettings;
use udcalc_types::{AngleUnit, Base, CalcMode, EntryStyle};

mod formatting;
mod keys;
mod repl;
mod repl_helper;
mod session;

use formatting::{render_report, OutputStyle};
use session::Session;

/// UDCalc - keystroke-driven calculator
#[derive(Parser)]
#[command(name = "udcalc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Calculator with algebraic and RPN entry", long_about = "UDCalc\n\nDrives the calculator core from the command line:\n  - Keystroke scripts, exactly as typed on the keypad\n  - Typed-out expressions\n  - An interactive REPL with a paper tape")]
struct Cli {
    /// Expression to evaluate
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    input: Option<String>,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Show disassembled bytecode of every evaluation
    #[arg(long, global = true)]
    debug_bytecode: bool,

    /// Print display, value, stack and tape as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SettingsArgs {
    /// Calculator mode: basic, scientific or programmer
    #[arg(long, global = true, value_name = "MODE", default_value_t = CalcMode::Scientific)]
    mode: CalcMode,

    /// Programmer-mode base: bin, oct, dec or hex
    #[arg(long, global = true, value_name = "BASE", default_value_t = Base::Dec)]
    base: Base,

    /// Trigonometry in degrees instead of radians
    #[arg(long, global = true)]
    degrees: bool,

    /// Reverse Polish entry
    #[arg(long, global = true)]
    rpn: bool,

    /// Group digits with thousands separators
    #[arg(long, global = true)]
    separators: bool,
}

impl SettingsArgs {
    fn to_settings(&self) -> CalculatorSettings {
        let angle_unit = if self.degrees {
            AngleUnit::Degrees
        } else {
            AngleUnit::Radians
        };
        let entry_style = if self.rpn {
            EntryStyle::Rpn
        } else {
            EntryStyle::Algebraic
        };

        CalculatorSettings::default()
            .with_mode(self.mode)
            .with_base(self.base)
            .with_angle_unit(angle_unit)
            .with_entry_style(entry_style)
            .with_thousands_separators(self.separators)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a keystroke script, e.g. `2 + 3 * 4 =`
    Keys {
        /// Keys, separated by spaces
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        script: Vec<String>,
    },
    /// Evaluate a typed-out expression
    Eval {
        /// Expression to evaluate
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Start an interactive session
    Repl,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut session = Session::new(cli.settings.to_settings());
    let style = OutputStyle::new(cli.json, false);
    log::debug!("settings: {:?}", session.calculator().settings());

    match cli.command {
        Some(Commands::Keys { script }) => {
            keys_command(&mut session, &script.join(" "), style, cli.debug_bytecode)
        }
        Some(Commands::Eval { expression }) => {
            eval_command(&mut session, &expression, style, cli.debug_bytecode)
        }
        Some(Commands::Repl) => {
            repl::run(&mut session, OutputStyle::new(cli.json, true), cli.debug_bytecode)
        }
        None => match cli.input {
            Some(input) => eval_command(&mut session, &input, style, cli.debug_bytecode),
            None => anyhow::bail!(
                "no input provided\n\nUsage: udcalc <COMMAND> or udcalc <EXPR>\n\nTry 'udcalc --help' for more information."
            ),
        },
    }
}

fn keys_command(
    session: &mut Session,
    script: &str,
    style: OutputStyle,
    debug_bytecode: bool,
) -> anyhow::Result<()> {
    let evaluations = session.run_keys(script)?;
    if debug_bytecode {
        for evaluation in &evaluations {
            print!("{}", session.bytecode(evaluation)?);
        }
    }
    println!("{}", render_report(&session.report(), style)?);
    Ok(())
}

fn eval_command(
    session: &mut Session,
    expression: &str,
    style: OutputStyle,
    debug_bytecode: bool,
) -> anyhow::Result<()> {
    let evaluation = session.eval(expression)?;
    if debug_bytecode {
        print!("{}", session.bytecode(&evaluation)?);
    }
    println!("{}", render_report(&session.report(), style)?);
    Ok(())
}
