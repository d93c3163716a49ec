//! Calculator orchestrator
//!
//! Owns the tree stack, the number being typed and the memory register, and
//! routes key presses between the input buffer, the frontend and the VM.
//!
//! State machine:
//!
//! ```text
//!   Idle ──digit──▶ Typing ──operator──▶ Idle
//!    ▲                 │
//!    │                 └──────=───────▶ ResultDisplayed ──digit──▶ Typing
//!    └──────── clear / mode change ◀────────┘
//! ```
//!
//! Example:
//! ```rust
//! use udcalc_core::Calculator;
//! use udcalc_parser::OpTag;
//!
//! let mut calc = Calculator::new();
//! calc.digit(2);
//! calc.operator(OpTag::Add);
//! calc.digit(3);
//! calc.operator(OpTag::Mul);
//! calc.digit(4);
//! let result = calc.evaluate().unwrap();
//! assert_eq!(calc.current_display_string(), "14");
//! assert_eq!(result.tree.pretty_print(), "2 + 3 * 4");
//! ```

mod entry;
mod modes;
mod stack;

use crate::error::CalcError;
use crate::event::Event;
use crate::listener::{Evaluation, ResultListener};
use crate::settings::CalculatorSettings;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::rc::Rc;
use udcalc_parser::{
    parse_expression, Frontend, FrontendContext, InputBuffer, Node, OpTag, ParseOptions,
};
use udcalc_types::{format_value, AngleUnit, Base, CalcMode, Domain, EntryStyle, ErrorKind, Value};
use udcalc_vm::{Compiler, Program, VM};

/// Where the calculator is in the typing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalcState {
    #[default]
    Idle,
    /// A number is being typed into the input buffer
    Typing,
    ResultDisplayed,
}

/// Everything an operator press may change, so a rejected press can be undone
struct Snapshot {
    context: FrontendContext,
    buffer: InputBuffer,
    state: CalcState,
    replace_x: bool,
}

pub struct Calculator {
    settings: CalculatorSettings,
    frontend: Frontend,
    context: FrontendContext,
    buffer: InputBuffer,
    state: CalcState,

    /// Value shown while nothing is being typed
    display: Value,
    memory: f64,
    last_evaluation: Option<Evaluation>,

    /// Set when Enter duplicated X; the next typed number replaces the copy
    replace_x: bool,

    listeners: Vec<Box<dyn ResultListener>>,
    vm: VM,
    rng: StdRng,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("tree_stack", &self.context.nodes())
            .field("buffer", &self.buffer)
            .field("display", &self.display)
            .field("memory", &self.memory)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_settings(CalculatorSettings::default())
    }

    pub fn with_mode(mode: CalcMode) -> Self {
        Self::with_settings(CalculatorSettings::default().with_mode(mode))
    }

    pub fn with_settings(settings: CalculatorSettings) -> Self {
        let domain = settings.mode.domain();
        Self {
            frontend: Frontend::default(),
            context: FrontendContext::new(
                settings.mode,
                settings.angle_unit,
                settings.entry_style,
            ),
            buffer: InputBuffer::new(settings.effective_base(), domain == Domain::Integer),
            state: CalcState::Idle,
            display: Value::zero(domain),
            memory: 0.0,
            last_evaluation: None,
            replace_x: false,
            listeners: Vec::new(),
            vm: VM::new(),
            rng: StdRng::from_entropy(),
            settings,
        }
    }

    /// Use a fixed seed for the Rand key
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Register a listener for completed evaluations
    pub fn add_listener(&mut self, listener: impl ResultListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Dispatch one input event. Returns the evaluation if the event
    /// completed one.
    pub fn handle(&mut self, event: Event) -> Option<Evaluation> {
        log::trace!("event {:?} in state {:?}", event, self.state);
        match event {
            Event::Digit(d) => {
                self.digit(d);
            }
            Event::DecimalPoint => self.decimal_point(),
            Event::Exponent => self.exponent(),
            Event::Operator(tag) => {
                self.operator(tag);
            }
            Event::Evaluate => return self.evaluate(),
            Event::Clear => self.clear(),
            Event::ClearEntry => self.clear_entry(),
            Event::ToggleSign => self.toggle_sign(),
            Event::Backspace => self.backspace(),
            Event::SetMode(mode) => self.set_mode(mode),
            Event::SetBase(base) => self.set_base(base),
            Event::SetAngleUnit(unit) => self.set_angle_unit(unit),
            Event::SetEntryStyle(style) => self.set_entry_style(style),
            Event::Memory(op) => self.memory(op),
            Event::Enter => return self.enter(),
            Event::Swap => {
                self.swap();
            }
            Event::Drop => {
                self.drop_x();
            }
            Event::RollDown => {
                self.roll_down();
            }
            Event::RollUp => {
                self.roll_up();
            }
            Event::Random => self.random(),
        }
        None
    }

    /// Apply an operator key. Returns `false` if the frontend rejected it, in
    /// which case nothing changed.
    pub fn operator(&mut self, tag: OpTag) -> bool {
        let snapshot = self.snapshot();
        if self.state == CalcState::Typing {
            self.commit_buffer();
        }

        match self.frontend.apply(tag, &mut self.context) {
            Ok(()) => {
                self.state = CalcState::Idle;
                self.replace_x = false;
                self.refresh_display();
                true
            }
            Err(e) => {
                log::debug!("'{}' ignored: {}", tag, e);
                self.restore(snapshot);
                false
            }
        }
    }

    /// The `=` key
    ///
    /// Algebraic entry reduces the whole expression and replaces it with the
    /// result, so further operators chain on it. RPN evaluates X and leaves
    /// the stack alone.
    pub fn evaluate(&mut self) -> Option<Evaluation> {
        let snapshot = self.snapshot();
        if self.state == CalcState::Typing {
            self.commit_buffer();
        }

        let root = match self.frontend.finish(&self.context) {
            Ok(root) => root,
            Err(e) => {
                log::debug!("'=' ignored: {}", e);
                self.restore(snapshot);
                return None;
            }
        };

        let value = match self.evaluate_tree(&root) {
            Ok(value) => value,
            Err(e) => {
                log::error!("evaluating '{}' failed: {}", root, e);
                self.restore(snapshot);
                return None;
            }
        };

        if self.settings.entry_style == EntryStyle::Algebraic {
            self.context.reset_to(Node::number(value));
        }
        Some(self.publish(value, root))
    }

    /// Parse, evaluate and publish a typed-out expression. Replaces the
    /// expression in progress with the result.
    pub fn evaluate_expression(&mut self, source: &str) -> Result<Evaluation, CalcError> {
        let options = ParseOptions::new(self.settings.mode, self.settings.angle_unit);
        let tree = parse_expression(source, options)?;
        let value = self.evaluate_tree(&tree)?;

        self.buffer.perform_clear_entry();
        self.context.reset_to(Node::number(value));
        Ok(self.publish(value, tree))
    }

    /// Compile a tree for the current mode
    pub fn compile_tree(&self, tree: &Node) -> Result<Program, CalcError> {
        let mut compiler = Compiler::new("<calc>", self.settings.mode.domain());
        Ok(compiler.compile(tree)?)
    }

    /// Compile and execute a tree without touching calculator state
    pub fn evaluate_tree(&mut self, tree: &Node) -> Result<Value, CalcError> {
        let program = self.compile_tree(tree)?;
        Ok(self.vm.execute(&program)?)
    }

    /// AC: reset everything except memory
    pub fn clear(&mut self) {
        self.context.clear();
        self.buffer.perform_clear_entry();
        self.state = CalcState::Idle;
        self.replace_x = false;
        self.last_evaluation = None;
        self.display = Value::zero(self.settings.mode.domain());
    }

    // ===== Queries =====

    /// Text for the main display
    pub fn current_display_string(&self) -> String {
        if self.state == CalcState::Typing {
            return self
                .buffer
                .display_string(self.settings.thousands_separators);
        }
        format_value(
            &self.display,
            self.settings.effective_base(),
            self.settings.thousands_separators,
            None,
        )
    }

    /// Value on the display, including a number still being typed
    pub fn display_value(&self) -> Value {
        match self.state {
            CalcState::Typing => self.buffer.peek_value(),
            CalcState::Idle | CalcState::ResultDisplayed => self.display,
        }
    }

    /// Values of the tree stack, X first. While typing, the typed number is X.
    pub fn current_stack_values(&self) -> Vec<Value> {
        let mut values = Vec::with_capacity(self.context.nodes().len() + 1);
        let mut nodes = self.context.nodes().iter().rev().peekable();

        if self.state == CalcState::Typing {
            values.push(self.buffer.peek_value());
            if self.replace_x {
                nodes.next();
            }
        }
        values.extend(nodes.map(|node| self.node_value(node)));
        values
    }

    pub fn tree_stack(&self) -> &[Rc<Node>] {
        self.context.nodes()
    }

    pub fn memory_value(&self) -> f64 {
        self.memory
    }

    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    pub fn mode(&self) -> CalcMode {
        self.settings.mode
    }

    /// Base used for entry and display
    pub fn base(&self) -> Base {
        self.settings.effective_base()
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.settings.angle_unit
    }

    pub fn entry_style(&self) -> EntryStyle {
        self.settings.entry_style
    }

    pub fn state(&self) -> CalcState {
        self.state
    }

    pub fn is_typing(&self) -> bool {
        self.state == CalcState::Typing
    }

    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last_evaluation.as_ref()
    }

    // ===== Internals =====

    /// Move the typed number onto the tree stack
    fn commit_buffer(&mut self) {
        let value = self.buffer.finalize_value();
        if self.replace_x {
            self.context.drop_top();
            self.replace_x = false;
        }
        self.frontend
            .push_operand(&mut self.context, Node::number(value));
        self.state = CalcState::Idle;
    }

    /// Push a finished value as an operand, discarding anything typed
    fn push_value(&mut self, value: Value) {
        if self.state == CalcState::Typing {
            self.buffer.perform_clear_entry();
        }
        if self.replace_x {
            self.context.drop_top();
            self.replace_x = false;
        }
        self.frontend
            .push_operand(&mut self.context, Node::number(value));
        self.state = CalcState::Idle;
        self.display = value;
    }

    /// Show the value of X, or zero when the stack is empty
    fn refresh_display(&mut self) {
        self.display = match self.context.top() {
            Some(node) => self.node_value(node),
            None => Value::zero(self.settings.mode.domain()),
        };
    }

    fn node_value(&self, node: &Node) -> Value {
        let result = self
            .compile_tree(node)
            .and_then(|program| udcalc_vm::run(&program).map_err(CalcError::from));
        match result {
            Ok(value) => value,
            Err(e) => {
                log::error!("evaluating '{}' failed: {}", node, e);
                Value::Error(ErrorKind::Unknown)
            }
        }
    }

    /// Record a result and notify listeners
    fn publish(&mut self, value: Value, tree: Rc<Node>) -> Evaluation {
        self.display = value;
        self.state = CalcState::ResultDisplayed;
        self.replace_x = false;

        let evaluation = Evaluation::new(value, tree);
        self.last_evaluation = Some(evaluation.clone());
        for listener in &mut self.listeners {
            if let Err(e) = listener.on_result(&evaluation.value, &evaluation.tree) {
                log::warn!("result listener failed: {:#}", e);
            }
        }
        evaluation
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            context: self.context.clone(),
            buffer: self.buffer.clone(),
            state: self.state,
            replace_x: self.replace_x,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.context = snapshot.context;
        self.buffer = snapshot.buffer;
        self.state = snapshot.state;
        self.replace_x = snapshot.replace_x;
    }
}
