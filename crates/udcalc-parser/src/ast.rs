//! Expression tree
//!
//! Nodes are immutable once built. Children are reference counted so the
//! calculator can keep a finished tree for the result listeners while the
//! tree stack moves on.

use crate::ops::{Associativity, OpInfo, Precedence};
use std::fmt;
use std::rc::Rc;
use udcalc_types::{format_double, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal typed or computed number
    Number(Value),
    /// Named constant such as π
    Constant { name: &'static str, value: Value },
    UnaryPrefix {
        op: &'static OpInfo,
        operand: Rc<Node>,
    },
    UnaryPostfix {
        op: &'static OpInfo,
        operand: Rc<Node>,
    },
    BinaryOp {
        op: &'static OpInfo,
        left: Rc<Node>,
        right: Rc<Node>,
    },
    FunctionCall { name: String, args: Vec<Rc<Node>> },
    /// Explicit parentheses typed by the user
    ParenWrap(Rc<Node>),
}

impl Node {
    pub fn number(value: impl Into<Value>) -> Rc<Node> {
        Rc::new(Node::Number(value.into()))
    }

    /// Precedence used to decide where parentheses are needed when printing
    pub fn precedence(&self) -> Precedence {
        match self {
            Node::Number(value) if is_negative(value) => Precedence::Function,
            Node::Number(_) | Node::Constant { .. } | Node::ParenWrap(_) => Precedence::Value,
            Node::UnaryPrefix { .. } | Node::UnaryPostfix { .. } | Node::FunctionCall { .. } => {
                Precedence::Function
            }
            Node::BinaryOp { op, .. } => op.precedence,
        }
    }

    /// Literal carried by a `Number` or `Constant`
    pub fn value_literal(&self) -> Option<Value> {
        match self {
            Node::Number(value) | Node::Constant { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn children(&self) -> Vec<&Rc<Node>> {
        match self {
            Node::Number(_) | Node::Constant { .. } => Vec::new(),
            Node::UnaryPrefix { operand, .. } | Node::UnaryPostfix { operand, .. } => {
                vec![operand]
            }
            Node::BinaryOp { left, right, .. } => vec![left, right],
            Node::FunctionCall { args, .. } => args.iter().collect(),
            Node::ParenWrap(inner) => vec![inner],
        }
    }

    /// Longest path from this node to a leaf, counting both ends
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }

    /// Render the tree with the minimal parentheses its shape requires
    pub fn pretty_print(&self) -> String {
        self.to_string()
    }
}

fn is_negative(value: &Value) -> bool {
    match value {
        Value::Double(d) => *d < 0.0,
        Value::Integer(i) => *i < 0,
        Value::Error(_) => false,
    }
}

/// Literal text that reads back as the same value. Finite doubles use the
/// shortest representation that round-trips.
fn literal_text(value: &Value) -> String {
    match value {
        Value::Double(d) if *d == 0.0 => "0".to_string(),
        Value::Double(d) if !d.is_finite() => format_double(*d, false, None),
        Value::Double(d) if (1e-9..1e16).contains(&d.abs()) => format!("{}", d),
        Value::Double(d) => format!("{:e}", d),
        Value::Integer(i) => i.to_string(),
        Value::Error(kind) => kind.message().to_string(),
    }
}

/// Write `child`, wrapped in parentheses when `wrap` holds
fn write_child(f: &mut fmt::Formatter<'_>, child: &Node, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => f.write_str(&literal_text(value)),
            Node::Constant { name, .. } => f.write_str(name),
            Node::UnaryPrefix { op, operand } => {
                f.write_str(op.symbol)?;
                write_child(f, operand, operand.precedence() < Precedence::Function)
            }
            Node::UnaryPostfix { op, operand } => {
                write_child(f, operand, operand.precedence() < Precedence::Value)?;
                f.write_str(op.symbol)
            }
            Node::BinaryOp { op, left, right } => {
                let (lp, rp) = (left.precedence(), right.precedence());
                let wrap_left = lp < op.precedence
                    || (lp == op.precedence && op.associativity != Associativity::Left);
                let wrap_right = rp < op.precedence
                    || (rp == op.precedence && op.associativity != Associativity::Right);
                write_child(f, left, wrap_left)?;
                write!(f, " {} ", op.symbol)?;
                write_child(f, right, wrap_right)
            }
            Node::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Node::ParenWrap(inner) => write!(f, "({})", inner),
        }
    }
}
