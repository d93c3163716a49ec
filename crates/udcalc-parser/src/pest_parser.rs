//! Text expression parser
//!
//! Reads an expression written the way [`Node::pretty_print`] writes it and
//! rebuilds the tree through the same operator registry the keypad frontend
//! uses.

use crate::ast::Node;
use crate::error::ParseError;
use crate::frontend::build_node;
use crate::ops::{OpInfo, OpRegistry, OpTag, Placement};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::rc::Rc;
use udcalc_types::{AngleUnit, CalcMode, Domain, ErrorKind, Value};

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct ExpressionParser;

/// Mode snapshot that decides literal domains and trig variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub mode: CalcMode,
    pub angle: AngleUnit,
}

impl ParseOptions {
    pub fn new(mode: CalcMode, angle: AngleUnit) -> Self {
        Self { mode, angle }
    }
}

/// Parse `source` into a tree
pub fn parse_expression(source: &str, options: ParseOptions) -> Result<Rc<Node>, ParseError> {
    let mut pairs = ExpressionParser::parse(Rule::expression, source)
        .map_err(|e| ParseError::Syntax(e.to_string()))?;
    let expression = pairs
        .next()
        .ok_or_else(|| ParseError::Syntax("empty input".to_string()))?;
    let sum = expression
        .into_inner()
        .next()
        .ok_or_else(|| ParseError::Syntax("empty expression".to_string()))?;

    let builder = TreeBuilder {
        registry: OpRegistry::global(),
        options,
    };
    builder.build_sum(sum)
}

struct TreeBuilder {
    registry: &'static OpRegistry,
    options: ParseOptions,
}

impl TreeBuilder {
    fn build_sum(&self, pair: Pair<Rule>) -> Result<Rc<Node>, ParseError> {
        self.fold_binary(pair, Rule::product)
    }

    fn build_product(&self, pair: Pair<Rule>) -> Result<Rc<Node>, ParseError> {
        self.fold_binary(pair, Rule::power)
    }

    /// Left fold of `operand (op operand)*`
    fn fold_binary(&self, pair: Pair<Rule>, operand: Rule) -> Result<Rc<Node>, ParseError> {
        let mut inner = pair.into_inner();
        let first = inner
            .next()
            .ok_or_else(|| ParseError::Syntax("missing operand".to_string()))?;
        let mut left = self.build_operand(first, operand)?;

        while let Some(op_pair) = inner.next() {
            let info = self.infix(op_pair.as_str())?;
            let right_pair = inner
                .next()
                .ok_or_else(|| ParseError::Syntax(format!("missing operand after '{}'", info.symbol)))?;
            let right = self.build_operand(right_pair, operand)?;
            left = self.build(info, &[left, right])?;
        }
        Ok(left)
    }

    fn build_operand(&self, pair: Pair<Rule>, expected: Rule) -> Result<Rc<Node>, ParseError> {
        match expected {
            Rule::product => self.build_product(pair),
            Rule::power => self.build_power(pair),
            other => Err(ParseError::Syntax(format!("unexpected rule {:?}", other))),
        }
    }

    fn build_power(&self, pair: Pair<Rule>) -> Result<Rc<Node>, ParseError> {
        let mut inner = pair.into_inner();
        let base_pair = inner
            .next()
            .ok_or_else(|| ParseError::Syntax("missing base".to_string()))?;
        let base = self.build_unary(base_pair)?;

        match inner.next() {
            Some(exponent_pair) => {
                let exponent = self.build_power(exponent_pair)?;
                let pow = self.registry.lookup(OpTag::Pow)?;
                self.build(pow, &[base, exponent])
            }
            None => Ok(base),
        }
    }

    fn build_unary(&self, pair: Pair<Rule>) -> Result<Rc<Node>, ParseError> {
        let mut prefixes = Vec::new();
        let mut operand = None;
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::prefix_op => prefixes.push(self.operator(Placement::Prefix, part.as_str())?),
                Rule::postfix => operand = Some(part),
                other => return Err(ParseError::Syntax(format!("unexpected {:?}", other))),
            }
        }
        let operand = operand.ok_or_else(|| ParseError::Syntax("missing operand".to_string()))?;

        // A minus written against a bare literal is the literal's sign, so
        // negative results (down to i64::MIN) read back as themselves
        let negated = match (prefixes.last(), bare_number(&operand)) {
            (Some(info), Some(text)) if info.tag == OpTag::Negate => {
                self.negative_literal(text)?
            }
            _ => None,
        };
        let mut node = match negated {
            Some(literal) => {
                prefixes.pop();
                literal
            }
            None => self.build_postfix(operand)?,
        };

        // innermost prefix applies first
        for info in prefixes.into_iter().rev() {
            node = self.build(info, &[node])?;
        }
        Ok(node)
    }

    /// `-text` as a single literal, or `None` when it is not negative (`-0`)
    fn negative_literal(&self, text: &str) -> Result<Option<Rc<Node>>, ParseError> {
        let node = self.build_number(&format!("-{}", text))?;
        let negative = match node.value_literal() {
            Some(Value::Double(d)) => d < 0.0,
            Some(Value::Integer(i)) => i < 0,
            _ => false,
        };
        Ok(negative.then_some(node))
    }

    fn build_postfix(&self, pair: Pair<Rule>) -> Result<Rc<Node>, ParseError> {
        let mut inner = pair.into_inner();
        let primary = inner
            .next()
            .ok_or_else(|| ParseError::Syntax("missing operand".to_string()))?;
        let mut node = self.build_primary(primary)?;
        for op_pair in inner {
            let info = self.operator(Placement::Postfix, op_pair.as_str())?;
            node = self.build(info, &[node])?;
        }
        Ok(node)
    }

    fn build_primary(&self, pair: Pair<Rule>) -> Result<Rc<Node>, ParseError> {
        let inner = pair
            .into_inner()
            .next()
            .ok_or_else(|| ParseError::Syntax("empty primary expression".to_string()))?;

        match inner.as_rule() {
            Rule::number => self.build_number(inner.as_str()),
            Rule::error_literal => ErrorKind::from_message(inner.as_str())
                .map(|kind| Rc::new(Node::Number(Value::Error(kind))))
                .ok_or_else(|| ParseError::InvalidNumber(inner.as_str().to_string())),
            Rule::call => self.build_call(inner),
            Rule::constant => {
                let tag = match inner.as_str() {
                    "e" => OpTag::ConstE,
                    _ => OpTag::ConstPi,
                };
                let info = self.registry.lookup(tag)?;
                self.build(info, &[])
            }
            Rule::group => {
                let sum = inner
                    .into_inner()
                    .next()
                    .ok_or_else(|| ParseError::Syntax("empty parentheses".to_string()))?;
                Ok(Rc::new(Node::ParenWrap(self.build_sum(sum)?)))
            }
            other => Err(ParseError::Syntax(format!("unexpected primary rule: {:?}", other))),
        }
    }

    fn build_number(&self, text: &str) -> Result<Rc<Node>, ParseError> {
        let value = match self.options.mode.domain() {
            Domain::Integer => text
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| ParseError::InvalidNumber(text.to_string()))?,
            Domain::Double => text
                .parse::<f64>()
                .map(Value::Double)
                .map_err(|_| ParseError::InvalidNumber(text.to_string()))?,
        };
        Ok(Rc::new(Node::Number(value)))
    }

    fn build_call(&self, pair: Pair<Rule>) -> Result<Rc<Node>, ParseError> {
        let mut inner = pair.into_inner();
        let name = inner
            .next()
            .ok_or_else(|| ParseError::Syntax("missing function name".to_string()))?
            .as_str();
        if self.registry.find_function(name).is_none() {
            return Err(ParseError::UnknownSymbol(name.to_string()));
        }

        let args = inner
            .map(|arg| self.build_sum(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Rc::new(Node::FunctionCall {
            name: self.registry.function_name(name, self.options.angle).to_string(),
            args,
        }))
    }

    fn infix(&self, symbol: &str) -> Result<&'static OpInfo, ParseError> {
        let normalized = match symbol {
            "×" => "*",
            "÷" => "/",
            other => other,
        };
        self.operator(Placement::Infix, normalized)
    }

    fn operator(&self, placement: Placement, symbol: &str) -> Result<&'static OpInfo, ParseError> {
        self.registry
            .find_symbol(placement, symbol)
            .ok_or_else(|| ParseError::UnknownSymbol(symbol.to_string()))
    }

    fn build(&self, info: &'static OpInfo, operands: &[Rc<Node>]) -> Result<Rc<Node>, ParseError> {
        Ok(build_node(self.registry, info, operands, self.options.mode, self.options.angle)?)
    }
}

/// The literal text of a `postfix` that is just a number
fn bare_number<'i>(postfix: &Pair<'i, Rule>) -> Option<&'i str> {
    let mut inner = postfix.clone().into_inner();
    let primary = inner.next()?;
    if inner.next().is_some() {
        return None;
    }
    let literal = primary.into_inner().next()?;
    (literal.as_rule() == Rule::number).then(|| literal.as_str())
}
