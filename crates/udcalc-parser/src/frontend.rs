//! Incremental tree builder
//!
//! The frontend turns operator key presses into tree nodes. Operands are
//! pushed onto the tree stack as they are completed; operators either apply
//! immediately (RPN, unary functions, constants) or wait on the pending
//! stack until precedence allows them to reduce (algebraic infix entry).
//!
//! Every operation works on a scratch copy of the [`FrontendContext`] and only
//! commits it on success, so a rejected key press never leaves a half-built
//! tree behind.

use crate::ast::Node;
use crate::error::FrontendError;
use crate::ops::{Associativity, BuildRule, OpInfo, OpRegistry, OpTag};
use std::rc::Rc;
use udcalc_types::{AngleUnit, CalcMode, EntryStyle, Value};

/// Entry on the algebraic pending stack
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pending {
    Operator(&'static OpInfo),
    /// An open parenthesis; reductions never cross it
    Boundary,
}

/// Tree stack plus the mode snapshot it was built under
#[derive(Debug, Clone, PartialEq)]
pub struct FrontendContext {
    nodes: Vec<Rc<Node>>,
    pending: Vec<Pending>,
    mode: CalcMode,
    angle: AngleUnit,
    style: EntryStyle,
}

impl FrontendContext {
    pub fn new(mode: CalcMode, angle: AngleUnit, style: EntryStyle) -> Self {
        Self {
            nodes: Vec::new(),
            pending: Vec::new(),
            mode,
            angle,
            style,
        }
    }

    pub fn nodes(&self) -> &[Rc<Node>] {
        &self.nodes
    }

    pub fn pending(&self) -> &[Pending] {
        &self.pending
    }

    pub fn mode(&self) -> CalcMode {
        self.mode
    }

    pub fn angle(&self) -> AngleUnit {
        self.angle
    }

    pub fn style(&self) -> EntryStyle {
        self.style
    }

    /// Top of the tree stack (the X register in RPN)
    pub fn top(&self) -> Option<&Rc<Node>> {
        self.nodes.last()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.pending.is_empty()
    }

    /// Drop everything built so far
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.pending.clear();
    }

    /// Replace the whole context with a single operand
    pub fn reset_to(&mut self, node: Rc<Node>) {
        self.clear();
        self.nodes.push(node);
    }

    /// Open parentheses not yet closed
    pub fn open_parens(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| matches!(p, Pending::Boundary))
            .count()
    }

    /// True when the next thing typed must be an operand: at the start, after
    /// a binary operator, or right after an open parenthesis.
    pub fn awaiting_operand(&self) -> bool {
        let operators = self
            .pending
            .iter()
            .filter(|p| matches!(p, Pending::Operator(_)))
            .count();
        self.nodes.len() <= operators
    }

    // ===== RPN stack manipulation =====

    pub fn duplicate_top(&mut self) -> bool {
        match self.nodes.last().cloned() {
            Some(top) => {
                self.nodes.push(top);
                true
            }
            None => false,
        }
    }

    pub fn swap_top(&mut self) -> bool {
        let len = self.nodes.len();
        if len < 2 {
            return false;
        }
        self.nodes.swap(len - 1, len - 2);
        true
    }

    pub fn drop_top(&mut self) -> Option<Rc<Node>> {
        self.nodes.pop()
    }

    /// Rotate so X moves to the bottom of the stack
    pub fn roll_down(&mut self) -> bool {
        if self.nodes.len() < 2 {
            return false;
        }
        self.nodes.rotate_right(1);
        true
    }

    /// Rotate so the bottom of the stack becomes X
    pub fn roll_up(&mut self) -> bool {
        if self.nodes.len() < 2 {
            return false;
        }
        self.nodes.rotate_left(1);
        true
    }
}

/// Builds trees from key presses using the operator registry
#[derive(Debug, Clone, Copy)]
pub struct Frontend {
    registry: &'static OpRegistry,
}

impl Default for Frontend {
    fn default() -> Self {
        Self::new(OpRegistry::global())
    }
}

impl Frontend {
    pub fn new(registry: &'static OpRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'static OpRegistry {
        self.registry
    }

    /// Apply an operator key. On error the context is unchanged.
    pub fn apply(&self, tag: OpTag, ctx: &mut FrontendContext) -> Result<(), FrontendError> {
        let info = self.registry.lookup(tag)?;
        if !info.is_available(ctx.mode) {
            return Err(FrontendError::OperatorUnavailable {
                op: info.symbol,
                context: format!("{} mode", ctx.mode),
            });
        }

        let mut next = ctx.clone();
        match info.rule {
            BuildRule::Group => self.apply_group(info, &mut next)?,
            _ if info.is_binary() && ctx.style == EntryStyle::Algebraic => {
                self.apply_infix(info, &mut next)?
            }
            _ => self.apply_immediate(info, &mut next)?,
        }
        *ctx = next;
        Ok(())
    }

    /// Push a completed operand. In algebraic entry an operand nobody is
    /// waiting for is replaced, so typing a number after a result starts over.
    pub fn push_operand(&self, ctx: &mut FrontendContext, node: Rc<Node>) {
        if ctx.style == EntryStyle::Algebraic && !ctx.awaiting_operand() {
            ctx.nodes.pop();
        }
        ctx.nodes.push(node);
    }

    /// Reduce everything and return the root. In RPN the root is X.
    pub fn finish(&self, ctx: &FrontendContext) -> Result<Rc<Node>, FrontendError> {
        if ctx.nodes.is_empty() {
            return Err(FrontendError::EmptyExpression);
        }
        if ctx.style == EntryStyle::Rpn {
            return ctx
                .nodes
                .last()
                .cloned()
                .ok_or(FrontendError::EmptyExpression);
        }
        if ctx.awaiting_operand() {
            return Err(FrontendError::IncompleteExpression);
        }

        let mut scratch = ctx.clone();
        while let Some(pending) = scratch.pending.last().copied() {
            match pending {
                Pending::Operator(_) => self.reduce_one(&mut scratch)?,
                Pending::Boundary => {
                    scratch.pending.pop();
                    wrap_top(&mut scratch)?;
                }
            }
        }

        match scratch.nodes.as_slice() {
            [root] => Ok(root.clone()),
            [] => Err(FrontendError::EmptyExpression),
            _ => Err(FrontendError::IncompleteExpression),
        }
    }

    fn apply_infix(
        &self,
        info: &'static OpInfo,
        ctx: &mut FrontendContext,
    ) -> Result<(), FrontendError> {
        if ctx.awaiting_operand() {
            // A second operator in a row replaces the first
            match ctx.pending.last() {
                Some(Pending::Operator(_)) => {
                    ctx.pending.pop();
                }
                _ => {
                    return Err(FrontendError::InsufficientOperands {
                        op: info.symbol,
                        needed: 2,
                        found: 0,
                    })
                }
            }
        }

        while let Some(Pending::Operator(top)) = ctx.pending.last().copied() {
            let binds_tighter = top.precedence > info.precedence
                || (top.precedence == info.precedence
                    && info.associativity == Associativity::Left);
            if !binds_tighter {
                break;
            }
            self.reduce_one(ctx)?;
        }

        ctx.pending.push(Pending::Operator(info));
        Ok(())
    }

    fn apply_immediate(
        &self,
        info: &'static OpInfo,
        ctx: &mut FrontendContext,
    ) -> Result<(), FrontendError> {
        let arity = info.arity();
        if arity == 0 {
            let node = build_node(self.registry, info, &[], ctx.mode, ctx.angle)?;
            self.push_operand(ctx, node);
            return Ok(());
        }

        let available = if ctx.style == EntryStyle::Algebraic && ctx.awaiting_operand() {
            0
        } else {
            ctx.nodes.len()
        };
        if available < arity {
            return Err(FrontendError::InsufficientOperands {
                op: info.symbol,
                needed: arity,
                found: available,
            });
        }

        let split = ctx.nodes.len() - arity;
        let node = build_node(self.registry, info, &ctx.nodes[split..], ctx.mode, ctx.angle)?;
        ctx.nodes.truncate(split);
        ctx.nodes.push(node);
        Ok(())
    }

    fn apply_group(
        &self,
        info: &'static OpInfo,
        ctx: &mut FrontendContext,
    ) -> Result<(), FrontendError> {
        match (info.tag, ctx.style) {
            (OpTag::ParenLeft, EntryStyle::Rpn) => Err(FrontendError::OperatorUnavailable {
                op: info.symbol,
                context: "RPN entry".to_string(),
            }),
            (_, EntryStyle::Rpn) => wrap_top(ctx),
            (OpTag::ParenLeft, EntryStyle::Algebraic) => {
                if !ctx.awaiting_operand() {
                    // a finished operand is abandoned, as with push_operand
                    ctx.nodes.pop();
                }
                ctx.pending.push(Pending::Boundary);
                Ok(())
            }
            (_, EntryStyle::Algebraic) => {
                if ctx.open_parens() == 0 {
                    return Err(FrontendError::UnbalancedParenthesis);
                }
                if ctx.awaiting_operand() {
                    return Err(FrontendError::IncompleteExpression);
                }
                while let Some(Pending::Operator(_)) = ctx.pending.last() {
                    self.reduce_one(ctx)?;
                }
                ctx.pending.pop();
                wrap_top(ctx)
            }
        }
    }

    /// Pop one pending operator and combine its operands
    fn reduce_one(&self, ctx: &mut FrontendContext) -> Result<(), FrontendError> {
        let info = match ctx.pending.pop() {
            Some(Pending::Operator(info)) => info,
            _ => return Err(FrontendError::UnbalancedParenthesis),
        };
        let arity = info.arity();
        if ctx.nodes.len() < arity {
            return Err(FrontendError::InsufficientOperands {
                op: info.symbol,
                needed: arity,
                found: ctx.nodes.len(),
            });
        }
        let split = ctx.nodes.len() - arity;
        let node = build_node(self.registry, info, &ctx.nodes[split..], ctx.mode, ctx.angle)?;
        ctx.nodes.truncate(split);
        ctx.nodes.push(node);
        Ok(())
    }
}

fn wrap_top(ctx: &mut FrontendContext) -> Result<(), FrontendError> {
    let top = ctx
        .nodes
        .pop()
        .ok_or(FrontendError::InsufficientOperands {
            op: ")",
            needed: 1,
            found: 0,
        })?;
    ctx.nodes.push(Rc::new(Node::ParenWrap(top)));
    Ok(())
}

/// Build the node for `info` from exactly `info.arity()` operands, in
/// entry order. Literals introduced by the rule use the mode's domain.
pub fn build_node(
    registry: &'static OpRegistry,
    info: &'static OpInfo,
    operands: &[Rc<Node>],
    mode: CalcMode,
    angle: AngleUnit,
) -> Result<Rc<Node>, FrontendError> {
    if operands.len() != info.arity() {
        return Err(FrontendError::InsufficientOperands {
            op: info.symbol,
            needed: info.arity(),
            found: operands.len(),
        });
    }
    let domain = mode.domain();
    let literal = |n: i64| Rc::new(Node::Number(Value::Integer(n).coerce(domain)));

    let node = match info.rule {
        BuildRule::Binary => Node::BinaryOp {
            op: info,
            left: operands[0].clone(),
            right: operands[1].clone(),
        },
        BuildRule::Swapped(target) => Node::BinaryOp {
            op: registry.lookup(target)?,
            left: operands[1].clone(),
            right: operands[0].clone(),
        },
        BuildRule::Prefix => Node::UnaryPrefix {
            op: info,
            operand: operands[0].clone(),
        },
        BuildRule::Postfix => Node::UnaryPostfix {
            op: info,
            operand: operands[0].clone(),
        },
        BuildRule::Function(name) | BuildRule::BinaryFunction(name) => Node::FunctionCall {
            name: name.to_string(),
            args: operands.to_vec(),
        },
        BuildRule::AngleFunction { radians, degrees } => Node::FunctionCall {
            name: match angle {
                AngleUnit::Radians => radians.to_string(),
                AngleUnit::Degrees => degrees.to_string(),
            },
            args: operands.to_vec(),
        },
        BuildRule::RaiseTo(n) => Node::BinaryOp {
            op: registry.lookup(OpTag::Pow)?,
            left: operands[0].clone(),
            right: literal(n),
        },
        BuildRule::PowerOf(b) => Node::BinaryOp {
            op: registry.lookup(OpTag::Pow)?,
            left: literal(b),
            right: operands[0].clone(),
        },
        BuildRule::Reciprocal => Node::BinaryOp {
            op: registry.lookup(OpTag::Div)?,
            left: literal(1),
            right: operands[0].clone(),
        },
        BuildRule::Constant(value) => Node::Constant {
            name: info.symbol,
            value: Value::Double(value).coerce(domain),
        },
        BuildRule::Group => return Err(FrontendError::UnknownOperator(info.tag.to_string())),
    };
    Ok(Rc::new(node))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algebraic() -> FrontendContext {
        FrontendContext::new(CalcMode::Scientific, AngleUnit::Radians, EntryStyle::Algebraic)
    }

    #[test]
    fn test_awaiting_operand() {
        let frontend = Frontend::default();
        let mut ctx = algebraic();
        assert!(ctx.awaiting_operand());
        frontend.push_operand(&mut ctx, Node::number(1.0));
        assert!(!ctx.awaiting_operand());
        frontend.apply(OpTag::Add, &mut ctx).unwrap();
        assert!(ctx.awaiting_operand());
        frontend.apply(OpTag::ParenLeft, &mut ctx).unwrap();
        assert!(ctx.awaiting_operand());
    }

    #[test]
    fn test_rejected_press_leaves_context() {
        let frontend = Frontend::default();
        let mut ctx = algebraic();
        let before = ctx.clone();
        assert!(frontend.apply(OpTag::Mul, &mut ctx).is_err());
        assert!(frontend.apply(OpTag::ParenRight, &mut ctx).is_err());
        assert!(frontend.apply(OpTag::BitAnd, &mut ctx).is_err());
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_rpn_close_paren_wraps_x() {
        let frontend = Frontend::default();
        let mut ctx = FrontendContext::new(CalcMode::Scientific, AngleUnit::Radians, EntryStyle::Rpn);
        let before = ctx.clone();
        assert!(frontend.apply(OpTag::ParenRight, &mut ctx).is_err());
        assert_eq!(ctx, before);

        frontend.push_operand(&mut ctx, Node::number(2.0));
        frontend.push_operand(&mut ctx, Node::number(3.0));
        frontend.apply(OpTag::Add, &mut ctx).unwrap();
        frontend.apply(OpTag::ParenRight, &mut ctx).unwrap();
        frontend.push_operand(&mut ctx, Node::number(4.0));
        frontend.apply(OpTag::Mul, &mut ctx).unwrap();
        assert_eq!(frontend.finish(&ctx).unwrap().pretty_print(), "(2 + 3) * 4");
    }

    #[test]
    fn test_build_node_literal_domain() {
        let registry = OpRegistry::global();
        let square = registry.lookup(OpTag::Square).unwrap();
        let node = build_node(registry, square, &[Node::number(3i64)], CalcMode::Programmer, AngleUnit::Radians)
            .unwrap();
        assert_eq!(node.pretty_print(), "3 ^ 2");
        match node.as_ref() {
            Node::BinaryOp { right, .. } => {
                assert_eq!(right.value_literal(), Some(Value::Integer(2)))
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_build_node_swapped_and_reciprocal() {
        let registry = OpRegistry::global();
        let powrev = registry.lookup(OpTag::PowRev).unwrap();
        let node = build_node(
            registry,
            powrev,
            &[Node::number(2.0), Node::number(3.0)],
            CalcMode::Scientific,
            AngleUnit::Radians,
        )
        .unwrap();
        assert_eq!(node.pretty_print(), "3 ^ 2");

        let invert = registry.lookup(OpTag::Invert).unwrap();
        let node =
            build_node(registry, invert, &[Node::number(4.0)], CalcMode::Basic, AngleUnit::Radians).unwrap();
        assert_eq!(node.pretty_print(), "1 / 4");
    }

    #[test]
    fn test_build_node_arity_checked() {
        let registry = OpRegistry::global();
        let add = registry.lookup(OpTag::Add).unwrap();
        let err = build_node(registry, add, &[Node::number(1.0)], CalcMode::Basic, AngleUnit::Radians)
            .unwrap_err();
        assert_eq!(
            err,
            FrontendError::InsufficientOperands {
                op: "+",
                needed: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_rpn_stack_manipulation() {
        let mut ctx = FrontendContext::new(CalcMode::Basic, AngleUnit::Radians, EntryStyle::Rpn);
        let frontend = Frontend::default();
        for n in [1.0, 2.0, 3.0] {
            frontend.push_operand(&mut ctx, Node::number(n));
        }
        assert!(ctx.roll_down());
        let order: Vec<String> = ctx.nodes().iter().map(|n| n.pretty_print()).collect();
        assert_eq!(order, ["3", "1", "2"]);
        assert!(ctx.roll_up());
        assert!(ctx.swap_top());
        let order: Vec<String> = ctx.nodes().iter().map(|n| n.pretty_print()).collect();
        assert_eq!(order, ["1", "3", "2"]);
        assert!(ctx.duplicate_top());
        assert_eq!(ctx.nodes().len(), 4);
        assert!(ctx.drop_top().is_some());
        assert_eq!(ctx.nodes().len(), 3);
    }
}
