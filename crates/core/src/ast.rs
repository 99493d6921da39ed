//! Expression IR operated on by the optimizer.
//!
//! The tree is deliberately small: literals, identifiers, and builtin
//! instruction calls on the expression side, plus the handful of statement
//! forms needed to host expressions in realistic positions. Every node is
//! owned, cloneable, and serializable so passes can snapshot a program
//! before mutating it.

use crate::evm::Opcode;
use crate::literal::format_number;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralKind {
    /// Decimal or 0x-prefixed hexadecimal number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// Quoted string data.
    String,
}

/// A literal token with its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Source text of the literal, e.g. `0xffff` or `42`.
    pub value: String,
}

impl Literal {
    /// Builds a number literal in canonical text form.
    pub fn number(value: U256) -> Self {
        Literal {
            kind: LiteralKind::Number,
            value: format_number(value),
        }
    }
}

/// A named value reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

/// A builtin instruction applied to argument expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionCall {
    pub op: Opcode,
    pub args: Vec<Expression>,
}

/// Expression node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Literal(Literal),
    Instruction(InstructionCall),
    Identifier(Identifier),
}

impl Expression {
    /// Number literal expression in canonical text form.
    pub fn number(value: U256) -> Self {
        Expression::Literal(Literal::number(value))
    }

    /// Identifier expression.
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier { name: name.into() })
    }

    /// Instruction call expression.
    pub fn instruction(op: Opcode, args: Vec<Expression>) -> Self {
        Expression::Instruction(InstructionCall { op, args })
    }
}

/// Statement node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// Expression evaluated for effect.
    Expression(Expression),
    /// `let a, b := value`
    VariableDeclaration {
        names: Vec<Identifier>,
        value: Option<Expression>,
    },
    /// `a, b := value`
    Assignment {
        targets: Vec<Identifier>,
        value: Expression,
    },
    /// `if condition { body }`
    If { condition: Expression, body: Block },
    /// Nested scope.
    Block(Block),
}

/// A sequence of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LiteralKind::String => write!(f, "\"{}\"", self.value),
            _ => f.write_str(&self.value),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => lit.fmt(f),
            Expression::Identifier(id) => f.write_str(&id.name),
            Expression::Instruction(call) => {
                write!(f, "{}(", call.op)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    arg.fmt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_names(f: &mut fmt::Formatter<'_>, names: &[Identifier]) -> fmt::Result {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&name.name)?;
    }
    Ok(())
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Expression(expr) => expr.fmt(f),
            Statement::VariableDeclaration { names, value } => {
                f.write_str("let ")?;
                write_names(f, names)?;
                if let Some(value) = value {
                    write!(f, " := {value}")?;
                }
                Ok(())
            }
            Statement::Assignment { targets, value } => {
                write_names(f, targets)?;
                write!(f, " := {value}")
            }
            Statement::If { condition, body } => write!(f, "if {condition} {body}"),
            Statement::Block(block) => block.fmt(f),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for stmt in &self.statements {
            write!(f, " {stmt}")?;
        }
        f.write_str(" }")
    }
}
