//! Mutable AST traversal.
//!
//! Implementors override the node kinds they care about; every default method
//! delegates to the matching `walk_*` function, which recurses into all
//! children. An override that still wants recursion calls `walk_*` itself.

use crate::ast::{Block, Expression, Statement};

/// In-place visitor over the expression IR.
pub trait VisitMut {
    fn visit_expression(&mut self, expression: &mut Expression) {
        walk_expression(self, expression);
    }

    fn visit_statement(&mut self, statement: &mut Statement) {
        walk_statement(self, statement);
    }

    fn visit_block(&mut self, block: &mut Block) {
        walk_block(self, block);
    }
}

/// Recurses into the sub-expressions of `expression`.
pub fn walk_expression<V: VisitMut + ?Sized>(visitor: &mut V, expression: &mut Expression) {
    if let Expression::Instruction(call) = expression {
        for arg in &mut call.args {
            visitor.visit_expression(arg);
        }
    }
}

/// Recurses into the expressions and blocks of `statement`.
pub fn walk_statement<V: VisitMut + ?Sized>(visitor: &mut V, statement: &mut Statement) {
    match statement {
        Statement::Expression(expr) => visitor.visit_expression(expr),
        Statement::VariableDeclaration { value, .. } => {
            if let Some(expr) = value {
                visitor.visit_expression(expr);
            }
        }
        Statement::Assignment { value, .. } => visitor.visit_expression(value),
        Statement::If { condition, body } => {
            visitor.visit_expression(condition);
            visitor.visit_block(body);
        }
        Statement::Block(block) => visitor.visit_block(block),
    }
}

/// Recurses into every statement of `block`.
pub fn walk_block<V: VisitMut + ?Sized>(visitor: &mut V, block: &mut Block) {
    for statement in &mut block.statements {
        visitor.visit_statement(statement);
    }
}
