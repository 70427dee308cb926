use std::rc::Rc;

use crate::ast::{
    AssignExpr, BinaryExpr, BlockStmt, CallExpr, Expr, ExprVisitor, ExpressionStmt,
    GroupingExpr, LiteralExpr, PrintStmt, Stmt, StmtVisitor, UnaryExpr, VarDeclStmt,
    VariableExpr,
};

/// Renders a tree in parenthesized prefix form, e.g.
/// `(* (- 123) (group 45.67))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }
}

impl ExprVisitor for AstPrinter {
    type Output = String;

    fn visit_binary_expr(&mut self, node: &Rc<BinaryExpr>) -> String {
        format!(
            "({} {} {})",
            node.op.lexeme,
            node.left.accept(self),
            node.right.accept(self)
        )
    }

    fn visit_grouping_expr(&mut self, node: &Rc<GroupingExpr>) -> String {
        format!("(group {})", node.expression.accept(self))
    }

    fn visit_literal_expr(&mut self, node: &Rc<LiteralExpr>) -> String {
        node.value.to_string()
    }

    fn visit_unary_expr(&mut self, node: &Rc<UnaryExpr>) -> String {
        format!("({} {})", node.op.lexeme, node.right.accept(self))
    }

    fn visit_variable_expr(&mut self, node: &Rc<VariableExpr>) -> String {
        node.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, node: &Rc<AssignExpr>) -> String {
        format!("(= {} {})", node.name.lexeme, node.value.accept(self))
    }

    fn visit_call_expr(&mut self, node: &Rc<CallExpr>) -> String {
        let mut out = format!("(call {}", node.callee.accept(self));
        for arg in &node.args {
            out.push(' ');
            out.push_str(&arg.accept(self));
        }
        out.push(')');
        out
    }
}

impl StmtVisitor for AstPrinter {
    type Output = String;

    fn visit_expression_stmt(&mut self, node: &Rc<ExpressionStmt>) -> String {
        format!("(expr {})", node.expression.accept(self))
    }

    fn visit_print_stmt(&mut self, node: &Rc<PrintStmt>) -> String {
        format!("(print {})", node.expression.accept(self))
    }

    fn visit_var_decl_stmt(&mut self, node: &Rc<VarDeclStmt>) -> String {
        format!("(var {} {})", node.name.lexeme, node.initializer.accept(self))
    }

    fn visit_block_stmt(&mut self, node: &Rc<BlockStmt>) -> String {
        let mut out = String::from("(block");
        for stmt in &node.statements {
            out.push(' ');
            out.push_str(&stmt.accept(self));
        }
        out.push(')');
        out
    }
}
