// Behavioral tests for the generated node families: dispatch identity,
// field layout, shared ownership, and cross-family references.

use std::rc::Rc;

use sylva_runtime::{Token, TokenKind, Value};
use sylva_syntax::ast::{
    AssignExpr, BinaryExpr, BlockStmt, CallExpr, Expr, ExprVisitor, ExpressionStmt,
    GroupingExpr, LiteralExpr, PrintStmt, Stmt, StmtVisitor, UnaryExpr, VarDeclStmt,
    VariableExpr,
};

fn token(kind: TokenKind, lexeme: &str) -> Token {
    Token::new(kind, lexeme, None, 1)
}

/// Records every binary node handed to it; panics on any other variant.
struct BinaryRecorder {
    seen: Vec<Rc<BinaryExpr>>,
}

impl ExprVisitor for BinaryRecorder {
    type Output = ();

    fn visit_binary_expr(&mut self, node: &Rc<BinaryExpr>) {
        self.seen.push(Rc::clone(node));
    }

    fn visit_grouping_expr(&mut self, _node: &Rc<GroupingExpr>) {
        panic!("unexpected grouping dispatch");
    }

    fn visit_literal_expr(&mut self, _node: &Rc<LiteralExpr>) {
        panic!("unexpected literal dispatch");
    }

    fn visit_unary_expr(&mut self, _node: &Rc<UnaryExpr>) {
        panic!("unexpected unary dispatch");
    }

    fn visit_variable_expr(&mut self, _node: &Rc<VariableExpr>) {
        panic!("unexpected variable dispatch");
    }

    fn visit_assign_expr(&mut self, _node: &Rc<AssignExpr>) {
        panic!("unexpected assign dispatch");
    }

    fn visit_call_expr(&mut self, _node: &Rc<CallExpr>) {
        panic!("unexpected call dispatch");
    }
}

#[test]
fn accept_dispatches_the_same_node_exactly_once() {
    let node = BinaryExpr::new(
        Expr::literal(Value::Int(1)),
        token(TokenKind::Plus, "+"),
        Expr::literal(Value::Int(2)),
    );
    let expr = Expr::Binary(Rc::clone(&node));

    let mut recorder = BinaryRecorder { seen: Vec::new() };
    expr.accept(&mut recorder);

    assert_eq!(recorder.seen.len(), 1);
    assert!(Rc::ptr_eq(&recorder.seen[0], &node));
}

#[test]
fn fields_keep_declared_order_and_values() {
    let op = token(TokenKind::Star, "*");
    let node = BinaryExpr::new(
        Expr::literal(Value::Int(3)),
        op.clone(),
        Expr::literal(Value::Int(4)),
    );

    assert_eq!(node.op, op);
    assert!(matches!(node.left, Expr::Literal(_)));
    assert!(matches!(node.right, Expr::Literal(_)));

    let Expr::Literal(left) = &node.left else {
        panic!("left should be a literal");
    };
    assert_eq!(left.value, Value::Int(3));
}

#[test]
fn subtrees_can_be_shared_between_parents() {
    let shared = Expr::literal(Value::Int(7));
    let first = Expr::grouping(shared.clone());
    let second = Expr::grouping(shared.clone());

    let Expr::Grouping(a) = &first else {
        panic!("expected grouping");
    };
    let Expr::Grouping(b) = &second else {
        panic!("expected grouping");
    };
    let Expr::Literal(inner_a) = &a.expression else {
        panic!("expected literal");
    };
    let Expr::Literal(inner_b) = &b.expression else {
        panic!("expected literal");
    };

    // Both parents own the very same literal node
    assert!(Rc::ptr_eq(inner_a, inner_b));
}

#[test]
fn statements_reference_expression_nodes() {
    let expr = Expr::binary(
        Expr::literal(Value::Int(1)),
        token(TokenKind::Plus, "+"),
        Expr::literal(Value::Int(2)),
    );
    let stmt = Stmt::print(expr.clone());

    let Stmt::Print(print) = &stmt else {
        panic!("expected print statement");
    };
    assert_eq!(print.expression, expr);
}

/// A second operation over the same trees: counting nodes. Adding it
/// required no change to any node definition.
struct NodeCounter;

impl ExprVisitor for NodeCounter {
    type Output = usize;

    fn visit_binary_expr(&mut self, node: &Rc<BinaryExpr>) -> usize {
        1 + node.left.accept(self) + node.right.accept(self)
    }

    fn visit_grouping_expr(&mut self, node: &Rc<GroupingExpr>) -> usize {
        1 + node.expression.accept(self)
    }

    fn visit_literal_expr(&mut self, _node: &Rc<LiteralExpr>) -> usize {
        1
    }

    fn visit_unary_expr(&mut self, node: &Rc<UnaryExpr>) -> usize {
        1 + node.right.accept(self)
    }

    fn visit_variable_expr(&mut self, _node: &Rc<VariableExpr>) -> usize {
        1
    }

    fn visit_assign_expr(&mut self, node: &Rc<AssignExpr>) -> usize {
        1 + node.value.accept(self)
    }

    fn visit_call_expr(&mut self, node: &Rc<CallExpr>) -> usize {
        let mut count = 1 + node.callee.accept(self);
        for arg in &node.args {
            count += arg.accept(self);
        }
        count
    }
}

impl StmtVisitor for NodeCounter {
    type Output = usize;

    fn visit_expression_stmt(&mut self, node: &Rc<ExpressionStmt>) -> usize {
        1 + node.expression.accept(self)
    }

    fn visit_print_stmt(&mut self, node: &Rc<PrintStmt>) -> usize {
        1 + node.expression.accept(self)
    }

    fn visit_var_decl_stmt(&mut self, node: &Rc<VarDeclStmt>) -> usize {
        1 + node.initializer.accept(self)
    }

    fn visit_block_stmt(&mut self, node: &Rc<BlockStmt>) -> usize {
        let mut count = 1;
        for stmt in &node.statements {
            count += stmt.accept(self);
        }
        count
    }
}

#[test]
fn traversal_reaches_every_node_across_families() {
    let block = Stmt::block(vec![
        Stmt::var_decl(
            token(TokenKind::Identifier, "x"),
            Expr::unary(token(TokenKind::Minus, "-"), Expr::literal(Value::Int(1))),
        ),
        Stmt::expression(Expr::assign(
            token(TokenKind::Identifier, "x"),
            Expr::literal(Value::Int(2)),
        )),
    ]);

    let mut counter = NodeCounter;
    // block + var_decl + unary + literal + expression + assign + literal
    assert_eq!(block.accept(&mut counter), 7);
}

#[test]
fn call_arguments_stay_ordered() {
    let call = Expr::call(
        Expr::variable(token(TokenKind::Identifier, "f")),
        token(TokenKind::RightParen, ")"),
        vec![
            Expr::literal(Value::Int(1)),
            Expr::literal(Value::Int(2)),
            Expr::literal(Value::Int(3)),
        ],
    );

    let Expr::Call(node) = &call else {
        panic!("expected call");
    };
    let values: Vec<Value> = node
        .args
        .iter()
        .map(|arg| {
            let Expr::Literal(literal) = arg else {
                panic!("expected literal argument");
            };
            literal.value.clone()
        })
        .collect();

    assert_eq!(values, [Value::Int(1), Value::Int(2), Value::Int(3)]);
}
