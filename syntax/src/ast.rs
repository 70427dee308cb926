use sylva_macros::node_family;
use sylva_runtime::{Token, Value};

// Expression and statement node families. Every field holds its sub-tree
// through a shared handle; construction goes through the generated
// factories, so a node is never observable outside shared ownership.
node_family! {
    name: Sylva,

    external {
        Token
        Value
    },

    family Expr {
        Binary   : "Expr left | Token op | Expr right" ;
        Grouping : "Expr expression" ;
        Literal  : "Value value" ;
        Unary    : "Token op | Expr right" ;
        Variable : "Token name" ;
        Assign   : "Token name | Expr value" ;
        Call     : "Expr callee | Token paren | Vec<Expr> args" ;
    },

    family Stmt requires Expr {
        Expression : "Expr expression" ;
        Print      : "Expr expression" ;
        VarDecl    : "Token name | Expr initializer" ;
        Block      : "Vec<Stmt> statements" ;
    },
}
