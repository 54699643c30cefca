//! AST node definitions for `.wtf` source (`spec.md` §3).

/// A sequence of expressions; its value is the value of its last expression.
pub type Block = Vec<Expr>;

/// An expression or declaration node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Binary(u8, Box<Expr>, Box<Expr>),
    Unary(u8, Box<Expr>),
    Call(String, Vec<Expr>),
    Conditional {
        branches: Vec<(Expr, Block)>,
        else_body: Block,
    },
    For {
        iter: String,
        init: Box<Expr>,
        end: Box<Expr>,
        step: Option<Box<Expr>>,
        body: Block,
    },
    Var(String, Box<Expr>),
}

/// `name(params...)`: a function or operator signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
}

/// A function definition: prototype plus body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub proto: Prototype,
    pub body: Block,
}

/// An `op` declaration: like a [`Function`] but also installs a precedence
/// table entry and is emitted under a `binary<c>`/`unary<c>` name.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub symbol: u8,
    pub precedence: i32,
    pub proto: Prototype,
    pub body: Block,
}

/// An `import 'file'` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub filename: String,
}

/// One top-level construct as returned by the parser to the driver.
///
/// A bare top-level expression is wrapped into a [`Function`] with an empty
/// prototype name before reaching here (`spec.md` §4.2 `ParseTopLevelExpr`);
/// the driver recognizes that empty name as "JIT and run immediately".
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevel {
    Function(Function),
    Operator(Operator),
    Extern(Prototype),
    Import(Import),
}
