use std::fmt;

/// An arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOperator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl ArithmeticOperator {
    /// Maps an operator token to its variant.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    /// The source symbol of this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// A boolean connective. `and` and `or` share one precedence level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BooleanOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

impl BooleanOperator {
    /// Maps a keyword to its variant.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    /// The source keyword of this operator.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// The type named in a `set`/`reset` statement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VarType {
    /// `integer`: any numeric value.
    Integer,
    /// `text`
    Text,
    /// `boolean`
    Boolean,
}

impl VarType {
    /// Maps a type keyword to its variant.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "integer" => Some(Self::Integer),
            "text" => Some(Self::Text),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// The source keyword of this type.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Boolean => "boolean",
        }
    }
}

/// An abstract syntax tree node representing a Ram expression.
///
/// Expressions are immutable once built and own their children. Their
/// `Display` output is valid Ram source: re-lexing and re-parsing it yields an
/// expression that evaluates to the same value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// No expression at all, e.g. a function without `send back`. Evaluates to
    /// nothing.
    Empty,
    /// A numeric literal. All Ram numbers are floating point.
    Number(f64),
    /// A string literal, stored without its quotes.
    Text(String),
    /// `true` or `false`.
    Bool(bool),
    /// Reference to a variable or a function by name.
    Name(String),
    /// A function call with named arguments: `name[a=expr,b=expr]`.
    Call {
        /// Name of the function being called.
        name:      String,
        /// Argument names and their expressions, in source order.
        arguments: Vec<(String, Self)>,
    },
    /// An arithmetic operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    ArithmeticOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// A chain of operands joined by the same boolean connective.
    Boolean {
        /// The connective.
        op:       BooleanOperator,
        /// Two or more operands.
        operands: Vec<Self>,
    },
    /// An `is` comparison.
    Equality {
        /// Left side.
        left:  Box<Self>,
        /// Right side.
        right: Box<Self>,
    },
    /// `GET_INPUT`: reads an expression from the input stream.
    Input,
}

impl Expr {
    /// Builds a [`Expr::Binary`] node.
    #[must_use]
    pub fn binary(left: Self, op: ArithmeticOperator, right: Self) -> Self {
        Self::Binary { left: Box::new(left),
                       op,
                       right: Box::new(right) }
    }

    /// Builds a [`Expr::Equality`] node.
    #[must_use]
    pub fn equality(left: Self, right: Self) -> Self {
        Self::Equality { left:  Box::new(left),
                         right: Box::new(right), }
    }

    /// Builds a [`Expr::Boolean`] node, flattening a left operand that already
    /// uses the same connective so `a or b or c` stays one node.
    #[must_use]
    pub fn boolean(op: BooleanOperator, left: Self, right: Self) -> Self {
        let mut operands = match left {
            Self::Boolean { op: inner, operands } if inner == op => operands,
            other => vec![other],
        };
        operands.push(right);

        Self::Boolean { op, operands }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{n:.1}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Name(name) => write!(f, "{name}"),
            Self::Call { name, arguments } => {
                write!(f, "{name}[")?;
                for (index, (argument, value)) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{argument}={value}")?;
                }
                write!(f, "]")
            },
            Self::Binary { left, op, right } => write!(f, "({left} {} {right})", op.symbol()),
            Self::Boolean { op, operands } => {
                write!(f, "(")?;
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        write!(f, " {} ", op.keyword())?;
                    }
                    write!(f, "{operand}")?;
                }
                write!(f, ")")
            },
            Self::Equality { left, right } => write!(f, "({left} is {right})"),
            Self::Input => write!(f, "GET_INPUT"),
        }
    }
}

/// One `if` / `else if` arm: a condition and the statements it guards.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Must evaluate to a boolean.
    pub condition: Expr,
    /// Statements run when the condition holds.
    pub body:      Vec<Statement>,
}

/// A user-defined function, as declared by a `new function` block.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Function name.
    pub name:    String,
    /// Parameter names; arguments are passed by name.
    pub params:  Vec<String>,
    /// Statements run on every call.
    pub body:    Vec<Statement>,
    /// The `send back` expression, or [`Expr::Empty`].
    pub returns: Expr,
    /// Line of the block header.
    pub line:    usize,
}

/// An abstract syntax tree node representing a Ram statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `set <type> <name> to <expr>` or `reset ...`.
    Assign {
        /// Variable being bound.
        target: String,
        /// Declared type, checked when the statement runs.
        ty:     VarType,
        /// Value expression.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `display <expr>`.
    Display {
        /// The value to print.
        argument: Expr,
        /// Line number in the source code.
        line:     usize,
    },
    /// An `if` block with any number of `else if` arms and an optional
    /// `else`.
    If {
        /// Arms in source order; the first whose condition holds runs.
        branches: Vec<Branch>,
        /// Statements run when no arm matches.
        orelse:   Vec<Self>,
        /// Line number of the `if` header.
        line:     usize,
    },
    /// `loop with <var> from <start> to <stop>`; both bounds inclusive.
    Loop {
        /// Loop variable.
        var:   String,
        /// Start bound, evaluated once.
        start: Expr,
        /// Stop bound, evaluated once.
        stop:  Expr,
        /// Loop body.
        body:  Vec<Self>,
        /// Line number of the loop header.
        line:  usize,
    },
    /// `new function <name> takes (<params>)`.
    Function(FunctionDef),
    /// `send back <expr>` anywhere other than the last line of a function.
    Return {
        /// The returned expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `call <expr>`: evaluated for its effects.
    Call {
        /// The call expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// The source line this statement was parsed from.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Assign { line, .. }
            | Self::Display { line, .. }
            | Self::If { line, .. }
            | Self::Loop { line, .. }
            | Self::Return { line, .. }
            | Self::Call { line, .. } => *line,
            Self::Function(def) => def.line,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "    ".repeat(depth);
        match self {
            Self::Assign { target, ty, value, .. } => {
                writeln!(f, "{pad}{target}: {} = {value}", ty.keyword())
            },
            Self::Display { argument, .. } => writeln!(f, "{pad}display({argument})"),
            Self::If { branches, orelse, .. } => {
                for (index, branch) in branches.iter().enumerate() {
                    let keyword = if index == 0 { "if" } else { "elif" };
                    writeln!(f, "{pad}{keyword} {}:", branch.condition)?;
                    write_body(f, &branch.body, depth + 1)?;
                }
                if !orelse.is_empty() {
                    writeln!(f, "{pad}else:")?;
                    write_body(f, orelse, depth + 1)?;
                }
                Ok(())
            },
            Self::Loop { var, start, stop, body, .. } => {
                writeln!(f, "{pad}for {var} in {start}..={stop}:")?;
                write_body(f, body, depth + 1)
            },
            Self::Function(def) => {
                writeln!(f, "{pad}def {}({}):", def.name, def.params.join(", "))?;
                write_body(f, &def.body, depth + 1)?;
                writeln!(f, "{pad}    return {}", def.returns)
            },
            Self::Return { value, .. } => writeln!(f, "{pad}return {value}"),
            Self::Call { expr, .. } => writeln!(f, "{pad}{expr}"),
        }
    }
}

fn write_body(f: &mut fmt::Formatter<'_>, body: &[Statement], depth: usize) -> fmt::Result {
    if body.is_empty() {
        return writeln!(f, "{}pass", "    ".repeat(depth));
    }
    body.iter().try_for_each(|statement| statement.write_indented(f, depth))
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// The root of a parsed program: its top-level statements in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    /// Top-level statements.
    pub body: Vec<Statement>,
}

impl Module {
    /// Wraps a list of statements.
    #[must_use]
    pub const fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.body.iter().try_for_each(|statement| write!(f, "{statement}"))
    }
}
