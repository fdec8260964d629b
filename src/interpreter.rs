/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions and statements,
/// manages variable bindings and writes program output. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, loops and conditionals.
/// - Reports runtime errors such as unknown names or invalid operands.
pub mod evaluator;
/// The lexer module tokenizes source text for further parsing.
///
/// Ram lines are mostly whitespace separated; the lexer isolates the
/// arithmetic operator characters and keeps string literals and
/// `name[...]` calls in one piece.
///
/// # Responsibilities
/// - Splits bracket-free text into token strings.
/// - Defines the nested `TokenTree` produced by grouping.
/// - Reports text it cannot tokenize, such as an unterminated string.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from source lines.
///
/// Lines are first structured into blocks by brace matching, then each line
/// and block header is grouped into tokens and parsed into statements and
/// expressions.
///
/// # Responsibilities
/// - Matches braces into nested blocks.
/// - Groups tokens by parentheses and operator precedence.
/// - Validates keywords and grammar, reporting errors with the source line.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values produced during evaluation (numbers, loop
/// counters, text, booleans) and the environment that binds names to values
/// and functions.
///
/// # Responsibilities
/// - Defines the `Value` enum and its display format.
/// - Implements the equality used by `is`.
/// - Defines the `Environment` and its restricted copies for function calls.
pub mod value;
