use crate::interpreter::{lexer::TokenTree, parser::utils::MULTIPLICATIVE_OPERATORS};

/// Groups multiplicative operations so they bind tighter than additive ones.
///
/// Every `left * right` or `left / right` triple collapses into a nested
/// three-element group, leftmost first, until no ungrouped `*` or `/` remains
/// at this level. Additive operators stay flat; the expression parser folds
/// them left to right.
///
/// Expects alternating operands and operators. Anything else is returned with
/// whatever triples could be found, and the expression parser reports the
/// problem.
///
/// # Example
/// ```
/// use ram::interpreter::{
///     lexer::TokenTree::{self, Atom, Group},
///     parser::precedence::pedmas,
/// };
///
/// fn atoms(items: &[&str]) -> Vec<TokenTree> {
///     items.iter().map(|s| Atom(s.to_string())).collect()
/// }
///
/// assert_eq!(pedmas(atoms(&["4", "+", "2", "*", "7", "-", "1"])),
///            vec![Atom("4".into()),
///                 Atom("+".into()),
///                 Group(atoms(&["2", "*", "7"])),
///                 Atom("-".into()),
///                 Atom("1".into())]);
/// ```
#[must_use]
pub fn pedmas(sequence: Vec<TokenTree>) -> Vec<TokenTree> {
    group_tier(sequence, MULTIPLICATIVE_OPERATORS)
}

/// Collapses the leftmost `operand op operand` triple whose operator is in
/// `operators`, repeatedly.
fn group_tier(mut sequence: Vec<TokenTree>, operators: &[&str]) -> Vec<TokenTree> {
    loop {
        let position = (1..sequence.len().saturating_sub(1)).step_by(2)
                                                            .find(|&i| {
                                                                sequence[i].is_one_of(operators)
                                                            });
        let Some(i) = position else {
            return sequence;
        };

        let triple: Vec<TokenTree> = sequence.drain(i - 1..=i + 1).collect();
        sequence.insert(i - 1, TokenTree::Group(triple));
    }
}

/// Groups a boolean chain strictly left to right, three tokens at a time.
///
/// `and` and `or` have the same precedence, so `a or b and c` becomes
/// `((a or b) and c)`. Sequences of three tokens or fewer are returned as is.
///
/// # Example
/// ```
/// use ram::interpreter::{
///     lexer::TokenTree::{self, Atom, Group},
///     parser::precedence::lexbool,
/// };
///
/// fn atoms(items: &[&str]) -> Vec<TokenTree> {
///     items.iter().map(|s| Atom(s.to_string())).collect()
/// }
///
/// assert_eq!(lexbool(atoms(&["a", "or", "b", "and", "c"])),
///            vec![Group(atoms(&["a", "or", "b"])), Atom("and".into()), Atom("c".into())]);
/// ```
#[must_use]
pub fn lexbool(mut sequence: Vec<TokenTree>) -> Vec<TokenTree> {
    while sequence.len() > 3 {
        let head: Vec<TokenTree> = sequence.drain(..3).collect();
        sequence.insert(0, TokenTree::Group(head));
    }

    sequence
}
