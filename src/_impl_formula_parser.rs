use crate::{BooleanAlgebra, Error, Formula};
use std::iter::Peekable;
use std::str::Chars;

/// **(internal)** An enum of possible tokens occurring in a string representation of
/// a `Formula`.
#[derive(Debug, Eq, PartialEq)]
enum Token {
    Not,                // '!' or '~'
    And,                // '&'
    Or,                 // '|'
    Name(String),       // 'name'
    Tokens(Vec<Token>), // A block of tokens inside parentheses
}

/// **(internal)** Parse a formula using the naming rules of the given `algebra`.
pub(crate) fn parse_formula(algebra: &BooleanAlgebra, value: &str) -> Result<Formula, Error> {
    let tokens = tokenize_group(algebra, &mut value.chars().peekable(), true)?;
    parse_or(algebra, &tokens)
}

/// **(internal)** Process a peekable iterator of characters into a vector of `Token`s.
///
/// The outer method always consumes the opening parenthesis and the recursive call consumes the
/// closing parenthesis. Use `top_level` to indicate that there will be no closing parenthesis.
fn tokenize_group(
    algebra: &BooleanAlgebra,
    data: &mut Peekable<Chars>,
    top_level: bool,
) -> Result<Vec<Token>, Error> {
    let mut output = Vec::new();
    while let Some(c) = data.next() {
        match c {
            c if c.is_whitespace() => { /* Skip whitespace */ }
            '!' | '~' => output.push(Token::Not),
            '&' => output.push(Token::And),
            '|' => output.push(Token::Or),
            ')' => {
                return if !top_level {
                    Ok(output)
                } else {
                    Err(Error::Parse("Unexpected ')'.".to_string()))
                };
            }
            '(' => {
                let tokens = tokenize_group(algebra, data, false)?;
                output.push(Token::Tokens(tokens));
            }
            c if algebra.is_valid_in_name(c) => {
                let mut name = vec![c];
                while let Some(c) = data.peek() {
                    if c.is_whitespace() || !algebra.is_valid_in_name(*c) {
                        break;
                    } else {
                        name.push(*c);
                        data.next();
                    }
                }
                output.push(Token::Name(name.into_iter().collect()));
            }
            _ => return Err(Error::Parse(format!("Unexpected '{}'.", c))),
        }
    }
    if top_level {
        Ok(output)
    } else {
        Err(Error::Parse("Expected ')'.".to_string()))
    }
}

/// **(internal)** Recursive parsing step 1: split on `|` operators.
fn parse_or(algebra: &BooleanAlgebra, data: &[Token]) -> Result<Formula, Error> {
    let mut args = data
        .split(|it| *it == Token::Or)
        .map(|it| parse_and(algebra, it))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(if args.len() == 1 {
        args.remove(0)
    } else {
        Formula::Or(args)
    })
}

/// **(internal)** Recursive parsing step 2: split on `&` operators.
fn parse_and(algebra: &BooleanAlgebra, data: &[Token]) -> Result<Formula, Error> {
    let mut args = data
        .split(|it| *it == Token::And)
        .map(|it| terminal(algebra, it))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(if args.len() == 1 {
        args.remove(0)
    } else {
        Formula::And(args)
    })
}

/// **(internal)** Recursive parsing step 3: extract terminals and negations.
fn terminal(algebra: &BooleanAlgebra, data: &[Token]) -> Result<Formula, Error> {
    if data.is_empty() {
        return Err(Error::Parse("Expected formula, found nothing.".to_string()));
    }
    if data[0] == Token::Not {
        return Ok(Formula::mk_not(terminal(algebra, &data[1..])?));
    }
    if data.len() == 1 {
        match &data[0] {
            Token::Name(name) => {
                return Ok(match name.as_str() {
                    "1" | "true" => Formula::Const(true),
                    "0" | "false" => Formula::Const(false),
                    _ => Formula::Symbol(algebra.symbol(name)),
                });
            }
            Token::Tokens(inner) => return parse_or(algebra, inner),
            _ => {} // otherwise, fall through to the error at the end.
        }
    }
    Err(Error::Parse(format!(
        "Unexpected: {:?}. Expecting formula.",
        data
    )))
}

#[cfg(test)]
mod tests {
    use crate::{BooleanAlgebra, Formula, Symbol};

    fn parse(value: &str) -> Formula {
        BooleanAlgebra::boolean().parse(value).unwrap()
    }

    #[test]
    fn parse_basic_formulas() {
        let inputs = vec!["a", "!a", "a&b&c", "a|b", "a|(b&c)", "!(a|b)", "a.b|x:y|in-put"];
        for input in inputs {
            assert_eq!(input, parse(input).to_string());
        }
    }

    #[test]
    fn operator_priority() {
        let a = Formula::mk_var("a");
        let b = Formula::mk_var("b");
        let c = Formula::mk_var("c");
        assert_eq!(
            Formula::Or(vec![Formula::And(vec![a.clone(), b.clone()]), c.clone()]),
            parse("a & b | c")
        );
        assert_eq!(
            Formula::Or(vec![a.clone(), Formula::And(vec![Formula::mk_not(b), c])]),
            parse("a | ~b & c")
        );
        assert_eq!(Formula::mk_not(Formula::mk_not(a)), parse("!!a"));
    }

    #[test]
    fn parse_constants() {
        assert_eq!(Formula::Const(true), parse("1"));
        assert_eq!(Formula::Const(false), parse("0"));
        assert_eq!(Formula::Const(true), parse("true"));
        assert_eq!(
            Formula::And(vec![Formula::mk_var("a"), Formula::Const(false)]),
            parse("a & 0")
        );
    }

    #[test]
    fn parse_multi_valued_symbols() {
        let formula = BooleanAlgebra::multi_valued().parse("a:2 & !b").unwrap();
        assert_eq!(
            Formula::And(vec![
                Formula::Symbol(Symbol::with_level("a", 2)),
                Formula::mk_not(Formula::Symbol(Symbol::new("b"))),
            ]),
            formula
        );
    }

    #[test]
    fn invalid_formulas() {
        let algebra = BooleanAlgebra::boolean();
        assert!(algebra.parse("").is_err());
        assert!(algebra.parse("a &").is_err());
        assert!(algebra.parse("a & | b").is_err());
        assert!(algebra.parse("a b").is_err());
        assert!(algebra.parse("a <- b").is_err());
        assert!(algebra.parse("a ^ b").is_err());
        assert!(algebra.parse("!").is_err());
    }

    #[test]
    fn invalid_parentheses() {
        let algebra = BooleanAlgebra::boolean();
        assert!(algebra.parse("a & (b | c").is_err());
        assert!(algebra.parse("(a | b))").is_err());
        assert!(algebra.parse("()").is_err());
    }
}
