use crate::base::NumeralBase;
use crate::error::Error;
use crate::functions::{constant, Function, FUNCTIONS};
use crate::token::{Op, Token};
use crate::value::{checked, Value};
use log::trace;
use std::iter::Peekable;
use std::str::Chars;

/// An open parenthesis, with the function it calls if any
struct Frame {
    function: Option<Function>,
    separators: usize,
}

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    base: NumeralBase,
}

impl<'a> Lexer<'a> {
    /// Create a lexer reading decimal literals
    #[cfg(test)]
    pub fn new(string: &str) -> Lexer<'_> {
        Lexer::with_base(string, NumeralBase::Decimal)
    }

    /// Create a lexer reading unprefixed literals in `base`
    pub fn with_base(string: &str, base: NumeralBase) -> Lexer<'_> {
        Lexer {
            input: string.chars().peekable(),
            base,
        }
    }

    /// Lex the input and reorder the tokens in reverse polish notation, using
    /// the shunting-yard algorithm.
    ///
    /// Unary minus and implicit multiplications are resolved here, function
    /// calls are emitted as `Token::Call` with their number of arguments.
    pub fn parse(&mut self) -> Result<Vec<Token>, Error> {
        let mut output = Vec::new();
        let mut operators = Vec::new();
        let mut frames: Vec<Frame> = Vec::new();
        let mut expect_operand = true;

        while let Some(token) = self.next_token()? {
            trace!("token {:?}", token);
            match token {
                Token::Number(_) => {
                    if !expect_operand {
                        push_operator(Op::Mul, &mut operators, &mut output);
                    }
                    output.push(token);
                    expect_operand = false;
                }
                Token::Ident(name) => {
                    if !expect_operand {
                        push_operator(Op::Mul, &mut operators, &mut output);
                    }
                    if let Some(&function) = FUNCTIONS.get(name.as_str()) {
                        if self.next_token()? != Some(Token::LParen) {
                            return Err(Error::syntax(format!(
                                "missing parenthesis after function {}",
                                name
                            )));
                        }
                        operators.push(Token::LParen);
                        frames.push(Frame {
                            function: Some(function),
                            separators: 0,
                        });
                        expect_operand = true;
                    } else if let Some(value) = constant(&name) {
                        output.push(Token::Number(Value::Real(value)));
                        expect_operand = false;
                    } else {
                        return Err(Error::syntax(format!("unknown identifier {}", name)));
                    }
                }
                Token::LParen => {
                    if !expect_operand {
                        push_operator(Op::Mul, &mut operators, &mut output);
                    }
                    operators.push(token);
                    frames.push(Frame {
                        function: None,
                        separators: 0,
                    });
                    expect_operand = true;
                }
                Token::Comma => {
                    if expect_operand {
                        return Err(Error::syntax("missing operand before ,"));
                    }
                    pop_until_paren(&mut operators, &mut output)?;
                    match frames.last_mut() {
                        Some(frame) if frame.function.is_some() => frame.separators += 1,
                        _ => return Err(Error::syntax(", outside of a function call")),
                    }
                    expect_operand = true;
                }
                Token::RParen => {
                    if expect_operand {
                        return Err(Error::syntax("missing operand before )"));
                    }
                    pop_until_paren(&mut operators, &mut output)?;
                    operators.pop();
                    let frame = frames
                        .pop()
                        .ok_or_else(|| Error::syntax("mismatched parenthesis"))?;
                    if let Some(function) = frame.function {
                        let arguments = frame.separators + 1;
                        if !function.arity().contains(&arguments) {
                            return Err(Error::syntax(format!(
                                "{}() does not take {} argument(s)",
                                function.name(),
                                arguments
                            )));
                        }
                        output.push(Token::Call(function, arguments));
                    }
                    expect_operand = false;
                }
                Token::Op(op) => {
                    if expect_operand {
                        match op {
                            Op::Minus => operators.push(Token::Op(Op::Neg)),
                            Op::Plus => {}
                            other => {
                                return Err(Error::syntax(format!(
                                    "missing operand before {:?}",
                                    other
                                )))
                            }
                        }
                    } else if op == Op::Factorial {
                        // postfix, binds tighter than anything on the stack
                        output.push(token);
                    } else {
                        push_operator(op, &mut operators, &mut output);
                        expect_operand = true;
                    }
                }
                Token::Call(..) => {
                    return Err(Error::syntax("unexpected function call token"));
                }
            }
        }

        if expect_operand {
            return Err(Error::syntax("missing operand at end of expression"));
        }
        while let Some(token) = operators.pop() {
            match token {
                Token::Op(_) => output.push(token),
                _ => return Err(Error::syntax("mismatched parenthesis")),
            }
        }
        Ok(output)
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        while self.input.peek().map_or(false, |c| c.is_whitespace()) {
            self.input.next();
        }
        let c = match self.input.peek() {
            Some(&c) => c,
            None => return Ok(None),
        };
        if self.starts_literal(c) {
            return self.literal().map(Some);
        }
        if is_identifier_part(c) {
            let mut ident = String::new();
            while let Some(&c) = self.input.peek() {
                if !is_identifier_part(c) {
                    break;
                }
                ident.push(c);
                self.input.next();
            }
            return Ok(Some(Token::Ident(ident)));
        }

        self.input.next();
        let token = match c {
            '+' => Token::Op(Op::Plus),
            '-' => Token::Op(Op::Minus),
            '*' => {
                if self.input.peek() == Some(&'*') {
                    self.input.next();
                    Token::Op(Op::Exp)
                } else {
                    Token::Op(Op::Mul)
                }
            }
            '/' => Token::Op(Op::Div),
            '%' => Token::Op(Op::Mod),
            '^' => Token::Op(Op::Exp),
            '!' => Token::Op(Op::Factorial),
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            other => {
                return Err(Error::syntax(format!(
                    "unexpected character in input: {}",
                    other
                )));
            }
        };
        Ok(Some(token))
    }

    /// Check if `c` can be the first character of a numeric literal
    fn starts_literal(&self, c: char) -> bool {
        match self.base {
            NumeralBase::Decimal => c.is_ascii_digit() || c == '.',
            NumeralBase::Hexadecimal => c.is_ascii_digit() || ('A'..='F').contains(&c),
            _ => c.is_ascii_digit(),
        }
    }

    fn literal(&mut self) -> Result<Token, Error> {
        if self.input.peek() == Some(&'0') {
            let mut ahead = self.input.clone();
            ahead.next();
            let prefixed = match ahead.next() {
                Some('x') => Some(NumeralBase::Hexadecimal),
                Some('o') => Some(NumeralBase::Octal),
                Some('b') => Some(NumeralBase::Binary),
                _ => None,
            };
            if let Some(base) = prefixed {
                if ahead.peek().map_or(false, |&c| c.is_digit(base.radix())) {
                    self.input.next();
                    self.input.next();
                    return self.integer_literal(base, |c| c.is_ascii_alphanumeric());
                }
            }
        }
        match self.base {
            NumeralBase::Decimal => self.decimal_literal(),
            NumeralBase::Hexadecimal => self.integer_literal(NumeralBase::Hexadecimal, |c| {
                c.is_ascii_digit() || ('A'..='F').contains(&c)
            }),
            base => self.integer_literal(base, |c| c.is_ascii_digit()),
        }
    }

    /// Read an integer literal in `base`, made of the characters accepted by
    /// `is_part`
    fn integer_literal(
        &mut self,
        base: NumeralBase,
        is_part: fn(char) -> bool,
    ) -> Result<Token, Error> {
        let mut digits = String::new();
        while let Some(&c) = self.input.peek() {
            if !is_part(c) {
                break;
            }
            if !base.accepts(c) {
                return Err(Error::syntax(format!(
                    "digit {} is not valid in base {}",
                    c,
                    base.radix()
                )));
            }
            digits.push(c);
            self.input.next();
        }
        if self.input.peek() == Some(&'.') {
            return Err(Error::syntax(format!(
                "fractional literal {}. in base {}",
                digits,
                base.radix()
            )));
        }
        i64::from_str_radix(&digits, base.radix())
            .map(|value| Token::Number(Value::Integer(value)))
            .map_err(|_| Error::overflow(format!("literal {} is too large", digits)))
    }

    /// Read a decimal literal: `12`, `1.5`, `.5`, `2.`, `1.5e+20`
    fn decimal_literal(&mut self) -> Result<Token, Error> {
        let mut literal = String::new();
        while let Some(&c) = self.input.peek() {
            if !(c.is_ascii_digit() || c == '.') {
                break;
            }
            literal.push(c);
            self.input.next();
        }
        if self.input.peek() == Some(&'e') {
            let mut ahead = self.input.clone();
            ahead.next();
            let mut exponent = String::from("e");
            if let Some(&sign) = ahead.peek().filter(|&&c| c == '+' || c == '-') {
                exponent.push(sign);
                ahead.next();
            }
            if ahead.peek().map_or(false, char::is_ascii_digit) {
                while let Some(&c) = ahead.peek().filter(|c| c.is_ascii_digit()) {
                    exponent.push(c);
                    ahead.next();
                }
                literal.push_str(&exponent);
                self.input = ahead;
            }
        }

        let is_integer = literal.bytes().all(|b| b.is_ascii_digit());
        if is_integer {
            if let Ok(value) = literal.parse::<i64>() {
                return Ok(Token::Number(Value::Integer(value)));
            }
        }
        let value = literal
            .parse::<f64>()
            .map_err(|_| Error::syntax(format!("invalid number {}", literal)))?;
        Ok(Token::Number(Value::Real(checked(value)?)))
    }
}

/// Check if `c` can appear in a function or constant name
fn is_identifier_part(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Push a binary operator, first moving the operators of higher precedence
/// to the output.
fn push_operator(o1: Op, operators: &mut Vec<Token>, output: &mut Vec<Token>) {
    while let Some(&Token::Op(o2)) = operators.last() {
        let pop_me = o2.precedence() > o1.precedence()
            || (o2.precedence() == o1.precedence() && o1.is_left_associative());
        if !pop_me {
            break;
        }
        operators.pop();
        output.push(Token::Op(o2));
    }
    operators.push(Token::Op(o1));
}

/// Move operators to the output until the innermost open parenthesis, which
/// is left on the stack.
fn pop_until_paren(operators: &mut Vec<Token>, output: &mut Vec<Token>) -> Result<(), Error> {
    loop {
        match operators.last() {
            Some(Token::LParen) => return Ok(()),
            Some(Token::Op(_)) => {
                if let Some(token) = operators.pop() {
                    output.push(token);
                }
            }
            _ => return Err(Error::syntax("mismatched parenthesis")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn int(value: i64) -> Token {
        Token::Number(Value::Integer(value))
    }

    #[test_case("2 + 2" => Ok(vec![int(2), int(2), Token::Op(Op::Plus)]) ; "addition is parsed properly")]
    #[test_case("2+2" => Ok(vec![int(2), int(2), Token::Op(Op::Plus)]) ; "spaces are optional")]
    #[test_case("2-3" => Ok(vec![int(2), int(3), Token::Op(Op::Minus)]) ; "subtraction")]
    #[test_case("1+2*3" => Ok(vec![int(1), int(2), int(3), Token::Op(Op::Mul), Token::Op(Op::Plus)]) ; "precedence")]
    #[test_case("2**3**2" => Ok(vec![int(2), int(3), int(2), Token::Op(Op::Exp), Token::Op(Op::Exp)]) ; "power is right associative")]
    #[test_case("-2**2" => Ok(vec![int(2), int(2), Token::Op(Op::Exp), Token::Op(Op::Neg)]) ; "power binds tighter than negation")]
    #[test_case("2*-3" => Ok(vec![int(2), int(3), Token::Op(Op::Neg), Token::Op(Op::Mul)]) ; "negation after an operator")]
    #[test_case("+4" => Ok(vec![int(4)]) ; "unary plus is ignored")]
    #[test_case("3!" => Ok(vec![int(3), Token::Op(Op::Factorial)]) ; "postfix factorial")]
    #[test_case("2(3)" => Ok(vec![int(2), int(3), Token::Op(Op::Mul)]) ; "implicit multiplication")]
    #[test_case("nthroot(8,3)" => Ok(vec![int(8), int(3), Token::Call(Function::NthRoot, 2)]) ; "function with two arguments")]
    #[test_case("sin(30)" => Ok(vec![int(30), Token::Call(Function::Sin, 1)]) ; "function call")]
    #[test_case("0xFF" => Ok(vec![int(255)]) ; "hexadecimal prefix")]
    #[test_case("0b101" => Ok(vec![int(5)]) ; "binary prefix")]
    #[test_case("1.5e3" => Ok(vec![Token::Number(Value::Real(1500.0))]) ; "exponent")]
    fn parse(equation: &str) -> Result<Vec<Token>, Error> {
        Lexer::new(equation).parse()
    }

    #[test_case("(1+2" ; "unclosed parenthesis")]
    #[test_case("1+2)" ; "unopened parenthesis")]
    #[test_case("1+" ; "missing right operand")]
    #[test_case("*2" ; "missing left operand")]
    #[test_case("" ; "empty input")]
    #[test_case("()" ; "empty parenthesis")]
    #[test_case("foo(2)" ; "unknown function")]
    #[test_case("sin 30" ; "function without parenthesis")]
    #[test_case("sin(1,2)" ; "too many arguments")]
    #[test_case("nthroot(8)" ; "too few arguments")]
    #[test_case("(1,2)" ; "comma outside of a call")]
    #[test_case("2 $ 3" ; "unknown character")]
    #[test_case("1.2.3" ; "invalid number")]
    fn syntax_errors(equation: &str) {
        let result = Lexer::new(equation).parse();
        assert!(matches!(result, Err(Error::SyntaxError(_))), "{:?}", result);
    }

    #[test]
    fn constants() {
        assert_eq!(
            Lexer::new("pi").parse(),
            Ok(vec![Token::Number(Value::Real(std::f64::consts::PI))])
        );
        assert_eq!(
            Lexer::new("2e").parse(),
            Ok(vec![
                int(2),
                Token::Number(Value::Real(std::f64::consts::E)),
                Token::Op(Op::Mul)
            ])
        );
    }

    #[test]
    fn programmer_literals() {
        assert_eq!(
            Lexer::with_base("FF+A", NumeralBase::Hexadecimal).parse(),
            Ok(vec![int(255), int(10), Token::Op(Op::Plus)])
        );
        assert_eq!(
            Lexer::with_base("17", NumeralBase::Octal).parse(),
            Ok(vec![int(15)])
        );
        assert_eq!(
            Lexer::with_base("0x10", NumeralBase::Binary).parse(),
            Ok(vec![int(16)])
        );
        assert!(Lexer::with_base("12", NumeralBase::Binary).parse().is_err());
        assert!(Lexer::with_base("1.5", NumeralBase::Octal).parse().is_err());
    }

    #[test]
    fn huge_literals() {
        assert_eq!(
            Lexer::new("99999999999999999999").parse(),
            Ok(vec![Token::Number(Value::Real(1e20))])
        );
        assert!(matches!(
            Lexer::new("1e999").parse(),
            Err(Error::Overflow(_))
        ));
    }
}
