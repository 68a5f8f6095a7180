use ecpu::Reg;
use pest::iterators::Pair;

use crate::error::ErrorKind;
use crate::parser::Rule;

/// A literal, quoted string or symbol reference in operand position.
///
/// Strings are decoded (escapes collapsed) as soon as they are parsed;
/// where a numeric value is required they must be exactly one byte long,
/// which is what makes character operands like `#'Y'` work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr<'i> {
    Number(i32),
    Str(Vec<u8>),
    Symbol(&'i str),
}

/// An operand tagged with its addressing mode.
///
/// `Value` is a bare number or symbol whose mode depends on the mnemonic:
/// immediate for LD and the ALU operations, direct for ST, and an
/// absolute address for JMP/CALL and the branches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand<'i> {
    Register(Reg),
    Immediate(Expr<'i>),
    Direct(Expr<'i>),
    Indexed(Reg, Expr<'i>),
    Value(Expr<'i>),
}

pub fn process_operand(pair: Pair<Rule>) -> Result<Operand, ErrorKind> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::immediate => Ok(Operand::Immediate(process_expr(
            inner.into_inner().next().unwrap(),
        )?)),
        Rule::indexed => {
            let mut pairs = inner.into_inner();
            let reg = process_register(&pairs.next().unwrap())?;
            let offset = match pairs.next() {
                Some(expr) => process_expr(expr)?,
                None => Expr::Number(0),
            };
            Ok(Operand::Indexed(reg, offset))
        }
        Rule::direct => Ok(Operand::Direct(process_expr(
            inner.into_inner().next().unwrap(),
        )?)),
        Rule::register => Ok(Operand::Register(process_register(&inner)?)),
        Rule::expr => Ok(Operand::Value(process_expr(inner)?)),
        _ => unreachable!(),
    }
}

pub fn process_expr(pair: Pair<Rule>) -> Result<Expr, ErrorKind> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::hex_int => Ok(Expr::Number(process_radix(inner.as_str(), 16)?)),
        Rule::bin_int => Ok(Expr::Number(process_radix(inner.as_str(), 2)?)),
        Rule::dec_int => inner
            .as_str()
            .parse::<i32>()
            .map(Expr::Number)
            .map_err(|_| ErrorKind::BadNumber(inner.as_str().to_owned())),
        Rule::string => {
            let body = inner.into_inner().next().unwrap();
            Ok(Expr::Str(decode_string(body.as_str())?))
        }
        Rule::identifier => Ok(Expr::Symbol(inner.as_str())),
        _ => unreachable!(),
    }
}

fn process_register(pair: &Pair<Rule>) -> Result<Reg, ErrorKind> {
    pair.as_str()
        .parse()
        .map_err(|e: ecpu::ParseEnumError| ErrorKind::Syntax(e.to_string()))
}

/// Radix-prefixed literal (`0x…`, `0b…`). Values wider than 32 bits are
/// rejected; emission masks to 8 bits later.
fn process_radix(text: &str, radix: u32) -> Result<i32, ErrorKind> {
    u32::from_str_radix(&text[2..], radix)
        .map(|v| v as i32)
        .map_err(|_| ErrorKind::BadNumber(text.to_owned()))
}

/// Decodes a quoted string body to bytes. Escapes are `\n`, `\t`, `\r`,
/// `\0` and `\\`; anything else after a backslash and any non-ASCII
/// character is an error.
pub fn decode_string(text: &str) -> Result<Vec<u8>, ErrorKind> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => bytes.push(0x0A),
                Some('t') => bytes.push(0x09),
                Some('r') => bytes.push(0x0D),
                Some('0') => bytes.push(0x00),
                Some('\\') => bytes.push(0x5C),
                Some(other) => {
                    return Err(ErrorKind::BadString(format!(
                        "unknown escape sequence '\\{}'",
                        other
                    )));
                }
                None => {
                    return Err(ErrorKind::BadString(
                        "trailing backslash in string".to_owned(),
                    ));
                }
            }
        } else if !ch.is_ascii() {
            return Err(ErrorKind::BadString(format!(
                "non-ASCII character '{}' (U+{:04X})",
                ch, ch as u32
            )));
        } else {
            bytes.push(ch as u8);
        }
    }

    Ok(bytes)
}
