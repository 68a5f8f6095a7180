use pest::iterators::Pair;

use crate::error::{Error, ErrorKind};
use crate::operand::{process_operand, Expr, Operand};
use crate::parser::{parse_line, syntax_message, Rule};

/// One source line: `[label:] [mnemonic [operands]] [; comment]`.
///
/// Lines that fail to parse keep their raw text (for the listing) with no
/// statement; the syntax diagnostic is recorded separately.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceLine<'i> {
    pub number: usize,
    pub raw: &'i str,
    pub label: Option<&'i str>,
    pub statement: Option<Statement<'i>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement<'i> {
    /// `.ORG expr` — moves the location counter, emits nothing.
    Org(Expr<'i>),
    /// `.EQU name, expr` — binds a constant, emits nothing.
    Equ(&'i str, Expr<'i>),
    /// `.DB item[, item …]` — bytes and strings, not null-terminated.
    Db(Vec<DbItem<'i>>),
    /// `.DS "string"` — decoded bytes plus a null terminator.
    Ds(Vec<u8>),
    Instr {
        mnemonic: String,
        operands: Vec<Operand<'i>>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DbItem<'i> {
    Bytes(Vec<u8>),
    Value(Expr<'i>),
}

/// Parses every source line up front. Syntax errors land in `errors` and
/// leave a statement-less line behind, so later passes still see the
/// right line count.
pub fn process_source<'i>(source: &'i str, errors: &mut Vec<Error>) -> Vec<SourceLine<'i>> {
    source
        .lines()
        .enumerate()
        .map(|(index, raw)| {
            let number = index + 1;
            match build_line(number, raw) {
                Ok(line) => line,
                Err(kind) => {
                    errors.push(Error::new(number, kind));
                    SourceLine {
                        number,
                        raw,
                        label: None,
                        statement: None,
                    }
                }
            }
        })
        .collect()
}

fn build_line(number: usize, raw: &str) -> Result<SourceLine, ErrorKind> {
    let pair = parse_line(raw).map_err(|e| ErrorKind::Syntax(syntax_message(&e)))?;

    let mut label = None;
    let mut statement = None;

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::label => label = Some(item.into_inner().next().unwrap().as_str()),
            Rule::instruction => statement = Some(build_statement(item)?),
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }

    Ok(SourceLine {
        number,
        raw,
        label,
        statement,
    })
}

fn build_statement(pair: Pair<Rule>) -> Result<Statement, ErrorKind> {
    let mut pairs = pair.into_inner();
    let mnemonic = pairs.next().unwrap().as_str().to_ascii_uppercase();

    let mut operands = Vec::new();
    if let Some(list) = pairs.next() {
        for operand in list.into_inner() {
            operands.push(process_operand(operand)?);
        }
    }

    match mnemonic.as_str() {
        ".ORG" => build_org(operands),
        ".EQU" => build_equ(operands),
        ".DB" => build_db(operands),
        ".DS" => build_ds(operands),
        _ => Ok(Statement::Instr { mnemonic, operands }),
    }
}

fn build_org(mut operands: Vec<Operand>) -> Result<Statement, ErrorKind> {
    match (operands.len(), operands.pop()) {
        (1, Some(Operand::Value(expr))) => Ok(Statement::Org(expr)),
        _ => Err(ErrorKind::Directive(
            ".ORG requires a single address value".to_owned(),
        )),
    }
}

fn build_equ(mut operands: Vec<Operand>) -> Result<Statement, ErrorKind> {
    let value = operands.pop();
    let name = operands.pop();
    match (operands.len(), name, value) {
        (0, Some(Operand::Value(Expr::Symbol(name))), Some(Operand::Value(expr))) => {
            Ok(Statement::Equ(name, expr))
        }
        _ => Err(ErrorKind::Directive(
            "invalid .EQU syntax (expected: .EQU name, value)".to_owned(),
        )),
    }
}

fn build_db(operands: Vec<Operand>) -> Result<Statement, ErrorKind> {
    let mut items = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand {
            Operand::Value(Expr::Str(bytes)) => items.push(DbItem::Bytes(bytes)),
            Operand::Value(expr) => items.push(DbItem::Value(expr)),
            _ => {
                return Err(ErrorKind::Directive(
                    ".DB items must be byte values or quoted strings".to_owned(),
                ));
            }
        }
    }
    Ok(Statement::Db(items))
}

fn build_ds(mut operands: Vec<Operand>) -> Result<Statement, ErrorKind> {
    match (operands.len(), operands.pop()) {
        (1, Some(Operand::Value(Expr::Str(bytes)))) => Ok(Statement::Ds(bytes)),
        _ => Err(ErrorKind::Directive(
            ".DS requires a quoted string".to_owned(),
        )),
    }
}
