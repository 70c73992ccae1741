//! Tolerant parser for `CREATE TABLE` statements.
//!
//! Anything that does not look like a table clause, or a column entry that
//! does not have at least a name and a type, is skipped. Parsing never fails:
//! malformed input produces fewer tables, possibly none.

use log::{debug, trace};
use winnow::ascii::{Caseless, digit1, multispace0, multispace1};
use winnow::combinator::{opt, preceded};
use winnow::error::ParserError;
use winnow::prelude::*;
use winnow::token::take_till;

use crate::ddl_ast::*;

/// Token that introduces a table-level `PRIMARY KEY (...)` constraint.
///
/// Such an entry parses as a column named `PRIMARY` of type `KEY`; it is
/// dropped instead of becoming an attribute.
const PRIMARY_MARKER: &str = "PRIMARY";

pub fn parse_ddl(input: &str) -> Vec<TableDescriptor> {
    let text = strip_numeric_specifiers(&strip_identifier_quotes(input));

    let mut tables = Vec::new();
    let mut remaining: &str = &text;
    while !remaining.is_empty() {
        let mut cursor = remaining;
        match table_clause.parse_next(&mut cursor) {
            Ok(table) => {
                debug!(
                    table = table.name.as_str(),
                    attributes = table.attributes.len(),
                    foreign_keys = table.foreign_keys.len();
                    "Parsed table"
                );
                tables.push(table);
                remaining = cursor;
            }
            Err(_) => {
                if starts_with_caseless(remaining, "CREATE") {
                    debug!("Skipping malformed CREATE TABLE candidate");
                }
                let skip = remaining.chars().next().map_or(1, char::len_utf8);
                remaining = &remaining[skip..];
            }
        }
    }

    tables
}

fn strip_identifier_quotes(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '`' | '"' | '[' | ']'))
        .collect()
}

/// Removes `(50)`-style length specifiers along with the whitespace in front.
///
/// Only purely numeric contents qualify; `DECIMAL(10,2)` is left alone.
fn strip_numeric_specifiers(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('(') {
        out.push_str(&rest[..open]);
        let mut probe = &rest[open + 1..];
        if numeric_specifier_tail(&mut probe).is_ok() {
            let kept = out.trim_end().len();
            out.truncate(kept);
        } else {
            out.push('(');
            probe = &rest[open + 1..];
        }
        rest = probe;
    }
    out.push_str(rest);
    out
}

fn numeric_specifier_tail(input: &mut &str) -> winnow::Result<()> {
    (multispace0, digit1, multispace0, ')').void().parse_next(input)
}

fn table_clause(input: &mut &str) -> winnow::Result<TableDescriptor> {
    Caseless("CREATE").parse_next(input)?;
    multispace1.parse_next(input)?;
    Caseless("TABLE").parse_next(input)?;
    multispace1.parse_next(input)?;
    opt(if_not_exists).parse_next(input)?;
    let name = table_name.parse_next(input)?;
    multispace0.parse_next(input)?;
    let body = parenthesized.parse_next(input)?;

    let mut table = TableDescriptor {
        name: name.to_string(),
        ..TableDescriptor::default()
    };

    for entry in split_columns(body) {
        let mut entry_input = entry;
        let Ok(column) = column_definition.parse_next(&mut entry_input) else {
            trace!(table = name, entry; "Skipping unrecognised column entry");
            continue;
        };

        if let Some((referenced_table, referenced_attribute)) = column.reference {
            table.foreign_keys.push(ForeignKeyRef {
                attribute: column.name.to_string(),
                referenced_table: referenced_table.to_string(),
                referenced_attribute: referenced_attribute.to_string(),
            });
        }

        if column.name.eq_ignore_ascii_case(PRIMARY_MARKER) {
            continue;
        }

        table.attributes.push(AttributeDescriptor {
            name: column.name.to_string(),
            data_type: column.data_type.to_string(),
            primary_key: column.primary_key,
        });
    }

    Ok(table)
}

fn if_not_exists(input: &mut &str) -> winnow::Result<()> {
    (
        Caseless("IF"),
        multispace1,
        Caseless("NOT"),
        multispace1,
        Caseless("EXISTS"),
        multispace1,
    )
        .void()
        .parse_next(input)
}

fn table_name<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_till(1.., |c: char| c.is_whitespace() || c == '(').parse_next(input)
}

/// Consumes `( ... )` up to the balancing parenthesis and returns the inside.
fn parenthesized<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    '('.parse_next(input)?;
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => {
                let body = &input[..i];
                *input = &input[i + 1..];
                return Ok(body);
            }
            ')' => depth -= 1,
            _ => {}
        }
    }
    Err(ParserError::from_input(input))
}

/// Splits a table body on commas that are not nested inside parentheses.
fn split_columns(body: &str) -> Vec<&str> {
    let mut columns = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                columns.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    columns.push(body[start..].trim());
    columns.retain(|c| !c.is_empty());
    columns
}

#[derive(Debug)]
struct ColumnDefinition<'s> {
    name: &'s str,
    data_type: &'s str,
    primary_key: bool,
    reference: Option<(&'s str, &'s str)>,
}

fn column_definition<'s>(input: &mut &'s str) -> winnow::Result<ColumnDefinition<'s>> {
    multispace0.parse_next(input)?;
    let name = word.parse_next(input)?;
    multispace1.parse_next(input)?;
    let data_type = word.parse_next(input)?;
    let primary_key = opt(primary_key_marker).parse_next(input)?.is_some();
    let reference = opt(preceded(multispace1, references_clause)).parse_next(input)?;

    Ok(ColumnDefinition {
        name,
        data_type,
        primary_key,
        reference,
    })
}

fn word<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_till(1.., char::is_whitespace).parse_next(input)
}

fn primary_key_marker(input: &mut &str) -> winnow::Result<()> {
    (multispace1, Caseless("PRIMARY"), multispace1, Caseless("KEY"))
        .void()
        .parse_next(input)
}

fn references_clause<'s>(input: &mut &'s str) -> winnow::Result<(&'s str, &'s str)> {
    Caseless("REFERENCES").parse_next(input)?;
    multispace1.parse_next(input)?;
    let table = table_name.parse_next(input)?;
    multispace0.parse_next(input)?;
    '('.parse_next(input)?;
    multispace0.parse_next(input)?;
    let column = take_till(1.., |c: char| c.is_whitespace() || c == ')').parse_next(input)?;
    multispace0.parse_next(input)?;
    ')'.parse_next(input)?;
    Ok((table, column))
}

fn starts_with_caseless(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attr(name: &str, data_type: &str, primary_key: bool) -> AttributeDescriptor {
        AttributeDescriptor {
            name: name.into(),
            data_type: data_type.into(),
            primary_key,
        }
    }

    #[test]
    fn strip_quotes_removes_backticks() {
        assert_eq!(strip_identifier_quotes("`users`.`id`"), "users.id");
        assert_eq!(strip_identifier_quotes("\"users\""), "users");
    }

    #[test]
    fn strip_numeric_specifier_simple() {
        assert_eq!(strip_numeric_specifiers("VARCHAR(50)"), "VARCHAR");
        assert_eq!(strip_numeric_specifiers("CHAR ( 8 ) NOT NULL"), "CHAR NOT NULL");
    }

    #[test]
    fn strip_numeric_specifier_keeps_non_numeric() {
        assert_eq!(strip_numeric_specifiers("DECIMAL(10,2)"), "DECIMAL(10,2)");
        assert_eq!(strip_numeric_specifiers("A(id)"), "A(id)");
        assert_eq!(strip_numeric_specifiers("open ( only"), "open ( only");
    }

    #[test]
    fn parenthesized_balances_nested() {
        let mut input = "(a INT, b DECIMAL(10,2)) rest";
        let body = parenthesized(&mut input).unwrap();
        assert_eq!(body, "a INT, b DECIMAL(10,2)");
        assert_eq!(input, " rest");
    }

    #[test]
    fn parenthesized_unbalanced_fails() {
        let mut input = "(a INT, b INT";
        assert!(parenthesized(&mut input).is_err());
    }

    #[test]
    fn split_columns_respects_parentheses() {
        assert_eq!(
            split_columns("id INT, price DECIMAL(10,2), ref INT REFERENCES t(id)"),
            vec!["id INT", "price DECIMAL(10,2)", "ref INT REFERENCES t(id)"]
        );
    }

    #[test]
    fn split_columns_drops_empty_entries() {
        assert_eq!(split_columns(" id INT ,, "), vec!["id INT"]);
    }

    #[test]
    fn column_with_primary_key() {
        let mut input = "id INT PRIMARY KEY";
        let column = column_definition(&mut input).unwrap();
        assert_eq!(column.name, "id");
        assert_eq!(column.data_type, "INT");
        assert!(column.primary_key);
        assert!(column.reference.is_none());
    }

    #[test]
    fn column_with_reference_lowercase() {
        let mut input = "owner_id int references users (id) on delete cascade";
        let column = column_definition(&mut input).unwrap();
        assert_eq!(column.reference, Some(("users", "id")));
        assert!(!column.primary_key);
    }

    #[test]
    fn column_with_primary_key_and_reference() {
        let mut input = "user_id INT PRIMARY KEY REFERENCES users(id)";
        let column = column_definition(&mut input).unwrap();
        assert!(column.primary_key);
        assert_eq!(column.reference, Some(("users", "id")));
    }

    #[test]
    fn column_needs_name_and_type() {
        let mut input = "lonely";
        assert!(column_definition(&mut input).is_err());
    }

    #[test]
    fn primary_key_marker_must_follow_type() {
        let mut input = "id INT NOT NULL PRIMARY KEY";
        let column = column_definition(&mut input).unwrap();
        assert!(!column.primary_key);
    }

    #[test]
    fn parse_single_table() {
        let tables = parse_ddl("CREATE TABLE Foo (id INT PRIMARY KEY, name VARCHAR(50))");
        assert_eq!(
            tables,
            vec![TableDescriptor {
                name: "Foo".into(),
                attributes: vec![attr("id", "INT", true), attr("name", "VARCHAR", false)],
                foreign_keys: vec![],
            }]
        );
    }

    #[test]
    fn parse_table_level_primary_key_is_dropped() {
        let tables = parse_ddl("CREATE TABLE t (id INT, PRIMARY KEY (id))");
        assert_eq!(tables[0].attributes, vec![attr("id", "INT", false)]);
    }

    #[test]
    fn parse_if_not_exists() {
        let tables = parse_ddl("create table if not exists users (id int)");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "users");
    }

    #[test]
    fn parse_skips_malformed_clause_and_continues() {
        let tables = parse_ddl("CREATE TABLE broken id INT; CREATE TABLE ok (id INT)");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "ok");
    }

    #[test]
    fn parse_unclosed_body_yields_nothing() {
        assert!(parse_ddl("CREATE TABLE t (id INT").is_empty());
    }

    #[test]
    fn parse_empty_body_keeps_table() {
        let tables = parse_ddl("CREATE TABLE empty ()");
        assert_eq!(tables.len(), 1);
        assert!(tables[0].attributes.is_empty());
    }

    #[test]
    fn parse_quoted_identifiers() {
        let tables = parse_ddl("CREATE TABLE `orders` (`id` INT, `user_id` INT REFERENCES `users`(`id`))");
        assert_eq!(tables[0].name, "orders");
        assert_eq!(tables[0].foreign_keys[0].referenced_table, "users");
    }

    #[test]
    fn parse_non_ascii_text_does_not_panic() {
        assert!(parse_ddl("表 CREATE é TABLE ü").is_empty());
    }
}
