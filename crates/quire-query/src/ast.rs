//! Query clause tree.
//!
//! Represents a compiled filter before it is rendered to a query string.
//! Parenthesization is explicit ([`Clause::Group`]) so the emitted text follows
//! the grouping decisions of the compiler exactly.

use std::{borrow::Cow, fmt};

use crate::Operator;

/// How literals are written when rendering a clause tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Human-readable output.
    Plain,
    /// Field names and literals percent-encoded for use in a URL parameter.
    Percent,
}

impl Encoding {
    /// Encodes a field name or literal; operators and parentheses never pass here.
    fn literal<'a>(self, text: &'a str) -> Cow<'a, str> {
        match self {
            Self::Plain => Cow::Borrowed(text),
            Self::Percent => urlencoding::encode(text),
        }
    }
}

/// A compiled query clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// A quoted literal scoped to a field: `field:"value"`.
    Term {
        /// Field name.
        field: String,
        /// Literal value (unquoted, unescaped).
        value: String,
    },

    /// Conjunction, rendered `a AND b ...`.
    All(Vec<Self>),

    /// Disjunction, rendered `a OR b ...`.
    Any(Vec<Self>),

    /// Clauses in typed order, each after the first prefixed by its operator.
    Sequence(Vec<(Operator, Self)>),

    /// Negation, rendered `NOT inner`.
    Not(Box<Self>),

    /// Explicit parentheses.
    Group(Box<Self>),

    /// Inclusive range: `field:[from TO to]`.
    Range {
        /// Field name.
        field: String,
        /// Lower bound as written into the query.
        from: String,
        /// Upper bound as written into the query.
        to: String,
    },
}

impl Clause {
    /// Creates a field term.
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a conjunction, unwrapping a single element.
    pub fn all(mut clauses: Vec<Self>) -> Self {
        match clauses.len() {
            1 => clauses.remove(0),
            _ => Self::All(clauses),
        }
    }

    /// Creates a disjunction, unwrapping a single element.
    pub fn any(mut clauses: Vec<Self>) -> Self {
        match clauses.len() {
            1 => clauses.remove(0),
            _ => Self::Any(clauses),
        }
    }

    /// Creates a negation.
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Parenthesizes the clause if it combines more than one clause.
    pub fn grouped(self) -> Self {
        if self.is_compound() {
            Self::Group(Box::new(self))
        } else {
            self
        }
    }

    /// True if rendering joins several clauses with operators.
    fn is_compound(&self) -> bool {
        match self {
            Self::All(clauses) | Self::Any(clauses) => clauses.len() > 1,
            Self::Sequence(clauses) => clauses.len() > 1,
            _ => false,
        }
    }

    /// True if the clause renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::All(clauses) | Self::Any(clauses) => clauses.is_empty(),
            Self::Sequence(clauses) => clauses.is_empty(),
            _ => false,
        }
    }

    /// Renders the clause as a readable query string.
    pub fn to_query_string(&self) -> String {
        self.render(Encoding::Plain)
    }

    /// Renders the clause with the given literal encoding.
    pub fn render(&self, encoding: Encoding) -> String {
        match self {
            Self::Term { field, value } => {
                let quoted = format!("\"{}\"", escape_literal(value));
                format!(
                    "{}:{}",
                    encoding.literal(field),
                    encoding.literal(&quoted)
                )
            }
            Self::All(clauses) => join(clauses, " AND ", encoding),
            Self::Any(clauses) => join(clauses, " OR ", encoding),
            Self::Sequence(clauses) => {
                let mut out = String::new();
                for (i, (op, clause)) in clauses.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                        out.push_str(op.keyword());
                        out.push(' ');
                    }
                    out.push_str(&clause.render(encoding));
                }
                out
            }
            Self::Not(inner) => format!("NOT {}", inner.render(encoding)),
            Self::Group(inner) => format!("({})", inner.render(encoding)),
            Self::Range { field, from, to } => format!(
                "{}:[{} TO {}]",
                encoding.literal(field),
                encoding.literal(from),
                encoding.literal(to)
            ),
        }
    }

    /// Formats the clause as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term { field, value } => writeln!(f, "{prefix}Term({field:?}, {value:?})"),
            Self::All(clauses) => {
                writeln!(f, "{prefix}All")?;
                for clause in clauses {
                    clause.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Any(clauses) => {
                writeln!(f, "{prefix}Any")?;
                for clause in clauses {
                    clause.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Sequence(clauses) => {
                writeln!(f, "{prefix}Sequence")?;
                for (i, (op, clause)) in clauses.iter().enumerate() {
                    if i > 0 {
                        writeln!(f, "{prefix}  {}", op.keyword())?;
                    }
                    clause.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::Group(inner) => {
                writeln!(f, "{prefix}Group")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::Range { field, from, to } => {
                writeln!(f, "{prefix}Range({field:?}, {from:?}, {to:?})")
            }
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Renders each clause and joins them with `separator`.
fn join(clauses: &[Clause], separator: &str, encoding: Encoding) -> String {
    clauses
        .iter()
        .map(|c| c.render(encoding))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Escapes characters that would terminate a quoted literal.
fn escape_literal(value: &str) -> Cow<'_, str> {
    if !value.contains(['"', '\\']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_single_element_unwraps() {
        let single = Clause::all(vec![Clause::term("title", "a")]);
        assert_eq!(single, Clause::term("title", "a"));
    }

    #[test]
    fn any_single_element_unwraps() {
        let single = Clause::any(vec![Clause::term("title", "a")]);
        assert_eq!(single, Clause::term("title", "a"));
    }

    #[test]
    fn grouped_only_wraps_compound() {
        let term = Clause::term("title", "a");
        assert_eq!(term.clone().grouped(), term);

        let pair = Clause::any(vec![Clause::term("t", "a"), Clause::term("t", "b")]);
        assert_eq!(pair.grouped().to_query_string(), r#"(t:"a" OR t:"b")"#);
    }

    #[test]
    fn sequence_prefixes_operators_after_first() {
        let seq = Clause::Sequence(vec![
            (Operator::And, Clause::term("f", "x")),
            (Operator::Or, Clause::term("f", "y")),
            (Operator::And, Clause::term("f", "z")),
        ]);
        assert_eq!(
            seq.to_query_string(),
            r#"f:"x" OR f:"y" AND f:"z""#
        );
    }

    #[test]
    fn not_and_range_render() {
        let not = Clause::not(Clause::term("author", "Kant"));
        assert_eq!(not.to_query_string(), r#"NOT author:"Kant""#);

        let range = Clause::Range {
            field: "date".into(),
            from: "2020-01-01T00:00:00Z".into(),
            to: "2020-12-31T23:59:59Z".into(),
        };
        assert_eq!(
            range.to_query_string(),
            "date:[2020-01-01T00:00:00Z TO 2020-12-31T23:59:59Z]"
        );
    }

    #[test]
    fn literal_quotes_are_escaped() {
        let term = Clause::term("title", r#"say "hi" \o/"#);
        assert_eq!(term.to_query_string(), r#"title:"say \"hi\" \\o/""#);
    }

    #[test]
    fn percent_encoding_spares_operators() {
        let clause = Clause::all(vec![
            Clause::term("full text", "war & peace"),
            Clause::not(Clause::term("author", "Tolstoy")),
        ])
        .grouped();
        assert_eq!(
            clause.render(Encoding::Percent),
            "(full%20text:%22war%20%26%20peace%22 AND NOT author:%22Tolstoy%22)"
        );
    }

    #[test]
    fn empty_conjunction_renders_nothing() {
        let empty = Clause::all(vec![]);
        assert!(empty.is_empty());
        assert_eq!(empty.to_query_string(), "");
    }

    #[test]
    fn display_is_a_tree() {
        let clause = Clause::not(Clause::term("title", "draft"));
        let tree = clause.to_string();
        assert_eq!(tree, "Not\n  Term(\"title\", \"draft\")\n");
    }
}
