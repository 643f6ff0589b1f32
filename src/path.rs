//! Positional element paths.
//!
//! A small XPath subset: `/` and `//` steps, name tests (`div` or `*`),
//! and `[n]` / `[@attr="value"]` predicates. Enough to address one element
//! in a fixed page layout, declared as data rather than computed in loops.

use std::fmt;
use std::iter;

use select::document::Document;
use select::node::Node;
use select::predicate::Any;

use crate::config::GridLayout;
use crate::error::PathError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Named(String),
}

impl NameTest {
    fn matches(&self, name: &str) -> bool {
        match self {
            NameTest::Any => true,
            NameTest::Named(expected) => expected.eq_ignore_ascii_case(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    /// 1-based position among the candidates left by earlier filters.
    Position(usize),
    Attr(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
    filters: Vec<Filter>,
}

impl Step {
    fn select_from<'a>(&self, siblings: impl Iterator<Item = Node<'a>>, out: &mut Vec<Node<'a>>) {
        let mut candidates: Vec<Node<'a>> = siblings
            .filter(|node| node.name().map_or(false, |name| self.test.matches(name)))
            .collect();

        for filter in &self.filters {
            candidates = match filter {
                Filter::Position(n) => candidates.get(n - 1).copied().into_iter().collect(),
                Filter::Attr(key, value) => candidates
                    .into_iter()
                    .filter(|node| node.attr(key) == Some(value.as_str()))
                    .collect(),
            };
        }

        out.extend(candidates);
    }
}

/// A parsed path that resolves to at most one element of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath {
    source: String,
    steps: Vec<Step>,
}

impl ElementPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let source = path.trim();
        if source.is_empty() {
            return Err(PathError::Empty);
        }
        if !source.starts_with('/') {
            return Err(PathError::Relative(source.to_owned()));
        }

        let steps = split_steps(source)?
            .into_iter()
            .map(|(axis, text)| parse_step(axis, text))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: source.to_owned(),
            steps,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// First matching element in document order.
    pub fn resolve<'a>(&self, document: &'a Document) -> Option<Node<'a>> {
        // `None` stands for the document itself.
        let mut contexts: Vec<Option<Node<'a>>> = vec![None];

        for step in &self.steps {
            let mut matched = Vec::new();
            for &context in &contexts {
                match step.axis {
                    Axis::Child => step.select_from(children(document, context), &mut matched),
                    Axis::Descendant => {
                        for origin in self_and_descendants(document, context) {
                            step.select_from(children(document, origin), &mut matched);
                        }
                    }
                }
            }

            matched.sort_by_key(|node| node.index());
            matched.dedup_by_key(|node| node.index());
            if matched.is_empty() {
                return None;
            }
            contexts = matched.into_iter().map(Some).collect();
        }

        contexts.into_iter().flatten().next()
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for ElementPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn children<'a>(
    document: &'a Document,
    parent: Option<Node<'a>>,
) -> Box<dyn Iterator<Item = Node<'a>> + 'a> {
    match parent {
        Some(node) => Box::new(node.children()),
        None => Box::new(document.find(Any).filter(|node| node.parent().is_none())),
    }
}

fn self_and_descendants<'a>(
    document: &'a Document,
    context: Option<Node<'a>>,
) -> Vec<Option<Node<'a>>> {
    match context {
        Some(node) => iter::once(Some(node))
            .chain(node.descendants().map(Some))
            .collect(),
        None => iter::once(None).chain(document.find(Any).map(Some)).collect(),
    }
}

fn split_steps(path: &str) -> Result<Vec<(Axis, &str)>, PathError> {
    let bytes = path.as_bytes();
    let mut steps = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let axis = if bytes.get(i + 1) == Some(&b'/') {
            i += 2;
            Axis::Descendant
        } else {
            i += 1;
            Axis::Child
        };

        let start = i;
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;
        while i < bytes.len() {
            let b = bytes[i];
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None => match b {
                    b'"' | b'\'' if depth > 0 => quote = Some(b),
                    b'[' => depth += 1,
                    b']' => depth = depth.saturating_sub(1),
                    b'/' if depth == 0 => break,
                    _ => {}
                },
            }
            i += 1;
        }

        if start == i {
            return Err(PathError::EmptyStep(start));
        }
        steps.push((axis, &path[start..i]));
    }

    Ok(steps)
}

fn parse_step(axis: Axis, text: &str) -> Result<Step, PathError> {
    let (name, mut rest) = match text.find('[') {
        Some(idx) => (&text[..idx], &text[idx..]),
        None => (text, ""),
    };

    let test = match name {
        "*" => NameTest::Any,
        _ if is_name(name) => NameTest::Named(name.to_ascii_lowercase()),
        _ => return Err(PathError::InvalidName(text.to_owned())),
    };

    let mut filters = Vec::new();
    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return Err(PathError::InvalidName(text.to_owned()));
        }
        let close = closing_bracket(rest)
            .ok_or_else(|| PathError::UnterminatedPredicate(text.to_owned()))?;
        filters.push(parse_filter(&rest[1..close], text)?);
        rest = &rest[close + 1..];
    }

    Ok(Step {
        axis,
        test,
        filters,
    })
}

fn parse_filter(inner: &str, step: &str) -> Result<Filter, PathError> {
    let inner = inner.trim();

    if !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit()) {
        return match inner.parse::<usize>() {
            Ok(0) => Err(PathError::ZeroPosition(step.to_owned())),
            Ok(n) => Ok(Filter::Position(n)),
            Err(_) => Err(PathError::UnsupportedPredicate(inner.to_owned())),
        };
    }

    let unsupported = || PathError::UnsupportedPredicate(inner.to_owned());
    let attr = inner.strip_prefix('@').ok_or_else(unsupported)?;
    let (key, value) = attr.split_once('=').ok_or_else(unsupported)?;
    let key = key.trim();
    let value = value.trim();

    let quoted = value.len() >= 2
        && (value.starts_with('"') && value.ends_with('"')
            || value.starts_with('\'') && value.ends_with('\''));
    if !is_name(key) || !quoted {
        return Err(unsupported());
    }

    Ok(Filter::Attr(
        key.to_owned(),
        value[1..value.len() - 1].to_owned(),
    ))
}

fn closing_bracket(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                ']' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

/// Expands a `{row}`/`{col}` path template over every grid cell, row-major.
pub struct NameSelectors;

impl NameSelectors {
    pub fn from_template(template: &str, layout: &GridLayout) -> Result<Vec<ElementPath>, PathError> {
        layout
            .cells()
            .into_iter()
            .map(|(row, col)| {
                let path = template
                    .replace("{row}", &row.to_string())
                    .replace("{col}", &col.to_string());
                ElementPath::parse(&path)
            })
            .collect()
    }
}
