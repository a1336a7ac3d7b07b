use std::iter::Peekable;
use std::str::Chars;

/// A combined `element#property` name, split at its first unquoted delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementAndProperty {
    pub element: String,
    pub delimiter: String,
    pub property: String,
}

fn take_escaped_quote(chars: &mut Peekable<Chars<'_>>) -> bool {
    chars.next_if_eq(&'"').is_some()
}

/// Removes unescaped double quotes from `text` and turns `\"` into `"`.
pub fn unquote(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if take_escaped_quote(&mut chars) => result.push('"'),
            '"' => (),
            c => result.push(c),
        }
    }
    result
}

/// Splits a name at its first unquoted `#` or `@`, unquoting both halves.
///
/// A `<` or `>` directly after the delimiter marks a getter or setter and
/// becomes part of the delimiter.
pub fn unquote_element_and_property(text: &str) -> ElementAndProperty {
    let mut split = ElementAndProperty::default();
    let mut quoted = false;
    let mut in_property = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let buffer = if in_property { &mut split.property } else { &mut split.element };
        match c {
            '\\' if take_escaped_quote(&mut chars) => buffer.push('"'),
            '"' => quoted = !quoted,
            '#' | '@' if !quoted && !in_property => {
                split.delimiter.push(c);
                if let Some(marker) = chars.next_if(|&c| c == '<' || c == '>') {
                    split.delimiter.push(marker);
                }
                in_property = true;
            }
            c => buffer.push(c),
        }
    }

    split
}
