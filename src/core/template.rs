//! # Template
//!
//! Splits a command template into literal text and `<name>` placeholders. Everything that
//! substitutes values into a template (preview and confirmation alike) walks this
//! component list, so both stages share one notion of what a token is.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // A `<`, one or more characters that are neither `<` nor `>`, then `>`.
    static ref TOKEN_RE: Regex = Regex::new(r"<([^<>]+)>").unwrap();
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateComponent<'a> {
    Literal(&'a str),
    /// `name` is the text between the brackets, `raw` the full `<name>` token.
    Placeholder { name: &'a str, raw: &'a str },
}

/// Transforms a template into its sequence of components, borrowing from the input.
/// Adjacent literal text is never split, so two literals are never neighbours.
pub fn tokenize(template: &str) -> Vec<TemplateComponent<'_>> {
    let mut components = Vec::new();
    let mut last_index = 0;

    for caps in TOKEN_RE.captures_iter(template) {
        let (Some(full_match), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if let Some(literal) = template.get(last_index..full_match.start())
            && !literal.is_empty()
        {
            components.push(TemplateComponent::Literal(literal));
        }
        components.push(TemplateComponent::Placeholder {
            name: name.as_str(),
            raw: full_match.as_str(),
        });
        last_index = full_match.end();
    }

    if let Some(rest) = template.get(last_index..)
        && !rest.is_empty()
    {
        components.push(TemplateComponent::Literal(rest));
    }

    components
}

/// Returns each distinct placeholder name in `template`, in first-occurrence order.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(template)
        .into_iter()
        .filter_map(|component| match component {
            TemplateComponent::Placeholder { name, .. } => Some(name),
            TemplateComponent::Literal(_) => None,
        })
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
