// src/core/interpolator.rs

use crate::{
    constants::SLIDER_TOGGLE_SUFFIX,
    core::template::{self, TemplateComponent},
};
use std::collections::{BTreeMap, HashMap};

/// Anything that can answer "what value does `<key>` take?".
pub trait ValueSource {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl ValueSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ValueSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ValueSource for [(&str, &str)] {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

/// The one substitution rule shared by preview and confirmation.
///
/// Every `<key>` whose value is known and non-empty is replaced; every other token is
/// copied through verbatim. Values are never rescanned, so the result does not depend on
/// the order in which keys are visited.
fn substitute(template: &str, values: &(impl ValueSource + ?Sized)) -> String {
    let mut out = String::with_capacity(template.len());

    for component in template::tokenize(template) {
        match component {
            TemplateComponent::Literal(text) => out.push_str(text),
            TemplateComponent::Placeholder { name, raw } => {
                let value = if name.ends_with(SLIDER_TOGGLE_SUFFIX) {
                    None
                } else {
                    values.lookup(name).filter(|v| !v.is_empty())
                };
                out.push_str(value.unwrap_or(raw));
            }
        }
    }

    out
}

/// Substitutes the values entered so far into a command template for display.
pub fn materialize(template: &str, values: &(impl ValueSource + ?Sized)) -> String {
    let rendered = substitute(template, values);
    log::trace!("Materialized '{}' -> '{}'", template, rendered);
    rendered
}

/// Produces the string handed to the transport, from the confirmation-step values.
///
/// Same rule as [`materialize`]. A string without tokens comes back unchanged.
pub fn format_result(command: &str, final_values: &(impl ValueSource + ?Sized)) -> String {
    substitute(command, final_values)
}

/// The placeholders still left in a materialized string: the confirmation form's fields.
pub fn pending_placeholders(materialized: &str) -> Vec<String> {
    template::extract_placeholders(materialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_materialize_all_keys() {
        let v = values(&[("a", "1"), ("b", "2")]);
        assert_eq!(materialize("/give <a> <b>", &v), "/give 1 2");
    }

    #[test]
    fn test_unmatched_token_passthrough() {
        let v = values(&[("a", "1")]);
        assert_eq!(materialize("/give <a> <b>", &v), "/give 1 <b>");
    }

    #[test]
    fn test_empty_value_leaves_token() {
        let v = values(&[("a", ""), ("b", "2")]);
        assert_eq!(materialize("/give <a> <b>", &v), "/give <a> 2");
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let v = values(&[("uid", "10001")]);
        assert_eq!(
            materialize("/tp <uid> ; /heal <uid>", &v),
            "/tp 10001 ; /heal 10001"
        );
    }

    #[test]
    fn test_slider_toggle_keys_are_never_substituted() {
        let v = values(&[("amount", "5"), ("amount-useSlider", "true")]);
        assert_eq!(
            materialize("/give x<amount> <amount-useSlider>", &v),
            "/give x5 <amount-useSlider>"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        // Key order must not matter even when a value looks like another token.
        let v = values(&[("a", "<b>"), ("b", "2")]);
        assert_eq!(materialize("<a> <b>", &v), "<b> 2");
    }

    #[test]
    fn test_format_result_is_idempotent() {
        let v = values(&[("item", "501024"), ("amount", "5")]);
        let once = format_result("/give <item> x<amount> lv<level>", &v);
        let twice = format_result(&once, &v);
        assert_eq!(once, "/give 501024 x5 lv<level>");
        assert_eq!(once, twice);
        assert_eq!(format_result("/heal", &v), "/heal");
    }

    #[test]
    fn test_pending_placeholders_after_preview() {
        let v = values(&[("item", "501024")]);
        let preview = materialize("/give <item> x<amount> lv<level>", &v);
        assert_eq!(pending_placeholders(&preview), vec!["amount", "level"]);

        let confirmed = format_result(&preview, &values(&[("amount", "1"), ("level", "20")]));
        assert_eq!(confirmed, "/give 501024 x1 lv20");
        assert!(pending_placeholders(&confirmed).is_empty());
    }

    #[test]
    fn test_pair_slice_value_source() {
        let pairs: &[(&str, &str)] = &[("x", "1")];
        assert_eq!(materialize("<x><y>", pairs), "1<y>");
    }
}
