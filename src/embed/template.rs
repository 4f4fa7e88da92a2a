//! Template types for typed variable injection.
//!
//! Placeholders are written `{{ name }}` and substituted in a single pass,
//! so a value that happens to contain a placeholder is never expanded.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    /// `(placeholder, value)` pairs. Values are inserted verbatim.
    fn vars(&self) -> Vec<(&'static str, &str)>;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        substitute(self.content, &vars.vars())
    }
}

/// Replace every `{{ key }}` with its value. Unknown keys are left as written.
pub fn substitute(content: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = after[..end].trim();
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute() {
        let vars = [("name", "quire"), ("n", "2")];
        assert_eq!(substitute("{{ name }} v{{n}}", &vars), "quire v2");
    }

    #[test]
    fn test_unknown_and_unterminated_kept() {
        let vars = [("a", "x")];
        assert_eq!(substitute("{{ b }} {{ a }} {{ a", &vars), "{{ b }} x {{ a");
    }

    #[test]
    fn test_values_not_reexpanded() {
        let vars = [("a", "{{ b }}"), ("b", "oops")];
        assert_eq!(substitute("{{ a }}", &vars), "{{ b }}");
    }
}
