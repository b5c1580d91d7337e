use std::collections::BTreeSet;

use thiserror::Error;

use crate::site::bindings::Bindings;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },

    #[error("invalid placeholder name '{name}' at byte {offset}")]
    InvalidName { name: String, offset: usize },

    #[error("no binding for placeholder '{name}'")]
    MissingBinding { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A text template with `{{name}}` placeholders, parsed once at load time.
///
/// Rendering substitutes bound values literally. A placeholder without a
/// binding fails the whole render; the placeholder text is never emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let inner = &rest[start + OPEN.len()..];
            let end = inner.find(CLOSE).ok_or(TemplateError::Unterminated {
                offset: offset + start,
            })?;

            let raw = &inner[..end];
            let name = raw.trim();
            if !is_valid_name(name) {
                return Err(TemplateError::InvalidName {
                    name: raw.to_string(),
                    offset: offset + start,
                });
            }
            segments.push(Segment::Placeholder(name.to_string()));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Names of every placeholder this template references.
    pub fn placeholders(&self) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    pub fn render(&self, bindings: &Bindings) -> Result<String, TemplateError> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            let part = match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Placeholder(name) => {
                    bindings
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingBinding { name: name.clone() })?
                }
            };
            parts.push(part);
        }
        Ok(parts.concat())
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> Bindings {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_plain_text_renders_unchanged() {
        let t = Template::parse("<p>no placeholders here</p>").unwrap();
        assert_eq!(
            t.render(&Bindings::new()).unwrap(),
            "<p>no placeholders here</p>"
        );
        assert!(t.placeholders().is_empty());
    }

    #[test]
    fn test_every_occurrence_is_substituted() {
        let t = Template::parse("cgdb-{{version}}.tar.gz and cgdb-{{version}}.ebuild").unwrap();
        let out = t.render(&bindings(&[("version", "0.6.5")])).unwrap();
        assert_eq!(out, "cgdb-0.6.5.tar.gz and cgdb-0.6.5.ebuild");
    }

    #[test]
    fn test_inner_whitespace_is_ignored() {
        let t = Template::parse("v{{ version }}").unwrap();
        assert_eq!(t.render(&bindings(&[("version", "1")])).unwrap(), "v1");
    }

    #[test]
    fn test_values_are_inserted_literally() {
        let t = Template::parse("{{a}}").unwrap();
        let out = t.render(&bindings(&[("a", "{{b}} & <i>")])).unwrap();
        assert_eq!(out, "{{b}} & <i>");
    }

    #[test]
    fn test_missing_binding_is_reported() {
        let t = Template::parse("<title>{{title}}</title>").unwrap();
        let err = t.render(&Bindings::new()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingBinding {
                name: "title".to_string()
            }
        );
    }

    #[test]
    fn test_placeholders_are_deduplicated() {
        let t = Template::parse("{{b}} {{a}} {{b}}").unwrap();
        let names: Vec<_> = t.placeholders().into_iter().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated_placeholder_is_rejected() {
        let err = Template::parse("abc {{version").unwrap_err();
        assert_eq!(err, TemplateError::Unterminated { offset: 4 });
    }

    #[test]
    fn test_empty_placeholder_is_rejected() {
        let err = Template::parse("x{{  }}").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidName { offset: 1, .. }));
    }

    #[test]
    fn test_offset_accounts_for_earlier_placeholders() {
        let err = Template::parse("{{a}}{{b c}}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::InvalidName {
                name: "b c".to_string(),
                offset: 5
            }
        );
    }

    #[test]
    fn test_lone_closing_braces_are_literal() {
        let t = Template::parse("function() { return {}}; }").unwrap();
        assert_eq!(
            t.render(&Bindings::new()).unwrap(),
            "function() { return {}}; }"
        );
    }

    #[test]
    fn test_dotted_and_dashed_names() {
        let t = Template::parse("{{site.name}}/{{release-tag}}").unwrap();
        let out = t
            .render(&bindings(&[("site.name", "cgdb"), ("release-tag", "v1")]))
            .unwrap();
        assert_eq!(out, "cgdb/v1");
    }
}
