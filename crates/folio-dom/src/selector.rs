//! Selector matching
//!
//! The small selector subset the navigation engine queries with:
//! `#id`, `.class`, `tag`, and `tag[attr]` (attribute presence).

use crate::Element;

/// Parsed simple selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `tag`
    Tag(String),
    /// `tag[attr]` - tag with attribute present
    TagWithAttr(String, String),
}

impl Selector {
    /// Parse a selector string; unsupported syntax yields `None`
    pub fn parse(input: &str) -> Option<Selector> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(id) = input.strip_prefix('#') {
            return Some(Selector::Id(id.to_string()));
        }
        if let Some(class) = input.strip_prefix('.') {
            return Some(Selector::Class(class.to_string()));
        }
        if let Some((tag, rest)) = input.split_once('[') {
            let attr = rest.strip_suffix(']')?;
            if tag.is_empty() || attr.is_empty() {
                return None;
            }
            return Some(Selector::TagWithAttr(tag.to_string(), attr.to_string()));
        }
        if input.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Some(Selector::Tag(input.to_string()));
        }

        tracing::warn!("unsupported selector syntax: {input:?}");
        None
    }

    /// Check whether an element matches
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => element.classes.contains(class),
            Selector::Tag(tag) => element.tag == *tag,
            Selector::TagWithAttr(tag, attr) => {
                element.tag == *tag && element.has_attribute(attr)
            }
        }
    }
}
