//! Markup builders.
//!
//! Every builder returns an owned fragment. Attribute values are escaped;
//! `content` arguments are trusted markup and pass through untouched, so
//! callers wrap plain text in [`text`] first.

use std::fmt::Write as _;

/// Optional attributes shared by the element builders, rendered in field order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Attrs<'a> {
    pub id: Option<&'a str>,
    pub class: Option<&'a str>,
    pub href: Option<&'a str>,
    pub title: Option<&'a str>,
}

impl<'a> Attrs<'a> {
    pub fn class(class: &'a str) -> Self {
        Self {
            class: Some(class),
            ..Self::default()
        }
    }

    pub fn id(id: &'a str) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in [
            ("id", self.id),
            ("class", self.class),
            ("href", self.href),
            ("title", self.title),
        ] {
            if let Some(value) = value {
                let _ = write!(out, " {key}=\"{}\"", htmlize::escape_attribute(value));
            }
        }
        out
    }
}

/// Escapes plain text for use as element content.
pub fn text(s: &str) -> String {
    htmlize::escape_text(s).into_owned()
}

pub fn element(tag: &str, content: &str) -> String {
    format!("<{tag}>{content}</{tag}>")
}

pub fn div(attrs: &Attrs<'_>, content: &str) -> String {
    format!("<div{}>{content}</div>", attrs.render())
}

pub fn link(attrs: &Attrs<'_>, content: &str) -> String {
    format!("<a{}>{content}</a>", attrs.render())
}

/// Named in-page anchor, e.g. the jump target for a volume section.
pub fn anchor(name: &str) -> String {
    format!("<a name=\"{}\"></a>", htmlize::escape_attribute(name))
}

/// Link that moves the router to `hash` (with or without the leading `#`).
pub fn hash_link(hash: &str, content: &str) -> String {
    let href = if hash.starts_with('#') {
        hash.to_string()
    } else {
        format!("#{hash}")
    };
    link(
        &Attrs {
            href: Some(&href),
            ..Attrs::default()
        },
        content,
    )
}

pub fn unordered_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::from("<ul>");
    for item in items {
        out.push_str(&element("li", item.as_ref()));
    }
    out.push_str("</ul>");
    out
}
