use std::borrow::Cow;
use std::fmt::{self, Write};

#[cfg(feature = "serde")]
use serde::Serialize;

/// An ordered set of attributes which is rendered into the opening tag of a node.
///
/// Names are unique; inserting a name that is already present keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AttrSet<'a> {
    entries: Vec<(&'static str, Cow<'a, str>)>,
}

impl<'a> AttrSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute unless an attribute of the same name is already present.
    pub fn insert(&mut self, name: &'static str, value: impl Into<Cow<'a, str>>) {
        if self.get(name).is_none() {
            self.entries.push((name, value.into()));
        }
    }

    /// Merge all attributes of `other` into `self`; existing names win.
    pub fn merge(&mut self, other: AttrSet<'a>) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find_map(|(n, v)| (*n == name).then_some(v.as_ref()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the attributes as ` name="value"` pairs.
    pub(crate) fn write_to(&self, s: &mut String) -> fmt::Result {
        for (name, value) in &self.entries {
            write!(s, " {name}=\"")?;
            escape_attribute_value(s, value);
            s.push('"');
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'static str, Cow<'a, str>)> for AttrSet<'a> {
    fn from_iter<T: IntoIterator<Item = (&'static str, Cow<'a, str>)>>(iter: T) -> Self {
        let mut set = AttrSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

fn escape_attribute_value(output: &mut String, input: &str) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            _ => output.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_wins() {
        let mut attrs = AttrSet::new();
        attrs.insert("mathcolor", "red");
        attrs.insert("mathcolor", "blue");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("mathcolor"), Some("red"));
    }

    #[test]
    fn merge_keeps_order() {
        let mut inner = AttrSet::new();
        inner.insert("mathvariant", "bold");
        let mut outer = AttrSet::new();
        outer.insert("mathcolor", "red");
        outer.insert("mathvariant", "normal");
        inner.merge(outer);

        let mut s = String::new();
        inner.write_to(&mut s).unwrap();
        assert_eq!(s, r#" mathvariant="bold" mathcolor="red""#);
    }

    #[test]
    fn values_are_escaped() {
        let attrs: AttrSet = [("title", Cow::Borrowed(r#"a "b" & <c>"#))]
            .into_iter()
            .collect();
        let mut s = String::new();
        attrs.write_to(&mut s).unwrap();
        assert_eq!(s, r#" title="a &quot;b&quot; &amp; &lt;c>""#);
    }
}
