use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a page element (a chart container or the scroll-to-top
/// control).
///
/// Wraps `Arc<str>` so commands can be emitted on every resize without
/// reallocating the same ids. Compares equal to plain `&str` so
/// `assert_eq!(binding.container, "chart_averages")` reads naturally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(Arc<str>);

impl ElementId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl PartialEq<str> for ElementId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ElementId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl std::ops::Deref for ElementId {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ElementId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ElementId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    #[inline]
    fn from(s: &str) -> Self {
        ElementId(Arc::from(s))
    }
}

impl From<String> for ElementId {
    #[inline]
    fn from(s: String) -> Self {
        ElementId(Arc::from(s))
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Plain string on the wire; avoids serde's `rc` feature.

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Owned: JS values and escaped JSON strings cannot be borrowed.
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_str() {
        let id = ElementId::from("chart_linreg");
        assert_eq!(id, "chart_linreg");
        assert!(id == *"chart_linreg");
    }

    #[test]
    fn blank_ids() {
        assert!(ElementId::from("").is_blank());
        assert!(ElementId::from("   ").is_blank());
        assert!(!ElementId::from("scrollToTop").is_blank());
    }

    #[test]
    fn hashmap_lookup_by_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(ElementId::from("chart_averages"), 1);
        assert_eq!(map.get("chart_averages"), Some(&1));
    }

    #[test]
    fn deserializes_escaped_strings() {
        let id: ElementId = serde_json::from_str(r#""chart\u005faverages""#).unwrap();
        assert_eq!(id, "chart_averages");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&ElementId::from("scrollToTop")).unwrap();
        assert_eq!(json, "\"scrollToTop\"");
    }
}
