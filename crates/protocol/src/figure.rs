use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A chart specification as consumed by the plotting library.
///
/// Traces are opaque: they are forwarded untouched. The only field the page
/// ever rewrites is `layout.font.size`, so `Layout` and `Font` model that
/// path explicitly and carry every other key through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Font {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Figure {
    /// Current `layout.font.size`, if the figure carries one.
    pub fn font_size(&self) -> Option<f64> {
        self.layout.font.as_ref().and_then(|f| f.size)
    }

    /// Overwrite `layout.font.size`, creating the font object if absent.
    /// Other font keys (family, color, ...) are left alone.
    pub fn set_font_size(&mut self, size: f64) {
        self.layout.font.get_or_insert_with(Font::default).size = Some(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_layout_keys() {
        let figure: Figure = serde_json::from_value(json!({
            "data": [{"type": "bar", "x": [1991, 1992], "y": [640.2, 712.9]}],
            "layout": {
                "title": {"text": "Rainfall"},
                "font": {"family": "Arial", "size": 14}
            },
            "frames": []
        }))
        .unwrap();

        assert_eq!(figure.data.len(), 1);
        assert_eq!(figure.font_size(), Some(14.0));
        assert!(figure.layout.extra.contains_key("title"));
        assert!(figure.extra.contains_key("frames"));

        let back = serde_json::to_value(&figure).unwrap();
        assert_eq!(back["layout"]["font"]["family"], "Arial");
        assert_eq!(back["layout"]["title"]["text"], "Rainfall");
    }

    #[test]
    fn set_font_size_creates_font() {
        let mut figure = Figure::default();
        assert_eq!(figure.font_size(), None);
        figure.set_font_size(9.0);
        assert_eq!(figure.font_size(), Some(9.0));

        let back = serde_json::to_value(&figure).unwrap();
        assert_eq!(back["layout"]["font"]["size"], 9.0);
    }

    #[test]
    fn set_font_size_preserves_family() {
        let mut figure: Figure =
            serde_json::from_value(json!({"layout": {"font": {"family": "Roboto"}}})).unwrap();
        figure.set_font_size(11.0);
        let font = figure.layout.font.as_ref().unwrap();
        assert_eq!(font.size, Some(11.0));
        assert_eq!(font.extra["family"], "Roboto");
    }

    #[test]
    fn missing_layout_defaults() {
        let figure: Figure = serde_json::from_value(json!({"data": []})).unwrap();
        assert_eq!(figure.layout, Layout::default());
    }
}
