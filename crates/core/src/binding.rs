use plotpage_protocol::{ElementId, Figure};
use thiserror::Error;

/// Charts rendered on the rainfall page, by short name.
///
/// Each name `n` pairs the injected payload global `graphs_n` with the
/// container element `chart_n`.
pub const DEFAULT_CHARTS: [&str; 4] = [
    "summer_rainfall",
    "averages",
    "linreg",
    "relative_distance_to_normal",
];

const GLOBAL_PREFIX: &str = "graphs_";
const CONTAINER_PREFIX: &str = "chart_";

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("invalid chart payload for '{container}': {source}")]
    Json {
        container: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("chart container id must not be empty")]
    EmptyContainer,
    #[error("{0} is not defined")]
    MissingGlobal(String),
    #[error("invalid chart payload in {global}: {message}")]
    Payload { global: String, message: String },
}

/// Global variable name holding the payload for chart `name`.
pub fn global_for_chart(name: &str) -> String {
    format!("{GLOBAL_PREFIX}{name}")
}

/// Container element id for chart `name`.
pub fn container_for_chart(name: &str) -> String {
    format!("{CONTAINER_PREFIX}{name}")
}

/// Map a payload global (`graphs_averages`) to its container
/// (`chart_averages`). Names without the `graphs_` prefix are already
/// container ids and pass through unchanged.
pub fn container_for_global(global: &str) -> String {
    match global.strip_prefix(GLOBAL_PREFIX) {
        Some(name) if !name.is_empty() => container_for_chart(name),
        _ => global.to_string(),
    }
}

/// A chart container paired with the figure plotted into it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBinding {
    pub container: ElementId,
    pub figure: Figure,
}

impl ChartBinding {
    pub fn new(container: impl Into<ElementId>, figure: Figure) -> Result<Self, BindingError> {
        let container = container.into();
        if container.is_blank() {
            return Err(BindingError::EmptyContainer);
        }
        Ok(Self { container, figure })
    }

    /// Parse a figure payload as injected by the page template.
    pub fn from_json(container: impl Into<ElementId>, data: &[u8]) -> Result<Self, BindingError> {
        let container = container.into();
        let figure = serde_json::from_slice(data).map_err(|source| BindingError::Json {
            container: container.to_string(),
            source,
        })?;
        Self::new(container, figure)
    }

    pub fn from_value(
        container: impl Into<ElementId>,
        value: serde_json::Value,
    ) -> Result<Self, BindingError> {
        let container = container.into();
        let figure = serde_json::from_value(value).map_err(|source| BindingError::Json {
            container: container.to_string(),
            source,
        })?;
        Self::new(container, figure)
    }
}

/// The set of charts on a page, keyed by container identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartBindings {
    bindings: Vec<ChartBinding>,
}

impl ChartBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(global or container name, JSON payload)` pairs.
    pub fn from_payloads<'a, I>(payloads: I) -> Result<Self, BindingError>
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        let mut set = Self::new();
        for (name, data) in payloads {
            set.insert(ChartBinding::from_json(container_for_global(name), data)?);
        }
        Ok(set)
    }

    /// Resolve the payload global of every chart in `names` through
    /// `lookup`. A global the lookup cannot find is an error, not a skipped
    /// chart.
    pub fn from_globals<'a, I, F>(names: I, mut lookup: F) -> Result<Self, BindingError>
    where
        I: IntoIterator<Item = &'a str>,
        F: FnMut(&str) -> Result<Option<Figure>, BindingError>,
    {
        let mut set = Self::new();
        for name in names {
            let global = global_for_chart(name);
            let figure = lookup(&global)?.ok_or(BindingError::MissingGlobal(global))?;
            set.insert(ChartBinding::new(container_for_chart(name), figure)?);
        }
        Ok(set)
    }

    /// Add a binding. A binding for the same container replaces the old one,
    /// which is returned.
    pub fn insert(&mut self, binding: ChartBinding) -> Option<ChartBinding> {
        match self
            .bindings
            .iter_mut()
            .find(|b| b.container == binding.container)
        {
            Some(slot) => Some(std::mem::replace(slot, binding)),
            None => {
                self.bindings.push(binding);
                None
            }
        }
    }

    pub fn get(&self, container: &str) -> Option<&ChartBinding> {
        self.bindings.iter().find(|b| b.container == container)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChartBinding> {
        self.bindings.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ChartBinding> {
        self.bindings.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<ChartBinding> for ChartBindings {
    fn from_iter<T: IntoIterator<Item = ChartBinding>>(iter: T) -> Self {
        let mut set = Self::new();
        for binding in iter {
            set.insert(binding);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ChartBindings {
    type Item = &'a ChartBinding;
    type IntoIter = std::slice::Iter<'a, ChartBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_convention() {
        assert_eq!(global_for_chart("linreg"), "graphs_linreg");
        assert_eq!(container_for_chart("linreg"), "chart_linreg");
        assert_eq!(container_for_global("graphs_averages"), "chart_averages");
        assert_eq!(container_for_global("chart_averages"), "chart_averages");
        assert_eq!(container_for_global("graphs_"), "graphs_");
    }

    #[test]
    fn parse_payload() {
        let data = br#"{"data": [{"type": "scatter"}], "layout": {"font": {"size": 14}}}"#;
        let binding = ChartBinding::from_json("chart_linreg", data).unwrap();
        assert_eq!(binding.container, "chart_linreg");
        assert_eq!(binding.figure.data.len(), 1);
        assert_eq!(binding.figure.font_size(), Some(14.0));
    }

    #[test]
    fn invalid_payload_names_container() {
        let err = ChartBinding::from_json("chart_linreg", b"{not json").unwrap_err();
        assert!(err.to_string().contains("chart_linreg"));
    }

    #[test]
    fn empty_container_rejected() {
        let result = ChartBinding::new("", Figure::default());
        assert!(matches!(result, Err(BindingError::EmptyContainer)));
    }

    #[test]
    fn from_payloads_maps_globals() {
        let set = ChartBindings::from_payloads([
            ("graphs_averages", br#"{"data": []}"#.as_slice()),
            ("chart_linreg", br#"{"data": []}"#.as_slice()),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("chart_averages").is_some());
        assert!(set.get("chart_linreg").is_some());
    }

    #[test]
    fn from_globals_binds_every_chart() {
        let set = ChartBindings::from_globals(DEFAULT_CHARTS, |_| Ok(Some(Figure::default())))
            .unwrap();
        assert_eq!(set.len(), DEFAULT_CHARTS.len());
        for name in DEFAULT_CHARTS {
            assert!(set.get(&container_for_chart(name)).is_some());
        }
    }

    #[test]
    fn undefined_global_fails() {
        let mut looked_up = Vec::new();
        let err = ChartBindings::from_globals(DEFAULT_CHARTS, |global| {
            looked_up.push(global.to_string());
            Ok((global != "graphs_linreg").then(Figure::default))
        })
        .unwrap_err();

        assert!(matches!(&err, BindingError::MissingGlobal(g) if g == "graphs_linreg"));
        assert_eq!(err.to_string(), "graphs_linreg is not defined");
        // Resolution stops at the missing chart.
        assert_eq!(looked_up.last().map(String::as_str), Some("graphs_linreg"));
    }

    #[test]
    fn lookup_errors_propagate() {
        let err = ChartBindings::from_globals(["averages"], |global| {
            Err(BindingError::Payload {
                global: global.to_string(),
                message: "expected an object".to_string(),
            })
        })
        .unwrap_err();
        assert!(err.to_string().contains("graphs_averages"));
    }

    #[test]
    fn same_container_replaces() {
        let mut set = ChartBindings::new();
        let first = ChartBinding::new("chart_averages", Figure::default()).unwrap();
        let mut figure = Figure::default();
        figure.set_font_size(20.0);
        let second = ChartBinding::new("chart_averages", figure).unwrap();

        assert!(set.insert(first.clone()).is_none());
        assert_eq!(set.insert(second), Some(first));
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("chart_averages").and_then(|b| b.figure.font_size()),
            Some(20.0)
        );
    }
}
