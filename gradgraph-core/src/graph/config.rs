//! DOT output configuration.
//!
//! The default configuration renders exactly
//! `digraph graphname{...}` with `label` and `shape` attributes only.
//! Everything else is opt-in.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::vertex::VertexKind;

const RANKDIRS: [&str; 4] = ["TB", "BT", "LR", "RL"];
const RESERVED_KEYS: [&str; 2] = ["label", "shape"];

/// Styling for [`ComputationalGraph::to_dot_with`].
///
/// Loadable from JSON:
///
/// ```rust
/// use gradgraph_core::graph::DotConfig;
///
/// let config = DotConfig::from_json(r#"{
///     "rankdir": "LR",
///     "function_style": [["style", "filled"]]
/// }"#).unwrap();
/// assert_eq!(config.graph_name, "graphname");
/// ```
///
/// [`ComputationalGraph::to_dot_with`]: super::ComputationalGraph::to_dot_with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotConfig {
    pub graph_name: String,
    /// Emitted as `rankdir=<value>;` when set.
    pub rankdir: Option<String>,
    /// Extra attributes for variable nodes, in output order.
    pub variable_style: Vec<(String, String)>,
    /// Extra attributes for function nodes, in output order.
    pub function_style: Vec<(String, String)>,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            graph_name: "graphname".to_string(),
            rankdir: None,
            variable_style: Vec::new(),
            function_style: Vec::new(),
        }
    }
}

impl DotConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    pub fn with_rankdir(mut self, rankdir: impl Into<String>) -> Self {
        self.rankdir = Some(rankdir.into());
        self
    }

    pub fn with_variable_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variable_style.push((key.into(), value.into()));
        self
    }

    pub fn with_function_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.function_style.push((key.into(), value.into()));
        self
    }

    pub fn style_for(&self, kind: VertexKind) -> &[(String, String)] {
        match kind {
            VertexKind::Variable => &self.variable_style,
            VertexKind::Function => &self.function_style,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.graph_name) {
            return Err(GraphError::invalid_config(format!(
                "graph name {:?} is not a DOT identifier",
                self.graph_name
            )));
        }

        if let Some(rankdir) = &self.rankdir {
            if !RANKDIRS.contains(&rankdir.as_str()) {
                return Err(GraphError::invalid_config(format!(
                    "rankdir must be one of {RANKDIRS:?}, got {rankdir:?}"
                )));
            }
        }

        for (key, _) in self.variable_style.iter().chain(&self.function_style) {
            if RESERVED_KEYS.contains(&key.as_str()) {
                return Err(GraphError::invalid_config(format!(
                    "style key {key:?} is reserved"
                )));
            }
            if !is_identifier(key) {
                return Err(GraphError::invalid_config(format!(
                    "style key {key:?} is not a DOT identifier"
                )));
            }
        }

        Ok(())
    }
}

fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = DotConfig::default();
        assert_eq!(config.graph_name, "graphname");
        assert!(config.rankdir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_gives_default() {
        let config = DotConfig::from_json("{}").unwrap();
        assert_eq!(config, DotConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "graph_name": "mlp",
            "rankdir": "LR",
            "variable_style": [["color", "blue"]],
            "function_style": [["style", "filled"], ["fillcolor", "gray"]]
        }"#;

        let config = DotConfig::from_json(json).unwrap();
        assert_eq!(config.graph_name, "mlp");
        assert_eq!(config.rankdir.as_deref(), Some("LR"));
        assert_eq!(config.style_for(VertexKind::Variable).len(), 1);
        assert_eq!(
            config.style_for(VertexKind::Function),
            &[
                ("style".to_string(), "filled".to_string()),
                ("fillcolor".to_string(), "gray".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_bad_rankdir() {
        let err = DotConfig::from_json(r#"{"rankdir": "UP"}"#).unwrap_err();
        assert!(matches!(err, GraphError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_reserved_style_key() {
        let config = DotConfig::default().with_function_style("shape", "circle");
        assert!(matches!(config.validate(), Err(GraphError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_bad_graph_name() {
        let config = DotConfig::default().with_graph_name("my graph");
        assert!(config.validate().is_err());
        assert!(DotConfig::default().with_graph_name("").validate().is_err());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = DotConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, GraphError::Json(_)));
    }

    #[test]
    fn builder_round_trips_through_json() {
        let config = DotConfig::default()
            .with_rankdir("BT")
            .with_variable_style("color", "red");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(DotConfig::from_json(&json).unwrap(), config);
    }
}
