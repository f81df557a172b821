//! DOT node declarations.

use std::fmt::{self, Write};

use crate::vertex::{Vertex, VertexId};

/// Rendered shape of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Variables.
    Oval,
    /// Split functions.
    Hexagon,
    /// Every other function.
    Box,
}

impl NodeShape {
    pub fn for_vertex(vertex: &Vertex) -> Self {
        match vertex {
            Vertex::Variable(_) => NodeShape::Oval,
            Vertex::Function(function) if function.is_split() => NodeShape::Hexagon,
            Vertex::Function(_) => NodeShape::Box,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Oval => "oval",
            NodeShape::Hexagon => "hexagon",
            NodeShape::Box => "box",
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escape special characters for a quoted DOT attribute value.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Rendering attributes of a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNode {
    id: VertexId,
    label: String,
    shape: NodeShape,
}

impl DotNode {
    pub fn new(vertex: &Vertex) -> Self {
        Self {
            id: vertex.id(),
            label: vertex.to_string(),
            shape: NodeShape::for_vertex(vertex),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    /// Append this node's declaration to `output`, followed by any extra
    /// `style` attributes after `shape`.
    pub fn write_declaration(&self, output: &mut String, style: &[(String, String)]) {
        let _ = write!(
            output,
            "{} [label=\"{}\",shape=\"{}\"",
            self.id,
            escape_label(&self.label),
            self.shape
        );
        for (key, value) in style {
            let _ = write!(output, ",{}=\"{}\"", key, escape_label(value));
        }
        output.push_str("];");
    }
}

impl fmt::Display for DotNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut declaration = String::new();
        self.write_declaration(&mut declaration, &[]);
        f.write_str(&declaration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::{Function, Variable};

    #[test]
    fn shapes_by_kind() {
        let a = Variable::leaf();
        let s = Function::split(&a);
        let f = Function::new("f", &[a.clone()]);

        assert_eq!(NodeShape::for_vertex(&a.into()), NodeShape::Oval);
        assert_eq!(NodeShape::for_vertex(&s.into()), NodeShape::Hexagon);
        assert_eq!(NodeShape::for_vertex(&f.into()), NodeShape::Box);
    }

    #[test]
    fn declaration_format() {
        let a = Variable::named("x");
        let node = DotNode::new(&a.clone().into());

        assert_eq!(node.to_string(), format!("{} [label=\"x\",shape=\"oval\"];", a.id()));
    }

    #[test]
    fn declaration_with_style() {
        let f = Function::new("Linear", &[]);
        let node = DotNode::new(&f.clone().into());
        let style = vec![
            ("style".to_string(), "filled".to_string()),
            ("fillcolor".to_string(), "#E0E0E0".to_string()),
        ];

        let mut output = String::new();
        node.write_declaration(&mut output, &style);
        assert_eq!(
            output,
            format!(
                "{} [label=\"Linear\",shape=\"box\",style=\"filled\",fillcolor=\"#E0E0E0\"];",
                f.id()
            )
        );
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape_label("plain"), "plain");
        assert_eq!(escape_label("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_label("a\\b"), "a\\\\b");
        assert_eq!(escape_label("two\nlines"), "two\\nlines");

        let a = Variable::named("w\"1\"");
        let node = DotNode::new(&a.into());
        assert_eq!(node.label(), "w\"1\"");
        assert!(node.to_string().contains("label=\"w\\\"1\\\"\""));
    }
}
