use crate::codecs::{float_to_string, Codec};
use crate::GlyphsError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum NodeType {
    Line,
    OffCurve,
    Curve,
    /// A node which only carries a tag (`n/a`).
    Tag,
}

impl NodeType {
    fn as_str(&self) -> &'static str {
        match self {
            NodeType::Line => "LINE",
            NodeType::OffCurve => "OFFCURVE",
            NodeType::Curve => "CURVE",
            NodeType::Tag => "n/a",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub nodetype: NodeType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub smooth: bool,
}

impl Node {
    pub fn new(x: f64, y: f64, nodetype: NodeType) -> Self {
        Node {
            x,
            y,
            nodetype,
            smooth: false,
        }
    }

    pub fn to_kurbo(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

fn node_regex() -> &'static Regex {
    static NODE: OnceLock<Regex> = OnceLock::new();
    NODE.get_or_init(|| {
        #[allow(clippy::unwrap_used)] // the pattern is a constant
        Regex::new(r"^\s*([-+.eE\d]+)\s+([-+.eE\d]+)\s+(LINE|CURVE|OFFCURVE|n/a)(?:\s+(SMOOTH))?\s*$")
            .unwrap()
    })
}

/// Nodes are written as `"x y TYPE"`, with ` SMOOTH` appended for smooth
/// nodes.
impl Codec for Node {
    fn decode(text: &str) -> Result<Self, GlyphsError> {
        let invalid = || GlyphsError::invalid("node", text);
        let captures = node_regex().captures(text).ok_or_else(invalid)?;
        let coord = |ix: usize| -> Result<f64, GlyphsError> {
            captures
                .get(ix)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(invalid)
        };
        let nodetype = match captures.get(3).map(|m| m.as_str()) {
            Some("LINE") => NodeType::Line,
            Some("CURVE") => NodeType::Curve,
            Some("OFFCURVE") => NodeType::OffCurve,
            Some("n/a") => NodeType::Tag,
            _ => return Err(invalid()),
        };
        Ok(Node {
            x: coord(1)?,
            y: coord(2)?,
            nodetype,
            smooth: captures.get(4).is_some(),
        })
    }

    fn encode(&self) -> String {
        format!(
            "\"{} {} {}{}\"",
            float_to_string(self.x, 3),
            float_to_string(self.y, 3),
            self.nodetype.as_str(),
            if self.smooth { " SMOOTH" } else { "" }
        )
    }
}
