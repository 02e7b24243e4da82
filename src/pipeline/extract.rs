//! Response-text extraction: collect model-authored text from a provider response.
//!
//! Provider responses are arbitrarily nested JSON. Before anything else the
//! value is converted into a typed [`ResponseNode`] tree so the walk is an
//! exhaustive `match` instead of ad-hoc shape probing:
//!
//! | JSON shape | Node |
//! |------------|------|
//! | `{"type": "output_text" \| "text", "text": "…"}` | [`ResponseNode::TextLeaf`] |
//! | `{"type": "message", "content": [ … ]}` | [`ResponseNode::Container`] |
//! | `{"role": "assistant", "content": "…"}` | [`ResponseNode::Container`] with one leaf |
//! | any other object / array | [`ResponseNode::Other`] with its children |
//! | scalars | [`ResponseNode::Other`] with no children |
//!
//! Object members are visited in document order (`serde_json` is built with
//! `preserve_order`), array elements by index.

use serde_json::Value;

/// Discriminators that mark a node as a model-authored text fragment.
const TEXT_LEAF_TYPES: [&str; 2] = ["output_text", "text"];

/// A typed view of a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseNode {
    /// A model-authored text fragment.
    TextLeaf(String),
    /// A model-authored message whose text children are concatenated in order.
    Container(Vec<ResponseNode>),
    /// Anything else; walked for nested text but contributes none itself.
    Other(Vec<ResponseNode>),
}

impl ResponseNode {
    /// The empty tree.
    pub fn empty() -> Self {
        ResponseNode::Other(Vec::new())
    }

    /// Convert a provider response into a typed tree.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let kind = map.get("type").and_then(Value::as_str);

                if let (Some(kind), Some(Value::String(text))) = (kind, map.get("text")) {
                    if TEXT_LEAF_TYPES.contains(&kind) {
                        return ResponseNode::TextLeaf(text.clone());
                    }
                }

                match (kind, map.get("content")) {
                    (Some("message"), Some(Value::Array(items))) => {
                        return ResponseNode::Container(items.iter().map(Self::from_json).collect());
                    }
                    (_, Some(Value::String(text)))
                        if map.get("role").and_then(Value::as_str) == Some("assistant") =>
                    {
                        return ResponseNode::Container(vec![ResponseNode::TextLeaf(text.clone())]);
                    }
                    _ => {}
                }

                ResponseNode::Other(map.values().map(Self::from_json).collect())
            }
            Value::Array(items) => ResponseNode::Other(items.iter().map(Self::from_json).collect()),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::empty(),
        }
    }
}

impl From<&Value> for ResponseNode {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

/// Concatenate every text fragment in `root`, depth-first, in document order.
///
/// Never fails; a tree without text yields an empty string. The walk itself
/// uses an explicit stack. Building the tree with [`ResponseNode::from_json`]
/// recurses once per nesting level, which is bounded for parsed input by
/// `serde_json`'s recursion limit (128 levels).
pub fn extract_text(root: &ResponseNode) -> String {
    let mut out = String::new();
    let mut stack: Vec<&ResponseNode> = vec![root];

    while let Some(node) = stack.pop() {
        match node {
            ResponseNode::TextLeaf(text) => out.push_str(text),
            ResponseNode::Container(children) | ResponseNode::Other(children) => {
                // Reverse so the first child is popped first.
                stack.extend(children.iter().rev());
            }
        }
    }

    out
}

/// Convenience wrapper: convert and extract in one call.
pub fn extract_text_from_json(value: &Value) -> String {
    extract_text(&ResponseNode::from_json(value))
}
