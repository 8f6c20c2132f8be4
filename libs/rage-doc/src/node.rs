//! # Document Node
//!
//! The in-memory resource document tree. Every record the pipeline emits or
//! consumes is a `DocNode`: a named node with attributes, optional text, and
//! ordered children.
//!
//! The wire conventions of the external toolchain are captured by the
//! constructor/accessor pairs here:
//!
//! - scalars ride in a `value` attribute (`<lodDist value="100"/>`)
//! - vectors ride in `x`/`y`/`z`(/`w`) attributes
//! - strings are text content (`<name>foo</name>`)
//! - sequences are `<Item>` children

use crate::error::DocError;
use glam::{DVec3, DVec4};
use serde::{Deserialize, Serialize};

/// Name used for sequence elements.
pub const ITEM: &str = "Item";

/// A node in a resource document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    /// Tag name.
    pub name: String,
    /// Attributes in written order.
    pub attributes: Vec<(String, String)>,
    /// Text content (empty when the node is structural).
    pub text: String,
    /// Child nodes in written order.
    pub children: Vec<DocNode>,
}

impl DocNode {
    /// Creates an empty node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute, builder style.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((name.into(), value.to_string()));
        self
    }

    /// Sets text content, builder style.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Adds a child, builder style.
    pub fn with_child(mut self, child: DocNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child node.
    pub fn push(&mut self, child: DocNode) {
        self.children.push(child);
    }

    // =========================================================================
    // WIRE-CONVENTION CONSTRUCTORS
    // =========================================================================

    /// A scalar leaf: `<name value="..."/>`.
    pub fn scalar(name: impl Into<String>, value: impl ToString) -> Self {
        Self::new(name).with_attr("value", value)
    }

    /// A 3-vector leaf: `<name x=".." y=".." z=".."/>`.
    pub fn vec3(name: impl Into<String>, v: DVec3) -> Self {
        Self::new(name)
            .with_attr("x", v.x)
            .with_attr("y", v.y)
            .with_attr("z", v.z)
    }

    /// A 4-vector leaf: `<name x=".." y=".." z=".." w=".."/>`.
    pub fn vec4(name: impl Into<String>, v: DVec4) -> Self {
        Self::new(name)
            .with_attr("x", v.x)
            .with_attr("y", v.y)
            .with_attr("z", v.z)
            .with_attr("w", v.w)
    }

    /// A string leaf: `<name>text</name>`.
    pub fn text_node(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    /// A sequence of string items: `<name><Item>..</Item>..</name>`.
    pub fn string_list<S: AsRef<str>>(name: impl Into<String>, items: &[S]) -> Self {
        let mut node = Self::new(name);
        for item in items {
            node.push(Self::text_node(ITEM, item.as_ref()));
        }
        node
    }

    /// A sequence of integer items: `<name><Item value=".."/>..</name>`.
    pub fn index_list(name: impl Into<String>, indices: &[usize]) -> Self {
        let mut node = Self::new(name);
        for index in indices {
            node.push(Self::scalar(ITEM, index));
        }
        node
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Returns the attribute value with the given name, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first child with the given name, if present.
    pub fn child(&self, name: &str) -> Option<&DocNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns the first child with the given name, or a `MissingChild` error.
    pub fn expect_child(&self, name: &str) -> Result<&DocNode, DocError> {
        self.child(name).ok_or_else(|| DocError::MissingChild {
            parent: self.name.clone(),
            child: name.to_string(),
        })
    }

    /// Iterates over all children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Iterates over `<Item>` children.
    pub fn items(&self) -> impl Iterator<Item = &DocNode> {
        self.children_named(ITEM)
    }

    // =========================================================================
    // TYPED READS
    // =========================================================================

    /// Parses this node's `value` attribute as `f64`.
    pub fn value_f64(&self) -> Result<f64, DocError> {
        self.parse_attr("value")
    }

    /// Parses this node's `value` attribute as `i64`.
    pub fn value_i64(&self) -> Result<i64, DocError> {
        self.parse_attr("value")
    }

    /// Parses this node's `value` attribute as `u32`.
    pub fn value_u32(&self) -> Result<u32, DocError> {
        self.parse_attr("value")
    }

    /// Parses this node's `value` attribute as `i32`.
    pub fn value_i32(&self) -> Result<i32, DocError> {
        self.parse_attr("value")
    }

    /// Reads this node's `x`/`y`/`z` attributes as a `DVec3`.
    pub fn as_vec3(&self) -> Result<DVec3, DocError> {
        Ok(DVec3::new(
            self.parse_attr("x")?,
            self.parse_attr("y")?,
            self.parse_attr("z")?,
        ))
    }

    /// Reads this node's `x`/`y`/`z`/`w` attributes as a `DVec4`.
    pub fn as_vec4(&self) -> Result<DVec4, DocError> {
        Ok(DVec4::new(
            self.parse_attr("x")?,
            self.parse_attr("y")?,
            self.parse_attr("z")?,
            self.parse_attr("w")?,
        ))
    }

    /// Reads child `name` as a scalar `f64`.
    pub fn child_f64(&self, name: &str) -> Result<f64, DocError> {
        self.expect_child(name)?.value_f64()
    }

    /// Reads child `name` as a scalar `u32`.
    pub fn child_u32(&self, name: &str) -> Result<u32, DocError> {
        self.expect_child(name)?.value_u32()
    }

    /// Reads child `name` as a scalar `i32`.
    pub fn child_i32(&self, name: &str) -> Result<i32, DocError> {
        self.expect_child(name)?.value_i32()
    }

    /// Reads child `name` as a 3-vector.
    pub fn child_vec3(&self, name: &str) -> Result<DVec3, DocError> {
        self.expect_child(name)?.as_vec3()
    }

    /// Reads child `name` as a 4-vector.
    pub fn child_vec4(&self, name: &str) -> Result<DVec4, DocError> {
        self.expect_child(name)?.as_vec4()
    }

    /// Reads child `name`'s text content; missing child reads as empty.
    pub fn child_text(&self, name: &str) -> String {
        self.child(name).map(|c| c.text.clone()).unwrap_or_default()
    }

    /// Reads the text of every `<Item>` child of child `name`.
    pub fn child_string_list(&self, name: &str) -> Vec<String> {
        match self.child(name) {
            Some(list) => list.items().map(|i| i.text.clone()).collect(),
            None => Vec::new(),
        }
    }

    /// Reads the `value` of every `<Item>` child of child `name` as `usize`.
    pub fn child_index_list(&self, name: &str) -> Result<Vec<usize>, DocError> {
        let mut indices = Vec::new();
        if let Some(list) = self.child(name) {
            for item in list.items() {
                indices.push(item.value_i64()? as usize);
            }
        }
        Ok(indices)
    }

    fn parse_attr<T: std::str::FromStr>(&self, attribute: &str) -> Result<T, DocError> {
        let raw = self.attr(attribute).ok_or_else(|| DocError::MissingAttribute {
            node: self.name.clone(),
            attribute: attribute.to_string(),
        })?;
        raw.trim().parse().map_err(|_| DocError::InvalidValue {
            node: self.name.clone(),
            value: raw.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
