//! # Document Writer
//!
//! Serializes a [`DocNode`] tree to XML text in the conventions the external
//! toolchain reads: two-space indentation, attributes in insertion order,
//! self-closing leaves.

use crate::error::DocError;
use crate::node::DocNode;
use config::constants::DOC_INDENT;
use std::io::Write;

/// Serializes a document tree to a string.
pub fn write_tree(root: &DocNode) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_node(&mut out, root, 0);
    out
}

/// Serializes a document tree to a byte stream.
pub fn write_tree_to<W: Write>(writer: &mut W, root: &DocNode) -> Result<(), DocError> {
    writer.write_all(write_tree(root).as_bytes())?;
    Ok(())
}

fn write_node(out: &mut String, node: &DocNode, depth: usize) {
    let indent = " ".repeat(depth * DOC_INDENT);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&node.name);
    for (name, value) in &node.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        push_escaped(out, value);
        out.push('"');
    }

    if node.children.is_empty() && node.text.is_empty() {
        out.push_str("/>\n");
        return;
    }

    out.push('>');
    if node.children.is_empty() {
        // Text leaf stays on one line.
        push_escaped(out, &node.text);
    } else {
        out.push('\n');
        if !node.text.is_empty() {
            out.push_str(&" ".repeat((depth + 1) * DOC_INDENT));
            push_escaped(out, &node.text);
            out.push('\n');
        }
        for child in &node.children {
            write_node(out, child, depth + 1);
        }
        out.push_str(&indent);
    }
    out.push_str("</");
    out.push_str(&node.name);
    out.push_str(">\n");
}

fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
