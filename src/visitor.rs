use crate::ast::Node;

/// Pre-order/post-order tree-walk contract for tree-mutating passes.
///
/// A visitor may replace non-structural fields of the node it is given (for
/// example a print node's expression) but must never alter child ordering or
/// node count during an ongoing traversal.
pub trait Visitor {
    /// Called on pre-order descent into the node
    fn enter(&mut self, node: &mut Node);
    /// Called on post-order ascent out of the node
    fn leave(&mut self, node: &mut Node);
}

/// Walk the tree depth-first in document order, invoking the visitor's
/// `enter` before and `leave` after each node's children.
pub fn walk(visitor: &mut dyn Visitor, node: &mut Node) {
    visitor.enter(node);
    match node {
        Node::Module(module) => {
            for child in &mut module.nodes {
                walk(visitor, child);
            }
        }
        Node::Block(block) => {
            for child in &mut block.nodes {
                walk(visitor, child);
            }
        }
        Node::If(cond) => {
            walk(visitor, &mut cond.body);
            if let Some(else_body) = &mut cond.else_body {
                walk(visitor, else_body);
            }
        }
        Node::Text(_) | Node::Print(_) => {}
    }
    visitor.leave(node);
}
