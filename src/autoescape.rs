use crate::ast::{Expr, FilterExpr, NameExpr, Node, StringExpr};
use crate::visitor::Visitor;

/// Name of the filter scheduled around every print expression
pub const ESCAPE_FILTER: &str = "escape";

/// Content type assumed when an origin gives no other hint
pub const DEFAULT_CONTENT_TYPE: &str = "html";

/// Template-file suffixes stripped before content-type classification
const TEMPLATE_SUFFIXES: &[&str] = &[".tsuta", ".twig"];

/// Visitor that wraps every print expression in an `escape` filter
/// invocation carrying the content type inferred from the enclosing
/// module or block scope.
///
/// The pass is expected to run exactly once per tree, after parsing and
/// before evaluation; running it twice double-wraps the expressions in
/// nested `escape` calls.
pub struct AutoEscapeVisitor {
    stack: Vec<String>,
}

impl AutoEscapeVisitor {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    fn push(&mut self, label: String) {
        self.stack.push(label);
    }

    fn pop(&mut self) {
        self.stack.pop();
    }

    /// Top of the content-type stack.
    ///
    /// Every print node is lexically inside at least one module scope, so an
    /// empty stack here means the visitor was driven outside the walk
    /// contract; that is a programming error, not a recoverable condition.
    fn current(&self) -> &str {
        match self.stack.last() {
            Some(label) => label,
            None => panic!("auto-escape context stack is empty outside any module scope"),
        }
    }
}

impl Default for AutoEscapeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for AutoEscapeVisitor {
    fn enter(&mut self, node: &mut Node) {
        match node {
            Node::Module(module) => self.push(guess_type_from_name(&module.origin)),
            Node::Block(block) => self.push(guess_type_from_name(scope_label(&block.name))),
            Node::Print(print) => {
                let label = self.current().to_string();
                let location = print.expr.location();
                let inner = std::mem::replace(
                    &mut print.expr,
                    Expr::Name(NameExpr {
                        name: String::new(),
                        location,
                    }),
                );
                print.expr = Expr::Filter(FilterExpr {
                    name: ESCAPE_FILTER.to_string(),
                    args: vec![
                        inner,
                        Expr::Str(StringExpr {
                            value: label,
                            location,
                        }),
                    ],
                    location,
                });
            }
            Node::Text(_) | Node::If(_) => {}
        }
    }

    fn leave(&mut self, node: &mut Node) {
        match node {
            Node::Module(_) | Node::Block(_) => self.pop(),
            Node::Text(_) | Node::Print(_) | Node::If(_) => {}
        }
    }
}

/// Name or string literal a block scope is classified by
fn scope_label(name: &Expr) -> &str {
    match name {
        Expr::Name(e) => &e.name,
        Expr::Str(e) => &e.value,
        Expr::Filter(_) => "",
    }
}

/// Infer a content-type label from a template origin or block name.
///
/// A recognized template-file suffix is stripped first; if a `.`-separated
/// segment remains, the label is the text after the last `.`, otherwise the
/// default is `html`. Examples: `page.js` gives `js`, `page.html.twig`
/// gives `html`, `page` gives `html`.
pub fn guess_type_from_name(name: &str) -> String {
    let mut name = name;
    for suffix in TEMPLATE_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped;
            break;
        }
    }
    match name.rfind('.') {
        Some(p) => name[p + 1..].to_string(),
        None => DEFAULT_CONTENT_TYPE.to_string(),
    }
}
