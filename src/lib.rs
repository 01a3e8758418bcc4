//! Tsuta - a small template compiler with context-aware auto-escaping
//!
//! Tsuta compiles a minimal template language ({{ prints }}, {% block %} and
//! {% if %} tags) into an AST, then rewrites the tree so every print
//! expression is wrapped in an `escape` filter invocation carrying the
//! content type inferred from the template origin. Evaluation is left to an
//! external evaluator; the crate only schedules the escaping and ships the
//! encoders the evaluator needs.
//!
//! # Example
//!
//! ```rust
//! use tsuta::ast::{Expr, Node};
//!
//! let module = tsuta::compile("Hello, {{ name }}!", "page.html").unwrap();
//!
//! // The print expression is now escape(name, "html")
//! let Node::Print(print) = &module.nodes[1] else { panic!() };
//! let Expr::Filter(filter) = &print.expr else { panic!() };
//! assert_eq!(filter.name, "escape");
//! ```

// Public modules - part of the API
pub mod ast;
pub mod autoescape;
pub mod error;
pub mod escape;
pub mod value;
pub mod visitor;

// Internal implementation modules
mod lexer;
mod parser;
mod stream;
mod token;

pub use ast::ModuleNode;
pub use autoescape::{guess_type_from_name, AutoEscapeVisitor};
pub use error::{Result, TsutaError};
pub use escape::Escapers;
pub use value::Value;
pub use visitor::{walk, Visitor};

use ast::Node;
use parser::Parser;

/// Parse a template source into its AST without scheduling any escaping
pub fn parse(source: &str, origin: &str) -> Result<ModuleNode> {
    Parser::new(source, origin).parse()
}

/// Parse a template source and run the auto-escape pass once.
///
/// The origin names the template (e.g. a file path) and determines the
/// default content type for escaping: `page.js` escapes for JavaScript,
/// `page.html.twig` for HTML, and anything without an extension defaults
/// to HTML.
pub fn compile(source: &str, origin: &str) -> Result<ModuleNode> {
    let module = parse(source, origin)?;
    let mut root = Node::Module(module);
    let mut visitor = AutoEscapeVisitor::new();
    walk(&mut visitor, &mut root);
    match root {
        Node::Module(module) => Ok(module),
        _ => unreachable!("walk never changes node kinds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    #[test]
    fn test_parse_leaves_prints_unwrapped() {
        let module = parse("{{ name }}", "page.html").unwrap();
        if let Node::Print(print) = &module.nodes[0] {
            assert!(matches!(&print.expr, Expr::Name(e) if e.name == "name"));
        } else {
            panic!("Expected Print node");
        }
    }

    #[test]
    fn test_compile_schedules_escaping() {
        let module = compile("{{ name }}", "page.html").unwrap();
        if let Node::Print(print) = &module.nodes[0] {
            if let Expr::Filter(filter) = &print.expr {
                assert_eq!(filter.name, "escape");
                assert!(matches!(&filter.args[1], Expr::Str(e) if e.value == "html"));
            } else {
                panic!("Expected Filter expression");
            }
        } else {
            panic!("Expected Print node");
        }
    }

    #[test]
    fn test_compile_propagates_parse_errors() {
        assert!(compile("{% block t %}hi", "page.html").is_err());
    }

    #[test]
    fn test_scheduled_filter_runs_against_registry() {
        // End to end: compile, pick the scheduled content type out of the
        // tree, apply the escape filter the way an evaluator would.
        let module = compile("{{ name }}", "page.html").unwrap();
        let Node::Print(print) = &module.nodes[0] else {
            panic!("Expected Print node");
        };
        let Expr::Filter(filter) = &print.expr else {
            panic!("Expected Filter expression");
        };
        let Expr::Str(content_type) = &filter.args[1] else {
            panic!("Expected content type argument");
        };

        let escapers = Escapers::default();
        let result = escapers
            .escape(
                &Value::String("<b>hi</b>".to_string()),
                &[Value::String(content_type.value.clone())],
            )
            .unwrap();
        assert_eq!(result.stringify().unwrap(), "&lt;b&gt;hi&lt;/b&gt;");
    }
}
