use crate::error::Location;

/// All possible expression types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name(NameExpr),
    Str(StringExpr),
    Filter(FilterExpr),
}

impl Expr {
    /// Source location of the expression
    pub fn location(&self) -> Location {
        match self {
            Expr::Name(e) => e.location,
            Expr::Str(e) => e.location,
            Expr::Filter(e) => e.location,
        }
    }
}

/// Bare identifier reference
#[derive(Debug, Clone, PartialEq)]
pub struct NameExpr {
    pub name: String,
    pub location: Location,
}

/// String literal
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub location: Location,
}

/// Filter invocation with ordered arguments, e.g. escape(x, "html")
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    pub name: String,
    pub args: Vec<Expr>,
    pub location: Location,
}

/// All possible AST node types
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(TextNode),
    Print(PrintNode),
    Module(ModuleNode),
    Block(BlockNode),
    If(IfNode),
}

impl Node {
    /// Source location of the node
    pub fn location(&self) -> Location {
        match self {
            Node::Text(n) => n.location,
            Node::Print(n) => n.location,
            Node::Module(n) => n.location,
            Node::Block(n) => n.location,
            Node::If(n) => n.location,
        }
    }
}

/// Raw text content
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub content: String,
    pub location: Location,
}

/// Print statement: {{ expr }}
///
/// The expression is the only field any visitor rewrites.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintNode {
    pub expr: Expr,
    pub location: Location,
}

/// Template scope holding an ordered statement sequence.
///
/// The parse root is a module carrying the template origin; if-branch bodies
/// are nested modules with an empty origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleNode {
    pub origin: String,
    pub nodes: Vec<Node>,
    pub location: Location,
}

impl ModuleNode {
    pub fn new(origin: impl Into<String>, location: Location) -> Self {
        Self {
            origin: origin.into(),
            nodes: Vec::new(),
            location,
        }
    }
}

/// Named block: {% block name %} ... {% endblock %}
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    pub name: Expr,
    pub nodes: Vec<Node>,
    pub location: Location,
}

/// Conditional: {% if cond %} ... {% else %} ... {% endif %}
///
/// Both bodies are always `Node::Module`; `else_body` is present only when
/// an else branch was parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct IfNode {
    pub condition: Expr,
    pub body: Box<Node>,
    pub else_body: Option<Box<Node>>,
    pub location: Location,
}
