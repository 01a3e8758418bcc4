use crate::ast::{
    BlockNode, Expr, IfNode, ModuleNode, NameExpr, Node, PrintNode, StringExpr, TextNode,
};
use crate::error::{Location, Result, TsutaError};
use crate::lexer::Lexer;
use crate::stream::TokenStream;
use crate::token::TokenKind;

/// Recursive descent parser for Tsuta templates
pub struct Parser {
    stream: TokenStream,
    origin: String,
}

impl Parser {
    /// Create a new parser for the given source and template origin
    pub fn new(source: &str, origin: &str) -> Self {
        Self {
            stream: TokenStream::new(Lexer::new(source)),
            origin: origin.to_string(),
        }
    }

    /// Parse the source into a root module node
    pub fn parse(&mut self) -> Result<ModuleNode> {
        let mut module = ModuleNode::new(self.origin.clone(), Location::new(1, 1));
        while let Some(node) = self.parse_stmt()? {
            module.nodes.push(node);
        }
        Ok(module)
    }

    /// Statement rule: dispatch on the next non-space token.
    ///
    /// Returns `None` at end of input, which is not an error condition.
    fn parse_stmt(&mut self) -> Result<Option<Node>> {
        let token = self.stream.next_non_space();
        match token.kind {
            TokenKind::Text(content) => Ok(Some(Node::Text(TextNode {
                content,
                location: token.location,
            }))),
            TokenKind::PrintOpen => {
                let expr = self.parse_expr()?;
                self.stream.expect(&TokenKind::PrintClose)?;
                Ok(Some(Node::Print(PrintNode {
                    expr,
                    location: token.location,
                })))
            }
            TokenKind::TagOpen => Ok(Some(self.parse_tag()?)),
            TokenKind::Eof => Ok(None),
            other => Err(TsutaError::ParseError {
                message: format!("unexpected {}", other),
                location: token.location,
            }),
        }
    }

    /// Tag rule: read the keyword name and dispatch
    fn parse_tag(&mut self) -> Result<Node> {
        let token = self.stream.expect(&TokenKind::Name(String::new()))?;
        let location = token.location;
        let name = match token.kind {
            TokenKind::Name(name) => name,
            _ => {
                return Err(TsutaError::ParseError {
                    message: format!("internal error: expected name token, got {}", token.kind),
                    location,
                });
            }
        };

        match name.as_str() {
            "block" => {
                let block_name = self.parse_expr()?;
                self.stream.expect(&TokenKind::TagClose)?;
                let (body, _) = self.parse_module_until(&["endblock"], location)?;
                Ok(Node::Block(BlockNode {
                    name: block_name,
                    nodes: body.nodes,
                    location,
                }))
            }
            "if" => {
                let condition = self.parse_expr()?;
                self.stream.expect(&TokenKind::TagClose)?;
                let (body, terminator) = self.parse_module_until(&["else", "endif"], location)?;
                let else_body = if terminator == "else" {
                    let (els, _) = self.parse_module_until(&["endif"], location)?;
                    Some(Box::new(Node::Module(els)))
                } else {
                    None
                };
                Ok(Node::If(IfNode {
                    condition,
                    body: Box::new(Node::Module(body)),
                    else_body,
                    location,
                }))
            }
            _ => Err(TsutaError::UnknownTag { name, location }),
        }
    }

    /// Collect statements into a module until one of the terminator tags is
    /// reached, consuming the terminator through its tag close.
    ///
    /// Nesting works because the statement rule is fully recursive: an inner
    /// block or if consumes its own terminator before this loop sees it.
    fn parse_module_until(
        &mut self,
        terminators: &[&str],
        open_location: Location,
    ) -> Result<(ModuleNode, String)> {
        let mut module = ModuleNode::new("", open_location);
        loop {
            if let Some(found) = self.try_end_tag(terminators)? {
                return Ok((module, found));
            }
            match self.parse_stmt()? {
                Some(node) => module.nodes.push(node),
                None => {
                    return Err(TsutaError::ParseError {
                        message: format!(
                            "unexpected end of input, expected {}",
                            terminators.join(" or ")
                        ),
                        location: open_location,
                    });
                }
            }
        }
    }

    /// Two-token lookahead for a terminator tag.
    ///
    /// On a match the whole tag is consumed through its tag close and the
    /// matched name is returned; otherwise the lookahead is undone.
    fn try_end_tag(&mut self, terminators: &[&str]) -> Result<Option<String>> {
        let mark = self.stream.mark();

        let token = self.stream.next();
        if !matches!(token.kind, TokenKind::TagOpen) {
            self.stream.reset(mark);
            return Ok(None);
        }

        let token = self.stream.next_non_space();
        if let TokenKind::Name(name) = &token.kind {
            if terminators.contains(&name.as_str()) {
                let name = name.clone();
                self.stream.expect(&TokenKind::TagClose)?;
                return Ok(Some(name));
            }
        }

        self.stream.reset(mark);
        Ok(None)
    }

    /// Expression rule: a bare name or a string literal, nothing else
    fn parse_expr(&mut self) -> Result<Expr> {
        let token = self.stream.next_non_space();
        match token.kind {
            TokenKind::Name(name) => Ok(Expr::Name(NameExpr {
                name,
                location: token.location,
            })),
            TokenKind::StringOpen => {
                let text = self.stream.expect(&TokenKind::Text(String::new()))?;
                let value = match text.kind {
                    TokenKind::Text(value) => value,
                    _ => {
                        return Err(TsutaError::ParseError {
                            message: format!(
                                "internal error: expected text token, got {}",
                                text.kind
                            ),
                            location: text.location,
                        });
                    }
                };
                self.stream.expect(&TokenKind::StringClose)?;
                Ok(Expr::Str(StringExpr {
                    value,
                    location: token.location,
                }))
            }
            other => Err(TsutaError::ParseError {
                message: format!("unrecognized expression near {}", other),
                location: token.location,
            }),
        }
    }
}
