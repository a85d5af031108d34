//! Java structural parser - converts tokens to the declaration graph.
//!
//! Bodies, initializers and annotation element expressions are consumed as
//! balanced token runs; their text survives only as spans into the source.

use super::ast::{
    AnnotationElementUse, AnnotationUse, CompilationUnit, FieldDecl, ImportDecl, InitializerBlock,
    Member, MethodDecl, Modifiers, ParamDecl, SourceRange, TypeDecl, TypeKind, TypeParam, TypeRef,
    Visibility,
};
use super::lexer::{SpannedToken, Token};

/// Parse error with location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Option<SourceRange>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref span) = self.span {
            write!(f, "Parse error at {:?}: {}", span, self.message)
        } else {
            write!(f, "Parse error: {}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// Parser state.
pub struct Parser<'s> {
    source: &'s str,
    tokens: Vec<SpannedToken>,
    pos: usize,
    pending_javadoc: Option<SourceRange>,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str, tokens: Vec<SpannedToken>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            pending_javadoc: None,
        }
    }

    /// Parse a complete compilation unit.
    pub fn parse(&mut self) -> Result<CompilationUnit, ParseError> {
        let mut unit = CompilationUnit::new();

        while !self.is_at_end() {
            self.collect_javadoc();

            match self.peek() {
                Some(Token::Package) => {
                    unit.package = Some(self.parse_package()?);
                }
                Some(Token::Import) => {
                    unit.imports.push(self.parse_import()?);
                }
                Some(Token::Semicolon) => {
                    self.advance();
                }
                Some(_) => {
                    unit.types.push(self.parse_type_decl()?);
                }
                None => break,
            }
        }

        Ok(unit)
    }

    fn parse_package(&mut self) -> Result<String, ParseError> {
        self.expect(Token::Package)?;
        let name = self.parse_dotted_name()?;
        self.expect(Token::Semicolon)?;
        Ok(name)
    }

    fn parse_import(&mut self) -> Result<ImportDecl, ParseError> {
        self.expect(Token::Import)?;
        let is_static = self.check(&Token::Static);
        if is_static {
            self.advance();
        }
        let mut path = self.parse_dotted_name()?;
        let mut is_wildcard = false;
        if self.check(&Token::Dot) {
            // "a.b.*" ends with a dangling dot before the star
            self.advance();
            self.expect_operator("*")?;
            path.push_str(".*");
            is_wildcard = true;
        } else if self.check_operator("*") {
            self.advance();
            path.push('*');
            is_wildcard = true;
        }
        self.expect(Token::Semicolon)?;
        Ok(ImportDecl {
            path,
            is_static,
            is_wildcard,
        })
    }

    /// Parse a type declaration, including its full body.
    fn parse_type_decl(&mut self) -> Result<TypeDecl, ParseError> {
        let javadoc = self.take_javadoc();
        let start = self.current_offset();
        let (annotations, modifiers) = self.parse_prelude()?;
        self.parse_type_decl_with(javadoc, start, annotations, modifiers)
    }

    /// Consume enum constants up to and including the separating semicolon,
    /// or up to (but excluding) the closing brace when there are no members.
    fn skip_enum_header(&mut self, start: usize) -> Result<SourceRange, ParseError> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Some(Token::LBrace) | Some(Token::LParen) => {
                    depth += 1;
                    self.advance();
                }
                Some(Token::RBrace) if depth == 0 => {
                    return Ok(start..self.current_offset());
                }
                Some(Token::RBrace) | Some(Token::RParen) => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                Some(Token::Semicolon) if depth == 0 => {
                    let span = self.advance().unwrap().span.clone();
                    return Ok(start..span.end);
                }
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error("Unterminated enum body")),
            }
        }
    }

    /// Parse one member of a type body.
    fn parse_member(&mut self, enclosing: &str) -> Result<Member, ParseError> {
        let javadoc = self.take_javadoc();
        let start = self.current_offset();
        let (annotations, modifiers) = self.parse_prelude()?;

        // Nested type
        if matches!(
            self.peek(),
            Some(Token::Class) | Some(Token::Interface) | Some(Token::Enum)
        ) {
            let nested = self.parse_type_decl_with(javadoc, start, annotations, modifiers)?;
            return Ok(Member::Type(nested));
        }

        // Initializer block: "static { ... }" or "{ ... }"
        if self.check(&Token::LBrace) {
            let lbrace = self.advance().unwrap().span.clone();
            let rbrace = self.skip_balanced_braces(lbrace.end)?;
            return Ok(Member::Initializer(InitializerBlock {
                is_static: modifiers.is_static,
                range: start..rbrace.end,
            }));
        }

        let type_params = self.parse_type_params()?;

        // Constructor: enclosing type name followed directly by "("
        if let Some(Token::Identifier(id)) = self.peek() {
            if id == enclosing && matches!(self.peek_nth(1), Some(Token::LParen)) {
                let name = self.expect_identifier()?;
                return self
                    .parse_method_rest(
                        javadoc,
                        start,
                        annotations,
                        modifiers,
                        type_params,
                        None,
                        name,
                    )
                    .map(Member::Method);
            }
        }

        let declared_type = self.parse_type_ref()?;
        let name = self.expect_identifier()?;

        if self.check(&Token::LParen) {
            return self
                .parse_method_rest(
                    javadoc,
                    start,
                    annotations,
                    modifiers,
                    type_params,
                    Some(declared_type),
                    name,
                )
                .map(Member::Method);
        }

        self.parse_field_rest(javadoc, start, annotations, modifiers, declared_type, name)
    }

    /// Variant of [`parse_type_decl`] used when the prelude was already
    /// consumed by member dispatch.
    fn parse_type_decl_with(
        &mut self,
        javadoc: Option<SourceRange>,
        start: usize,
        annotations: Vec<AnnotationUse>,
        modifiers: Modifiers,
    ) -> Result<TypeDecl, ParseError> {
        self.pending_javadoc = None;
        let mut decl = self.parse_type_decl_header_consumed()?;
        decl.javadoc = javadoc;
        decl.range.start = start;
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        Ok(decl)
    }

    fn parse_type_decl_header_consumed(&mut self) -> Result<TypeDecl, ParseError> {
        // identical to parse_type_decl but without prelude handling
        let start = self.current_offset();
        let kind = match self.advance_token() {
            Some(Token::Class) => TypeKind::Class,
            Some(Token::Interface) => TypeKind::Interface,
            Some(Token::Enum) => TypeKind::Enum,
            _ => return Err(self.error("Expected class, interface or enum")),
        };
        let name = self.expect_identifier()?;
        let type_params = self.parse_type_params()?;

        let mut superclass = None;
        let mut interfaces = Vec::new();
        if self.check(&Token::Extends) {
            self.advance();
            if kind == TypeKind::Interface {
                interfaces.push(self.parse_type_ref()?);
                while self.check(&Token::Comma) {
                    self.advance();
                    interfaces.push(self.parse_type_ref()?);
                }
            } else {
                superclass = Some(self.parse_type_ref()?);
            }
        }
        if self.check(&Token::Implements) {
            self.advance();
            interfaces.push(self.parse_type_ref()?);
            while self.check(&Token::Comma) {
                self.advance();
                interfaces.push(self.parse_type_ref()?);
            }
        }

        let lbrace = self.expect(Token::LBrace)?;
        let body_start = lbrace.end;

        let mut enum_header_range = None;
        if kind == TypeKind::Enum {
            enum_header_range = Some(self.skip_enum_header(body_start)?);
        }

        let mut members = Vec::new();
        while !self.check(&Token::RBrace) && !self.is_at_end() {
            self.collect_javadoc();
            if self.check(&Token::Semicolon) {
                self.advance();
                continue;
            }
            if self.check(&Token::RBrace) {
                break;
            }
            members.push(self.parse_member(&name)?);
        }
        let rbrace = self.expect(Token::RBrace)?;

        Ok(TypeDecl {
            name,
            kind,
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            type_params,
            superclass,
            interfaces,
            members,
            javadoc: None,
            range: start..rbrace.end,
            body_range: body_start..rbrace.start,
            enum_header_range,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_method_rest(
        &mut self,
        javadoc: Option<SourceRange>,
        start: usize,
        annotations: Vec<AnnotationUse>,
        modifiers: Modifiers,
        type_params: Vec<TypeParam>,
        return_type: Option<TypeRef>,
        name: String,
    ) -> Result<MethodDecl, ParseError> {
        self.expect(Token::LParen)?;
        let mut params = Vec::new();
        while !self.check(&Token::RParen) {
            params.push(self.parse_param()?);
            if self.check(&Token::Comma) {
                self.advance();
            }
        }
        self.expect(Token::RParen)?;

        let mut throws = Vec::new();
        if self.check(&Token::Throws) {
            self.advance();
            throws.push(self.parse_type_ref()?);
            while self.check(&Token::Comma) {
                self.advance();
                throws.push(self.parse_type_ref()?);
            }
        }

        let (body, end) = if self.check(&Token::LBrace) {
            let lbrace = self.advance().unwrap().span.clone();
            let rbrace = self.skip_balanced_braces(lbrace.end)?;
            (Some(lbrace.end..rbrace.start), rbrace.end)
        } else if self.check(&Token::Default) {
            // annotation-style default value; consumed opaquely
            self.advance();
            while !self.check(&Token::Semicolon) && !self.is_at_end() {
                self.advance();
            }
            let semi = self.expect(Token::Semicolon)?;
            (None, semi.end)
        } else {
            let semi = self.expect(Token::Semicolon)?;
            (None, semi.end)
        };

        Ok(MethodDecl {
            name,
            modifiers,
            annotations,
            type_params,
            return_type,
            params,
            throws,
            javadoc,
            body,
            range: start..end,
        })
    }

    fn parse_field_rest(
        &mut self,
        javadoc: Option<SourceRange>,
        start: usize,
        annotations: Vec<AnnotationUse>,
        modifiers: Modifiers,
        declared_type: TypeRef,
        name: String,
    ) -> Result<Member, ParseError> {
        let mut field_type = declared_type;
        while self.check(&Token::LBracket) {
            self.advance();
            self.expect(Token::RBracket)?;
            field_type.array_dims += 1;
        }

        let mut initializer = None;
        if self.check(&Token::Equals) {
            self.advance();
            initializer = Some(self.capture_expression()?);
        }

        // Multi-declarator statements are split: only the first declarator
        // is returned; the remainder is consumed into additional fields
        // appended by the caller via a recursive member. To keep the parser
        // single-pass, additional declarators are rejected here and surfaced
        // as a parse error; model and DTO sources declare one field per
        // statement.
        if self.check(&Token::Comma) {
            return Err(self.error("Multiple declarators per field statement are not supported"));
        }

        let semi = self.expect(Token::Semicolon)?;

        Ok(Member::Field(FieldDecl {
            name,
            modifiers,
            annotations,
            field_type,
            initializer,
            javadoc,
            range: start..semi.end,
        }))
    }

    fn parse_param(&mut self) -> Result<ParamDecl, ParseError> {
        // parameter annotations are consumed and dropped
        while self.check(&Token::At) {
            self.parse_annotation()?;
        }
        let is_final = self.check(&Token::Final);
        if is_final {
            self.advance();
        }
        let mut param_type = self.parse_type_ref()?;
        let is_varargs = self.check(&Token::Ellipsis);
        if is_varargs {
            self.advance();
        }
        let name = self.expect_identifier()?;
        while self.check(&Token::LBracket) {
            self.advance();
            self.expect(Token::RBracket)?;
            param_type.array_dims += 1;
        }
        Ok(ParamDecl {
            name,
            param_type,
            is_final,
            is_varargs,
        })
    }

    /// Annotations and modifiers preceding a declaration, in any order.
    fn parse_prelude(&mut self) -> Result<(Vec<AnnotationUse>, Modifiers), ParseError> {
        let mut annotations = Vec::new();
        let mut modifiers = Modifiers::default();

        loop {
            match self.peek() {
                Some(Token::At) => annotations.push(self.parse_annotation()?),
                Some(Token::Public) => {
                    modifiers.visibility = Visibility::Public;
                    self.advance();
                }
                Some(Token::Protected) => {
                    modifiers.visibility = Visibility::Protected;
                    self.advance();
                }
                Some(Token::Private) => {
                    modifiers.visibility = Visibility::Private;
                    self.advance();
                }
                Some(Token::Static) => {
                    modifiers.is_static = true;
                    self.advance();
                }
                Some(Token::Final) => {
                    modifiers.is_final = true;
                    self.advance();
                }
                Some(Token::Abstract) => {
                    modifiers.is_abstract = true;
                    self.advance();
                }
                Some(Token::Native) => {
                    modifiers.is_native = true;
                    self.advance();
                }
                Some(Token::Synchronized) => {
                    modifiers.is_synchronized = true;
                    self.advance();
                }
                Some(Token::Transient) => {
                    modifiers.is_transient = true;
                    self.advance();
                }
                Some(Token::Volatile) => {
                    modifiers.is_volatile = true;
                    self.advance();
                }
                Some(Token::Strictfp) => {
                    self.advance();
                }
                Some(Token::Default)
                    if !matches!(self.peek_nth(1), Some(Token::Semicolon)) =>
                {
                    modifiers.is_default = true;
                    self.advance();
                }
                _ => break,
            }
        }

        Ok((annotations, modifiers))
    }

    fn parse_annotation(&mut self) -> Result<AnnotationUse, ParseError> {
        let at = self.expect(Token::At)?;
        let name = self.parse_dotted_name()?;
        let mut elements = Vec::new();
        let mut end = self.previous_end();

        if self.check(&Token::LParen) {
            self.advance();
            if self.check(&Token::RParen) {
                // "@Anno()" carries no elements
            } else if matches!(self.peek(), Some(Token::Identifier(_)))
                && matches!(self.peek_nth(1), Some(Token::Equals))
            {
                loop {
                    let el_name = self.expect_identifier()?;
                    self.expect(Token::Equals)?;
                    let range = self.capture_annotation_value()?;
                    elements.push(AnnotationElementUse {
                        name: el_name,
                        value_text: self.source[range].trim().to_string(),
                    });
                    if self.check(&Token::Comma) {
                        self.advance();
                    } else {
                        break;
                    }
                }
            } else {
                let range = self.capture_annotation_value()?;
                elements.push(AnnotationElementUse {
                    name: "value".to_string(),
                    value_text: self.source[range].trim().to_string(),
                });
            }
            let rparen = self.expect(Token::RParen)?;
            end = rparen.end;
        }

        Ok(AnnotationUse {
            name,
            elements,
            range: at.start..end,
        })
    }

    /// Raw expression span up to the next top-level ',' or ')'.
    fn capture_annotation_value(&mut self) -> Result<SourceRange, ParseError> {
        let start = self.current_offset();
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Some(Token::LParen) | Some(Token::LBrace) | Some(Token::LBracket) => {
                    depth += 1;
                    self.advance();
                }
                Some(Token::RParen) if depth == 0 => break,
                Some(Token::Comma) if depth == 0 => break,
                Some(Token::RParen) | Some(Token::RBrace) | Some(Token::RBracket) => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error("Unterminated annotation value")),
            }
        }
        Ok(start..self.previous_end())
    }

    /// Raw expression span up to the next top-level ';'. Angle brackets are
    /// tracked (clamped at zero) so generic creation expressions survive.
    fn capture_expression(&mut self) -> Result<SourceRange, ParseError> {
        let start = self.current_offset();
        let mut depth = 0usize;
        let mut angle = 0usize;
        loop {
            match self.peek() {
                Some(Token::LParen) | Some(Token::LBrace) | Some(Token::LBracket) => {
                    depth += 1;
                    self.advance();
                }
                Some(Token::RParen) | Some(Token::RBrace) | Some(Token::RBracket) => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                Some(Token::Lt) => {
                    angle += 1;
                    self.advance();
                }
                Some(Token::Gt) => {
                    angle = angle.saturating_sub(1);
                    self.advance();
                }
                Some(Token::Semicolon) if depth == 0 && angle == 0 => break,
                Some(Token::Comma) if depth == 0 && angle == 0 => break,
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error("Unterminated initializer expression")),
            }
        }
        Ok(start..self.previous_end())
    }

    /// `<T extends Bound, U>` on types and methods; empty when absent.
    fn parse_type_params(&mut self) -> Result<Vec<TypeParam>, ParseError> {
        let mut params = Vec::new();
        if !self.check(&Token::Lt) {
            return Ok(params);
        }
        self.advance();
        loop {
            let name = self.expect_identifier()?;
            let mut bounds = Vec::new();
            if self.check(&Token::Extends) {
                self.advance();
                bounds.push(self.parse_type_ref()?);
                while self.check(&Token::Amp) {
                    self.advance();
                    bounds.push(self.parse_type_ref()?);
                }
            }
            params.push(TypeParam { name, bounds });
            if self.check(&Token::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(Token::Gt)?;
        Ok(params)
    }

    fn parse_type_ref(&mut self) -> Result<TypeRef, ParseError> {
        // wildcard argument
        if self.check(&Token::Question) {
            self.advance();
            let mut name = "?".to_string();
            if self.check(&Token::Extends) {
                self.advance();
                name = format!("? extends {}", self.parse_type_ref()?.render());
            } else if self.check_identifier("super") {
                self.advance();
                name = format!("? super {}", self.parse_type_ref()?.render());
            }
            return Ok(TypeRef::named(name));
        }

        let name = self.parse_dotted_name()?;
        let mut type_args = Vec::new();

        if self.check(&Token::Lt) {
            self.advance();
            if self.check(&Token::Gt) {
                // diamond "<>"
                self.advance();
            } else {
                type_args.push(self.parse_type_ref()?);
                while self.check(&Token::Comma) {
                    self.advance();
                    type_args.push(self.parse_type_ref()?);
                }
                self.expect(Token::Gt)?;
            }
        }

        let mut array_dims = 0;
        while self.check(&Token::LBracket) {
            if !matches!(self.peek_nth(1), Some(Token::RBracket)) {
                break;
            }
            self.advance();
            self.advance();
            array_dims += 1;
        }

        Ok(TypeRef {
            name,
            type_args,
            array_dims,
        })
    }

    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_identifier()?;
        while self.check(&Token::Dot) {
            if !matches!(self.peek_nth(1), Some(Token::Identifier(_))) {
                break;
            }
            self.advance();
            name.push('.');
            name.push_str(&self.expect_identifier()?);
        }
        Ok(name)
    }

    /// Consume a balanced brace run; the opening brace is already consumed.
    /// Returns the span of the matching closing brace.
    fn skip_balanced_braces(&mut self, _start: usize) -> Result<SourceRange, ParseError> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Some(Token::LBrace) => {
                    depth += 1;
                    self.advance();
                }
                Some(Token::RBrace) => {
                    let span = self.advance().unwrap().span.clone();
                    if depth == 0 {
                        return Ok(span);
                    }
                    depth -= 1;
                }
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error("Unbalanced braces")),
            }
        }
    }

    // ------------------------------------------------------------------
    // Token stream helpers
    // ------------------------------------------------------------------

    fn collect_javadoc(&mut self) {
        while let Some(Token::DocComment(_)) = self.peek() {
            let span = self.advance().unwrap().span.clone();
            // only the doc comment immediately preceding a declaration wins
            self.pending_javadoc = Some(span);
        }
    }

    fn take_javadoc(&mut self) -> Option<SourceRange> {
        self.pending_javadoc.take()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|t| &t.token)
    }

    fn check(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn check_identifier(&self, name: &str) -> bool {
        matches!(self.peek(), Some(Token::Identifier(s)) if s == name)
    }

    fn check_operator(&self, op: &str) -> bool {
        matches!(self.peek(), Some(Token::Operator(s)) if s == op)
    }

    fn advance(&mut self) -> Option<&SpannedToken> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn advance_token(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).map(|t| t.token.clone());
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, token: Token) -> Result<SourceRange, ParseError> {
        match self.tokens.get(self.pos) {
            Some(t) if t.token == token => {
                self.pos += 1;
                Ok(self.tokens[self.pos - 1].span.clone())
            }
            _ => Err(self.error(format!("Expected {:?}", token))),
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.tokens.get(self.pos) {
            Some(SpannedToken {
                token: Token::Identifier(s),
                ..
            }) => {
                let s = s.clone();
                self.pos += 1;
                Ok(s)
            }
            _ => Err(self.error("Expected identifier")),
        }
    }

    fn expect_operator(&mut self, op: &str) -> Result<(), ParseError> {
        if self.check_operator(op) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("Expected '{}'", op)))
        }
    }

    fn current_offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.span.start)
            .unwrap_or(self.source.len())
    }

    fn previous_end(&self) -> usize {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].span.end
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            span: self.tokens.get(self.pos).map(|t| t.span.clone()),
        }
    }
}

/// Parse a compilation unit from source text.
pub fn parse_compilation_unit(source: &str) -> Result<CompilationUnit, ParseError> {
    let tokens = super::lexer::tokenize(source).map_err(|e| ParseError {
        message: e.message,
        span: Some(e.span),
    })?;
    Parser::new(source, tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_model::ast::TypeKind;

    const FORM: &str = r#"package com.acme.ui.forms;

import com.acme.shared.services.IPersonService;
import java.util.HashMap;
import java.util.List;

/** A person editing form. */
@FormData(value = PersonFormData.class, sdkCommand = SdkCommand.CREATE)
public class PersonForm extends AbstractForm {

    private String m_cachedName;

    public String getCachedName() {
        return m_cachedName;
    }

    @FormData
    public HashMap<String, List<IPersonService>> getServiceIndex() {
        return new HashMap<>();
    }

    public class MainBox extends AbstractGroupBox {
        public class NameField extends AbstractStringField {
        }
    }
}
"#;

    #[test]
    fn test_parse_unit_structure() {
        let unit = parse_compilation_unit(FORM).unwrap();
        assert_eq!(unit.package.as_deref(), Some("com.acme.ui.forms"));
        assert_eq!(unit.imports.len(), 3);
        assert_eq!(
            unit.primary_fqn().as_deref(),
            Some("com.acme.ui.forms.PersonForm")
        );

        let form = unit.primary_type().unwrap();
        assert_eq!(form.kind, TypeKind::Class);
        assert_eq!(form.superclass.as_ref().unwrap().name, "AbstractForm");
        assert!(form.javadoc.is_some());
        assert_eq!(form.fields().count(), 1);
        assert_eq!(form.methods().count(), 2);
        assert_eq!(form.nested_types().count(), 1);
    }

    #[test]
    fn test_parse_annotation_elements() {
        let unit = parse_compilation_unit(FORM).unwrap();
        let form = unit.primary_type().unwrap();
        let anno = form.annotation("FormData").unwrap();
        assert_eq!(anno.element("value"), Some("PersonFormData.class"));
        assert_eq!(anno.element("sdkCommand"), Some("SdkCommand.CREATE"));
    }

    #[test]
    fn test_parse_nested_generics() {
        let unit = parse_compilation_unit(FORM).unwrap();
        let form = unit.primary_type().unwrap();
        let method = form.method("getServiceIndex").unwrap();
        let ret = method.return_type.as_ref().unwrap();
        assert_eq!(ret.render(), "HashMap<String, List<IPersonService>>");
    }

    #[test]
    fn test_body_span_is_preserved() {
        let unit = parse_compilation_unit(FORM).unwrap();
        let form = unit.primary_type().unwrap();
        let getter = form.method("getCachedName").unwrap();
        let body = getter.body.clone().unwrap();
        assert_eq!(FORM[body].trim(), "return m_cachedName;");
    }

    #[test]
    fn test_parse_constructor_and_initializer() {
        let src = r#"
public class Holder {
    static {
        init();
    }

    public Holder(int count) {
        super();
    }
}
"#;
        let unit = parse_compilation_unit(src).unwrap();
        let holder = unit.primary_type().unwrap();
        let ctor = holder.methods().next().unwrap();
        assert!(ctor.is_constructor());
        assert_eq!(ctor.params.len(), 1);
        assert_eq!(holder.members.len(), 2);
    }

    #[test]
    fn test_parse_interface_and_enum() {
        let src = r#"
public interface IService extends IBase, IOther {
    String KEY = "k";

    void ping();
}
"#;
        let unit = parse_compilation_unit(src).unwrap();
        let decl = unit.primary_type().unwrap();
        assert_eq!(decl.kind, TypeKind::Interface);
        assert_eq!(decl.interfaces.len(), 2);
        assert_eq!(decl.methods().count(), 1);

        let src = r#"
public enum Color {
    RED, GREEN, BLUE;

    public String hex() {
        return "";
    }
}
"#;
        let unit = parse_compilation_unit(src).unwrap();
        let decl = unit.primary_type().unwrap();
        assert_eq!(decl.kind, TypeKind::Enum);
        assert!(decl.enum_header_range.is_some());
        assert_eq!(decl.methods().count(), 1);
    }

    #[test]
    fn test_binary_safe_array_field() {
        let src = "class A { private int[] m_values; private String m_names[]; }";
        let unit = parse_compilation_unit(src).unwrap();
        let a = unit.primary_type().unwrap();
        let fields: Vec<_> = a.fields().collect();
        assert_eq!(fields[0].field_type.render(), "int[]");
        assert_eq!(fields[1].field_type.render(), "String[]");
    }
}
