//! Lowering of tree-sitter-go syntax trees into the declaration-level AST.
//!
//! tree-sitter builds the concrete tree for the whole file; only package
//! clauses, imports, type declarations and function signatures are lowered.
//! Function bodies and `var`/`const` groups are left in the tree untouched.
//! Any ERROR or MISSING node in the tree is reported as a [`ParseError`].

use smol_str::SmolStr;
use tree_sitter::{Node, Parser, Tree};

use super::ParseError;
use super::ast::{ChanDir, Decl, Field, FuncDecl, FuncType, ImportSpec, SourceFile, TypeExpr, TypeSpec};
use crate::base::{LineCol, TextSize};

type PResult<T> = Result<T, ParseError>;

/// Parse a complete `.go` file.
pub fn parse_file(source: &str) -> Result<SourceFile, ParseError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let tree = parse_tree(source)?;
    let lower = Lowering::new(source, source, 0);
    lower.check(tree.root_node())?;
    lower.source_file(tree.root_node())
}

/// Parse a standalone type expression such as `map[string]*Foo`.
pub fn parse_type(source: &str) -> Result<TypeExpr, ParseError> {
    const PREFIX: &str = "package p\ntype X = ";
    let wrapped = format!("{PREFIX}{source}\n");
    let tree = parse_tree(&wrapped)?;
    let lower = Lowering::new(&wrapped, source, PREFIX.len());
    let root = tree.root_node();
    lower.check(root)?;

    let decls = children(root);
    let alias = match decls.as_slice() {
        [package, decl] if package.kind() == "package_clause" && decl.kind() == "type_declaration" => {
            match children(*decl).as_slice() {
                [spec] if spec.kind() == "type_alias" => *spec,
                _ => return Err(lower.error(*decl, "unexpected trailing input after type")),
            }
        }
        [_, _, extra, ..] => return Err(lower.error(*extra, "unexpected trailing input after type")),
        _ => return Err(lower.error(root, "expected type")),
    };
    lower.ty(lower.field(alias, "type")?)
}

fn parse_tree(source: &str) -> PResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|err| ParseError::new(LineCol::default(), format!("cannot load Go grammar: {err}")))?;
    parser
        .parse(source, None)
        .ok_or_else(|| ParseError::new(LineCol::default(), "parsing was cancelled"))
}

/// Named children of `node`, comments excluded.
fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

/// First ERROR or MISSING node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let nodes: Vec<_> = node.children(&mut cursor).collect();
    nodes.into_iter().find_map(first_error)
}

struct Lowering<'s> {
    /// Text the tree was built from.
    source: &'s str,
    /// Text positions are reported against.
    shown: &'s str,
    /// Offset of `shown` inside `source`.
    shift: usize,
}

impl<'s> Lowering<'s> {
    fn new(source: &'s str, shown: &'s str, shift: usize) -> Self {
        Self { source, shown, shift }
    }

    // ========================================================================
    // NODE ACCESS
    // ========================================================================

    fn text(&self, node: Node<'_>) -> SmolStr {
        SmolStr::new(self.source.get(node.byte_range()).unwrap_or_default())
    }

    fn error(&self, node: Node<'_>, message: impl Into<String>) -> ParseError {
        let offset = node.start_byte().saturating_sub(self.shift).min(self.shown.len());
        ParseError::at(self.shown, TextSize::from(offset as u32), message)
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> PResult<Node<'t>> {
        node.child_by_field_name(name)
            .ok_or_else(|| self.error(node, format!("expected {name} in {}", node.kind().replace('_', " "))))
    }

    fn first_child<'t>(&self, node: Node<'t>) -> PResult<Node<'t>> {
        children(node)
            .into_iter()
            .next()
            .ok_or_else(|| self.error(node, "expected type"))
    }

    /// All nodes under field `name`, in order.
    fn names(&self, node: Node<'_>) -> Vec<SmolStr> {
        let mut cursor = node.walk();
        node.children_by_field_name("name", &mut cursor)
            .map(|name| self.text(name))
            .collect()
    }

    fn check(&self, root: Node<'_>) -> PResult<()> {
        let Some(node) = first_error(root) else {
            return Ok(());
        };
        if node.is_missing() {
            return Err(self.error(node, format!("syntax error: missing `{}`", node.kind())));
        }
        let mut leaf = node;
        while let Some(child) = leaf.child(0) {
            leaf = child;
        }
        let found = self.text(leaf);
        if found.is_empty() {
            return Err(self.error(node, "syntax error: unexpected end of file"));
        }
        Err(self.error(leaf, format!("syntax error: unexpected {found:?}")))
    }

    // ========================================================================
    // FILE LEVEL
    // ========================================================================

    fn source_file(&self, root: Node<'_>) -> PResult<SourceFile> {
        let mut package = None;
        let mut imports = Vec::new();
        let mut decls = Vec::new();
        for node in children(root) {
            match node.kind() {
                "package_clause" => package = Some(self.text(self.first_child(node)?)),
                "import_declaration" => self.import_decl(node, &mut imports)?,
                "type_declaration" => decls.push(Decl::Types(self.type_decl(node)?)),
                "function_declaration" | "method_declaration" => {
                    decls.push(Decl::Func(self.func_decl(node)?))
                }
                _ => {}
            }
        }

        let package = package.ok_or_else(|| {
            let at = children(root).into_iter().next().unwrap_or(root);
            self.error(at, "expected `package` clause")
        })?;
        Ok(SourceFile {
            package,
            imports,
            decls,
        })
    }

    fn import_decl(&self, node: Node<'_>, imports: &mut Vec<ImportSpec>) -> PResult<()> {
        for child in children(node) {
            match child.kind() {
                "import_spec" => imports.push(self.import_spec(child)?),
                "import_spec_list" => {
                    for spec in children(child) {
                        imports.push(self.import_spec(spec)?);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn import_spec(&self, node: Node<'_>) -> PResult<ImportSpec> {
        let name = node.child_by_field_name("name").map(|name| self.text(name));
        let literal = self.field(node, "path")?;
        let path = unquote(&self.text(literal)).ok_or_else(|| self.error(literal, "invalid import path"))?;
        Ok(ImportSpec { name, path })
    }

    fn type_decl(&self, node: Node<'_>) -> PResult<Vec<TypeSpec>> {
        children(node)
            .into_iter()
            .filter_map(|spec| match spec.kind() {
                "type_spec" => Some(self.type_spec(spec, false)),
                "type_alias" => Some(self.type_spec(spec, true)),
                _ => None,
            })
            .collect()
    }

    fn type_spec(&self, node: Node<'_>, alias: bool) -> PResult<TypeSpec> {
        Ok(TypeSpec {
            name: self.text(self.field(node, "name")?),
            type_params: self.type_params(node)?,
            alias,
            ty: self.ty(self.field(node, "type")?)?,
        })
    }

    /// `[K comparable, V any]` on a type or function declaration.
    fn type_params(&self, node: Node<'_>) -> PResult<Vec<Field>> {
        let Some(list) = node.child_by_field_name("type_parameters") else {
            return Ok(Vec::new());
        };
        children(list)
            .into_iter()
            .filter(|decl| decl.kind() == "type_parameter_declaration")
            .map(|decl| -> PResult<Field> {
                Ok(Field::named(self.names(decl), self.ty(self.field(decl, "type")?)?))
            })
            .collect()
    }

    fn func_decl(&self, node: Node<'_>) -> PResult<FuncDecl> {
        let recv = match node.child_by_field_name("receiver") {
            Some(list) => {
                let mut fields = self.parameters(list)?;
                match fields.as_slice() {
                    [] => return Err(self.error(list, "method has no receiver")),
                    [single] if single.names.len() <= 1 => fields.pop(),
                    _ => return Err(self.error(list, "method has multiple receivers")),
                }
            }
            None => None,
        };
        Ok(FuncDecl {
            recv,
            name: self.text(self.field(node, "name")?),
            type_params: self.type_params(node)?,
            ty: self.signature(node)?,
        })
    }

    // ========================================================================
    // TYPES
    // ========================================================================

    fn ty(&self, node: Node<'_>) -> PResult<TypeExpr> {
        let ty = match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Ident(self.text(node)),
            "qualified_type" => TypeExpr::Qualified {
                package: self.text(self.field(node, "package")?),
                name: self.text(self.field(node, "name")?),
            },
            "generic_type" => {
                let base = self.ty(self.field(node, "type")?)?;
                let args = children(self.field(node, "type_arguments")?)
                    .into_iter()
                    .map(|arg| self.ty(arg))
                    .collect::<PResult<_>>()?;
                TypeExpr::Instance {
                    base: Box::new(base),
                    args,
                }
            }
            "pointer_type" => TypeExpr::Pointer(Box::new(self.ty(self.first_child(node)?)?)),
            "slice_type" => TypeExpr::Slice(Box::new(self.ty(self.field(node, "element")?)?)),
            "array_type" => TypeExpr::Array {
                len: self.text(self.field(node, "length")?),
                elem: Box::new(self.ty(self.field(node, "element")?)?),
            },
            "implicit_length_array_type" => TypeExpr::Array {
                len: SmolStr::new_static("..."),
                elem: Box::new(self.ty(self.field(node, "element")?)?),
            },
            "map_type" => TypeExpr::Map {
                key: Box::new(self.ty(self.field(node, "key")?)?),
                value: Box::new(self.ty(self.field(node, "value")?)?),
            },
            "channel_type" => TypeExpr::Chan {
                dir: chan_dir(node),
                elem: Box::new(self.ty(self.field(node, "value")?)?),
            },
            "function_type" => TypeExpr::Func(Box::new(self.signature(node)?)),
            "interface_type" => self.interface_type(node)?,
            "struct_type" => self.struct_type(node)?,
            "parenthesized_type" => self.ty(self.first_child(node)?)?,
            "negated_type" => TypeExpr::Approx(Box::new(self.ty(self.first_child(node)?)?)),
            "type_elem" | "type_constraint" | "constraint_elem" | "union_type" => self.type_elem(node)?,
            kind => {
                return Err(self.error(
                    node,
                    format!("expected type, found {} {:?}", kind.replace('_', " "), self.text(node)),
                ));
            }
        };
        Ok(ty)
    }

    /// `T`, `~T` or a union of terms such as `~int | string`.
    fn type_elem(&self, node: Node<'_>) -> PResult<TypeExpr> {
        let mut terms = Vec::new();
        for term in children(node) {
            match self.ty(term)? {
                TypeExpr::Union(inner) => terms.extend(inner),
                term => terms.push(term),
            }
        }
        match terms.len() {
            0 => Err(self.error(node, "expected type")),
            1 => Ok(terms.remove(0)),
            _ => Ok(TypeExpr::Union(terms)),
        }
    }

    /// Parameters and result of a function type, method or declaration.
    fn signature(&self, node: Node<'_>) -> PResult<FuncType> {
        let params = self.parameters(self.field(node, "parameters")?)?;
        let results = match node.child_by_field_name("result") {
            Some(list) if list.kind() == "parameter_list" => self.parameters(list)?,
            Some(ty) => vec![Field::unnamed(self.ty(ty)?)],
            None => Vec::new(),
        };
        Ok(FuncType { params, results })
    }

    /// A parameter, result or receiver list.
    ///
    /// Either every entry is a bare type, or every entry is named; in the
    /// named form consecutive names share the next type (`a, b int`).
    fn parameters(&self, list: Node<'_>) -> PResult<Vec<Field>> {
        let mut entries = Vec::new();
        for decl in children(list) {
            let variadic = match decl.kind() {
                "parameter_declaration" => false,
                "variadic_parameter_declaration" => true,
                _ => continue,
            };
            let mut ty = self.ty(self.field(decl, "type")?)?;
            if variadic {
                ty = TypeExpr::Ellipsis(Box::new(ty));
            }
            entries.push((self.names(decl), ty));
        }

        if entries.iter().all(|(names, _)| names.is_empty()) {
            return Ok(entries.into_iter().map(|(_, ty)| Field::unnamed(ty)).collect());
        }

        let mixed = || self.error(list, "mixed named and unnamed parameters");
        let mut fields = Vec::new();
        let mut pending = Vec::new();
        for (names, ty) in entries {
            if !names.is_empty() {
                pending.extend(names);
                fields.push(Field::named(std::mem::take(&mut pending), ty));
                continue;
            }
            match ty {
                TypeExpr::Ident(name) => pending.push(name),
                _ => return Err(mixed()),
            }
        }
        if !pending.is_empty() {
            return Err(mixed());
        }
        Ok(fields)
    }

    fn interface_type(&self, node: Node<'_>) -> PResult<TypeExpr> {
        let mut elems = Vec::new();
        for elem in children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let name = self.text(self.field(elem, "name")?);
                    let sig = self.signature(elem)?;
                    elems.push(Field::named([name], TypeExpr::Func(Box::new(sig))));
                }
                _ => elems.push(Field::unnamed(self.ty(elem)?)),
            }
        }
        Ok(TypeExpr::Interface(elems))
    }

    fn struct_type(&self, node: Node<'_>) -> PResult<TypeExpr> {
        let mut fields = Vec::new();
        let Some(list) = children(node)
            .into_iter()
            .find(|child| child.kind() == "field_declaration_list")
        else {
            return Ok(TypeExpr::Struct(fields));
        };
        for decl in children(list) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            let names = self.names(decl);
            let mut ty = self.ty(self.field(decl, "type")?)?;
            if names.is_empty() && has_token(decl, "*") {
                ty = TypeExpr::Pointer(Box::new(ty));
            }
            let mut field = Field::named(names, ty);
            field.tag = decl.child_by_field_name("tag").map(|tag| self.text(tag));
            fields.push(field);
        }
        Ok(TypeExpr::Struct(fields))
    }
}

/// `chan T`, `chan<- T` or `<-chan T`, read from the leading tokens.
fn chan_dir(node: Node<'_>) -> ChanDir {
    let kind = |index| node.child(index).map(|child| child.kind());
    match (kind(0), kind(1)) {
        (Some("<-"), _) => ChanDir::Recv,
        (_, Some("<-")) => ChanDir::Send,
        _ => ChanDir::Both,
    }
}

/// Whether `node` has an anonymous `token` as a direct child.
fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token)
}

/// Strip the quotes of an import path literal.
fn unquote(literal: &str) -> Option<SmolStr> {
    if let Some(raw) = literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        return Some(SmolStr::new(raw));
    }
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '/' => out.push('/'),
            _ => return None,
        }
    }
    if out.is_empty() {
        return None;
    }
    Some(SmolStr::from(out))
}
