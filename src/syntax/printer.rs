//! Printing type expressions the way gofmt lays them out.

use std::fmt::{self, Write};

use super::ast::{ChanDir, Field, FuncType, TypeExpr};

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f, 0).ty(self)
    }
}

/// Prints as a function type literal: `func(int, string) error`.
impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func")?;
        Printer::new(f, 0).signature(self)
    }
}

/// `Name(params) results` as it appears inside an interface body or after
/// the receiver of a method declaration.
pub fn method_signature(name: &str, func: &FuncType) -> String {
    let mut out = String::from(name);
    // Writing into a String cannot fail.
    let _ = Printer::new(&mut out, 0).signature(func);
    out
}

/// Same as [`method_signature`], nested `interface`/`struct` bodies are
/// indented one level deeper than `indent` tabs.
pub fn method_signature_at(name: &str, func: &FuncType, indent: usize) -> String {
    let mut out = String::from(name);
    let _ = Printer::new(&mut out, indent).signature(func);
    out
}

/// A parameter list without the surrounding parentheses: `a, b int, c ...string`.
pub fn field_list(fields: &[Field]) -> String {
    let mut out = String::new();
    let _ = Printer::new(&mut out, 0).fields(fields);
    out
}

/// Lines of `name type tag` with the type column aligned like gofmt.
pub fn aligned_fields(fields: &[Field], indent: usize) -> Vec<String> {
    let names: Vec<String> = fields.iter().map(|field| field.names.join(", ")).collect();
    let width = names.iter().map(|name| name.chars().count()).max().unwrap_or(0);
    fields
        .iter()
        .zip(names)
        .map(|(field, names)| {
            let mut line = String::new();
            if !names.is_empty() {
                let pad = width - names.chars().count();
                let _ = write!(line, "{names}{:pad$} ", "");
            }
            let _ = Printer::new(&mut line, indent).ty(&field.ty);
            if let Some(tag) = &field.tag {
                line.push(' ');
                line.push_str(tag);
            }
            line.trim_end().to_string()
        })
        .collect()
}

struct Printer<'w, W: Write> {
    out: &'w mut W,
    indent: usize,
}

impl<'w, W: Write> Printer<'w, W> {
    fn new(out: &'w mut W, indent: usize) -> Self {
        Self { out, indent }
    }

    fn ty(&mut self, ty: &TypeExpr) -> fmt::Result {
        match ty {
            TypeExpr::Ident(name) => self.out.write_str(name),
            TypeExpr::Qualified { package, name } => write!(self.out, "{package}.{name}"),
            TypeExpr::Pointer(inner) => {
                self.out.write_char('*')?;
                self.ty(inner)
            }
            TypeExpr::Slice(elem) => {
                self.out.write_str("[]")?;
                self.ty(elem)
            }
            TypeExpr::Array { len, elem } => {
                write!(self.out, "[{len}]")?;
                self.ty(elem)
            }
            TypeExpr::Map { key, value } => {
                self.out.write_str("map[")?;
                self.ty(key)?;
                self.out.write_char(']')?;
                self.ty(value)
            }
            TypeExpr::Chan { dir, elem } => {
                self.out.write_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                })?;
                self.ty(elem)
            }
            TypeExpr::Func(func) => {
                self.out.write_str("func")?;
                self.signature(func)
            }
            TypeExpr::Interface(elems) => self.body("interface", elems, false),
            TypeExpr::Struct(fields) => self.body("struct", fields, true),
            TypeExpr::Ellipsis(elem) => {
                self.out.write_str("...")?;
                self.ty(elem)
            }
            TypeExpr::Instance { base, args } => {
                self.ty(base)?;
                self.out.write_char('[')?;
                self.separated(args, ", ")?;
                self.out.write_char(']')
            }
            TypeExpr::Union(terms) => self.separated(terms, " | "),
            TypeExpr::Approx(inner) => {
                self.out.write_char('~')?;
                self.ty(inner)
            }
        }
    }

    fn separated(&mut self, types: &[TypeExpr], sep: &str) -> fmt::Result {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                self.out.write_str(sep)?;
            }
            self.ty(ty)?;
        }
        Ok(())
    }

    /// `(params) results` following a `func` keyword or method name.
    fn signature(&mut self, func: &FuncType) -> fmt::Result {
        self.out.write_char('(')?;
        self.fields(&func.params)?;
        self.out.write_char(')')?;
        match func.results.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() => {
                self.out.write_char(' ')?;
                self.ty(&single.ty)
            }
            results => {
                self.out.write_str(" (")?;
                self.fields(results)?;
                self.out.write_char(')')
            }
        }
    }

    fn fields(&mut self, fields: &[Field]) -> fmt::Result {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            if !field.names.is_empty() {
                write!(self.out, "{} ", field.names.join(", "))?;
            }
            self.ty(&field.ty)?;
        }
        Ok(())
    }

    fn body(&mut self, keyword: &str, elems: &[Field], is_struct: bool) -> fmt::Result {
        if elems.is_empty() {
            return write!(self.out, "{keyword}{{}}");
        }
        writeln!(self.out, "{keyword} {{")?;
        let inner = self.indent + 1;
        let lines = if is_struct {
            aligned_fields(elems, inner)
        } else {
            elems
                .iter()
                .map(|elem| match (elem.names.first(), &elem.ty) {
                    (Some(name), TypeExpr::Func(func)) => method_signature_at(name, func, inner),
                    _ => {
                        let mut line = String::new();
                        let _ = Printer::new(&mut line, inner).ty(&elem.ty);
                        line
                    }
                })
                .collect()
        };
        for line in lines {
            writeln!(self.out, "{}{line}", "\t".repeat(inner))?;
        }
        write!(self.out, "{}}}", "\t".repeat(self.indent))
    }
}
