//! Declaration-level syntax tree for Go source files.
//!
//! Only what method set resolution and declaration synthesis need is kept:
//! the package clause, the import table, type declarations and function
//! declarations. Function bodies, `var` and `const` groups are dropped by
//! the parser.

use smol_str::SmolStr;

/// One parsed `.go` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// Name from the `package` clause.
    pub package: SmolStr,
    /// Imports in declaration order.
    pub imports: Vec<ImportSpec>,
    /// Top-level declarations in declaration order.
    pub decls: Vec<Decl>,
}

/// A single import, `import fb "github.com/example/foobar"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit local name (`fb`, `_` or `.`), if any.
    pub name: Option<SmolStr>,
    /// Unquoted import path.
    pub path: SmolStr,
}

impl ImportSpec {
    pub fn new(name: Option<&str>, path: &str) -> Self {
        Self {
            name: name.map(SmolStr::new),
            path: SmolStr::new(path),
        }
    }
}

/// A top-level declaration that survives parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decl {
    /// `type X ...` or a grouped `type ( ... )`.
    Types(Vec<TypeSpec>),
    /// A function or method declaration.
    Func(FuncDecl),
}

/// `Name[TypeParams] Type` or `Name = Type` inside a type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: SmolStr,
    /// Type parameter list of a generic declaration, carried opaquely.
    pub type_params: Vec<Field>,
    /// `type A = B`
    pub alias: bool,
    pub ty: TypeExpr,
}

/// `func (recv) Name(params) results`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncDecl {
    pub recv: Option<Field>,
    pub name: SmolStr,
    pub type_params: Vec<Field>,
    pub ty: FuncType,
}

impl FuncDecl {
    /// Receiver base type name with any `*` and instantiation removed.
    pub fn receiver_base(&self) -> Option<&str> {
        self.recv.as_ref().and_then(|recv| recv.ty.base_name())
    }
}

/// A parameter, result, struct field, or interface element.
///
/// An empty `names` list means an unnamed parameter, an embedded struct
/// field, or an embedded interface.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub names: Vec<SmolStr>,
    pub ty: TypeExpr,
    /// Struct tag literal including its quotes.
    pub tag: Option<SmolStr>,
}

impl Field {
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
            tag: None,
        }
    }

    pub fn named<I, S>(names: I, ty: TypeExpr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty,
            tag: None,
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }

    /// How many values this field declares (`a, b int` declares two).
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

/// Direction of a channel type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Parameters and results of a function type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FuncType {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

impl FuncType {
    pub fn new(params: Vec<Field>, results: Vec<Field>) -> Self {
        Self { params, results }
    }

    /// Whether the final parameter is `...T`.
    pub fn is_variadic(&self) -> bool {
        matches!(
            self.params.last(),
            Some(Field {
                ty: TypeExpr::Ellipsis(_),
                ..
            })
        )
    }
}

/// A type expression.
///
/// The set of shapes is closed so every rewrite and printer over it is an
/// exhaustive match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// `Foo`, `int`
    Ident(SmolStr),
    /// `pkg.Foo`
    Qualified { package: SmolStr, name: SmolStr },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T` or `[...]T`; the length expression is kept as source text.
    Array { len: SmolStr, elem: Box<TypeExpr> },
    /// `map[K]V`
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    /// `func(params) results`
    Func(Box<FuncType>),
    /// `interface { ... }`
    Interface(Vec<Field>),
    /// `struct { ... }`
    Struct(Vec<Field>),
    /// `...T` in final parameter position
    Ellipsis(Box<TypeExpr>),
    /// `List[T]`, `pkg.Map[K, V]`
    Instance { base: Box<TypeExpr>, args: Vec<TypeExpr> },
    /// `A | B` in a constraint interface
    Union(Vec<TypeExpr>),
    /// `~T` in a constraint interface
    Approx(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn ident(name: impl Into<SmolStr>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn qualified(package: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        TypeExpr::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    pub fn func(params: Vec<Field>, results: Vec<Field>) -> Self {
        TypeExpr::Func(Box::new(FuncType::new(params, results)))
    }

    /// Name of the declared type this expression refers to, looking through
    /// one pointer and any instantiation: `*pkg.List[T]` gives `List`.
    pub fn base_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Ident(name) => Some(name.as_str()),
            TypeExpr::Qualified { name, .. } => Some(name.as_str()),
            TypeExpr::Pointer(inner) => match inner.as_ref() {
                TypeExpr::Pointer(_) => None,
                other => other.base_name(),
            },
            TypeExpr::Instance { base, .. } => base.base_name(),
            _ => None,
        }
    }
}

/// Whether `name` is visible outside its package.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Predeclared type names of the universe scope.
pub const BUILTIN_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex128",
    "complex64",
    "error",
    "float32",
    "float64",
    "int",
    "int16",
    "int32",
    "int64",
    "int8",
    "rune",
    "string",
    "uint",
    "uint16",
    "uint32",
    "uint64",
    "uint8",
    "uintptr",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.binary_search(&name).is_ok()
}
