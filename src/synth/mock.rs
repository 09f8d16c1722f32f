//! Function-field mocks for interfaces.
//!
//! For an interface `Store` the mock is a struct with one `func` field per
//! method, `GetMock` for `Get`, and a method per field forwarding its
//! arguments:
//!
//! ```text
//! type StoreMock struct {
//! 	GetMock func(key store.Key) (*store.Item, error)
//! }
//!
//! func (mo *StoreMock) Get(key store.Key) (*store.Item, error) {
//! 	return mo.GetMock(key)
//! }
//! ```

use crate::hir::MethodSignature;
use crate::syntax::{Field, TypeExpr, aligned_fields, method_signature};

use super::naming::{auto_name, param_names};

const RECEIVER: &str = "mo";

/// Mock source for interface `iface` requiring `methods`.
///
/// Methods are expected qualified already; they are emitted in the order
/// given.
pub fn render_mock(iface: &str, methods: &[MethodSignature]) -> String {
    let mock = format!("{iface}Mock");
    let mut decls = Vec::with_capacity(methods.len() + 1);
    decls.push(mock_struct(&mock, methods));
    decls.extend(methods.iter().map(|method| forwarder(&mock, method)));
    decls.join("\n\n") + "\n"
}

fn mock_struct(mock: &str, methods: &[MethodSignature]) -> String {
    if methods.is_empty() {
        return format!("type {mock} struct{{}}");
    }
    let fields: Vec<Field> = methods
        .iter()
        .map(|method| {
            let ty = TypeExpr::Func(Box::new(method.func.clone()));
            Field::named([format!("{}Mock", method.name)], ty)
        })
        .collect();

    let mut out = format!("type {mock} struct {{\n");
    for line in aligned_fields(&fields, 1) {
        out.push('\t');
        out.push_str(&line);
        out.push('\n');
    }
    out.push('}');
    out
}

fn forwarder(mock: &str, method: &MethodSignature) -> String {
    let func = auto_name(&method.func);
    let mut args = param_names(&func).join(", ");
    if func.is_variadic() {
        args.push_str("...");
    }
    let call = format!("{RECEIVER}.{}Mock({args})", method.name);
    let body = if func.results.is_empty() {
        call
    } else {
        format!("return {call}")
    };
    format!(
        "func ({RECEIVER} *{mock}) {} {{\n\t{body}\n}}",
        method_signature(&method.name, &func)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_type;

    fn method(name: &str, func: &str) -> MethodSignature {
        match parse_type(func).unwrap() {
            TypeExpr::Func(func) => MethodSignature::new(name, *func),
            other => panic!("not a func type: {other:?}"),
        }
    }

    #[test]
    fn test_render_mock() {
        let methods = vec![
            method("Get", "func(key store.Key) (*store.Item, error)"),
            method("Close", "func()"),
        ];
        let expected = "\
type StoreMock struct {
\tGetMock   func(key store.Key) (*store.Item, error)
\tCloseMock func()
}

func (mo *StoreMock) Get(key store.Key) (*store.Item, error) {
\treturn mo.GetMock(key)
}

func (mo *StoreMock) Close() {
\tmo.CloseMock()
}
";
        assert_eq!(render_mock("Store", &methods), expected);
    }

    #[test]
    fn test_variadic_and_unnamed() {
        let methods = vec![method("Printf", "func(string, ...any) int")];
        let rendered = render_mock("Printer", &methods);
        assert!(rendered.contains("\tPrintfMock func(string, ...any) int\n"));
        assert!(rendered.contains(
            "func (mo *PrinterMock) Printf(arg1 string, arg2 ...any) int {\n\treturn mo.PrintfMock(arg1, arg2...)\n}\n"
        ));
    }

    #[test]
    fn test_grouped_params_forwarded() {
        let methods = vec![method("Add", "func(a, b int) int")];
        assert!(render_mock("Adder", &methods).contains("return mo.AddMock(a, b)"));
    }

    #[test]
    fn test_empty_interface() {
        assert_eq!(render_mock("Any", &[]), "type AnyMock struct{}\n");
    }
}
