// src/commands/mock.rs

use anyhow::Context;

use crate::project::ModuleLoader;
use crate::synth::{interface_requires, render_mock};

/// Mock of interface `type_name` declared in package `pkg`.
pub fn execute(loader: &ModuleLoader, pkg: &str, type_name: &str) -> anyhow::Result<String> {
    let module = loader
        .load(pkg)
        .with_context(|| format!("loading package {pkg:?}"))?;
    let methods = interface_requires(loader, &module, type_name)
        .with_context(|| format!("collecting methods of {pkg}.{type_name}"))?;
    Ok(render_mock(type_name, &methods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::LoaderConfig;

    #[test]
    fn test_execute() {
        let loader = ModuleLoader::new(LoaderConfig::detached());
        loader
            .add_sources(
                "example.com/kv",
                [(
                    "kv.go",
                    "package kv\n\ntype Store interface {\n\tGet(Key) (Value, bool)\n\tPut(k Key, v Value)\n}\n",
                )],
            )
            .unwrap();

        let expected = "\
type StoreMock struct {
\tGetMock func(kv.Key) (kv.Value, bool)
\tPutMock func(k kv.Key, v kv.Value)
}

func (mo *StoreMock) Get(arg1 kv.Key) (kv.Value, bool) {
\treturn mo.GetMock(arg1)
}

func (mo *StoreMock) Put(k kv.Key, v kv.Value) {
\tmo.PutMock(k, v)
}
";
        assert_eq!(execute(&loader, "example.com/kv", "Store").unwrap(), expected);
    }

    #[test]
    fn test_not_an_interface() {
        let loader = ModuleLoader::new(LoaderConfig::detached());
        loader
            .add_sources("example.com/kv", [("kv.go", "package kv\n\ntype Store struct{}\n")])
            .unwrap();
        let err = execute(&loader, "example.com/kv", "Store").unwrap_err();
        assert!(format!("{err:#}").contains("expected an interface"));
    }
}
