// src/commands/stub.rs

use anyhow::Context;

use crate::project::ModuleLoader;
use crate::synth::{interface_requires, render_stub};

/// Stubs on `type_name`, receiver `name`, for interface `implement` in `pkg`.
pub fn execute(
    loader: &ModuleLoader,
    pkg: &str,
    implement: &str,
    type_name: &str,
    name: &str,
) -> anyhow::Result<String> {
    let module = loader
        .load(pkg)
        .with_context(|| format!("loading package {pkg:?}"))?;
    let methods = interface_requires(loader, &module, implement)
        .with_context(|| format!("collecting methods of {pkg}.{implement}"))?;
    Ok(render_stub(&methods, type_name, name))
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
                "example.com/io",
                [(
                    "io.go",
                    "package io\n\ntype Writer interface {\n\tWrite([]byte) (int, error)\n}\n\ntype WriteCloser interface {\n\tWriter\n\tClose() error\n}\n",
                )],
            )
            .unwrap();

        let expected = "\
func (w *Buffer) Write(arg1 []byte) (int, error) {
\tpanic(\"implement me\")
}

func (w *Buffer) Close() error {
\tpanic(\"implement me\")
}

";
        assert_eq!(
            execute(&loader, "example.com/io", "WriteCloser", "*Buffer", "w").unwrap(),
            expected
        );
    }
}
