use crate::hir::MethodSignature;
use crate::syntax::method_signature;

use super::naming::auto_name;

/// Method declarations on `receiver_type` that panic with "implement me".
///
/// `receiver` names the receiver variable; `receiver_type` is written as
/// given, so `*Store` yields pointer receivers.
pub fn render_stub(methods: &[MethodSignature], receiver_type: &str, receiver: &str) -> String {
    methods
        .iter()
        .map(|method| {
            format!(
                "func ({receiver} {receiver_type}) {} {{\n\tpanic(\"implement me\")\n}}\n\n",
                method_signature(&method.name, &auto_name(&method.func))
            )
        })
        .collect()
}
