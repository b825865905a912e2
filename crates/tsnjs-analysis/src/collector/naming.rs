//! Canonical naming rules (spec.md §4.3).

/// Call expressions whose function-valued arguments are addressed as
/// `call:<callee>[:<first-string-arg>] > callback` scopes.
pub const HOST_CALLS: &[&str] = &[
    "describe", "test", "it", "beforeEach", "afterEach", "beforeAll", "afterAll",
];

/// Join a scope chain into its canonical, ` > `-joined form (used for class
/// members and host-call callbacks) or `.`-joined form (used for export
/// scopes), per the examples in spec.md §4.3.
pub fn join_exports(chain: &[String]) -> String {
    chain.join(".")
}

pub fn join_class_chain(chain: &[String]) -> String {
    chain.join(" > ")
}

/// Build the `call:<callee>[:<arg>]` label for a host-call callback scope.
pub fn host_call_label(callee: &str, first_string_arg: Option<&str>) -> String {
    match first_string_arg {
        Some(arg) => format!("call:{callee}:{arg}"),
        None => format!("call:{callee}"),
    }
}
