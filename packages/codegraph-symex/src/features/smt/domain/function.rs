//! SMT function symbols

use super::Sort;
use std::fmt;

/// Solver-builtin operator or user-declared symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Builtin,
    Declared,
}

/// Function symbol with fixed arity (0 to 3)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    Nullary {
        name: String,
        result: Sort,
        kind: FunctionKind,
    },
    Unary {
        name: String,
        argument: Sort,
        result: Sort,
        kind: FunctionKind,
    },
    Binary {
        name: String,
        arguments: [Sort; 2],
        result: Sort,
        kind: FunctionKind,
    },
    Ternary {
        name: String,
        arguments: [Sort; 3],
        result: Sort,
        kind: FunctionKind,
    },
}

impl Function {
    /// User-declared constant (`declare-const`)
    pub fn constant(name: impl Into<String>, result: Sort) -> Self {
        Function::Nullary {
            name: name.into(),
            result,
            kind: FunctionKind::Declared,
        }
    }

    pub fn builtin_nullary(name: impl Into<String>, result: Sort) -> Self {
        Function::Nullary {
            name: name.into(),
            result,
            kind: FunctionKind::Builtin,
        }
    }

    pub fn builtin_unary(name: impl Into<String>, argument: Sort, result: Sort) -> Self {
        Function::Unary {
            name: name.into(),
            argument,
            result,
            kind: FunctionKind::Builtin,
        }
    }

    pub fn builtin_binary(name: impl Into<String>, arguments: [Sort; 2], result: Sort) -> Self {
        Function::Binary {
            name: name.into(),
            arguments,
            result,
            kind: FunctionKind::Builtin,
        }
    }

    pub fn builtin_ternary(name: impl Into<String>, arguments: [Sort; 3], result: Sort) -> Self {
        Function::Ternary {
            name: name.into(),
            arguments,
            result,
            kind: FunctionKind::Builtin,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Function::Nullary { name, .. }
            | Function::Unary { name, .. }
            | Function::Binary { name, .. }
            | Function::Ternary { name, .. } => name,
        }
    }

    pub fn kind(&self) -> FunctionKind {
        match self {
            Function::Nullary { kind, .. }
            | Function::Unary { kind, .. }
            | Function::Binary { kind, .. }
            | Function::Ternary { kind, .. } => *kind,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.kind() == FunctionKind::Builtin
    }

    pub fn arity(&self) -> usize {
        match self {
            Function::Nullary { .. } => 0,
            Function::Unary { .. } => 1,
            Function::Binary { .. } => 2,
            Function::Ternary { .. } => 3,
        }
    }

    pub fn argument_sorts(&self) -> &[Sort] {
        match self {
            Function::Nullary { .. } => &[],
            Function::Unary { argument, .. } => std::slice::from_ref(argument),
            Function::Binary { arguments, .. } => arguments,
            Function::Ternary { arguments, .. } => arguments,
        }
    }

    pub fn result_sort(&self) -> Sort {
        match self {
            Function::Nullary { result, .. }
            | Function::Unary { result, .. }
            | Function::Binary { result, .. }
            | Function::Ternary { result, .. } => *result,
        }
    }

    /// Name as it must appear in SMT-LIB text.
    ///
    /// Builtins are emitted verbatim (`bvadd`, `(_ zero_extend 8)`, numerals,
    /// string literals); declared symbols are `|quoted|` unless they are
    /// already simple symbols. `|` and `\` cannot appear inside a quoted
    /// symbol, so declared names percent-encode them (and `%` itself).
    pub fn smtlib_name(&self) -> String {
        let name = self.name();
        if self.is_builtin() {
            return name.to_string();
        }
        let escaped = escape_symbol(name);
        if is_simple_symbol(&escaped) {
            escaped
        } else {
            format!("|{}|", escaped)
        }
    }

    /// `(declare-fun ...)` command for declared symbols
    pub fn declaration(&self) -> Option<String> {
        if self.is_builtin() {
            return None;
        }
        let arguments: Vec<_> = self
            .argument_sorts()
            .iter()
            .map(|s| s.to_string())
            .collect();
        Some(format!(
            "(declare-fun {} ({}) {})",
            self.smtlib_name(),
            arguments.join(" "),
            self.result_sort()
        ))
    }
}

fn escape_symbol(name: &str) -> String {
    if !name.contains(['%', '|', '\\']) {
        return name.to_string();
    }
    name.replace('%', "%25")
        .replace('|', "%7C")
        .replace('\\', "%5C")
}

fn is_simple_symbol(name: &str) -> bool {
    const EXTRA: &str = "~!@$%^&*_-+=<>.?/";
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if !first.is_ascii_digit() => {}
        _ => return false,
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || EXTRA.contains(c))
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.smtlib_name())
    }
}
