//! Named term builders
//!
//! One function per SMT-LIB operator. Builders fix the arity so they never
//! fail; argument sorts are taken from the operands and are not checked.
//! Only `and_all`/`or_all` simplify (neutral elements are dropped).

use super::{Function, Sort, Term};

fn unary(name: &str, a: Term, result: Sort) -> Term {
    let function = Function::builtin_unary(name, a.sort(), result);
    Term::apply_unchecked(function, vec![a])
}

fn binary(name: &str, a: Term, b: Term, result: Sort) -> Term {
    let function = Function::builtin_binary(name, [a.sort(), b.sort()], result);
    Term::apply_unchecked(function, vec![a, b])
}

/// Binary operator whose result sort is the sort of its left operand
fn closed(name: &str, a: Term, b: Term) -> Term {
    let sort = a.sort();
    binary(name, a, b, sort)
}

fn predicate(name: &str, a: Term, b: Term) -> Term {
    binary(name, a, b, Sort::Bool)
}

// ---------------------------------------------------------------------------
// Constants and symbols
// ---------------------------------------------------------------------------

pub fn bool_const(value: bool) -> Term {
    Term::Bool(value)
}

/// Fresh uninterpreted constant `name` of sort `sort`
pub fn declare_const(name: impl Into<String>, sort: Sort) -> Term {
    Term::apply_unchecked(Function::constant(name, sort), Vec::new())
}

pub fn bv_const(value: u128, width: u32) -> Term {
    Term::bitvec(value, width)
}

/// Integer numeral (negative values render as `(- n)`)
pub fn numeral(value: i128) -> Term {
    let name = if value < 0 {
        format!("(- {})", value.unsigned_abs())
    } else {
        value.to_string()
    };
    Term::apply_unchecked(Function::builtin_nullary(name, Sort::Int), Vec::new())
}

pub fn string_literal(value: &str) -> Term {
    let escaped = value.replace('"', "\"\"");
    Term::apply_unchecked(
        Function::builtin_nullary(format!("\"{}\"", escaped), Sort::String),
        Vec::new(),
    )
}

// ---------------------------------------------------------------------------
// Core (boolean) theory
// ---------------------------------------------------------------------------

pub fn not(a: Term) -> Term {
    unary("not", a, Sort::Bool)
}

pub fn and(a: Term, b: Term) -> Term {
    predicate("and", a, b)
}

pub fn or(a: Term, b: Term) -> Term {
    predicate("or", a, b)
}

pub fn implies(a: Term, b: Term) -> Term {
    predicate("=>", a, b)
}

pub fn eq(a: Term, b: Term) -> Term {
    predicate("=", a, b)
}

pub fn distinct(a: Term, b: Term) -> Term {
    predicate("distinct", a, b)
}

pub fn ite(condition: Term, then: Term, otherwise: Term) -> Term {
    let sort = then.sort();
    let function =
        Function::builtin_ternary("ite", [Sort::Bool, sort, otherwise.sort()], sort);
    Term::apply_unchecked(function, vec![condition, then, otherwise])
}

/// Conjunction of all terms; `true` when empty, `true` operands are skipped
pub fn and_all<I: IntoIterator<Item = Term>>(terms: I) -> Term {
    let mut acc: Option<Term> = None;
    for term in terms {
        if term.is_true() {
            continue;
        }
        acc = Some(match acc {
            None => term,
            Some(prev) => and(prev, term),
        });
    }
    acc.unwrap_or(Term::Bool(true))
}

/// Disjunction of all terms; `false` when empty, `false` operands are skipped
pub fn or_all<I: IntoIterator<Item = Term>>(terms: I) -> Term {
    let mut acc: Option<Term> = None;
    for term in terms {
        if term.is_false() {
            continue;
        }
        acc = Some(match acc {
            None => term,
            Some(prev) => or(prev, term),
        });
    }
    acc.unwrap_or(Term::Bool(false))
}

// ---------------------------------------------------------------------------
// Fixed-width bit-vectors
// ---------------------------------------------------------------------------

pub fn bvneg(a: Term) -> Term {
    let sort = a.sort();
    unary("bvneg", a, sort)
}

pub fn bvnot(a: Term) -> Term {
    let sort = a.sort();
    unary("bvnot", a, sort)
}

pub fn bvadd(a: Term, b: Term) -> Term {
    closed("bvadd", a, b)
}

pub fn bvsub(a: Term, b: Term) -> Term {
    closed("bvsub", a, b)
}

pub fn bvmul(a: Term, b: Term) -> Term {
    closed("bvmul", a, b)
}

pub fn bvudiv(a: Term, b: Term) -> Term {
    closed("bvudiv", a, b)
}

pub fn bvsdiv(a: Term, b: Term) -> Term {
    closed("bvsdiv", a, b)
}

pub fn bvurem(a: Term, b: Term) -> Term {
    closed("bvurem", a, b)
}

pub fn bvsrem(a: Term, b: Term) -> Term {
    closed("bvsrem", a, b)
}

pub fn bvand(a: Term, b: Term) -> Term {
    closed("bvand", a, b)
}

pub fn bvor(a: Term, b: Term) -> Term {
    closed("bvor", a, b)
}

pub fn bvxor(a: Term, b: Term) -> Term {
    closed("bvxor", a, b)
}

pub fn bvshl(a: Term, b: Term) -> Term {
    closed("bvshl", a, b)
}

pub fn bvlshr(a: Term, b: Term) -> Term {
    closed("bvlshr", a, b)
}

pub fn bvashr(a: Term, b: Term) -> Term {
    closed("bvashr", a, b)
}

pub fn bvult(a: Term, b: Term) -> Term {
    predicate("bvult", a, b)
}

pub fn bvule(a: Term, b: Term) -> Term {
    predicate("bvule", a, b)
}

pub fn bvugt(a: Term, b: Term) -> Term {
    predicate("bvugt", a, b)
}

pub fn bvuge(a: Term, b: Term) -> Term {
    predicate("bvuge", a, b)
}

pub fn bvslt(a: Term, b: Term) -> Term {
    predicate("bvslt", a, b)
}

pub fn bvsle(a: Term, b: Term) -> Term {
    predicate("bvsle", a, b)
}

pub fn bvsgt(a: Term, b: Term) -> Term {
    predicate("bvsgt", a, b)
}

pub fn bvsge(a: Term, b: Term) -> Term {
    predicate("bvsge", a, b)
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

pub fn int_add(a: Term, b: Term) -> Term {
    binary("+", a, b, Sort::Int)
}

pub fn int_le(a: Term, b: Term) -> Term {
    predicate("<=", a, b)
}

pub fn int_lt(a: Term, b: Term) -> Term {
    predicate("<", a, b)
}

pub fn int_ge(a: Term, b: Term) -> Term {
    predicate(">=", a, b)
}

pub fn int_gt(a: Term, b: Term) -> Term {
    predicate(">", a, b)
}

// ---------------------------------------------------------------------------
// Strings and regular languages
// ---------------------------------------------------------------------------

pub fn str_len(s: Term) -> Term {
    unary("str.len", s, Sort::Int)
}

pub fn str_concat(a: Term, b: Term) -> Term {
    binary("str.++", a, b, Sort::String)
}

/// `haystack` contains `needle`
pub fn str_contains(haystack: Term, needle: Term) -> Term {
    predicate("str.contains", haystack, needle)
}

/// `prefix` is a prefix of `s` (SMT-LIB argument order)
pub fn str_prefix_of(prefix: Term, s: Term) -> Term {
    predicate("str.prefixof", prefix, s)
}

pub fn str_suffix_of(suffix: Term, s: Term) -> Term {
    predicate("str.suffixof", suffix, s)
}

pub fn str_in_re(s: Term, re: Term) -> Term {
    predicate("str.in_re", s, re)
}

pub fn str_to_re(s: Term) -> Term {
    unary("str.to_re", s, Sort::RegLan)
}

/// Single characters between `lo` and `hi` inclusive
pub fn re_range(lo: char, hi: char) -> Term {
    binary(
        "re.range",
        string_literal(&lo.to_string()),
        string_literal(&hi.to_string()),
        Sort::RegLan,
    )
}

pub fn re_union(a: Term, b: Term) -> Term {
    binary("re.union", a, b, Sort::RegLan)
}

pub fn re_concat(a: Term, b: Term) -> Term {
    binary("re.++", a, b, Sort::RegLan)
}

pub fn re_star(re: Term) -> Term {
    unary("re.*", re, Sort::RegLan)
}

pub fn re_plus(re: Term) -> Term {
    unary("re.+", re, Sort::RegLan)
}

pub fn re_opt(re: Term) -> Term {
    unary("re.opt", re, Sort::RegLan)
}

pub fn re_all_char() -> Term {
    Term::apply_unchecked(
        Function::builtin_nullary("re.allchar", Sort::RegLan),
        Vec::new(),
    )
}

/// The empty language
pub fn re_none() -> Term {
    Term::apply_unchecked(Function::builtin_nullary("re.none", Sort::RegLan), Vec::new())
}
