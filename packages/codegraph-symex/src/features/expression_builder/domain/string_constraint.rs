//! String constraint builders over SMT terms
//!
//! Character classes and patterns compile to SMT-LIB regular languages;
//! `StrTerm` predicates produce boolean terms ready for `SolverSession::assert`.
//!
//! ```text
//! let id = StrTerm::var("user_id");
//! let shape = Pattern::literal("u-").then(CharClass::digit().plus());
//! session.assert(&id.matches(&shape)).await?;
//! session.assert(&id.len_le(8)).await?;
//! ```

use std::ops::BitOr;

use crate::features::smt::{terms, Sort, Term};

/// Set of single characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharClass(Term);

impl CharClass {
    pub fn digit() -> Self {
        Self::range('0', '9')
    }

    pub fn lower() -> Self {
        Self::range('a', 'z')
    }

    pub fn upper() -> Self {
        Self::range('A', 'Z')
    }

    pub fn alpha() -> Self {
        Self::lower() | Self::upper()
    }

    pub fn alnum() -> Self {
        Self::alpha() | Self::digit()
    }

    /// Characters from `lo` to `hi` inclusive
    pub fn range(lo: char, hi: char) -> Self {
        CharClass(terms::re_range(lo, hi))
    }

    /// Exactly the characters of `chars`; empty input matches nothing
    pub fn any_of(chars: &str) -> Self {
        chars
            .chars()
            .map(|c| CharClass(terms::str_to_re(terms::string_literal(&c.to_string()))))
            .reduce(|a, b| a | b)
            .unwrap_or_else(|| CharClass(terms::re_none()))
    }

    /// Any single character
    pub fn any() -> Self {
        CharClass(terms::re_all_char())
    }

    pub fn as_term(&self) -> &Term {
        &self.0
    }
}

impl BitOr for CharClass {
    type Output = CharClass;

    fn bitor(self, rhs: CharClass) -> CharClass {
        CharClass(terms::re_union(self.0, rhs.0))
    }
}

/// Regular language over strings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(Term);

impl Pattern {
    /// The string `text`, verbatim
    pub fn literal(text: &str) -> Self {
        Pattern(terms::str_to_re(terms::string_literal(text)))
    }

    /// Any string, including the empty one
    pub fn anything() -> Self {
        Pattern(terms::re_star(terms::re_all_char()))
    }

    pub fn then(self, next: impl Into<Pattern>) -> Self {
        Pattern(terms::re_concat(self.0, next.into().0))
    }

    pub fn star(self) -> Self {
        Pattern(terms::re_star(self.0))
    }

    pub fn plus(self) -> Self {
        Pattern(terms::re_plus(self.0))
    }

    pub fn optional(self) -> Self {
        Pattern(terms::re_opt(self.0))
    }

    pub fn as_term(&self) -> &Term {
        &self.0
    }

    pub fn into_term(self) -> Term {
        self.0
    }
}

impl From<CharClass> for Pattern {
    fn from(class: CharClass) -> Self {
        Pattern(class.0)
    }
}

impl CharClass {
    pub fn then(self, next: impl Into<Pattern>) -> Pattern {
        Pattern::from(self).then(next)
    }

    pub fn star(self) -> Pattern {
        Pattern::from(self).star()
    }

    pub fn plus(self) -> Pattern {
        Pattern::from(self).plus()
    }

    pub fn optional(self) -> Pattern {
        Pattern::from(self).optional()
    }
}

impl<R: Into<Pattern>> BitOr<R> for Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: R) -> Pattern {
        Pattern(terms::re_union(self.0, rhs.into().0))
    }
}

/// String-sorted term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrTerm(Term);

impl StrTerm {
    /// Fresh string constant named `name`
    pub fn var(name: impl Into<String>) -> Self {
        StrTerm(terms::declare_const(name, Sort::String))
    }

    pub fn literal(text: &str) -> Self {
        StrTerm(terms::string_literal(text))
    }

    pub fn concat(self, rhs: impl Into<StrTerm>) -> Self {
        StrTerm(terms::str_concat(self.0, rhs.into().0))
    }

    /// Integer-sorted length
    pub fn len(&self) -> Term {
        terms::str_len(self.0.clone())
    }

    pub fn matches(&self, pattern: &Pattern) -> Term {
        terms::str_in_re(self.0.clone(), pattern.0.clone())
    }

    pub fn contains(&self, needle: impl Into<StrTerm>) -> Term {
        terms::str_contains(self.0.clone(), needle.into().0)
    }

    pub fn starts_with(&self, prefix: impl Into<StrTerm>) -> Term {
        terms::str_prefix_of(prefix.into().0, self.0.clone())
    }

    pub fn ends_with(&self, suffix: impl Into<StrTerm>) -> Term {
        terms::str_suffix_of(suffix.into().0, self.0.clone())
    }

    pub fn len_eq(&self, n: usize) -> Term {
        terms::eq(self.len(), length(n))
    }

    pub fn len_le(&self, n: usize) -> Term {
        terms::int_le(self.len(), length(n))
    }

    pub fn len_ge(&self, n: usize) -> Term {
        terms::int_ge(self.len(), length(n))
    }

    pub fn len_lt(&self, n: usize) -> Term {
        terms::int_lt(self.len(), length(n))
    }

    pub fn len_gt(&self, n: usize) -> Term {
        terms::int_gt(self.len(), length(n))
    }

    /// `lo <= len <= hi`
    pub fn len_between(&self, lo: usize, hi: usize) -> Term {
        terms::and(self.len_ge(lo), self.len_le(hi))
    }

    pub fn as_term(&self) -> &Term {
        &self.0
    }

    pub fn into_term(self) -> Term {
        self.0
    }
}

fn length(n: usize) -> Term {
    terms::numeral(n as i128)
}

impl From<&str> for StrTerm {
    fn from(text: &str) -> Self {
        StrTerm::literal(text)
    }
}

impl From<StrTerm> for Term {
    fn from(term: StrTerm) -> Self {
        term.0
    }
}
