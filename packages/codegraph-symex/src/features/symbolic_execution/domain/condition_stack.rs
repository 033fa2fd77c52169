//! Persistent stack of path constraints
//!
//! Singly linked, `Arc`-shared nodes: pushing never disturbs the states that
//! share the old stack, and merging stacks keeps their common suffix shared.

use rustc_hash::FxHashSet;
use std::sync::Arc;

use crate::features::smt::{terms, Term};

#[derive(Debug)]
struct Node {
    term: Term,
    next: Option<Arc<Node>>,
}

#[derive(Debug, Clone, Default)]
pub struct ConditionStack {
    head: Option<Arc<Node>>,
    len: usize,
}

impl ConditionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&self, term: Term) -> ConditionStack {
        ConditionStack {
            head: Some(Arc::new(Node {
                term,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> {
        std::iter::successors(self.head.as_ref(), |node| node.next.as_ref())
    }

    /// Terms from the bottom of the stack to the top
    pub fn terms(&self) -> Vec<Term> {
        let mut terms: Vec<_> = self.nodes().map(|n| n.term.clone()).collect();
        terms.reverse();
        terms
    }

    /// Everything on the stack as a single conjunction
    pub fn conjunction(&self) -> Term {
        terms::and_all(self.terms())
    }

    pub fn shares_storage(&self, other: &ConditionStack) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Union of several stacks.
    ///
    /// The longest stack is kept as is; nodes of the others that it does not
    /// already contain are pushed on top. Node identity decides membership,
    /// and a node's tail never changes, so the walk down each other stack
    /// stops at the first shared node.
    pub fn merge<'a, I>(stacks: I) -> ConditionStack
    where
        I: IntoIterator<Item = &'a ConditionStack>,
    {
        let stacks: Vec<&ConditionStack> = stacks.into_iter().collect();
        let Some(base) = stacks.iter().max_by_key(|s| s.len).copied() else {
            return ConditionStack::new();
        };

        let mut seen: FxHashSet<*const Node> = base.nodes().map(Arc::as_ptr).collect();
        let mut merged = base.clone();
        for stack in stacks {
            if stack.shares_storage(base) {
                continue;
            }
            let mut missing = Vec::new();
            for node in stack.nodes() {
                if !seen.insert(Arc::as_ptr(node)) {
                    break;
                }
                missing.push(node.term.clone());
            }
            for term in missing.into_iter().rev() {
                merged = merged.push(term);
            }
        }
        merged
    }
}
