//! Enumeration of the forms of an expression that are equal to it by the associative and
//! distributive laws.
//!
//! Every chain of `+`/`-` or `*`/`/` is regrouped in all possible ways, and terms that share a
//! factor are rewritten with that factor taken out, e.g. `a*b+a*c` also gives `a*(b+c)`. Forms
//! are printed with explicit grouping, so `(a+b)+c` and `a+(b+c)` are told apart.

use arith_error::Error;
use arith_parser::ast::{BinOp, Expr, UnaryOp};
use crate::{
    error::{ChainTooLong, TooManyVariants},
    terms::{build_product, build_sum, chain_factors, chain_terms},
};
use log::debug;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Limits applied while enumerating equivalent forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumerationLimits {
    /// The maximum number of operands in a single chain that is regrouped.
    pub max_chain_len: usize,

    /// The maximum number of forms built over the whole enumeration.
    pub max_variants: usize,
}

impl Default for EnumerationLimits {
    fn default() -> Self {
        Self {
            max_chain_len: 10,
            max_variants: 100_000,
        }
    }
}

impl EnumerationLimits {
    /// Sets the maximum number of operands in a chain.
    pub fn with_max_chain_len(mut self, max_chain_len: usize) -> Self {
        self.max_chain_len = max_chain_len;
        self
    }

    /// Sets the maximum number of forms built.
    pub fn with_max_variants(mut self, max_variants: usize) -> Self {
        self.max_variants = max_variants;
        self
    }
}

/// Returns every way to combine the items, in order, with the given operator: one tree for each
/// full binary tree with `items.len()` leaves.
///
/// There are `Catalan(n-1)` such trees for `n` items.
pub fn parenthesizations(items: &[Expr], op: BinOp) -> Vec<Expr> {
    match items {
        [] => Vec::new(),
        [item] => vec![item.clone()],
        _ => (1..items.len())
            .flat_map(|split| {
                let lefts = parenthesizations(&items[..split], op);
                let rights = parenthesizations(&items[split..], op);
                lefts.into_iter()
                    .flat_map(move |lhs| {
                        rights.clone()
                            .into_iter()
                            .map(move |rhs| Expr::binary(op, lhs.clone(), rhs))
                    })
                    .collect::<Vec<_>>()
            })
            .collect(),
    }
}

/// Returns the printed forms of every expression equivalent to the given one by regrouping its
/// chains and factoring out shared factors, using the default [`EnumerationLimits`].
pub fn equivalents(expr: &Expr) -> Result<BTreeSet<String>, Error> {
    equivalents_with(expr, EnumerationLimits::default())
}

/// Returns the printed forms of every expression equivalent to the given one by regrouping its
/// chains and factoring out shared factors.
pub fn equivalents_with(expr: &Expr, limits: EnumerationLimits) -> Result<BTreeSet<String>, Error> {
    let mut enumerator = Enumerator { limits, produced: 0 };
    let variants = enumerator.variants(expr)?;
    debug!("built {} variant(s) in total, {} at the root", enumerator.produced, variants.len());
    Ok(variants.iter().map(|variant| variant.grouped().to_string()).collect())
}

/// Keeps track of the work done during an enumeration.
struct Enumerator {
    limits: EnumerationLimits,

    /// The number of variants built so far.
    produced: usize,
}

impl Enumerator {
    /// Records that `count` more variants are about to be built.
    fn produce(&mut self, count: usize) -> Result<(), Error> {
        self.produced = self.produced.saturating_add(count);
        if self.produced > self.limits.max_variants {
            return Err(Error::new(Vec::new(), TooManyVariants { limit: self.limits.max_variants }));
        }
        Ok(())
    }

    fn check_chain(&self, len: usize) -> Result<(), Error> {
        if len > self.limits.max_chain_len {
            return Err(Error::new(Vec::new(), ChainTooLong { len, limit: self.limits.max_chain_len }));
        }
        Ok(())
    }

    /// Returns the variants of the given expression, including the expression itself.
    fn variants(&mut self, expr: &Expr) -> Result<Vec<Expr>, Error> {
        match expr {
            Expr::Literal(_) => Ok(vec![expr.clone()]),
            Expr::Unary(op, operand) => Ok(self.variants(operand)?
                .into_iter()
                .map(|variant| Expr::Unary(*op, Box::new(variant)))
                .collect()),
            Expr::Call(name, arg) => Ok(self.variants(arg)?
                .into_iter()
                .map(|variant| Expr::call(name.clone(), variant))
                .collect()),
            Expr::Binary(op, lhs, rhs) => {
                let (chain, chain_op) = match op {
                    BinOp::Add | BinOp::Sub => (chain_terms(expr), BinOp::Add),
                    BinOp::Mul | BinOp::Div => (chain_factors(expr), BinOp::Mul),
                };
                self.check_chain(chain.len())?;

                let lefts = self.variants(lhs)?;
                let rights = self.variants(rhs)?;
                self.produce(lefts.len().saturating_mul(rights.len()))?;
                let mut variants = Vec::with_capacity(lefts.len() * rights.len());
                for left in &lefts {
                    for right in &rights {
                        variants.push(Expr::binary(*op, left.clone(), right.clone()));
                    }
                }

                if chain.len() >= 3 {
                    let regrouped = parenthesizations(&chain, chain_op);
                    self.produce(regrouped.len())?;
                    variants.extend(regrouped);
                }

                if chain_op == BinOp::Add {
                    let factored = factorings(&chain);
                    self.produce(factored.len())?;
                    variants.extend(factored);
                }

                Ok(variants)
            },
        }
    }
}

/// Removes a negation from the term, returning whether there was one.
fn strip_negation(term: &Expr) -> (bool, &Expr) {
    match term {
        Expr::Unary(UnaryOp::Neg, operand) => (true, &**operand),
        _ => (false, term),
    }
}

/// Divides the term by one of its factors, keeping its sign.
fn quotient(term: &Expr, factor: &Expr) -> Expr {
    let (negative, unsigned) = strip_negation(term);
    let mut factors = chain_factors(unsigned);
    if let Some(index) = factors.iter().position(|candidate| candidate == factor) {
        factors.remove(index);
    }

    let quotient = build_product(factors);
    if negative {
        Expr::neg(quotient)
    } else {
        quotient
    }
}

/// For each factor shared by at least two of the terms, returns the sum with that factor taken out
/// of those terms: `a*b+c+a*d` gives `c+a*(b+d)`.
fn factorings(terms: &[Expr]) -> Vec<Expr> {
    // factors in order of first appearance, with the indices of the terms they appear in
    let mut shared: Vec<(Expr, Vec<usize>)> = Vec::new();
    for (index, term) in terms.iter().enumerate() {
        let (_, unsigned) = strip_negation(term);
        for factor in chain_factors(unsigned) {
            match shared.iter_mut().find(|(candidate, _)| *candidate == factor) {
                Some((_, indices)) => {
                    if indices.last() != Some(&index) {
                        indices.push(index);
                    }
                },
                None => shared.push((factor, vec![index])),
            }
        }
    }

    shared.into_iter()
        .filter(|(factor, indices)| indices.len() >= 2 && !factor.is_literal("1"))
        .map(|(factor, indices)| {
            let quotients = indices.iter().map(|&index| quotient(&terms[index], &factor));
            let factored = Expr::binary(BinOp::Mul, factor.clone(), build_sum(quotients));
            let untouched = terms.iter()
                .enumerate()
                .filter(|(index, _)| !indices.contains(index))
                .map(|(_, term)| term.clone());
            build_sum(untouched.chain(std::iter::once(factored)))
        })
        .collect()
}
