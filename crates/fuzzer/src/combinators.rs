// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Generic generator combinators shared by the grammar and pattern engines.
//!
//! A generator here is just a function from a context to a value. The combinators take the
//! context and the generator(s) directly and run them, rather than building closures.

use crate::errors::FuzzError;
use crate::random::Random;
use tracing::{trace, warn};

/// Upper bound (inclusive) on the length of a repeated production.
pub const MANY_BOUND: usize = 5;

/// How many times a rejected value is regenerated before the last one is kept anyway.
pub const RETRY_LIMIT: usize = 10_000;

/// A generator alternative in a dispatch table that needs to capture.
pub type Alt<'a, C, T> = &'a dyn Fn(&C) -> T;

/// What a combinator needs from a context: randomness and a recursion bound.
pub trait FuzzContext: Clone {
    fn rng(&self) -> &Random;
    fn depth(&self) -> usize;
    fn max_depth(&self) -> usize;

    /// A copy of this context one level further down.
    fn go_deeper(&self) -> Self;

    fn too_deep(&self) -> bool {
        self.depth() >= self.max_depth()
    }
}

/// Between zero and `bound` values from `gen`. Empty once too deep.
pub fn many_n<C, T, F>(bound: usize, ctx: &C, mut generator: F) -> Vec<T>
where
    C: FuzzContext,
    F: FnMut(&C) -> T,
{
    if ctx.too_deep() {
        return vec![];
    }
    let count = ctx.rng().next_int(bound + 1);
    (0..count).map(|_| generator(ctx)).collect()
}

pub fn many<C, T, F>(ctx: &C, generator: F) -> Vec<T>
where
    C: FuzzContext,
    F: FnMut(&C) -> T,
{
    many_n(MANY_BOUND, ctx, generator)
}

/// Like [`many`], but never empty.
pub fn many1<C, T, F>(ctx: &C, mut generator: F) -> Vec<T>
where
    C: FuzzContext,
    F: FnMut(&C) -> T,
{
    let mut result = many(ctx, &mut generator);
    if result.is_empty() {
        result.push(generator(ctx));
    }
    result
}

pub fn either<C: FuzzContext, T>(ctx: &C, a: impl FnOnce(&C) -> T, b: impl FnOnce(&C) -> T) -> T {
    if ctx.rng().next_boolean() {
        a(ctx)
    } else {
        b(ctx)
    }
}

/// `None` half of the time, and always once too deep.
pub fn opt<C, T, F>(ctx: &C, generator: F) -> Option<T>
where
    C: FuzzContext,
    F: FnOnce(&C) -> T,
{
    if ctx.too_deep() || ctx.rng().next_boolean() {
        None
    } else {
        Some(generator(ctx))
    }
}

/// Uniform pick among literal values. `values` must not be empty.
pub fn one_of<C: FuzzContext, T: Clone>(ctx: &C, values: &[T]) -> T {
    debug_assert!(!values.is_empty());
    values[ctx.rng().next_int(values.len())].clone()
}

/// Uniform pick among generator alternatives.
pub fn choose<C, T, F>(ctx: &C, alternatives: &[F]) -> Result<T, FuzzError>
where
    C: FuzzContext,
    F: Fn(&C) -> T,
{
    if alternatives.is_empty() {
        return Err(FuzzError::Arity);
    }
    Ok(pick(ctx, alternatives))
}

/// [`choose`] for tables that are non-empty by construction.
pub fn pick<C, T, F>(ctx: &C, alternatives: &[F]) -> T
where
    C: FuzzContext,
    F: Fn(&C) -> T,
{
    debug_assert!(!alternatives.is_empty());
    match alternatives {
        [only] => only(ctx),
        [a, b] => either(ctx, a, b),
        _ => alternatives[ctx.rng().next_int(alternatives.len())](ctx),
    }
}

pub fn guard_depth<C: FuzzContext, T>(
    ctx: &C,
    fallback: impl FnOnce(&C) -> T,
    normal: impl FnOnce(&C) -> T,
) -> T {
    if ctx.too_deep() {
        fallback(ctx)
    } else {
        normal(ctx)
    }
}

/// Build one node from fields generated one level deeper.
pub fn ap<C: FuzzContext, T>(ctx: &C, build: impl FnOnce(&C) -> T) -> T {
    build(&ctx.go_deeper())
}

/// Regenerate until `reject` is false, at most [`RETRY_LIMIT`] times.
pub fn guard_value<C, T, G, R>(ctx: &C, mut generator: G, reject: R) -> T
where
    C: FuzzContext,
    G: FnMut(&C) -> T,
    R: Fn(&T) -> bool,
{
    let mut value = generator(ctx);
    let mut attempts = 1;
    while reject(&value) {
        if attempts >= RETRY_LIMIT {
            warn!(attempts, "retry budget exhausted; keeping last generated value");
            break;
        }
        trace!(attempts, "regenerating rejected value");
        value = generator(ctx);
        attempts += 1;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[derive(Clone, Debug)]
    struct Ctx {
        rng: Random,
        depth: usize,
        max_depth: usize,
    }

    impl Ctx {
        fn new(seed: u64, max_depth: usize) -> Self {
            Self {
                rng: Random::seeded(seed),
                depth: 0,
                max_depth,
            }
        }
    }

    impl FuzzContext for Ctx {
        fn rng(&self) -> &Random {
            &self.rng
        }
        fn depth(&self) -> usize {
            self.depth
        }
        fn max_depth(&self) -> usize {
            self.max_depth
        }
        fn go_deeper(&self) -> Self {
            Self {
                depth: self.depth + 1,
                ..self.clone()
            }
        }
    }

    #[test]
    fn many_is_bounded() {
        let ctx = Ctx::new(7, 3);
        for _ in 0..200 {
            let v = many(&ctx, |_| 1);
            assert!(v.len() <= MANY_BOUND);
            let v = many1(&ctx, |_| 1);
            assert!(!v.is_empty() && v.len() <= MANY_BOUND);
        }
    }

    #[test]
    fn many_empty_when_too_deep() {
        let ctx = Ctx::new(1, 0);
        assert!(many(&ctx, |_| 1).is_empty());
        assert_eq!(many1(&ctx, |_| 1), vec![1]);
        assert_eq!(opt(&ctx, |_| 1), None);
    }

    #[test]
    fn choose_arity() {
        let ctx = Ctx::new(1, 3);
        let none: [Alt<Ctx, i32>; 0] = [];
        assert_eq!(choose(&ctx, &none), Err(FuzzError::Arity));
        for _ in 0..20 {
            assert_eq!(choose(&ctx, &[&|_: &Ctx| 42]), Ok(42));
        }
    }

    #[test_case(2; "two alternatives")]
    #[test_case(3; "three alternatives")]
    #[test_case(6; "six alternatives")]
    fn pick_reaches_every_alternative(n: usize) {
        let ctx = Ctx::new(99, 3);
        let gens: Vec<Box<dyn Fn(&Ctx) -> usize>> =
            (0..n).map(|i| Box::new(move |_: &Ctx| i) as Box<dyn Fn(&Ctx) -> usize>).collect();
        let alts: Vec<Alt<Ctx, usize>> = gens.iter().map(|g| g.as_ref()).collect();
        let mut seen = vec![false; n];
        for _ in 0..500 {
            seen[pick(&ctx, &alts)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn ap_goes_one_level_deeper() {
        let ctx = Ctx::new(1, 3);
        assert_eq!(ap(&ctx, |c| c.depth), 1);
        assert_eq!(guard_depth(&ctx, |_| "leaf", |_| "node"), "node");
        let deeper = |c: &Ctx| c.clone();
        let deep = ap(&ap(&ap(&ctx, deeper), deeper), deeper);
        assert_eq!(guard_depth(&deep, |_| "leaf", |_| "node"), "leaf");
    }

    #[test]
    fn guard_value_rejects() {
        let ctx = Ctx::new(5, 3);
        for _ in 0..50 {
            let v = guard_value(&ctx, |c| c.rng.next_int(10), |v| *v < 5);
            assert!(v >= 5);
        }
        // An unsatisfiable predicate still terminates.
        assert_eq!(guard_value(&ctx, |_| 0, |_| true), 0);
    }
}
