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

//! Functions, arrows, methods and classes.
//!
//! Every function-like production resolves its directive prologue first, since a
//! `"use strict"` there governs the name and parameters as well as the body. A prologue on a
//! function whose parameters turn out non-simple has its `"use strict"` blanked, and the body
//! is then generated with whatever strictness is left.

use crate::combinators::{ap, guard_value, many, opt};
use crate::productions::bindings::{fuzz_formal_parameters, fuzz_parameter};
use crate::productions::expressions::fuzz_expression;
use crate::productions::literals::{
    fuzz_binding_identifier, fuzz_directives, fuzz_property_name, strip_use_strict,
};
use crate::productions::statements::fuzz_statement_list;
use crate::state::{FunctionKind, FuzzerState};
use esfuzz_ast::{
    ArrowBody, ArrowExpression, Binding, ClassDeclaration, ClassElement, ClassExpression,
    Directive, Expression, FormalParameters, FunctionBody, FunctionDeclaration,
    FunctionExpression, Getter, Method, MethodDefinition, Parameter, PropertyName, Setter,
    StaticPropertyName,
};
use std::cell::Cell;

/// The context of a function's own code. Arrows additionally keep an enclosing ban on
/// `await` as an identifier.
fn function_state(st: &FuzzerState, kind: FunctionKind) -> FuzzerState {
    let mut f = st.enter_function(kind);
    if kind.is_arrow {
        f.allow_await_identifier &= st.allow_await_identifier;
    }
    f
}

/// Parameter initializers are outside the body, so `yield` and `await` expressions are off.
fn params_state(st: &FuzzerState, kind: FunctionKind) -> FuzzerState {
    function_state(st, kind)
        .disable_yield_expr()
        .disable_await_expr()
}

/// The context a function's own name is generated in.
fn name_state(st: &FuzzerState, strict: bool) -> FuzzerState {
    if strict { st.enter_strict() } else { st.clone() }
}

fn fuzz_function_body(st: &FuzzerState, directives: Vec<Directive>) -> FunctionBody {
    ap(st, |f| FunctionBody {
        directives,
        statements: fuzz_statement_list(f),
    })
}

/// Parameters and body for a function with the given prologue.
fn finish_function<P>(
    st: &FuzzerState,
    kind: FunctionKind,
    mut directives: Vec<Directive>,
    params: impl FnOnce(&FuzzerState) -> P,
    is_simple: impl FnOnce(&P) -> bool,
) -> (P, FunctionBody) {
    let strict = directives.iter().any(Directive::is_use_strict);
    let params = params(&params_state(
        st,
        FunctionKind {
            has_strict_directive: strict,
            ..kind
        },
    ));
    if !is_simple(&params) {
        strip_use_strict(&mut directives);
    }
    let strict = directives.iter().any(Directive::is_use_strict);
    let body_st = function_state(
        st,
        FunctionKind {
            has_strict_directive: strict,
            ..kind
        },
    );
    (params, fuzz_function_body(&body_st, directives))
}

fn is_simple_parameter(param: &Parameter) -> bool {
    matches!(param, Parameter::Binding(Binding::BindingIdentifier(_)))
}

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

fn fuzz_function_declaration_with(
    st: &FuzzerState,
    is_async: bool,
    is_generator: bool,
) -> FunctionDeclaration {
    ap(st, |f| {
        let (directives, strict) = fuzz_directives(f);
        let name = fuzz_binding_identifier(&name_state(f, strict));
        let kind = FunctionKind {
            is_async,
            is_generator,
            ..Default::default()
        };
        let (params, body) = finish_function(
            f,
            kind,
            directives,
            fuzz_formal_parameters,
            FormalParameters::is_simple,
        );
        FunctionDeclaration {
            is_async,
            is_generator,
            name,
            params,
            body,
        }
    })
}

pub fn fuzz_function_declaration(st: &FuzzerState) -> FunctionDeclaration {
    let is_async = st.rng().next_boolean();
    let is_generator = st.rng().next_boolean();
    fuzz_function_declaration_with(st, is_async, is_generator)
}

/// Neither async nor a generator, as sloppy-mode `if` and label bodies require.
pub fn fuzz_plain_function_declaration(st: &FuzzerState) -> FunctionDeclaration {
    fuzz_function_declaration_with(st, false, false)
}

pub fn fuzz_function_expression(st: &FuzzerState) -> FunctionExpression {
    ap(st, |f| {
        let is_async = f.rng().next_boolean();
        let is_generator = f.rng().next_boolean();
        let (directives, strict) = fuzz_directives(f);
        // The name of a function expression is bound inside it.
        let mut name_st = name_state(f, strict);
        name_st.allow_yield_identifier &= !is_generator;
        name_st.allow_await_identifier &= !is_async;
        let name = opt(&name_st, fuzz_binding_identifier);
        let kind = FunctionKind {
            is_async,
            is_generator,
            ..Default::default()
        };
        let (params, body) = finish_function(
            f,
            kind,
            directives,
            fuzz_formal_parameters,
            FormalParameters::is_simple,
        );
        FunctionExpression {
            is_async,
            is_generator,
            name,
            params,
            body,
        }
    })
}

pub fn fuzz_arrow_expression(st: &FuzzerState) -> ArrowExpression {
    ap(st, |f| {
        let is_async = f.rng().next_boolean();
        let kind = FunctionKind {
            is_async,
            is_arrow: true,
            ..Default::default()
        };
        if f.rng().next_boolean() {
            let params = fuzz_formal_parameters(&params_state(f, kind));
            let body = fuzz_expression(&function_state(f, kind));
            ArrowExpression {
                is_async,
                params,
                body: ArrowBody::Expression(Box::new(body)),
            }
        } else {
            let (directives, _) = fuzz_directives(f);
            let (params, body) = finish_function(
                f,
                kind,
                directives,
                fuzz_formal_parameters,
                FormalParameters::is_simple,
            );
            ArrowExpression {
                is_async,
                params,
                body: ArrowBody::FunctionBody(body),
            }
        }
    })
}

// -----------------------------------------------------------------------------
// Methods
// -----------------------------------------------------------------------------

const METHOD: FunctionKind = FunctionKind {
    is_generator: false,
    is_async: false,
    is_arrow: false,
    is_method: true,
    has_strict_directive: false,
};

pub fn fuzz_method(
    st: &FuzzerState,
    name: PropertyName,
    is_async: bool,
    is_generator: bool,
) -> Method {
    ap(st, |f| {
        let (directives, _) = fuzz_directives(f);
        let kind = FunctionKind {
            is_async,
            is_generator,
            ..METHOD
        };
        let (params, body) = finish_function(
            f,
            kind,
            directives,
            fuzz_formal_parameters,
            FormalParameters::is_simple,
        );
        Method {
            is_async,
            is_generator,
            name,
            params,
            body,
        }
    })
}

pub fn fuzz_getter(st: &FuzzerState, name: PropertyName) -> Getter {
    ap(st, |f| {
        let (directives, _) = fuzz_directives(f);
        let ((), body) = finish_function(f, METHOD, directives, |_| (), |_| true);
        Getter { name, body }
    })
}

pub fn fuzz_setter(st: &FuzzerState, name: PropertyName) -> Setter {
    ap(st, |f| {
        let (directives, _) = fuzz_directives(f);
        let (param, body) =
            finish_function(f, METHOD, directives, fuzz_parameter, is_simple_parameter);
        Setter { name, param, body }
    })
}

/// A method, getter or setter called `name`. Callers decide what `super` may do.
pub fn fuzz_method_definition(st: &FuzzerState, name: PropertyName) -> MethodDefinition {
    match st.rng().next_int(3) {
        0 => {
            let is_async = st.rng().next_boolean();
            let is_generator = st.rng().next_boolean();
            MethodDefinition::Method(fuzz_method(st, name, is_async, is_generator))
        }
        1 => MethodDefinition::Getter(fuzz_getter(st, name)),
        _ => MethodDefinition::Setter(fuzz_setter(st, name)),
    }
}

// -----------------------------------------------------------------------------
// Classes
// -----------------------------------------------------------------------------

fn constructor_name() -> PropertyName {
    PropertyName::StaticPropertyName(StaticPropertyName {
        value: "constructor".to_string(),
    })
}

/// `super()` is only callable from the constructor of a class with a heritage.
fn fuzz_constructor(st: &FuzzerState, derived: bool) -> ClassElement {
    let method = fuzz_method(&st.with_super(derived, true), constructor_name(), false, false);
    ClassElement {
        is_static: false,
        method: MethodDefinition::Method(method),
    }
}

/// Any element but the constructor. Static members are never named `prototype`, and
/// nothing but the constructor is named `constructor`.
fn fuzz_class_member(st: &FuzzerState) -> ClassElement {
    let is_static = st.rng().next_boolean();
    let name = guard_value(st, fuzz_property_name, |name| match name.static_value() {
        Some("constructor") => true,
        Some("prototype") => is_static,
        _ => false,
    });
    ClassElement {
        is_static,
        method: fuzz_method_definition(&st.with_super(false, true), name),
    }
}

/// Class elements with at most one constructor.
pub fn fuzz_class_elements(st: &FuzzerState, derived: bool) -> Vec<ClassElement> {
    let has_constructor = Cell::new(false);
    many(st, |f| {
        ap(f, |f| {
            if !has_constructor.get() && f.rng().next_int(4) == 0 {
                has_constructor.set(true);
                fuzz_constructor(f, derived)
            } else {
                fuzz_class_member(f)
            }
        })
    })
}

/// Heritage and body, both strict.
fn fuzz_class_tail(st: &FuzzerState) -> (Option<Box<Expression>>, Vec<ClassElement>) {
    let body = st.enter_class_body();
    let super_class = opt(&body, |f| Box::new(fuzz_expression(f)));
    let elements = fuzz_class_elements(&body, super_class.is_some());
    (super_class, elements)
}

pub fn fuzz_class_declaration(st: &FuzzerState) -> ClassDeclaration {
    ap(st, |f| {
        let name = fuzz_binding_identifier(&f.enter_strict());
        let (super_class, elements) = fuzz_class_tail(f);
        ClassDeclaration {
            name,
            super_class,
            elements,
        }
    })
}

pub fn fuzz_class_expression(st: &FuzzerState) -> ClassExpression {
    ap(st, |f| {
        let name = opt(&f.enter_strict(), fuzz_binding_identifier);
        let (super_class, elements) = fuzz_class_tail(f);
        ClassExpression {
            name,
            super_class,
            elements,
        }
    })
}
