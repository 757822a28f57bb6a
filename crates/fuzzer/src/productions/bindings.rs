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

//! Binding patterns, parameters, assignment targets and variable declarations.

use crate::combinators::{FuzzContext, ap, either, many, many1, one_of, opt, pick};
use crate::productions::expressions::{fuzz_expression, fuzz_expression_super_for_member};
use crate::productions::literals::{
    fuzz_assignment_target_identifier, fuzz_binding_identifier, fuzz_property_name,
};
use crate::identifiers::fuzz_identifier_name;
use crate::state::FuzzerState;
use esfuzz_ast::{
    ArrayAssignmentTarget, ArrayBinding, AssignmentTarget, AssignmentTargetMaybeDefault,
    AssignmentTargetProperty, AssignmentTargetPropertyIdentifier,
    AssignmentTargetPropertyProperty, AssignmentTargetWithDefault, Binding, BindingProperty,
    BindingPropertyIdentifier, BindingPropertyProperty, BindingWithDefault,
    ComputedMemberAssignmentTarget, FormalParameters, ObjectAssignmentTarget, ObjectBinding,
    Parameter, SimpleAssignmentTarget, StaticMemberAssignmentTarget, VariableDeclaration,
    VariableDeclarationKind, VariableDeclarator,
};

// -----------------------------------------------------------------------------
// Bindings
// -----------------------------------------------------------------------------

pub fn fuzz_binding(st: &FuzzerState) -> Binding {
    if st.too_deep() {
        return Binding::BindingIdentifier(fuzz_binding_identifier(st));
    }
    let bindings: [fn(&FuzzerState) -> Binding; 3] = [
        |f| Binding::BindingIdentifier(fuzz_binding_identifier(f)),
        |f| Binding::ArrayBinding(fuzz_array_binding(f)),
        |f| Binding::ObjectBinding(fuzz_object_binding(f)),
    ];
    pick(st, &bindings)
}

/// A binding, possibly with a default. Initializers in parameter lists never see the
/// function's own `yield`/`await`; callers pass a context that already says so.
pub fn fuzz_parameter(st: &FuzzerState) -> Parameter {
    if st.too_deep() {
        return Parameter::Binding(fuzz_binding(st));
    }
    either(
        st,
        |f| Parameter::Binding(fuzz_binding(f)),
        |f| {
            ap(f, |f| {
                Parameter::BindingWithDefault(BindingWithDefault {
                    binding: fuzz_binding(f),
                    init: Box::new(fuzz_expression(f)),
                })
            })
        },
    )
}

fn fuzz_array_binding(st: &FuzzerState) -> ArrayBinding {
    ap(st, |f| ArrayBinding {
        elements: many(f, |f| opt(f, fuzz_parameter)),
        rest: opt(f, |f| Box::new(fuzz_binding(f))),
    })
}

fn fuzz_binding_property(st: &FuzzerState) -> BindingProperty {
    either(
        st,
        |f| {
            ap(f, |f| {
                BindingProperty::BindingPropertyIdentifier(BindingPropertyIdentifier {
                    binding: fuzz_binding_identifier(f),
                    init: opt(f, |f| Box::new(fuzz_expression(f))),
                })
            })
        },
        |f| {
            ap(f, |f| {
                BindingProperty::BindingPropertyProperty(BindingPropertyProperty {
                    name: fuzz_property_name(f),
                    binding: fuzz_parameter(f),
                })
            })
        },
    )
}

fn fuzz_object_binding(st: &FuzzerState) -> ObjectBinding {
    ap(st, |f| ObjectBinding {
        properties: many(f, fuzz_binding_property),
    })
}

/// Callers enter the function first, with its `yield`/`await` expressions disabled.
pub fn fuzz_formal_parameters(st: &FuzzerState) -> FormalParameters {
    ap(st, |f| FormalParameters {
        items: many(f, fuzz_parameter),
        rest: opt(f, fuzz_binding),
    })
}

// -----------------------------------------------------------------------------
// Assignment targets
// -----------------------------------------------------------------------------

pub fn fuzz_simple_assignment_target(st: &FuzzerState) -> SimpleAssignmentTarget {
    if st.too_deep() {
        return SimpleAssignmentTarget::AssignmentTargetIdentifier(
            fuzz_assignment_target_identifier(st),
        );
    }
    let targets: [fn(&FuzzerState) -> SimpleAssignmentTarget; 3] = [
        |f| {
            SimpleAssignmentTarget::AssignmentTargetIdentifier(
                fuzz_assignment_target_identifier(f),
            )
        },
        |f| {
            ap(f, |f| {
                SimpleAssignmentTarget::StaticMemberAssignmentTarget(
                    StaticMemberAssignmentTarget {
                        object: fuzz_expression_super_for_member(f),
                        property: fuzz_identifier_name(f),
                    },
                )
            })
        },
        |f| {
            ap(f, |f| {
                SimpleAssignmentTarget::ComputedMemberAssignmentTarget(
                    ComputedMemberAssignmentTarget {
                        object: fuzz_expression_super_for_member(f),
                        expression: Box::new(fuzz_expression(f)),
                    },
                )
            })
        },
    ];
    pick(st, &targets)
}

pub fn fuzz_assignment_target(st: &FuzzerState) -> AssignmentTarget {
    if st.too_deep() {
        return AssignmentTarget::Simple(fuzz_simple_assignment_target(st));
    }
    let targets: [fn(&FuzzerState) -> AssignmentTarget; 3] = [
        |f| AssignmentTarget::Simple(fuzz_simple_assignment_target(f)),
        |f| AssignmentTarget::ArrayAssignmentTarget(fuzz_array_assignment_target(f)),
        |f| AssignmentTarget::ObjectAssignmentTarget(fuzz_object_assignment_target(f)),
    ];
    pick(st, &targets)
}

fn fuzz_assignment_target_maybe_default(st: &FuzzerState) -> AssignmentTargetMaybeDefault {
    if st.too_deep() {
        return AssignmentTargetMaybeDefault::AssignmentTarget(fuzz_assignment_target(st));
    }
    either(
        st,
        |f| AssignmentTargetMaybeDefault::AssignmentTarget(fuzz_assignment_target(f)),
        |f| {
            ap(f, |f| {
                AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(
                    AssignmentTargetWithDefault {
                        binding: fuzz_assignment_target(f),
                        init: Box::new(fuzz_expression(f)),
                    },
                )
            })
        },
    )
}

fn fuzz_array_assignment_target(st: &FuzzerState) -> ArrayAssignmentTarget {
    ap(st, |f| ArrayAssignmentTarget {
        elements: many(f, |f| opt(f, fuzz_assignment_target_maybe_default)),
        rest: opt(f, |f| Box::new(fuzz_assignment_target(f))),
    })
}

fn fuzz_assignment_target_property(st: &FuzzerState) -> AssignmentTargetProperty {
    either(
        st,
        |f| {
            ap(f, |f| {
                AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(
                    AssignmentTargetPropertyIdentifier {
                        binding: fuzz_assignment_target_identifier(f),
                        init: opt(f, |f| Box::new(fuzz_expression(f))),
                    },
                )
            })
        },
        |f| {
            ap(f, |f| {
                AssignmentTargetProperty::AssignmentTargetPropertyProperty(
                    AssignmentTargetPropertyProperty {
                        name: fuzz_property_name(f),
                        binding: fuzz_assignment_target_maybe_default(f),
                    },
                )
            })
        },
    )
}

fn fuzz_object_assignment_target(st: &FuzzerState) -> ObjectAssignmentTarget {
    ap(st, |f| ObjectAssignmentTarget {
        properties: many(f, fuzz_assignment_target_property),
    })
}

// -----------------------------------------------------------------------------
// Variable declarations
// -----------------------------------------------------------------------------

/// `let` and `const` need a position that takes lexical declarations.
pub fn fuzz_variable_declaration_kind(st: &FuzzerState) -> VariableDeclarationKind {
    if st.allow_proper_declarations || st.in_for_in_of_head {
        one_of(
            st,
            &[
                VariableDeclarationKind::Var,
                VariableDeclarationKind::Let,
                VariableDeclarationKind::Const,
            ],
        )
    } else {
        VariableDeclarationKind::Var
    }
}

fn fuzz_variable_declarator(st: &FuzzerState) -> VariableDeclarator {
    ap(st, |f| {
        let binding = fuzz_binding(f);
        // Outside for-in/of heads, patterns are only legal with an initializer.
        let needs_init =
            f.require_declarator_initializers || (binding.is_pattern() && !f.in_for_in_of_head);
        let init = if f.in_for_in_of_head {
            None
        } else if needs_init {
            Some(Box::new(fuzz_expression(f)))
        } else {
            opt(f, |f| Box::new(fuzz_expression(f)))
        };
        VariableDeclarator { binding, init }
    })
}

/// A declaration of `kind`. In a for-in/of head there is exactly one declarator and no
/// initializer.
pub fn fuzz_variable_declaration_of_kind(
    st: &FuzzerState,
    kind: VariableDeclarationKind,
) -> VariableDeclaration {
    ap(st, |f| {
        let f = f.with_decl_kind(Some(kind));
        let declarators = if f.in_for_in_of_head {
            vec![fuzz_variable_declarator(&f)]
        } else {
            many1(&f, fuzz_variable_declarator)
        };
        VariableDeclaration { kind, declarators }
    })
}

pub fn fuzz_variable_declaration(st: &FuzzerState) -> VariableDeclaration {
    let kind = fuzz_variable_declaration_kind(st);
    fuzz_variable_declaration_of_kind(st, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Random;

    #[test]
    fn const_declarators_have_initializers() {
        for seed in 0..50 {
            let st = FuzzerState::new(6, Random::seeded(seed));
            let decl = fuzz_variable_declaration_of_kind(&st, VariableDeclarationKind::Const);
            assert!(!decl.declarators.is_empty());
            assert!(decl.declarators.iter().all(|d| d.init.is_some()));
        }
    }

    #[test]
    fn pattern_declarators_have_initializers() {
        for seed in 0..50 {
            let st = FuzzerState::new(6, Random::seeded(seed));
            let decl = fuzz_variable_declaration_of_kind(&st, VariableDeclarationKind::Var);
            for d in &decl.declarators {
                assert!(!d.binding.is_pattern() || d.init.is_some());
            }
        }
    }

    #[test]
    fn for_in_of_heads_have_one_bare_declarator() {
        for seed in 0..50 {
            let st = FuzzerState::new(6, Random::seeded(seed)).enter_for_in_of_head();
            let decl = fuzz_variable_declaration_of_kind(&st, VariableDeclarationKind::Const);
            assert_eq!(decl.declarators.len(), 1);
            assert!(decl.declarators[0].init.is_none());
        }
    }

    #[test]
    fn lexical_bindings_are_never_let() {
        for seed in 0..50 {
            let st = FuzzerState::new(2, Random::seeded(seed));
            let decl = fuzz_variable_declaration_of_kind(&st, VariableDeclarationKind::Let);
            for d in &decl.declarators {
                if let Binding::BindingIdentifier(id) = &d.binding {
                    assert_ne!(id.name, "let");
                }
            }
        }
    }

    #[test]
    fn only_var_outside_statement_lists() {
        let st = FuzzerState::with_seed(1).with_declarations(false, false);
        for _ in 0..100 {
            assert_eq!(
                fuzz_variable_declaration_kind(&st),
                VariableDeclarationKind::Var
            );
        }
    }
}
