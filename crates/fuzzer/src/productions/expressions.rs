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

//! Expression productions.

use crate::combinators::{FuzzContext, ap, either, guard_value, many, one_of, opt, pick};
use crate::identifiers::fuzz_identifier_name;
use crate::productions::bindings::{fuzz_assignment_target, fuzz_simple_assignment_target};
use crate::productions::functions::{
    fuzz_arrow_expression, fuzz_class_expression, fuzz_function_expression,
    fuzz_method_definition,
};
use crate::productions::literals::{
    fuzz_identifier_expression, fuzz_leaf_expression, fuzz_property_name, fuzz_template_element,
};
use esfuzz_ast::{
    ArrayExpression, AssignmentExpression, AwaitExpression, BinaryExpression, BinaryOperator,
    CallExpression, CompoundAssignmentExpression, CompoundAssignmentOperator,
    ComputedMemberExpression, ConditionalExpression, DataProperty, Expression, ExpressionSuper,
    MethodDefinition, NewExpression, ObjectExpression, ObjectProperty, ShorthandProperty,
    SpreadElement, SpreadElementExpression, StaticMemberExpression, Super, TemplateExpression,
    TemplateExpressionElement, UnaryExpression, UnaryOperator, UpdateExpression, UpdateOperator,
    YieldExpression, YieldGeneratorExpression,
};
use crate::state::FuzzerState;
use lazy_static::lazy_static;
use std::cell::Cell;
use strum::IntoEnumIterator;

lazy_static! {
    static ref BINARY_OPERATORS: Vec<BinaryOperator> = BinaryOperator::iter().collect();
    static ref COMPOUND_ASSIGNMENT_OPERATORS: Vec<CompoundAssignmentOperator> =
        CompoundAssignmentOperator::iter().collect();
    static ref UNARY_OPERATORS: Vec<UnaryOperator> = UnaryOperator::iter().collect();
    static ref UPDATE_OPERATORS: Vec<UpdateOperator> = UpdateOperator::iter().collect();
}

pub fn fuzz_expression(st: &FuzzerState) -> Expression {
    if st.too_deep() {
        return fuzz_leaf_expression(st);
    }
    let common: [fn(&FuzzerState) -> Expression; 17] = [
        fuzz_leaf_expression,
        |f| Expression::ArrayExpression(fuzz_array_expression(f)),
        |f| Expression::ArrowExpression(fuzz_arrow_expression(f)),
        |f| Expression::AssignmentExpression(fuzz_assignment_expression(f)),
        |f| Expression::BinaryExpression(fuzz_binary_expression(f)),
        |f| Expression::CallExpression(fuzz_call_expression(f)),
        |f| Expression::ClassExpression(fuzz_class_expression(f)),
        |f| Expression::CompoundAssignmentExpression(fuzz_compound_assignment_expression(f)),
        |f| Expression::ComputedMemberExpression(fuzz_computed_member_expression(f)),
        |f| Expression::ConditionalExpression(fuzz_conditional_expression(f)),
        |f| Expression::FunctionExpression(fuzz_function_expression(f)),
        |f| Expression::NewExpression(fuzz_new_expression(f)),
        |f| Expression::ObjectExpression(fuzz_object_expression(f)),
        |f| Expression::StaticMemberExpression(fuzz_static_member_expression(f)),
        |f| Expression::TemplateExpression(fuzz_template_expression(f)),
        |f| Expression::UnaryExpression(fuzz_unary_expression(f)),
        |f| Expression::UpdateExpression(fuzz_update_expression(f)),
    ];
    let mut alternatives = common.to_vec();
    if st.allow_await_expr {
        alternatives.push(|f| {
            ap(f, |f| {
                Expression::AwaitExpression(AwaitExpression {
                    expression: Box::new(fuzz_expression(f)),
                })
            })
        });
    }
    if st.allow_yield_expr {
        alternatives.push(|f| {
            ap(f, |f| {
                Expression::YieldExpression(YieldExpression {
                    expression: opt(f, |f| Box::new(fuzz_expression(f))),
                })
            })
        });
        alternatives.push(|f| {
            ap(f, |f| {
                Expression::YieldGeneratorExpression(YieldGeneratorExpression {
                    expression: Box::new(fuzz_expression(f)),
                })
            })
        });
    }
    pick(st, &alternatives)
}

/// The object of a member access: `super` inside methods, otherwise an expression.
pub fn fuzz_expression_super_for_member(st: &FuzzerState) -> ExpressionSuper {
    if st.allow_super_prop && st.rng().next_int(4) == 0 {
        ExpressionSuper::Super(Super {})
    } else {
        ExpressionSuper::Expression(Box::new(fuzz_expression(st)))
    }
}

/// A callee: `super` only inside derived constructors.
fn fuzz_expression_super_for_call(st: &FuzzerState) -> ExpressionSuper {
    if st.allow_super_call && st.rng().next_int(4) == 0 {
        ExpressionSuper::Super(Super {})
    } else {
        ExpressionSuper::Expression(Box::new(fuzz_expression(st)))
    }
}

fn fuzz_spread_element_expression(st: &FuzzerState) -> SpreadElementExpression {
    if st.too_deep() {
        return SpreadElementExpression::Expression(fuzz_expression(st));
    }
    either(
        st,
        |f| SpreadElementExpression::Expression(fuzz_expression(f)),
        |f| {
            ap(f, |f| {
                SpreadElementExpression::SpreadElement(SpreadElement {
                    expression: Box::new(fuzz_expression(f)),
                })
            })
        },
    )
}

fn fuzz_arguments(st: &FuzzerState) -> Vec<SpreadElementExpression> {
    many(st, fuzz_spread_element_expression)
}

pub fn fuzz_array_expression(st: &FuzzerState) -> ArrayExpression {
    ap(st, |f| ArrayExpression {
        elements: many(f, |f| opt(f, fuzz_spread_element_expression)),
    })
}

fn fuzz_assignment_expression(st: &FuzzerState) -> AssignmentExpression {
    ap(st, |f| AssignmentExpression {
        binding: fuzz_assignment_target(f),
        expression: Box::new(fuzz_expression(f)),
    })
}

fn fuzz_binary_expression(st: &FuzzerState) -> BinaryExpression {
    ap(st, |f| BinaryExpression {
        left: Box::new(fuzz_expression(f)),
        operator: one_of(f, &BINARY_OPERATORS[..]),
        right: Box::new(fuzz_expression(f)),
    })
}

fn fuzz_call_expression(st: &FuzzerState) -> CallExpression {
    ap(st, |f| CallExpression {
        callee: fuzz_expression_super_for_call(f),
        arguments: fuzz_arguments(f),
    })
}

fn fuzz_compound_assignment_expression(st: &FuzzerState) -> CompoundAssignmentExpression {
    ap(st, |f| CompoundAssignmentExpression {
        binding: fuzz_simple_assignment_target(f),
        operator: one_of(f, &COMPOUND_ASSIGNMENT_OPERATORS[..]),
        expression: Box::new(fuzz_expression(f)),
    })
}

fn fuzz_computed_member_expression(st: &FuzzerState) -> ComputedMemberExpression {
    ap(st, |f| ComputedMemberExpression {
        object: fuzz_expression_super_for_member(f),
        expression: Box::new(fuzz_expression(f)),
    })
}

fn fuzz_conditional_expression(st: &FuzzerState) -> ConditionalExpression {
    ap(st, |f| ConditionalExpression {
        test: Box::new(fuzz_expression(f)),
        consequent: Box::new(fuzz_expression(f)),
        alternate: Box::new(fuzz_expression(f)),
    })
}

fn fuzz_new_expression(st: &FuzzerState) -> NewExpression {
    ap(st, |f| NewExpression {
        callee: Box::new(fuzz_expression(f)),
        arguments: fuzz_arguments(f),
    })
}

fn fuzz_static_member_expression(st: &FuzzerState) -> StaticMemberExpression {
    ap(st, |f| StaticMemberExpression {
        object: fuzz_expression_super_for_member(f),
        property: fuzz_identifier_name(f),
    })
}

/// Elements and substitutions alternate, starting and ending with an element.
pub fn fuzz_template_expression(st: &FuzzerState) -> TemplateExpression {
    ap(st, |f| {
        let tag = opt(f, |f| Box::new(fuzz_expression(f)));
        let substitutions = many(f, fuzz_expression);
        let mut elements = vec![TemplateExpressionElement::TemplateElement(
            fuzz_template_element(f),
        )];
        for expression in substitutions {
            elements.push(TemplateExpressionElement::Expression(expression));
            elements.push(TemplateExpressionElement::TemplateElement(
                fuzz_template_element(f),
            ));
        }
        TemplateExpression { tag, elements }
    })
}

/// Strict code cannot `delete` a bare identifier; such draws are regenerated.
pub fn fuzz_unary_expression(st: &FuzzerState) -> UnaryExpression {
    ap(st, |f| {
        guard_value(
            f,
            |f| UnaryExpression {
                operator: one_of(f, &UNARY_OPERATORS[..]),
                operand: Box::new(fuzz_expression(f)),
            },
            |e| {
                f.strict
                    && e.operator == UnaryOperator::Delete
                    && matches!(*e.operand, Expression::IdentifierExpression(_))
            },
        )
    })
}

fn fuzz_update_expression(st: &FuzzerState) -> UpdateExpression {
    ap(st, |f| UpdateExpression {
        is_prefix: f.rng().next_boolean(),
        operator: one_of(f, &UPDATE_OPERATORS[..]),
        operand: fuzz_simple_assignment_target(f),
    })
}

// -----------------------------------------------------------------------------
// Object literals
// -----------------------------------------------------------------------------

fn fuzz_shorthand_property(st: &FuzzerState) -> ObjectProperty {
    ObjectProperty::ShorthandProperty(ShorthandProperty {
        name: fuzz_identifier_expression(st),
    })
}

fn fuzz_object_property(st: &FuzzerState) -> ObjectProperty {
    if st.too_deep() {
        return fuzz_shorthand_property(st);
    }
    let properties: [fn(&FuzzerState) -> ObjectProperty; 3] = [
        |f| {
            ap(f, |f| {
                ObjectProperty::DataProperty(DataProperty {
                    name: fuzz_property_name(f),
                    expression: Box::new(fuzz_expression(f)),
                })
            })
        },
        fuzz_shorthand_property,
        |f| {
            let name = fuzz_property_name(f);
            match fuzz_method_definition(&f.with_super(false, true), name) {
                MethodDefinition::Method(m) => ObjectProperty::Method(m),
                MethodDefinition::Getter(g) => ObjectProperty::Getter(g),
                MethodDefinition::Setter(s) => ObjectProperty::Setter(s),
            }
        },
    ];
    pick(st, &properties)
}

/// At most one property is keyed `__proto__` by a static name or a shorthand. Computed keys
/// are not checked.
pub fn fuzz_object_expression(st: &FuzzerState) -> ObjectExpression {
    ap(st, |f| ObjectExpression {
        properties: fuzz_unique_proto_properties(f, fuzz_object_property),
    })
}

fn fuzz_unique_proto_properties<G>(st: &FuzzerState, generator: G) -> Vec<ObjectProperty>
where
    G: Fn(&FuzzerState) -> ObjectProperty,
{
    let has_proto = Cell::new(false);
    many(st, |f| {
        let property = guard_value(f, &generator, |p| has_proto.get() && p.is_proto_property());
        if property.is_proto_property() {
            has_proto.set(true);
        }
        property
    })
}
