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

//! Statement productions.
//!
//! Dispatch first collects the [`StatementKind`]s legal in the current context, then runs
//! the production for the one drawn. Productions that own a sub-statement decide what that
//! sub-statement may declare: statement lists take anything, `if` bodies take a plain
//! function in sloppy code, and every other body takes no declaration but `var`.

use crate::combinators::{FuzzContext, ap, either, many, one_of, opt};
use crate::identifiers::fuzz_label;
use crate::productions::bindings::{
    fuzz_assignment_target, fuzz_binding, fuzz_variable_declaration,
    fuzz_variable_declaration_of_kind,
};
use crate::productions::expressions::fuzz_expression;
use crate::productions::functions::{
    fuzz_class_declaration, fuzz_function_declaration, fuzz_plain_function_declaration,
};
use crate::state::FuzzerState;
use esfuzz_ast::{
    Block, BlockStatement, BreakStatement, CatchClause, ContinueStatement, DebuggerStatement,
    DoWhileStatement, EmptyStatement, ExpressionStatement, ForInOfBinding, ForInStatement,
    ForInit, ForOfStatement, ForStatement, IfStatement, LabeledStatement, ReturnStatement,
    Statement, SwitchCase, SwitchDefault, SwitchStatement, SwitchStatementWithDefault,
    ThrowStatement, TryCatchStatement, TryFinallyStatement, VariableDeclarationKind,
    VariableDeclarationStatement, WhileStatement, WithStatement,
};
use strum::{Display, EnumIter, IntoEnumIterator};

const DECLARATION_KINDS: [VariableDeclarationKind; 3] = [
    VariableDeclarationKind::Var,
    VariableDeclarationKind::Let,
    VariableDeclarationKind::Const,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum StatementKind {
    Block,
    Break,
    ClassDeclaration,
    Continue,
    Debugger,
    DoWhile,
    Empty,
    Expression,
    ForIn,
    ForOf,
    For,
    FunctionDeclaration,
    If,
    Labeled,
    Return,
    Switch,
    SwitchWithDefault,
    Throw,
    TryCatch,
    TryFinally,
    VariableDeclaration,
    While,
    With,
}

pub const LOOP_KINDS: [StatementKind; 5] = [
    StatementKind::DoWhile,
    StatementKind::ForIn,
    StatementKind::ForOf,
    StatementKind::For,
    StatementKind::While,
];

impl StatementKind {
    pub fn is_iteration(self) -> bool {
        LOOP_KINDS.contains(&self)
    }

    /// Kinds with no sub-statement or sub-expression, the only ones left once too deep.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            StatementKind::Break
                | StatementKind::Continue
                | StatementKind::Debugger
                | StatementKind::Empty
        )
    }

    pub fn is_eligible(self, st: &FuzzerState) -> bool {
        match self {
            StatementKind::Break => st.allow_break(),
            StatementKind::Continue => st.in_loop,
            StatementKind::ClassDeclaration => st.allow_proper_declarations,
            StatementKind::FunctionDeclaration => {
                st.allow_proper_declarations || st.allow_function_declarations
            }
            StatementKind::Return => st.allow_return,
            StatementKind::With => !st.strict,
            _ => true,
        }
    }
}

/// The context of a body that may not hold declarations other than `var`.
fn sub_statement_state(st: &FuzzerState) -> FuzzerState {
    st.with_declarations(false, false)
}

fn loop_body_state(st: &FuzzerState) -> FuzzerState {
    sub_statement_state(&st.enter_loop())
}

pub fn fuzz_statement(st: &FuzzerState) -> Statement {
    if st.too_deep() {
        return fuzz_leaf_statement(st);
    }
    let kinds: Vec<StatementKind> = StatementKind::iter()
        .filter(|k| k.is_eligible(st))
        .collect();
    fuzz_statement_of_kind(st, one_of(st, &kinds))
}

/// An empty or debugger statement, or a `break`/`continue` where one is legal.
pub fn fuzz_leaf_statement(st: &FuzzerState) -> Statement {
    let kinds: Vec<StatementKind> = StatementKind::iter()
        .filter(|k| k.is_leaf() && k.is_eligible(st))
        .collect();
    fuzz_statement_of_kind(st, one_of(st, &kinds))
}

/// A statement list: a block, function body, script, or case clause.
pub fn fuzz_statement_list(st: &FuzzerState) -> Vec<Statement> {
    let f = st.with_declarations(true, true).enable_missing_else();
    many(&f, fuzz_statement)
}

pub fn fuzz_statement_of_kind(st: &FuzzerState, kind: StatementKind) -> Statement {
    match kind {
        StatementKind::Block => Statement::BlockStatement(ap(st, |f| BlockStatement {
            block: fuzz_block(f),
        })),
        StatementKind::Break => Statement::BreakStatement(fuzz_break_statement(st)),
        StatementKind::ClassDeclaration => Statement::ClassDeclaration(fuzz_class_declaration(st)),
        StatementKind::Continue => Statement::ContinueStatement(fuzz_continue_statement(st)),
        StatementKind::Debugger => Statement::DebuggerStatement(DebuggerStatement {}),
        StatementKind::DoWhile => Statement::DoWhileStatement(ap(st, |f| DoWhileStatement {
            body: Box::new(fuzz_statement(&loop_body_state(f).enable_missing_else())),
            test: Box::new(fuzz_expression(f)),
        })),
        StatementKind::Empty => Statement::EmptyStatement(EmptyStatement {}),
        StatementKind::Expression => {
            Statement::ExpressionStatement(ap(st, |f| ExpressionStatement {
                expression: Box::new(fuzz_expression(f)),
            }))
        }
        StatementKind::ForIn => Statement::ForInStatement(ap(st, |f| ForInStatement {
            left: fuzz_for_in_of_binding(f),
            right: Box::new(fuzz_expression(f)),
            body: Box::new(fuzz_statement(&loop_body_state(f))),
        })),
        StatementKind::ForOf => Statement::ForOfStatement(ap(st, |f| ForOfStatement {
            left: fuzz_for_in_of_binding(f),
            right: Box::new(fuzz_expression(f)),
            body: Box::new(fuzz_statement(&loop_body_state(f))),
        })),
        StatementKind::For => Statement::ForStatement(fuzz_for_statement(st)),
        StatementKind::FunctionDeclaration => {
            if st.allow_proper_declarations {
                Statement::FunctionDeclaration(fuzz_function_declaration(st))
            } else {
                Statement::FunctionDeclaration(fuzz_plain_function_declaration(st))
            }
        }
        StatementKind::If => Statement::IfStatement(fuzz_if_statement(st)),
        StatementKind::Labeled => Statement::LabeledStatement(fuzz_labeled_statement(st)),
        StatementKind::Return => Statement::ReturnStatement(ap(st, |f| ReturnStatement {
            expression: opt(f, |f| Box::new(fuzz_expression(f))),
        })),
        StatementKind::Switch => Statement::SwitchStatement(ap(st, |f| SwitchStatement {
            discriminant: Box::new(fuzz_expression(f)),
            cases: many(&f.enter_switch(), fuzz_switch_case),
        })),
        StatementKind::SwitchWithDefault => {
            Statement::SwitchStatementWithDefault(fuzz_switch_statement_with_default(st))
        }
        StatementKind::Throw => Statement::ThrowStatement(ap(st, |f| ThrowStatement {
            expression: Box::new(fuzz_expression(f)),
        })),
        StatementKind::TryCatch => Statement::TryCatchStatement(ap(st, |f| TryCatchStatement {
            body: fuzz_block(f),
            catch_clause: fuzz_catch_clause(f),
        })),
        StatementKind::TryFinally => {
            Statement::TryFinallyStatement(ap(st, |f| TryFinallyStatement {
                body: fuzz_block(f),
                catch_clause: opt(f, fuzz_catch_clause),
                finalizer: fuzz_block(f),
            }))
        }
        StatementKind::VariableDeclaration => {
            Statement::VariableDeclarationStatement(ap(st, |f| VariableDeclarationStatement {
                declaration: fuzz_variable_declaration(f),
            }))
        }
        StatementKind::While => Statement::WhileStatement(ap(st, |f| WhileStatement {
            test: Box::new(fuzz_expression(f)),
            body: Box::new(fuzz_statement(&loop_body_state(f))),
        })),
        StatementKind::With => Statement::WithStatement(ap(st, |f| WithStatement {
            object: Box::new(fuzz_expression(f)),
            body: Box::new(fuzz_statement(&sub_statement_state(f))),
        })),
    }
}

pub fn fuzz_block(st: &FuzzerState) -> Block {
    ap(st, |f| Block {
        statements: fuzz_statement_list(f),
    })
}

fn fuzz_catch_clause(st: &FuzzerState) -> CatchClause {
    ap(st, |f| CatchClause {
        binding: fuzz_binding(f),
        body: fuzz_block(f),
    })
}

fn fuzz_switch_case(st: &FuzzerState) -> SwitchCase {
    ap(st, |f| SwitchCase {
        test: Box::new(fuzz_expression(f)),
        consequent: fuzz_statement_list(f),
    })
}

fn fuzz_switch_statement_with_default(st: &FuzzerState) -> SwitchStatementWithDefault {
    ap(st, |f| {
        let discriminant = Box::new(fuzz_expression(f));
        let cases = f.enter_switch();
        SwitchStatementWithDefault {
            discriminant,
            pre_default_cases: many(&cases, fuzz_switch_case),
            default_case: ap(&cases, |c| SwitchDefault {
                consequent: fuzz_statement_list(c),
            }),
            post_default_cases: many(&cases, fuzz_switch_case),
        }
    })
}

/// Unlabelled only inside a loop or switch; otherwise the label of an enclosing statement.
fn fuzz_break_statement(st: &FuzzerState) -> BreakStatement {
    let unlabelled_ok = st.in_loop || st.in_switch;
    let label = if st.labels.is_empty() || (unlabelled_ok && st.rng().next_boolean()) {
        None
    } else {
        st.labels.get(st.rng().next_int(st.labels.len())).cloned()
    };
    BreakStatement { label }
}

/// Only inside a loop, and only naming labels that sit on loops.
fn fuzz_continue_statement(st: &FuzzerState) -> ContinueStatement {
    let label = if st.loop_labels.is_empty() || st.rng().next_boolean() {
        None
    } else {
        st.loop_labels
            .get(st.rng().next_int(st.loop_labels.len()))
            .cloned()
    };
    ContinueStatement { label }
}

/// A declaration of any kind with one uninitialized declarator, or an assignment target.
fn fuzz_for_in_of_binding(st: &FuzzerState) -> ForInOfBinding {
    let head = st.enter_for_in_of_head();
    either(
        &head,
        |f| {
            let kind = one_of(f, &DECLARATION_KINDS);
            ForInOfBinding::VariableDeclaration(fuzz_variable_declaration_of_kind(f, kind))
        },
        |f| ForInOfBinding::AssignmentTarget(fuzz_assignment_target(f)),
    )
}

fn fuzz_for_statement(st: &FuzzerState) -> ForStatement {
    ap(st, |f| {
        let init = opt(f, |f| {
            either(
                f,
                |f| {
                    let kind = one_of(f, &DECLARATION_KINDS);
                    ForInit::VariableDeclaration(fuzz_variable_declaration_of_kind(f, kind))
                },
                |f| ForInit::Expression(Box::new(fuzz_expression(f))),
            )
        });
        ForStatement {
            init,
            test: opt(f, |f| Box::new(fuzz_expression(f))),
            update: opt(f, |f| Box::new(fuzz_expression(f))),
            body: Box::new(fuzz_statement(&loop_body_state(f))),
        }
    })
}

/// An `if` with an `else` keeps its consequent from ending in an `if` without one, which
/// would take the `else` for itself.
fn fuzz_if_statement(st: &FuzzerState) -> IfStatement {
    ap(st, |f| {
        let body = f.with_declarations(false, !f.strict);
        let test = Box::new(fuzz_expression(f));
        if !f.allow_missing_else || f.rng().next_boolean() {
            IfStatement {
                test,
                consequent: Box::new(fuzz_statement(&body.disable_missing_else())),
                alternate: Some(Box::new(fuzz_statement(&body))),
            }
        } else {
            IfStatement {
                test,
                consequent: Box::new(fuzz_statement(&body)),
                alternate: None,
            }
        }
    })
}

/// The body is either a loop, whose label `continue` may then name, or anything else. A
/// labelled function is allowed only in a sloppy statement list.
fn fuzz_labeled_statement(st: &FuzzerState) -> LabeledStatement {
    ap(st, |f| {
        let label = fuzz_label(f);
        let body = if f.rng().next_int(3) == 0 {
            let inner = sub_statement_state(&f.add_label(&label, true));
            fuzz_statement_of_kind(&inner, one_of(&inner, &LOOP_KINDS))
        } else {
            let labelled_function = !f.strict && f.allow_proper_declarations;
            let inner = f
                .add_label(&label, false)
                .with_declarations(false, labelled_function);
            fuzz_statement(&inner)
        };
        LabeledStatement {
            label,
            body: Box::new(body),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Random;
    use crate::state::FunctionKind;
    use esfuzz_ast::walk::{collect_nodes, node_type};
    use serde_json::Value;
    use test_case::test_case;

    #[test_case(false, false ; "top level")]
    #[test_case(true, false ; "in a loop")]
    #[test_case(false, true ; "in a switch")]
    fn too_deep_yields_leaves(in_loop: bool, in_switch: bool) {
        let mut st = FuzzerState::new(0, Random::seeded(3));
        st.in_loop = in_loop;
        st.in_switch = in_switch;
        for _ in 0..100 {
            match fuzz_statement(&st) {
                Statement::EmptyStatement(_) | Statement::DebuggerStatement(_) => {}
                Statement::BreakStatement(b) => {
                    assert!(in_loop || in_switch);
                    assert_eq!(b.label, None);
                }
                Statement::ContinueStatement(c) => {
                    assert!(in_loop);
                    assert_eq!(c.label, None);
                }
                other => panic!("not a leaf: {other:?}"),
            }
        }
    }

    #[test]
    fn sub_statements_hold_no_lexical_declarations() {
        let st = sub_statement_state(&FuzzerState::with_seed(9));
        for _ in 0..300 {
            match fuzz_statement(&st) {
                Statement::ClassDeclaration(_) | Statement::FunctionDeclaration(_) => {
                    panic!("declaration in a sub-statement position")
                }
                Statement::VariableDeclarationStatement(v) => {
                    assert_eq!(v.declaration.kind, VariableDeclarationKind::Var)
                }
                _ => {}
            }
        }
    }

    #[test]
    fn return_only_in_functions() {
        let st = FuzzerState::new(4, Random::seeded(2));
        let kinds: Vec<_> = StatementKind::iter().filter(|k| k.is_eligible(&st)).collect();
        assert!(!kinds.contains(&StatementKind::Return));
        let body = st.enter_function(FunctionKind::default());
        assert!(StatementKind::Return.is_eligible(&body));
    }

    #[test]
    fn with_only_in_sloppy_code() {
        let st = FuzzerState::with_seed(2);
        assert!(StatementKind::With.is_eligible(&st));
        assert!(!StatementKind::With.is_eligible(&st.enter_strict()));
    }

    /// Every `continue` names a label on an enclosing loop, and every `break` an enclosing
    /// label.
    #[test]
    fn jumps_name_enclosing_labels() {
        fn walk(value: &Value, labels: &[(String, bool)]) {
            match node_type(value) {
                Some("LabeledStatement") => {
                    let label = value["label"].as_str().unwrap().to_string();
                    let is_loop = matches!(
                        node_type(&value["body"]),
                        Some(
                            "DoWhileStatement"
                                | "ForInStatement"
                                | "ForOfStatement"
                                | "ForStatement"
                                | "WhileStatement"
                        )
                    );
                    let mut inner = labels.to_vec();
                    inner.push((label, is_loop));
                    return walk(&value["body"], &inner);
                }
                Some("BreakStatement") => {
                    if let Some(label) = value["label"].as_str() {
                        assert!(labels.iter().any(|(l, _)| l == label));
                    }
                }
                Some("ContinueStatement") => {
                    if let Some(label) = value["label"].as_str() {
                        assert!(labels.iter().any(|(l, is_loop)| l == label && *is_loop));
                    }
                }
                Some(
                    "FunctionDeclaration" | "FunctionExpression" | "ArrowExpression" | "Method"
                    | "Getter" | "Setter",
                ) => return walk_children(value, &[]),
                _ => {}
            }
            walk_children(value, labels)
        }
        fn walk_children(value: &Value, labels: &[(String, bool)]) {
            match value {
                Value::Object(map) => map.values().for_each(|v| walk(v, labels)),
                Value::Array(items) => items.iter().for_each(|v| walk(v, labels)),
                _ => {}
            }
        }
        for seed in 0..100 {
            let st = FuzzerState::new(7, Random::seeded(seed));
            let statements = fuzz_statement_list(&st);
            let value = serde_json::to_value(&statements).unwrap();
            walk(&value, &[]);
        }
    }

    #[test]
    fn labelled_loops_are_generated() {
        let found = (0..200).any(|seed| {
            let st = FuzzerState::new(5, Random::seeded(seed));
            let value =
                serde_json::to_value(fuzz_statement_of_kind(&st, StatementKind::Labeled)).unwrap();
            !collect_nodes(&value, "LabeledStatement").is_empty()
        });
        assert!(found);
    }
}
