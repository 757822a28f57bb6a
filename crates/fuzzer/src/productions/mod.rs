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

//! One generator per grammar production, from whole programs down to literals.
//!
//! Every production takes the grammar context and returns one node. Straight-line nodes
//! build their fields one level deeper via [`ap`]; recursive dispatchers fall back to a
//! leaf once the context is too deep.

mod bindings;
mod expressions;
mod functions;
mod literals;
mod modules;
mod statements;

pub use bindings::{
    fuzz_assignment_target, fuzz_binding, fuzz_formal_parameters, fuzz_parameter,
    fuzz_simple_assignment_target, fuzz_variable_declaration, fuzz_variable_declaration_of_kind,
};
pub use expressions::{
    fuzz_array_expression, fuzz_expression, fuzz_object_expression, fuzz_template_expression,
    fuzz_unary_expression,
};
pub use functions::{
    fuzz_arrow_expression, fuzz_class_declaration, fuzz_class_elements, fuzz_class_expression,
    fuzz_function_declaration, fuzz_function_expression, fuzz_getter, fuzz_method,
    fuzz_method_definition, fuzz_setter,
};
pub use literals::{
    fuzz_binding_identifier, fuzz_directives, fuzz_identifier_expression, fuzz_leaf_expression,
    fuzz_number, fuzz_property_name, fuzz_regexp_literal, fuzz_string, fuzz_template_element,
};
pub use modules::fuzz_module_item;
pub use statements::{
    StatementKind, fuzz_block, fuzz_leaf_statement, fuzz_statement, fuzz_statement_list,
    fuzz_statement_of_kind,
};

use crate::combinators::{FuzzContext, ap, either, many};
use crate::state::FuzzerState;
use esfuzz_ast::{Module, Program, Script};
use tracing::debug;

/// A script or a module, with even odds.
pub fn fuzz_program(st: &FuzzerState) -> Program {
    either(
        st,
        |f| Program::Script(fuzz_script(f)),
        |f| Program::Module(fuzz_module(f)),
    )
}

/// A script. A `"use strict"` directive makes the statements strict.
pub fn fuzz_script(st: &FuzzerState) -> Script {
    debug!(depth = st.depth(), max_depth = st.max_depth(), "generating script");
    ap(st, |f| {
        let (directives, strict) = fuzz_directives(f);
        let body = if strict { f.enter_strict() } else { f.clone() };
        Script {
            directives,
            statements: fuzz_statement_list(&body),
        }
    })
}

/// A module: strict, with `await` reserved and imports and exports among its items.
pub fn fuzz_module(st: &FuzzerState) -> Module {
    debug!(depth = st.depth(), max_depth = st.max_depth(), "generating module");
    ap(&st.enter_module(), |f| {
        let (directives, _) = fuzz_directives(f);
        let items = many(
            &f.with_declarations(true, true).enable_missing_else(),
            fuzz_module_item,
        );
        Module { directives, items }
    })
}
