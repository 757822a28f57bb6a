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

//! Module items: imports and exports.

use crate::combinators::{FuzzContext, ap, many, opt, pick};
use crate::identifiers::fuzz_identifier_name;
use crate::productions::bindings::fuzz_variable_declaration;
use crate::productions::expressions::fuzz_expression;
use crate::productions::functions::{fuzz_class_declaration, fuzz_function_declaration};
use crate::productions::literals::{
    fuzz_binding_identifier, fuzz_identifier_expression, fuzz_module_specifier,
};
use crate::productions::statements::{fuzz_leaf_statement, fuzz_statement};
use crate::state::FuzzerState;
use esfuzz_ast::{
    Export, ExportAllFrom, ExportDeclaration, ExportDefault, ExportDefaultBody, ExportFrom,
    ExportFromSpecifier, ExportLocalSpecifier, ExportLocals, Import, ImportNamespace,
    ImportSpecifier, ModuleItem,
};

fn fuzz_import(st: &FuzzerState) -> Import {
    ap(st, |f| Import {
        default_binding: opt(f, fuzz_binding_identifier),
        named_imports: many(f, |f| ImportSpecifier {
            name: opt(f, fuzz_identifier_name),
            binding: fuzz_binding_identifier(f),
        }),
        module_specifier: fuzz_module_specifier(f),
    })
}

fn fuzz_import_namespace(st: &FuzzerState) -> ImportNamespace {
    ap(st, |f| ImportNamespace {
        default_binding: opt(f, fuzz_binding_identifier),
        namespace_binding: fuzz_binding_identifier(f),
        module_specifier: fuzz_module_specifier(f),
    })
}

fn fuzz_export_from(st: &FuzzerState) -> ExportFrom {
    ap(st, |f| ExportFrom {
        named_exports: many(f, |f| ExportFromSpecifier {
            name: fuzz_identifier_name(f),
            exported_name: opt(f, fuzz_identifier_name),
        }),
        module_specifier: fuzz_module_specifier(f),
    })
}

fn fuzz_export_locals(st: &FuzzerState) -> ExportLocals {
    ap(st, |f| ExportLocals {
        named_exports: many(f, |f| ExportLocalSpecifier {
            name: fuzz_identifier_expression(f),
            exported_name: opt(f, fuzz_identifier_name),
        }),
    })
}

fn fuzz_export(st: &FuzzerState) -> Export {
    let declarations: [fn(&FuzzerState) -> ExportDeclaration; 3] = [
        |f| ExportDeclaration::FunctionDeclaration(fuzz_function_declaration(f)),
        |f| ExportDeclaration::ClassDeclaration(fuzz_class_declaration(f)),
        |f| ExportDeclaration::VariableDeclaration(fuzz_variable_declaration(f)),
    ];
    ap(st, |f| Export {
        declaration: pick(f, &declarations),
    })
}

fn fuzz_export_default(st: &FuzzerState) -> ExportDefault {
    let bodies: [fn(&FuzzerState) -> ExportDefaultBody; 3] = [
        |f| ExportDefaultBody::FunctionDeclaration(fuzz_function_declaration(f)),
        |f| ExportDefaultBody::ClassDeclaration(fuzz_class_declaration(f)),
        |f| ExportDefaultBody::Expression(fuzz_expression(f)),
    ];
    ap(st, |f| ExportDefault {
        body: pick(f, &bodies),
    })
}

/// Module items are generated in a module context, where statement-list declarations are
/// always allowed.
pub fn fuzz_module_item(st: &FuzzerState) -> ModuleItem {
    if st.too_deep() {
        return ModuleItem::Statement(fuzz_leaf_statement(st));
    }
    let items: [fn(&FuzzerState) -> ModuleItem; 8] = [
        |f| ModuleItem::Import(fuzz_import(f)),
        |f| ModuleItem::ImportNamespace(fuzz_import_namespace(f)),
        |f| {
            ModuleItem::ExportAllFrom(ap(f, |f| ExportAllFrom {
                module_specifier: fuzz_module_specifier(f),
            }))
        },
        |f| ModuleItem::ExportFrom(fuzz_export_from(f)),
        |f| ModuleItem::ExportLocals(fuzz_export_locals(f)),
        |f| ModuleItem::Export(fuzz_export(f)),
        |f| ModuleItem::ExportDefault(fuzz_export_default(f)),
        |f| ModuleItem::Statement(fuzz_statement(f)),
    ];
    pick(st, &items)
}
