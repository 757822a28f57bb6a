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

//! The tree produced by the generators.
//!
//! Every node kind is its own struct. When serialized, a node carries its kind name under a
//! `"type"` key, and the family/union enums serialize untagged, so the JSON form of a tree is
//! the same flat node-and-field shape an external code generator or validator consumes.

use crate::operators::{
    BinaryOperator, CompoundAssignmentOperator, UnaryOperator, UpdateOperator,
    VariableDeclarationKind,
};
use serde_derive::Serialize;

// =============================================================================
// Roots
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Program {
    Script(Script),
    Module(Module),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Script {
    pub directives: Vec<Directive>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Module {
    pub directives: Vec<Directive>,
    pub items: Vec<ModuleItem>,
}

/// A directive prologue entry. `raw_value` is emitted verbatim between quotes, so it must
/// already be a legal string literal body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Directive {
    pub raw_value: String,
}

impl Directive {
    pub fn is_use_strict(&self) -> bool {
        self.raw_value == "use strict"
    }
}

// =============================================================================
// Functions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct FunctionBody {
    pub directives: Vec<Directive>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct FormalParameters {
    pub items: Vec<Parameter>,
    pub rest: Option<Binding>,
}

impl FormalParameters {
    /// True when every parameter is a plain identifier with no default and there is no rest
    /// element. Only such lists may be paired with a `"use strict"` body.
    pub fn is_simple(&self) -> bool {
        self.rest.is_none()
            && self
                .items
                .iter()
                .all(|p| matches!(p, Parameter::Binding(Binding::BindingIdentifier(_))))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct FunctionDeclaration {
    pub is_async: bool,
    pub is_generator: bool,
    pub name: BindingIdentifier,
    pub params: FormalParameters,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct FunctionExpression {
    pub is_async: bool,
    pub is_generator: bool,
    pub name: Option<BindingIdentifier>,
    pub params: FormalParameters,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ArrowExpression {
    pub is_async: bool,
    pub params: FormalParameters,
    pub body: ArrowBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrowBody {
    FunctionBody(FunctionBody),
    Expression(Box<Expression>),
}

// =============================================================================
// Bindings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Binding {
    BindingIdentifier(BindingIdentifier),
    ArrayBinding(ArrayBinding),
    ObjectBinding(ObjectBinding),
}

impl Binding {
    pub fn is_pattern(&self) -> bool {
        !matches!(self, Binding::BindingIdentifier(_))
    }
}

/// A binding, optionally with a default initializer. Used for parameters, array binding
/// elements and the value side of object binding properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parameter {
    Binding(Binding),
    BindingWithDefault(BindingWithDefault),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct BindingIdentifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct BindingWithDefault {
    pub binding: Binding,
    pub init: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ArrayBinding {
    pub elements: Vec<Option<Parameter>>,
    pub rest: Option<Box<Binding>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ObjectBinding {
    pub properties: Vec<BindingProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindingProperty {
    BindingPropertyIdentifier(BindingPropertyIdentifier),
    BindingPropertyProperty(BindingPropertyProperty),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct BindingPropertyIdentifier {
    pub binding: BindingIdentifier,
    pub init: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct BindingPropertyProperty {
    pub name: PropertyName,
    pub binding: Parameter,
}

// =============================================================================
// Assignment targets
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssignmentTarget {
    Simple(SimpleAssignmentTarget),
    ArrayAssignmentTarget(ArrayAssignmentTarget),
    ObjectAssignmentTarget(ObjectAssignmentTarget),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimpleAssignmentTarget {
    AssignmentTargetIdentifier(AssignmentTargetIdentifier),
    StaticMemberAssignmentTarget(StaticMemberAssignmentTarget),
    ComputedMemberAssignmentTarget(ComputedMemberAssignmentTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct AssignmentTargetIdentifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct StaticMemberAssignmentTarget {
    pub object: ExpressionSuper,
    pub property: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ComputedMemberAssignmentTarget {
    pub object: ExpressionSuper,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssignmentTargetMaybeDefault {
    AssignmentTarget(AssignmentTarget),
    AssignmentTargetWithDefault(AssignmentTargetWithDefault),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct AssignmentTargetWithDefault {
    pub binding: AssignmentTarget,
    pub init: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ArrayAssignmentTarget {
    pub elements: Vec<Option<AssignmentTargetMaybeDefault>>,
    pub rest: Option<Box<AssignmentTarget>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ObjectAssignmentTarget {
    pub properties: Vec<AssignmentTargetProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssignmentTargetProperty {
    AssignmentTargetPropertyIdentifier(AssignmentTargetPropertyIdentifier),
    AssignmentTargetPropertyProperty(AssignmentTargetPropertyProperty),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct AssignmentTargetPropertyIdentifier {
    pub binding: AssignmentTargetIdentifier,
    pub init: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct AssignmentTargetPropertyProperty {
    pub name: PropertyName,
    pub binding: AssignmentTargetMaybeDefault,
}

// =============================================================================
// Classes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ClassDeclaration {
    pub name: BindingIdentifier,
    #[serde(rename = "super")]
    pub super_class: Option<Box<Expression>>,
    pub elements: Vec<ClassElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ClassExpression {
    pub name: Option<BindingIdentifier>,
    #[serde(rename = "super")]
    pub super_class: Option<Box<Expression>>,
    pub elements: Vec<ClassElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ClassElement {
    pub is_static: bool,
    pub method: MethodDefinition,
}

impl ClassElement {
    /// A non-static plain method statically named `constructor`.
    pub fn is_constructor(&self) -> bool {
        !self.is_static
            && matches!(
                &self.method,
                MethodDefinition::Method(Method {
                    name: PropertyName::StaticPropertyName(StaticPropertyName { value }),
                    ..
                }) if value == "constructor"
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MethodDefinition {
    Method(Method),
    Getter(Getter),
    Setter(Setter),
}

impl MethodDefinition {
    pub fn name(&self) -> &PropertyName {
        match self {
            MethodDefinition::Method(m) => &m.name,
            MethodDefinition::Getter(g) => &g.name,
            MethodDefinition::Setter(s) => &s.name,
        }
    }
}

// =============================================================================
// Object literal members and property names
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyName {
    StaticPropertyName(StaticPropertyName),
    ComputedPropertyName(ComputedPropertyName),
}

impl PropertyName {
    /// The literal key, for names that are not computed.
    pub fn static_value(&self) -> Option<&str> {
        match self {
            PropertyName::StaticPropertyName(n) => Some(&n.value),
            PropertyName::ComputedPropertyName(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct StaticPropertyName {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ComputedPropertyName {
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectProperty {
    DataProperty(DataProperty),
    ShorthandProperty(ShorthandProperty),
    Method(Method),
    Getter(Getter),
    Setter(Setter),
}

impl ObjectProperty {
    /// True for the members that take part in the duplicate `__proto__` restriction: a
    /// shorthand `__proto__` or a data property whose static key is `__proto__`.
    pub fn is_proto_property(&self) -> bool {
        match self {
            ObjectProperty::DataProperty(p) => p.name.static_value() == Some("__proto__"),
            ObjectProperty::ShorthandProperty(p) => p.name.name == "__proto__",
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct DataProperty {
    pub name: PropertyName,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ShorthandProperty {
    pub name: IdentifierExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Method {
    pub is_async: bool,
    pub is_generator: bool,
    pub name: PropertyName,
    pub params: FormalParameters,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Getter {
    pub name: PropertyName,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Setter {
    pub name: PropertyName,
    pub param: Parameter,
    pub body: FunctionBody,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    ArrayExpression(ArrayExpression),
    ArrowExpression(ArrowExpression),
    AssignmentExpression(AssignmentExpression),
    AwaitExpression(AwaitExpression),
    BinaryExpression(BinaryExpression),
    CallExpression(CallExpression),
    ClassExpression(ClassExpression),
    CompoundAssignmentExpression(CompoundAssignmentExpression),
    ComputedMemberExpression(ComputedMemberExpression),
    ConditionalExpression(ConditionalExpression),
    FunctionExpression(FunctionExpression),
    IdentifierExpression(IdentifierExpression),
    LiteralBooleanExpression(LiteralBooleanExpression),
    LiteralInfinityExpression(LiteralInfinityExpression),
    LiteralNullExpression(LiteralNullExpression),
    LiteralNumericExpression(LiteralNumericExpression),
    LiteralRegExpExpression(LiteralRegExpExpression),
    LiteralStringExpression(LiteralStringExpression),
    NewExpression(NewExpression),
    NewTargetExpression(NewTargetExpression),
    ObjectExpression(ObjectExpression),
    StaticMemberExpression(StaticMemberExpression),
    TemplateExpression(TemplateExpression),
    ThisExpression(ThisExpression),
    UnaryExpression(UnaryExpression),
    UpdateExpression(UpdateExpression),
    YieldExpression(YieldExpression),
    YieldGeneratorExpression(YieldGeneratorExpression),
}

/// The object of a member access or the callee of a call, which may be `super`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExpressionSuper {
    Expression(Box<Expression>),
    Super(Super),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct Super {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SpreadElementExpression {
    SpreadElement(SpreadElement),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct SpreadElement {
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ArrayExpression {
    pub elements: Vec<Option<SpreadElementExpression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct AssignmentExpression {
    pub binding: AssignmentTarget,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct AwaitExpression {
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct CallExpression {
    pub callee: ExpressionSuper,
    pub arguments: Vec<SpreadElementExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct CompoundAssignmentExpression {
    pub binding: SimpleAssignmentTarget,
    pub operator: CompoundAssignmentOperator,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ComputedMemberExpression {
    pub object: ExpressionSuper,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ConditionalExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct IdentifierExpression {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct LiteralBooleanExpression {
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct LiteralInfinityExpression {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct LiteralNullExpression {}

/// Always finite and non-negative; negative numbers are spelled with a unary minus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct LiteralNumericExpression {
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct LiteralRegExpExpression {
    pub pattern: String,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub sticky: bool,
}

impl LiteralRegExpExpression {
    /// The flag suffix in canonical order, e.g. `gimsuy`.
    pub fn flags(&self) -> String {
        [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, c)| *c)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct LiteralStringExpression {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct NewExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<SpreadElementExpression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct NewTargetExpression {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ObjectExpression {
    pub properties: Vec<ObjectProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct StaticMemberExpression {
    pub object: ExpressionSuper,
    pub property: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct TemplateExpression {
    pub tag: Option<Box<Expression>>,
    pub elements: Vec<TemplateExpressionElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TemplateExpressionElement {
    TemplateElement(TemplateElement),
    Expression(Expression),
}

/// `raw_value` is emitted verbatim between the template delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct TemplateElement {
    pub raw_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct ThisExpression {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct UpdateExpression {
    pub is_prefix: bool,
    pub operator: UpdateOperator,
    pub operand: SimpleAssignmentTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct YieldExpression {
    pub expression: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct YieldGeneratorExpression {
    pub expression: Box<Expression>,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    BlockStatement(BlockStatement),
    BreakStatement(BreakStatement),
    ClassDeclaration(ClassDeclaration),
    ContinueStatement(ContinueStatement),
    DebuggerStatement(DebuggerStatement),
    DoWhileStatement(DoWhileStatement),
    EmptyStatement(EmptyStatement),
    ExpressionStatement(ExpressionStatement),
    ForInStatement(ForInStatement),
    ForOfStatement(ForOfStatement),
    ForStatement(ForStatement),
    FunctionDeclaration(FunctionDeclaration),
    IfStatement(IfStatement),
    LabeledStatement(LabeledStatement),
    ReturnStatement(ReturnStatement),
    SwitchStatement(SwitchStatement),
    SwitchStatementWithDefault(SwitchStatementWithDefault),
    ThrowStatement(ThrowStatement),
    TryCatchStatement(TryCatchStatement),
    TryFinallyStatement(TryFinallyStatement),
    VariableDeclarationStatement(VariableDeclarationStatement),
    WhileStatement(WhileStatement),
    WithStatement(WithStatement),
}

impl Statement {
    pub fn is_iteration(&self) -> bool {
        matches!(
            self,
            Statement::DoWhileStatement(_)
                | Statement::ForInStatement(_)
                | Statement::ForOfStatement(_)
                | Statement::ForStatement(_)
                | Statement::WhileStatement(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct BlockStatement {
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct BreakStatement {
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ContinueStatement {
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct DebuggerStatement {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct DoWhileStatement {
    pub body: Box<Statement>,
    pub test: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct EmptyStatement {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ExpressionStatement {
    pub expression: Box<Expression>,
}

/// The left-hand side of a `for-in` or `for-of` head.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInOfBinding {
    VariableDeclaration(VariableDeclaration),
    AssignmentTarget(AssignmentTarget),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ForInStatement {
    pub left: ForInOfBinding,
    pub right: Box<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ForOfStatement {
    pub left: ForInOfBinding,
    pub right: Box<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInit {
    VariableDeclaration(VariableDeclaration),
    Expression(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub test: Option<Box<Expression>>,
    pub update: Option<Box<Expression>>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct IfStatement {
    pub test: Box<Expression>,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct LabeledStatement {
    pub label: String,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ReturnStatement {
    pub expression: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct SwitchCase {
    pub test: Box<Expression>,
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct SwitchDefault {
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct SwitchStatement {
    pub discriminant: Box<Expression>,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct SwitchStatementWithDefault {
    pub discriminant: Box<Expression>,
    pub pre_default_cases: Vec<SwitchCase>,
    pub default_case: SwitchDefault,
    pub post_default_cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ThrowStatement {
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct CatchClause {
    pub binding: Binding,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct TryCatchStatement {
    pub body: Block,
    pub catch_clause: CatchClause,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct TryFinallyStatement {
    pub body: Block,
    pub catch_clause: Option<CatchClause>,
    pub finalizer: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct VariableDeclaration {
    pub kind: VariableDeclarationKind,
    pub declarators: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct VariableDeclarator {
    pub binding: Binding,
    pub init: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct VariableDeclarationStatement {
    pub declaration: VariableDeclaration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct WhileStatement {
    pub test: Box<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct WithStatement {
    pub object: Box<Expression>,
    pub body: Box<Statement>,
}

// =============================================================================
// Modules
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleItem {
    Import(Import),
    ImportNamespace(ImportNamespace),
    ExportAllFrom(ExportAllFrom),
    ExportFrom(ExportFrom),
    ExportLocals(ExportLocals),
    Export(Export),
    ExportDefault(ExportDefault),
    Statement(Statement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Import {
    pub default_binding: Option<BindingIdentifier>,
    pub named_imports: Vec<ImportSpecifier>,
    pub module_specifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ImportNamespace {
    pub default_binding: Option<BindingIdentifier>,
    pub namespace_binding: BindingIdentifier,
    pub module_specifier: String,
}

/// `name` is the exported name being imported; when absent the binding name doubles as it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ImportSpecifier {
    pub name: Option<String>,
    pub binding: BindingIdentifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ExportAllFrom {
    pub module_specifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ExportFrom {
    pub named_exports: Vec<ExportFromSpecifier>,
    pub module_specifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ExportFromSpecifier {
    pub name: String,
    pub exported_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ExportLocals {
    pub named_exports: Vec<ExportLocalSpecifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ExportLocalSpecifier {
    pub name: IdentifierExpression,
    pub exported_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Export {
    pub declaration: ExportDeclaration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportDeclaration {
    FunctionDeclaration(FunctionDeclaration),
    ClassDeclaration(ClassDeclaration),
    VariableDeclaration(VariableDeclaration),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct ExportDefault {
    pub body: ExportDefaultBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportDefaultBody {
    FunctionDeclaration(FunctionDeclaration),
    ClassDeclaration(ClassDeclaration),
    Expression(Expression),
}
