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

use serde_derive::Serialize;
use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum BinaryOperator {
    #[strum(serialize = "==")]
    #[serde(rename = "==")]
    Equal,
    #[strum(serialize = "!=")]
    #[serde(rename = "!=")]
    NotEqual,
    #[strum(serialize = "===")]
    #[serde(rename = "===")]
    StrictEqual,
    #[strum(serialize = "!==")]
    #[serde(rename = "!==")]
    StrictNotEqual,
    #[strum(serialize = "<")]
    #[serde(rename = "<")]
    LessThan,
    #[strum(serialize = "<=")]
    #[serde(rename = "<=")]
    LessThanEqual,
    #[strum(serialize = ">")]
    #[serde(rename = ">")]
    GreaterThan,
    #[strum(serialize = ">=")]
    #[serde(rename = ">=")]
    GreaterThanEqual,
    #[strum(serialize = "in")]
    #[serde(rename = "in")]
    In,
    #[strum(serialize = "instanceof")]
    #[serde(rename = "instanceof")]
    Instanceof,
    #[strum(serialize = "<<")]
    #[serde(rename = "<<")]
    Left,
    #[strum(serialize = ">>")]
    #[serde(rename = ">>")]
    Right,
    #[strum(serialize = ">>>")]
    #[serde(rename = ">>>")]
    UnsignedRight,
    #[strum(serialize = "+")]
    #[serde(rename = "+")]
    Plus,
    #[strum(serialize = "-")]
    #[serde(rename = "-")]
    Minus,
    #[strum(serialize = "*")]
    #[serde(rename = "*")]
    Mul,
    #[strum(serialize = "/")]
    #[serde(rename = "/")]
    Div,
    #[strum(serialize = "%")]
    #[serde(rename = "%")]
    Rem,
    #[strum(serialize = "**")]
    #[serde(rename = "**")]
    Exp,
    #[strum(serialize = ",")]
    #[serde(rename = ",")]
    Sequence,
    #[strum(serialize = "||")]
    #[serde(rename = "||")]
    LogicalOr,
    #[strum(serialize = "&&")]
    #[serde(rename = "&&")]
    LogicalAnd,
    #[strum(serialize = "|")]
    #[serde(rename = "|")]
    BitOr,
    #[strum(serialize = "^")]
    #[serde(rename = "^")]
    BitXor,
    #[strum(serialize = "&")]
    #[serde(rename = "&")]
    BitAnd,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum CompoundAssignmentOperator {
    #[strum(serialize = "+=")]
    #[serde(rename = "+=")]
    Plus,
    #[strum(serialize = "-=")]
    #[serde(rename = "-=")]
    Minus,
    #[strum(serialize = "*=")]
    #[serde(rename = "*=")]
    Mul,
    #[strum(serialize = "/=")]
    #[serde(rename = "/=")]
    Div,
    #[strum(serialize = "%=")]
    #[serde(rename = "%=")]
    Rem,
    #[strum(serialize = "**=")]
    #[serde(rename = "**=")]
    Exp,
    #[strum(serialize = "<<=")]
    #[serde(rename = "<<=")]
    Left,
    #[strum(serialize = ">>=")]
    #[serde(rename = ">>=")]
    Right,
    #[strum(serialize = ">>>=")]
    #[serde(rename = ">>>=")]
    UnsignedRight,
    #[strum(serialize = "|=")]
    #[serde(rename = "|=")]
    BitOr,
    #[strum(serialize = "^=")]
    #[serde(rename = "^=")]
    BitXor,
    #[strum(serialize = "&=")]
    #[serde(rename = "&=")]
    BitAnd,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum UnaryOperator {
    #[strum(serialize = "+")]
    #[serde(rename = "+")]
    Plus,
    #[strum(serialize = "-")]
    #[serde(rename = "-")]
    Minus,
    #[strum(serialize = "!")]
    #[serde(rename = "!")]
    Not,
    #[strum(serialize = "~")]
    #[serde(rename = "~")]
    BitNot,
    #[strum(serialize = "typeof")]
    #[serde(rename = "typeof")]
    Typeof,
    #[strum(serialize = "void")]
    #[serde(rename = "void")]
    Void,
    #[strum(serialize = "delete")]
    #[serde(rename = "delete")]
    Delete,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum UpdateOperator {
    #[strum(serialize = "++")]
    #[serde(rename = "++")]
    Increment,
    #[strum(serialize = "--")]
    #[serde(rename = "--")]
    Decrement,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumCount, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VariableDeclarationKind {
    Var,
    Let,
    Const,
}

impl VariableDeclarationKind {
    /// `let` and `const` are block scoped and may not appear as the body of a
    /// single-statement context.
    pub fn is_lexical(self) -> bool {
        !matches!(self, VariableDeclarationKind::Var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn operator_tokens() {
        assert_eq!(BinaryOperator::UnsignedRight.to_string(), ">>>");
        assert_eq!(CompoundAssignmentOperator::Exp.to_string(), "**=");
        let s: &'static str = UnaryOperator::Typeof.into();
        assert_eq!(s, "typeof");
        assert_eq!(VariableDeclarationKind::Const.to_string(), "const");
    }

    #[test]
    fn serialized_form_matches_display() {
        for op in BinaryOperator::iter() {
            let json = serde_json::to_value(op).unwrap();
            assert_eq!(json, serde_json::Value::String(op.to_string()));
        }
        assert_eq!(BinaryOperator::COUNT, 25);
        assert_eq!(CompoundAssignmentOperator::COUNT, 12);
    }
}
