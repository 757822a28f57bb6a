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

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FuzzError {
    #[error("choose must be given at least one alternative")]
    Arity,
    #[error("Unable to load fuzzer configuration: {0}")]
    Config(String),
}

impl From<figment::Error> for FuzzError {
    fn from(e: figment::Error) -> Self {
        FuzzError::Config(e.to_string())
    }
}
