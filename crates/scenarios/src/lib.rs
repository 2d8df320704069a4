// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod add_two;
mod context;
mod lib_ops;
mod report;
mod token;

pub use add_two::*;
pub use context::*;
pub use lib_ops::*;
pub use lib_test::*;
pub use report::*;
pub use token::*;
