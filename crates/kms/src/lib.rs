// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod attested;
pub mod auth;
mod covalidator;
mod error;
mod http;
mod reencryptor;
mod types;

pub use attested::*;
pub use covalidator::*;
pub use error::*;
pub use http::*;
pub use reencryptor::*;
pub use types::*;
