// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod ecies;
mod encryptor;
mod error;
mod handle;
mod plaintext;

pub use ecies::EciesKeypair;
pub use encryptor::*;
pub use error::*;
pub use handle::*;
pub use plaintext::*;
