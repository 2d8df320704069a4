// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod account;
mod artifact;
pub mod bindings;
mod client;
mod deploy;
mod error;
mod faucet;
mod orchestrator;

pub use account::*;
pub use artifact::*;
pub use client::*;
pub use deploy::*;
pub use error::*;
pub use faucet::*;
pub use orchestrator::*;
