// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! The LibTest cases and their expected results, computed with native
//! 256-bit arithmetic.

use crate::Expectation;
use alloy::primitives::{address, Address, U256};
use lightning_crypto::Plaintext;

/// One call to the LibTest contract. Operands ending up in `bytes`
/// arguments are encrypted, scalar operands are passed in the clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LibOp {
    Add(u64, u64),
    AddScalar(u64, u64),
    Sub(u64, u64),
    Mul(u64, u64),
    Div(u64, u64),
    Rem(u64, u64),

    And(u64, u64),
    Or(u64, u64),
    Xor(u64, u64),
    Shl(u64, u64),
    Shr(u64, u64),
    Rotl(u64, u64),
    Rotr(u64, u64),

    Eq(u64, u64),
    Ne(u64, u64),
    Gt(u64, u64),
    Lt(u64, u64),
    Ge(u64, u64),
    Le(u64, u64),
    Min(u64, u64),
    Max(u64, u64),
    EqScalar(u64, u64),
    NeScalar(u64, u64),

    Not(bool),
    AndBool(bool, bool),
    OrBool(bool, bool),
    XorBool(bool, bool),

    Rand,
    RandBounded(u64),

    NewEuint256(u64),
    NewEbool(bool),
    NewEaddress(Address),
}

fn u(v: u64) -> U256 {
    U256::from(v)
}

/// Shift and rotate amounts are taken modulo the operand width
fn amount(v: u64) -> usize {
    (v % 256) as usize
}

impl LibOp {
    pub fn name(&self) -> String {
        match self {
            LibOp::Add(a, b) => format!("add({a}, {b})"),
            LibOp::AddScalar(a, b) => format!("addScalar({a}, {b})"),
            LibOp::Sub(a, b) => format!("sub({a}, {b})"),
            LibOp::Mul(a, b) => format!("mul({a}, {b})"),
            LibOp::Div(a, b) => format!("div({a}, {b})"),
            LibOp::Rem(a, b) => format!("rem({a}, {b})"),
            LibOp::And(a, b) => format!("and({a}, {b})"),
            LibOp::Or(a, b) => format!("or({a}, {b})"),
            LibOp::Xor(a, b) => format!("xor({a}, {b})"),
            LibOp::Shl(a, b) => format!("shl({a}, {b})"),
            LibOp::Shr(a, b) => format!("shr({a}, {b})"),
            LibOp::Rotl(a, b) => format!("rotl({a}, {b})"),
            LibOp::Rotr(a, b) => format!("rotr({a}, {b})"),
            LibOp::Eq(a, b) => format!("eq({a}, {b})"),
            LibOp::Ne(a, b) => format!("ne({a}, {b})"),
            LibOp::Gt(a, b) => format!("gt({a}, {b})"),
            LibOp::Lt(a, b) => format!("lt({a}, {b})"),
            LibOp::Ge(a, b) => format!("ge({a}, {b})"),
            LibOp::Le(a, b) => format!("le({a}, {b})"),
            LibOp::Min(a, b) => format!("min({a}, {b})"),
            LibOp::Max(a, b) => format!("max({a}, {b})"),
            LibOp::EqScalar(a, b) => format!("eqScalar({a}, {b})"),
            LibOp::NeScalar(a, b) => format!("neScalar({a}, {b})"),
            LibOp::Not(a) => format!("not({a})"),
            LibOp::AndBool(a, b) => format!("andBool({a}, {b})"),
            LibOp::OrBool(a, b) => format!("orBool({a}, {b})"),
            LibOp::XorBool(a, b) => format!("xorBool({a}, {b})"),
            LibOp::Rand => "rand()".to_string(),
            LibOp::RandBounded(bound) => format!("randBounded({bound})"),
            LibOp::NewEuint256(v) => format!("newEuint256({v})"),
            LibOp::NewEbool(v) => format!("newEbool({v})"),
            LibOp::NewEaddress(v) => format!("newEaddress({v})"),
        }
    }

    /// Values encrypted as the `bytes` arguments, in argument order
    pub fn encrypted_inputs(&self) -> Vec<Plaintext> {
        match *self {
            LibOp::Add(a, b)
            | LibOp::Sub(a, b)
            | LibOp::Mul(a, b)
            | LibOp::Div(a, b)
            | LibOp::Rem(a, b)
            | LibOp::And(a, b)
            | LibOp::Or(a, b)
            | LibOp::Xor(a, b)
            | LibOp::Shl(a, b)
            | LibOp::Shr(a, b)
            | LibOp::Rotl(a, b)
            | LibOp::Rotr(a, b)
            | LibOp::Eq(a, b)
            | LibOp::Ne(a, b)
            | LibOp::Gt(a, b)
            | LibOp::Lt(a, b)
            | LibOp::Ge(a, b)
            | LibOp::Le(a, b)
            | LibOp::Min(a, b)
            | LibOp::Max(a, b) => vec![a.into(), b.into()],
            LibOp::AddScalar(a, _) | LibOp::EqScalar(a, _) | LibOp::NeScalar(a, _) => {
                vec![a.into()]
            }
            LibOp::Not(a) => vec![a.into()],
            LibOp::AndBool(a, b) | LibOp::OrBool(a, b) | LibOp::XorBool(a, b) => {
                vec![a.into(), b.into()]
            }
            LibOp::Rand | LibOp::RandBounded(_) => vec![],
            LibOp::NewEuint256(v) => vec![v.into()],
            LibOp::NewEbool(v) => vec![v.into()],
            LibOp::NewEaddress(v) => vec![v.into()],
        }
    }

    pub fn expected(&self) -> Expectation {
        use Expectation::{Below, Decrypts, Equals, HandlePresent};
        match *self {
            LibOp::Add(a, b) | LibOp::AddScalar(a, b) => Equals(u(a).wrapping_add(u(b))),
            LibOp::Sub(a, b) => Equals(u(a).wrapping_sub(u(b))),
            LibOp::Mul(a, b) => Equals(u(a).wrapping_mul(u(b))),
            // Division by zero yields all ones, remainder by zero the dividend
            LibOp::Div(a, b) => Equals(u(a).checked_div(u(b)).unwrap_or(U256::MAX)),
            LibOp::Rem(a, b) => Equals(u(a).checked_rem(u(b)).unwrap_or(u(a))),

            LibOp::And(a, b) => Equals(u(a & b)),
            LibOp::Or(a, b) => Equals(u(a | b)),
            LibOp::Xor(a, b) => Equals(u(a ^ b)),
            LibOp::Shl(a, b) => Equals(u(a) << amount(b)),
            LibOp::Shr(a, b) => Equals(u(a) >> amount(b)),
            LibOp::Rotl(a, b) => Equals(u(a).rotate_left(amount(b))),
            LibOp::Rotr(a, b) => Equals(u(a).rotate_right(amount(b))),

            LibOp::Eq(a, b) | LibOp::EqScalar(a, b) => Expectation::bool(a == b),
            LibOp::Ne(a, b) | LibOp::NeScalar(a, b) => Expectation::bool(a != b),
            LibOp::Gt(a, b) => Expectation::bool(a > b),
            LibOp::Lt(a, b) => Expectation::bool(a < b),
            LibOp::Ge(a, b) => Expectation::bool(a >= b),
            LibOp::Le(a, b) => Expectation::bool(a <= b),
            LibOp::Min(a, b) => Equals(u(a.min(b))),
            LibOp::Max(a, b) => Equals(u(a.max(b))),

            LibOp::Not(a) => Expectation::bool(!a),
            LibOp::AndBool(a, b) => Expectation::bool(a && b),
            LibOp::OrBool(a, b) => Expectation::bool(a || b),
            LibOp::XorBool(a, b) => Expectation::bool(a ^ b),

            // Every 256-bit value is below 2^256
            LibOp::Rand => Decrypts,
            LibOp::RandBounded(bound) => Below(u(bound)),

            LibOp::NewEuint256(_) | LibOp::NewEbool(_) | LibOp::NewEaddress(_) => HandlePresent,
        }
    }
}

/// The LibTest suite
pub fn lib_test_cases() -> Vec<LibOp> {
    vec![
        LibOp::Add(10, 5),
        LibOp::AddScalar(15, 3),
        LibOp::AddScalar(10, 3),
        LibOp::Sub(20, 7),
        LibOp::Mul(6, 4),
        LibOp::Div(24, 6),
        LibOp::Rem(17, 5),
        LibOp::And(12, 10),
        LibOp::Or(12, 10),
        LibOp::Xor(12, 10),
        LibOp::Shl(5, 2),
        LibOp::Shl(10, 5),
        LibOp::Shr(20, 2),
        LibOp::Shr(15, 5),
        LibOp::Rotl(5, 1),
        LibOp::Rotr(10, 1),
        LibOp::Eq(15, 15),
        LibOp::Ne(15, 20),
        LibOp::Gt(20, 15),
        LibOp::Gt(15, 10),
        LibOp::Lt(10, 15),
        LibOp::Ge(20, 20),
        LibOp::Le(15, 20),
        LibOp::Min(20, 15),
        LibOp::Max(20, 15),
        LibOp::EqScalar(25, 25),
        LibOp::NeScalar(25, 30),
        LibOp::Not(true),
        LibOp::AndBool(true, false),
        LibOp::OrBool(true, false),
        LibOp::XorBool(true, true),
        LibOp::Rand,
        LibOp::RandBounded(100),
        LibOp::NewEuint256(42),
        LibOp::NewEbool(true),
        LibOp::NewEaddress(address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")),
    ]
}
