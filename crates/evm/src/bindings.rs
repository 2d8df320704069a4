// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! ABI bindings for the contracts the harness drives. Encrypted types
//! (`euint256`, `ebool`, `eaddress`) are `bytes32` handles on the wire.

use crate::ResultHandle;
use alloy::{primitives::B256, sol};

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract AddTwo {
        function addTwoEOA(bytes memory uint256EInput) external payable returns (uint256, bytes32);
        function lastResult() external view returns (uint256);
    }
}

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract LibTest {
        function testAdd(bytes memory a, bytes memory b) external returns (bytes32);
        function testAddScalar(bytes memory a, uint256 b) external returns (bytes32);
        function testSub(bytes memory a, bytes memory b) external returns (bytes32);
        function testMul(bytes memory a, bytes memory b) external returns (bytes32);
        function testDiv(bytes memory a, bytes memory b) external returns (bytes32);
        function testRem(bytes memory a, bytes memory b) external returns (bytes32);

        function testAnd(bytes memory a, bytes memory b) external returns (bytes32);
        function testOr(bytes memory a, bytes memory b) external returns (bytes32);
        function testXor(bytes memory a, bytes memory b) external returns (bytes32);
        function testShl(bytes memory a, bytes memory b) external returns (bytes32);
        function testShr(bytes memory a, bytes memory b) external returns (bytes32);
        function testRotl(bytes memory a, bytes memory b) external returns (bytes32);
        function testRotr(bytes memory a, bytes memory b) external returns (bytes32);

        function testEq(bytes memory a, bytes memory b) external returns (bytes32);
        function testNe(bytes memory a, bytes memory b) external returns (bytes32);
        function testGe(bytes memory a, bytes memory b) external returns (bytes32);
        function testGt(bytes memory a, bytes memory b) external returns (bytes32);
        function testLe(bytes memory a, bytes memory b) external returns (bytes32);
        function testLt(bytes memory a, bytes memory b) external returns (bytes32);
        function testMin(bytes memory a, bytes memory b) external returns (bytes32);
        function testMax(bytes memory a, bytes memory b) external returns (bytes32);
        function testEqScalar(bytes memory a, uint256 b) external returns (bytes32);
        function testNeScalar(bytes memory a, uint256 b) external returns (bytes32);

        function testNot(bytes memory a) external returns (bytes32);
        function testAndBool(bytes memory a, bytes memory b) external returns (bytes32);
        function testOrBool(bytes memory a, bytes memory b) external returns (bytes32);
        function testXorBool(bytes memory a, bytes memory b) external returns (bytes32);

        function testRand() external returns (bytes32);
        function testRandBounded(uint256 upperBound) external returns (bytes32);

        function testNewEuint256(bytes memory ciphertext, address user) external returns (bytes32);
        function testNewEbool(bytes memory ciphertext, address user) external returns (bytes32);
        function testNewEaddress(bytes memory ciphertext, address user) external returns (bytes32);
    }
}

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract ConfidentialERC20 {
        function mint(uint256 mintedAmount) external;
        function transfer(address to, bytes calldata encryptedAmount) external returns (bool);
        function balanceOf(address wallet) external view returns (bytes32);
    }
}

sol! {
    /// The Lightning executor. Its address is the ACL address in plaintext
    /// contexts and the verifying contract of covalidator requests.
    #[derive(Debug)]
    #[sol(rpc)]
    contract IncoLightning {
        function incoVerifier() external view returns (address);
    }

    #[derive(Debug)]
    #[sol(rpc)]
    contract IncoVerifier {
        function eciesPubkey() external view returns (bytes memory);
    }
}

impl ResultHandle for AddTwo::addTwoEOAReturn {
    fn result_handle(&self) -> B256 {
        self._1
    }
}
