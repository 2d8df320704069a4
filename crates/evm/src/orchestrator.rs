// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{ChainClient, TxError, WalletClient};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, B256, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
    sol_types::SolCall,
};
use lightning_crypto::Handle;
use tracing::{error, info};

/// Per call transaction options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TxOptions {
    /// Native value attached to both the simulation and the transaction.
    /// Confidential operations that charge a fee revert without it.
    pub value: U256,
    /// Fixed gas for the submitted transaction. Gas estimation is unreliable
    /// for confidential operations, so some calls pin it.
    pub gas_limit: Option<u64>,
}

impl TxOptions {
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }
}

/// Return values that carry the handle of the encrypted result
pub trait ResultHandle {
    fn result_handle(&self) -> B256;
}

impl ResultHandle for B256 {
    fn result_handle(&self) -> B256 {
        *self
    }
}

/// Outcome of a confirmed confidential call
#[derive(Clone, Debug)]
pub struct Execution {
    /// Captured from the simulation
    pub handle: Handle,
    pub receipt: TransactionReceipt,
}

impl Execution {
    pub fn tx_hash(&self) -> B256 {
        self.receipt.transaction_hash
    }

    pub fn block_number(&self) -> Option<u64> {
        self.receipt.block_number
    }
}

fn call_request<C: SolCall>(
    from: Address,
    to: Address,
    call: &C,
    opts: &TxOptions,
) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(from)
        .with_to(to)
        .with_input(Bytes::from(call.abi_encode()))
        .with_value(opts.value)
}

/// Runs `call` against current state without mutating it
pub async fn simulate<C>(
    client: &WalletClient,
    to: Address,
    call: &C,
    opts: &TxOptions,
) -> Result<C::Return, TxError>
where
    C: SolCall,
{
    let request = call_request(client.address(), to, call, opts);
    let raw = client
        .provider()
        .call(request)
        .await
        .map_err(|e| TxError::simulation(C::SIGNATURE, e))?;
    C::abi_decode_returns(&raw).map_err(|e| TxError::Decode {
        function: C::SIGNATURE,
        reason: e.to_string(),
    })
}

/// Sends `call` as a transaction and waits for a successful receipt
pub async fn submit<C>(
    client: &WalletClient,
    to: Address,
    call: &C,
    opts: &TxOptions,
) -> Result<TransactionReceipt, TxError>
where
    C: SolCall,
{
    let mut request = call_request(client.address(), to, call, opts);
    if let Some(gas_limit) = opts.gas_limit {
        request = request.with_gas_limit(gas_limit);
    }

    let pending = client
        .provider()
        .send_transaction(request)
        .await
        .map_err(|e| TxError::submission(C::SIGNATURE, e))?;
    let tx_hash = *pending.tx_hash();
    info!(
        function = C::SIGNATURE,
        tx = %client.chain().tx_url(tx_hash),
        "Tx submitted"
    );

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| TxError::confirmation(tx_hash, e))?;
    if !receipt.status() {
        error!(function = C::SIGNATURE, tx = %tx_hash, "Transaction reverted");
        return Err(TxError::Reverted {
            tx: tx_hash,
            block: receipt.block_number,
        });
    }
    info!(block = ?receipt.block_number, "Transaction included");
    Ok(receipt)
}

/// Simulate, submit, confirm.
///
/// The handle comes from the simulation; a zero handle there is an error and
/// nothing is sent. Only a successful receipt makes the handle usable.
pub async fn execute<C>(
    client: &WalletClient,
    to: Address,
    call: C,
    opts: &TxOptions,
) -> Result<Execution, TxError>
where
    C: SolCall,
    C::Return: ResultHandle,
{
    let returns = simulate(client, to, &call, opts).await?;
    let handle = Handle::non_zero(returns.result_handle()).ok_or(TxError::MissingHandle {
        function: C::SIGNATURE,
    })?;
    info!(function = C::SIGNATURE, handle = %handle, "Simulated");

    let receipt = submit(client, to, &call, opts).await?;
    Ok(Execution { handle, receipt })
}

/// Calls a view function
pub async fn read<T, C>(
    client: &ChainClient<T>,
    to: Address,
    call: C,
) -> Result<C::Return, TxError>
where
    C: SolCall,
{
    let request = TransactionRequest::default()
        .with_to(to)
        .with_input(Bytes::from(call.abi_encode()));
    let raw = client
        .provider()
        .call(request)
        .await
        .map_err(|e| TxError::Read {
            function: C::SIGNATURE,
            contract: to,
            reason: e.to_string(),
        })?;
    C::abi_decode_returns(&raw).map_err(|e| TxError::Decode {
        function: C::SIGNATURE,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::AddTwo;

    #[test]
    fn options_compose() {
        let opts = TxOptions::default()
            .with_value(U256::from(10u64))
            .with_gas_limit(300_000);
        assert_eq!(opts.value, U256::from(10u64));
        assert_eq!(opts.gas_limit, Some(300_000));
        assert_eq!(TxOptions::default().gas_limit, None);
    }

    #[test]
    fn add_two_handle_is_second_return() {
        let returns = AddTwo::addTwoEOAReturn {
            _0: U256::from(7u64),
            _1: B256::repeat_byte(0xab),
        };
        assert_eq!(returns.result_handle(), B256::repeat_byte(0xab));
    }
}
