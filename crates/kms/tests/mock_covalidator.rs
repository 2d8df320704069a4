// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{keccak256, B256, U256};
use anyhow::Result;
use lightning_crypto::Handle;
use lightning_kms::{
    attested_decrypt, attested_decrypt_with_backoff, auth, KmsContext, KmsError, Reencryptor,
};
use lightning_test_helpers::{
    fast_backoff, test_signer, MockCovalidator, TEST_CHAIN_ID, TEST_EXECUTOR,
};
use std::sync::Arc;
use tracing_test::traced_test;

fn covalidator() -> MockCovalidator {
    MockCovalidator::new(TEST_CHAIN_ID, TEST_EXECUTOR)
}

fn reencryptor(mock: &MockCovalidator, index: u32) -> Result<Reencryptor> {
    Ok(Reencryptor::builder()
        .covalidator(Arc::new(mock.clone()))
        .chain_id(TEST_CHAIN_ID)
        .executor(TEST_EXECUTOR)
        .signer(test_signer(index)?)
        .build()?)
}

#[tokio::test]
async fn attested_decrypt_follows_request_order() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let a = mock.store(U256::from(15u64), &[alice.address()]).await;
    let b = mock.store(U256::from(1u64), &[alice.address()]).await;
    let c = mock.store(U256::from(320u64), &[alice.address()]).await;

    let out = attested_decrypt(&mock, &mock.context(), &alice, &[c, a, b]).await?;
    let values: Vec<U256> = out.iter().map(|d| d.value).collect();
    assert_eq!(
        values,
        vec![U256::from(320u64), U256::from(15u64), U256::from(1u64)]
    );
    assert_eq!(out[0].handle, c);
    Ok(())
}

#[tokio::test]
async fn attestations_are_signed_by_the_covalidator() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let handle = mock.store(U256::from(7u64), &[alice.address()]).await;

    let out = attested_decrypt(&mock, &mock.context(), &alice, &[handle]).await?;
    let digest = keccak256(
        [
            handle.as_b256().as_slice(),
            &U256::from(7u64).to_be_bytes::<32>(),
        ]
        .concat(),
    );
    assert_eq!(out[0].signatures.len(), 1);
    assert_eq!(auth::recover(digest, &out[0].signatures[0])?, mock.attester());
    Ok(())
}

#[tokio::test]
async fn decrypting_twice_gives_the_same_value() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let handle = mock.store(U256::from(42u64), &[alice.address()]).await;

    let first = attested_decrypt(&mock, &mock.context(), &alice, &[handle]).await?;
    let second = attested_decrypt(&mock, &mock.context(), &alice, &[handle]).await?;
    assert_eq!(first[0].value, second[0].value);
    Ok(())
}

#[tokio::test]
async fn reordered_response_is_rejected() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let a = mock.store(U256::from(1u64), &[alice.address()]).await;
    let b = mock.store(U256::from(2u64), &[alice.address()]).await;
    mock.reverse_results(true);

    let err = attested_decrypt(&mock, &mock.context(), &alice, &[a, b])
        .await
        .unwrap_err();
    assert!(matches!(err, KmsError::OrderMismatch { index: 0, .. }));
    Ok(())
}

#[tokio::test]
async fn bad_parameters_never_reach_the_service() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;

    let err = attested_decrypt(&mock, &mock.context(), &alice, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, KmsError::MissingParameter(_)));

    let err = attested_decrypt(&mock, &mock.context(), &alice, &[Handle::ZERO])
        .await
        .unwrap_err();
    assert!(matches!(err, KmsError::MissingParameter("handle")));

    let no_chain = KmsContext {
        chain_id: 0,
        executor: TEST_EXECUTOR,
    };
    let handle = Handle(B256::repeat_byte(1));
    let err = attested_decrypt(&mock, &no_chain, &alice, &[handle])
        .await
        .unwrap_err();
    assert!(matches!(err, KmsError::MissingParameter("chain id")));

    let err = reencryptor(&mock, 0)?
        .reencrypt(Handle::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, KmsError::MissingParameter("handle")));

    assert_eq!(mock.calls(), 0);
    Ok(())
}

#[test]
fn builder_names_the_missing_parameter() -> Result<()> {
    let mock = covalidator();
    let err = Reencryptor::builder()
        .covalidator(Arc::new(mock))
        .executor(TEST_EXECUTOR)
        .signer(test_signer(0)?)
        .build()
        .err()
        .unwrap();
    assert_eq!(
        err.to_string(),
        "Missing required parameters for creating reencryptor: chain id"
    );

    let err = Reencryptor::builder()
        .chain_id(TEST_CHAIN_ID)
        .executor(TEST_EXECUTOR)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, KmsError::MissingParameter("covalidator")));
    Ok(())
}

#[tokio::test]
async fn reencrypt_recovers_the_value() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let handle = mock.store(U256::from(4000u64), &[alice.address()]).await;

    let reencryptor = reencryptor(&mock, 0)?;
    assert_eq!(reencryptor.user(), alice.address());
    let first = reencryptor.reencrypt(handle).await?;
    let second = reencryptor.reencrypt(handle).await?;
    assert_eq!(first.value, U256::from(4000u64));
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn other_users_cannot_reencrypt() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let handle = mock.store(U256::from(9u64), &[alice.address()]).await;

    let err = reencryptor(&mock, 1)?.reencrypt(handle).await.unwrap_err();
    assert!(matches!(err, KmsError::Unauthorized(_)));

    mock.allow(handle, test_signer(1)?.address()).await;
    assert_eq!(
        reencryptor(&mock, 1)?.reencrypt(handle).await?.value,
        U256::from(9u64)
    );
    Ok(())
}

#[tokio::test]
async fn signature_for_another_chain_is_refused() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let handle = mock.store(U256::from(9u64), &[alice.address()]).await;

    let wrong_chain = Reencryptor::builder()
        .covalidator(Arc::new(mock.clone()))
        .chain_id(1)
        .executor(TEST_EXECUTOR)
        .signer(alice)
        .build()?;
    let err = wrong_chain.reencrypt(handle).await.unwrap_err();
    assert!(matches!(err, KmsError::Unauthorized(_)));
    Ok(())
}

#[tokio::test(start_paused = true)]
#[traced_test]
async fn transient_failures_are_retried() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let handle = mock.store(U256::from(5u64), &[alice.address()]).await;
    mock.fail_next(2);

    let reencryptor = Reencryptor::builder()
        .covalidator(Arc::new(mock.clone()))
        .chain_id(TEST_CHAIN_ID)
        .executor(TEST_EXECUTOR)
        .signer(alice)
        .backoff(fast_backoff(3))
        .build()?;
    assert_eq!(reencryptor.reencrypt(handle).await?.value, U256::from(5u64));
    assert_eq!(mock.calls(), 3);
    assert!(logs_contain("reencrypt: attempt 1/4 failed"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn retries_give_up_at_the_ceiling() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let handle = mock.store(U256::from(5u64), &[alice.address()]).await;
    mock.fail_next(10);

    let reencryptor = Reencryptor::builder()
        .covalidator(Arc::new(mock.clone()))
        .chain_id(TEST_CHAIN_ID)
        .executor(TEST_EXECUTOR)
        .signer(alice)
        .backoff(fast_backoff(2))
        .build()?;
    let err = reencryptor.reencrypt(handle).await.unwrap_err();
    assert!(matches!(err, KmsError::RetriesExhausted(_)));
    assert_eq!(mock.calls(), 3);
    Ok(())
}

#[tokio::test]
async fn without_backoff_the_first_failure_is_returned() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let handle = mock.store(U256::from(5u64), &[alice.address()]).await;
    mock.fail_next(1);

    let err = reencryptor(&mock, 0)?.reencrypt(handle).await.unwrap_err();
    assert!(matches!(err, KmsError::Service { status: 503, .. }));
    assert_eq!(mock.calls(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn attested_decrypt_retries_under_backoff() -> Result<()> {
    let mock = covalidator();
    let alice = test_signer(0)?;
    let handle = mock.store(U256::from(15u64), &[alice.address()]).await;
    mock.fail_next(2);

    let out =
        attested_decrypt_with_backoff(&mock, &mock.context(), &alice, &[handle], &fast_backoff(5))
            .await?;
    assert_eq!(out[0].value, U256::from(15u64));
    assert_eq!(mock.calls(), 3);

    let err = attested_decrypt_with_backoff(
        &mock,
        &mock.context(),
        &alice,
        &[Handle::ZERO],
        &fast_backoff(5),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, KmsError::MissingParameter("handle")));
    assert_eq!(mock.calls(), 3);
    Ok(())
}
