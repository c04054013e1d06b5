use std::str::FromStr;

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;

use crate::chain::codec;

/// Outcome of a confirmed transaction.
#[derive(Debug, Clone)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}

/// Operator wallet for the pot contract's write entry points.
///
/// The private key is consumed during construction and never stored as a
/// string.
pub struct PotWallet {
    provider: DynProvider,
    contract: Address,
    address: Address,
}

impl PotWallet {
    /// Create a wallet from a hex-encoded private key (with or without a
    /// `0x` prefix), bound to the given chain and contract.
    pub fn new(
        private_key: &str,
        rpc_url: &str,
        chain_id: u64,
        contract: Address,
    ) -> anyhow::Result<Self> {
        let signer = PrivateKeySigner::from_str(private_key)?.with_chain_id(Some(chain_id));
        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url.parse()?)
            .erased();

        Ok(Self {
            provider,
            contract,
            address,
        })
    }

    /// The operator's address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Submit `participate(potId)` carrying `value_wei` as the bid amount.
    pub async fn place_bid(&self, pot_id: u64, value_wei: U256) -> anyhow::Result<TxOutcome> {
        let call = codec::encode_call("participate(uint256)", &[U256::from(pot_id)]);
        self.send(call, value_wei, "bid").await
    }

    /// Submit `withdraw()`, claiming the operator's pending balance.
    pub async fn withdraw(&self) -> anyhow::Result<TxOutcome> {
        let call = codec::encode_call("withdraw()", &[]);
        self.send(call, U256::ZERO, "withdraw").await
    }

    async fn send(
        &self,
        call: Vec<u8>,
        value: U256,
        kind: &'static str,
    ) -> anyhow::Result<TxOutcome> {
        let tx = TransactionRequest::default()
            .with_to(self.contract)
            .with_value(value)
            .with_input(call);

        // pending: signed and broadcast, not yet included
        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(%tx_hash, kind, "Transaction submitted — awaiting confirmation");

        // confirming: wait for block inclusion
        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            anyhow::bail!("transaction {tx_hash} reverted");
        }

        tracing::info!(
            %tx_hash,
            block = ?receipt.block_number,
            kind,
            "Transaction confirmed"
        );

        Ok(TxOutcome {
            tx_hash,
            block_number: receipt.block_number,
        })
    }
}
