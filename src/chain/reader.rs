use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::chain::codec::{self, CodecError};
use crate::chain::rpc::{RpcClient, RpcError};
use crate::chain::units::wei_to_display;
use crate::models::{Leaderboard, PendingBalance, PotDetails, PotHistoryEntry, PotSnapshot};

#[derive(Debug, Error)]
pub enum ChainError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Read-side client for the pot contract. All reads go through `eth_call`
/// and the explicit decoders in [`codec`].
#[derive(Debug, Clone)]
pub struct PotReader {
    rpc: RpcClient,
    contract: Address,
}

impl PotReader {
    pub fn new(http: reqwest::Client, rpc_url: &str, contract: Address) -> Self {
        Self {
            rpc: RpcClient::new(http, rpc_url),
            contract,
        }
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Compact pot state for the live aggregate endpoint.
    pub async fn current_pot_info(&self) -> Result<PotSnapshot, ChainError> {
        let call = codec::encode_call("getCurrentPotInfo()", &[]);
        let ret = self.rpc.eth_call(self.contract, &call).await?;
        Ok(codec::decode_current_pot_info(&ret)?)
    }

    /// Full pot state for the poller mirror.
    pub async fn current_pot_details(&self) -> Result<PotDetails, ChainError> {
        let call = codec::encode_call("getCurrentPotDetails()", &[]);
        let ret = self.rpc.eth_call(self.contract, &call).await?;
        Ok(codec::decode_current_pot_details(&ret)?)
    }

    /// Result of one finished pot.
    pub async fn pot_results(&self, pot_id: u64) -> Result<PotHistoryEntry, ChainError> {
        let call = codec::encode_call("getPotResults(uint256)", &[U256::from(pot_id)]);
        let ret = self.rpc.eth_call(self.contract, &call).await?;
        Ok(codec::decode_pot_results(&ret, pot_id)?)
    }

    /// Leaderboard for `pot_id`. Pot 0 does not exist; short-circuits to an
    /// empty board without issuing a request.
    pub async fn leaderboard(&self, pot_id: u64) -> Result<Leaderboard, ChainError> {
        if pot_id == 0 {
            return Ok(Leaderboard::empty(0));
        }
        let call = codec::encode_call("getLeaderboard(uint256)", &[U256::from(pot_id)]);
        let ret = self.rpc.eth_call(self.contract, &call).await?;
        Ok(codec::decode_leaderboard(&ret, pot_id)?)
    }

    /// Claimable balance for `address`. `None` short-circuits to zero without
    /// issuing a request.
    pub async fn pending_withdrawals(
        &self,
        address: Option<Address>,
    ) -> Result<PendingBalance, ChainError> {
        let Some(addr) = address else {
            return Ok(PendingBalance::zero());
        };
        let call = codec::encode_call(
            "pendingWithdrawals(address)",
            &[codec::address_word(addr)],
        );
        let ret = self.rpc.eth_call(self.contract, &call).await?;
        let amount_wei = codec::decode_pending(&ret)?;
        Ok(PendingBalance {
            formatted: wei_to_display(amount_wei),
            amount_wei,
        })
    }
}
