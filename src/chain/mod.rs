pub mod codec;
pub mod reader;
pub mod rpc;
pub mod units;
pub mod wallet;

pub use reader::{ChainError, PotReader};
pub use rpc::{RpcClient, RpcError};
pub use wallet::{PotWallet, TxOutcome};
