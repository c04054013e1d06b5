//! Calldata encoding and return-data decoding for the pot contract.
//!
//! Return tuples are decoded at fixed word offsets with arity and type
//! checks up front, so a contract upgrade that changes a signature fails
//! loudly instead of silently misreading fields.

use alloy::primitives::{keccak256, Address, U256};
use thiserror::Error;

use crate::chain::units::wei_to_display;
use crate::models::{Leaderboard, LeaderboardEntry, PotDetails, PotHistoryEntry, PotSnapshot};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed return data: {0}")]
    Malformed(String),

    #[error("unexpected return arity: expected {expected} words, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("word out of range for {0}")]
    OutOfRange(&'static str),
}

/// Encode a call to `signature` with static uint256-word arguments.
/// Address arguments are passed pre-widened via [`address_word`].
pub fn encode_call(signature: &str, args: &[U256]) -> Vec<u8> {
    let selector = &keccak256(signature.as_bytes())[..4];
    let mut data = Vec::with_capacity(4 + 32 * args.len());
    data.extend_from_slice(selector);
    for arg in args {
        data.extend_from_slice(&arg.to_be_bytes::<32>());
    }
    data
}

/// Widen a 20-byte address into a 32-byte argument word.
pub fn address_word(addr: Address) -> U256 {
    U256::from_be_slice(addr.as_slice())
}

/// Split `0x…` return data into 64-char hex words.
fn words(data: &str) -> Result<Vec<&str>, CodecError> {
    let hex = data.strip_prefix("0x").unwrap_or(data);
    if hex.len() % 64 != 0 {
        return Err(CodecError::Malformed(format!(
            "return data length {} is not word-aligned",
            hex.len()
        )));
    }
    Ok(hex.as_bytes()
        .chunks(64)
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect())
}

fn expect_arity(got: usize, expected: usize) -> Result<(), CodecError> {
    if got != expected {
        return Err(CodecError::Arity { expected, got });
    }
    Ok(())
}

fn word_u256(word: &str, field: &'static str) -> Result<U256, CodecError> {
    U256::from_str_radix(word, 16).map_err(|_| CodecError::OutOfRange(field))
}

fn word_u64(word: &str, field: &'static str) -> Result<u64, CodecError> {
    let value = word_u256(word, field)?;
    u64::try_from(value).map_err(|_| CodecError::OutOfRange(field))
}

/// Decode a 32-byte word as an address; the 12 padding bytes must be zero.
fn word_address(word: &str, field: &'static str) -> Result<Address, CodecError> {
    if word.len() != 64 || !word[..24].chars().all(|c| c == '0') {
        return Err(CodecError::OutOfRange(field));
    }
    format!("0x{}", &word[24..])
        .parse()
        .map_err(|_| CodecError::OutOfRange(field))
}

fn word_bool(word: &str, field: &'static str) -> Result<bool, CodecError> {
    match word_u64(word, field)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(CodecError::OutOfRange(field)),
    }
}

/// Decode the `getCurrentPotInfo()` 8-tuple:
/// (potId, totalFunds, lastBidAmount, minimumNextBid, lastBidder, endTime,
/// timeRemaining, isActive).
pub fn decode_current_pot_info(data: &str) -> Result<PotSnapshot, CodecError> {
    let w = words(data)?;
    expect_arity(w.len(), 8)?;

    let total_funds_wei = word_u256(w[1], "totalFunds")?;
    let last_bid_amount_wei = word_u256(w[2], "lastBidAmount")?;
    let minimum_next_bid_wei = word_u256(w[3], "minimumNextBid")?;

    Ok(PotSnapshot {
        pot_id: word_u64(w[0], "potId")?,
        total_funds: wei_to_display(total_funds_wei),
        total_funds_wei,
        last_bid_amount: wei_to_display(last_bid_amount_wei),
        last_bid_amount_wei,
        minimum_next_bid: wei_to_display(minimum_next_bid_wei),
        minimum_next_bid_wei,
        last_bidder: word_address(w[4], "lastBidder")?,
        end_time: word_u64(w[5], "endTime")?,
        time_remaining_seconds: word_u64(w[6], "timeRemaining")?,
        is_active: word_bool(w[7], "isActive")?,
    })
}

/// Decode the `getCurrentPotDetails()` 12-tuple:
/// (potId, totalFunds, endTime, timeRemaining, lastBidAmount, minimumNextBid,
/// lastBidder, topContributor, topContributorAmount, participantCount,
/// isActive, hasEnded).
pub fn decode_current_pot_details(data: &str) -> Result<PotDetails, CodecError> {
    let w = words(data)?;
    expect_arity(w.len(), 12)?;

    let total_funds_wei = word_u256(w[1], "totalFunds")?;
    let last_bid_amount_wei = word_u256(w[4], "lastBidAmount")?;
    let minimum_next_bid_wei = word_u256(w[5], "minimumNextBid")?;
    let top_contributor_amount_wei = word_u256(w[8], "topContributorAmount")?;

    Ok(PotDetails {
        pot_id: word_u64(w[0], "potId")?,
        total_funds_formatted: wei_to_display(total_funds_wei),
        total_funds_wei,
        end_time: word_u64(w[2], "endTime")?,
        time_remaining_seconds: word_u64(w[3], "timeRemaining")?,
        last_bid_amount_formatted: wei_to_display(last_bid_amount_wei),
        last_bid_amount_wei,
        minimum_next_bid_formatted: wei_to_display(minimum_next_bid_wei),
        minimum_next_bid_wei,
        last_bidder: word_address(w[6], "lastBidder")?,
        top_contributor: word_address(w[7], "topContributor")?,
        top_contributor_amount_formatted: wei_to_display(top_contributor_amount_wei),
        top_contributor_amount_wei,
        participant_count: word_u64(w[9], "participantCount")?,
        is_active: word_bool(w[10], "isActive")?,
        has_ended: word_bool(w[11], "hasEnded")?,
    })
}

/// Decode the `getPotResults(potId)` 4-tuple:
/// (startTime, endTime, winner, totalFunds).
pub fn decode_pot_results(data: &str, pot_id: u64) -> Result<PotHistoryEntry, CodecError> {
    let w = words(data)?;
    expect_arity(w.len(), 4)?;

    let final_amount_wei = word_u256(w[3], "totalFunds")?;

    Ok(PotHistoryEntry {
        pot_id,
        start_time: word_u64(w[0], "startTime")?,
        end_time: word_u64(w[1], "endTime")?,
        winner: word_address(w[2], "winner")?,
        final_amount_formatted: wei_to_display(final_amount_wei),
        final_amount_wei,
    })
}

/// Decode the single-word `pendingWithdrawals(address)` return.
pub fn decode_pending(data: &str) -> Result<U256, CodecError> {
    let w = words(data)?;
    expect_arity(w.len(), 1)?;
    word_u256(w[0], "pendingWithdrawals")
}

/// Decode the `getLeaderboard(potId)` return: two dynamic parallel arrays
/// (address[] users, uint256[] amounts). Entries follow the address sequence;
/// a missing amount is padded as zero.
pub fn decode_leaderboard(data: &str, pot_id: u64) -> Result<Leaderboard, CodecError> {
    let w = words(data)?;
    if w.len() < 2 {
        return Err(CodecError::Arity {
            expected: 2,
            got: w.len(),
        });
    }

    let users_at = array_start(&w, w[0], "users")?;
    let amounts_at = array_start(&w, w[1], "amounts")?;

    let users_len = word_u64(w[users_at], "users.length")? as usize;
    let amounts_len = word_u64(w[amounts_at], "amounts.length")? as usize;

    bounds_check(&w, users_at, users_len, "users")?;
    bounds_check(&w, amounts_at, amounts_len, "amounts")?;

    let mut entries = Vec::with_capacity(users_len);
    for i in 0..users_len {
        let address = word_address(w[users_at + 1 + i], "users[i]")?;
        let amount_wei = if i < amounts_len {
            word_u256(w[amounts_at + 1 + i], "amounts[i]")?
        } else {
            U256::ZERO
        };
        entries.push(LeaderboardEntry {
            address,
            amount_formatted: wei_to_display(amount_wei),
            amount_wei,
        });
    }

    Ok(Leaderboard {
        pot_id,
        participant_count: entries.len(),
        entries,
    })
}

/// Resolve a dynamic-array head offset (bytes) into the index of the array's
/// length word.
fn array_start(w: &[&str], offset_word: &str, field: &'static str) -> Result<usize, CodecError> {
    let offset = word_u64(offset_word, field)? as usize;
    if offset % 32 != 0 {
        return Err(CodecError::Malformed(format!(
            "{field}: array offset {offset} is not word-aligned"
        )));
    }
    let index = offset / 32;
    if index >= w.len() {
        return Err(CodecError::Malformed(format!(
            "{field}: array offset {offset} is past the end of return data"
        )));
    }
    Ok(index)
}

fn bounds_check(
    w: &[&str],
    start: usize,
    len: usize,
    field: &'static str,
) -> Result<(), CodecError> {
    if start + 1 + len > w.len() {
        return Err(CodecError::Malformed(format!(
            "{field}: declared length {len} exceeds return data"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint_word(v: u128) -> String {
        format!("{v:064x}")
    }

    fn addr_word(tail: &str) -> String {
        format!("{}{}", "0".repeat(24), tail)
    }

    const ALICE: &str = "00000000000000000000000000000000000000a1";
    const BOB: &str = "00000000000000000000000000000000000000b2";

    #[test]
    fn test_encode_call_layout() {
        let data = encode_call("participate(uint256)", &[U256::from(3)]);
        assert_eq!(data.len(), 36);
        assert_eq!(&data[..4], &keccak256(b"participate(uint256)")[..4]);
        assert_eq!(U256::from_be_slice(&data[4..]), U256::from(3));
    }

    #[test]
    fn test_encode_call_no_args() {
        let data = encode_call("withdraw()", &[]);
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn test_address_word_round_trips() {
        let addr: Address = format!("0x{ALICE}").parse().unwrap();
        let word = address_word(addr);
        let hex = format!("{:064x}", word);
        assert_eq!(word_address(&hex, "addr").unwrap(), addr);
    }

    #[test]
    fn test_decode_current_pot_info() {
        let data = format!(
            "0x{}{}{}{}{}{}{}{}",
            uint_word(3),                         // potId
            uint_word(2_000_000_000_000_000_000), // totalFunds = 2 ETH
            uint_word(500_000_000_000_000_000),   // lastBidAmount = 0.5 ETH
            uint_word(550_000_000_000_000_000),   // minimumNextBid = 0.55 ETH
            addr_word(ALICE),                     // lastBidder
            uint_word(1_700_000_000),             // endTime
            uint_word(3600),                      // timeRemaining
            uint_word(1),                         // isActive
        );

        let snap = decode_current_pot_info(&data).unwrap();
        assert_eq!(snap.pot_id, 3);
        assert_eq!(snap.total_funds, "2");
        assert_eq!(snap.total_funds_wei, U256::from(2_000_000_000_000_000_000u128));
        assert_eq!(snap.last_bid_amount, "0.5");
        assert_eq!(snap.minimum_next_bid, "0.55");
        assert_eq!(snap.last_bidder.to_string().to_lowercase(), format!("0x{ALICE}"));
        assert_eq!(snap.end_time, 1_700_000_000);
        assert_eq!(snap.time_remaining_seconds, 3600);
        assert!(snap.is_active);
    }

    #[test]
    fn test_decode_current_pot_info_wrong_arity() {
        let data = format!("0x{}", uint_word(3).repeat(7));
        match decode_current_pot_info(&data) {
            Err(CodecError::Arity { expected: 8, got: 7 }) => {}
            other => panic!("expected arity error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_nonzero_address_padding() {
        let mut padded = addr_word(ALICE);
        padded.replace_range(0..1, "f");
        let data = format!(
            "0x{}{}{}{}{}{}{}{}",
            uint_word(3),
            uint_word(0),
            uint_word(0),
            uint_word(0),
            padded,
            uint_word(0),
            uint_word(0),
            uint_word(0),
        );
        assert!(matches!(
            decode_current_pot_info(&data),
            Err(CodecError::OutOfRange("lastBidder"))
        ));
    }

    #[test]
    fn test_decode_rejects_non_boolean_flag() {
        let data = format!(
            "0x{}{}{}{}{}{}{}{}",
            uint_word(3),
            uint_word(0),
            uint_word(0),
            uint_word(0),
            addr_word(ALICE),
            uint_word(0),
            uint_word(0),
            uint_word(2), // not a bool
        );
        assert!(matches!(
            decode_current_pot_info(&data),
            Err(CodecError::OutOfRange("isActive"))
        ));
    }

    #[test]
    fn test_decode_rejects_unaligned_data() {
        assert!(matches!(
            decode_current_pot_info("0xabcd"),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_current_pot_details() {
        let data = format!(
            "0x{}{}{}{}{}{}{}{}{}{}{}{}",
            uint_word(7),                         // potId
            uint_word(3_000_000_000_000_000_000), // totalFunds
            uint_word(1_700_000_000),             // endTime
            uint_word(120),                       // timeRemaining
            uint_word(1_000_000_000_000_000_000), // lastBidAmount
            uint_word(1_100_000_000_000_000_000), // minimumNextBid
            addr_word(ALICE),                     // lastBidder
            addr_word(BOB),                       // topContributor
            uint_word(1_500_000_000_000_000_000), // topContributorAmount
            uint_word(4),                         // participantCount
            uint_word(1),                         // isActive
            uint_word(0),                         // hasEnded
        );

        let details = decode_current_pot_details(&data).unwrap();
        assert_eq!(details.pot_id, 7);
        assert_eq!(details.total_funds_formatted, "3");
        assert_eq!(details.minimum_next_bid_formatted, "1.1");
        assert_eq!(details.top_contributor_amount_formatted, "1.5");
        assert_eq!(details.participant_count, 4);
        assert!(details.is_active);
        assert!(!details.has_ended);
    }

    #[test]
    fn test_decode_pot_results() {
        let data = format!(
            "0x{}{}{}{}",
            uint_word(1_600_000_000),
            uint_word(1_600_604_800),
            addr_word(BOB),
            uint_word(4_200_000_000_000_000_000),
        );

        let entry = decode_pot_results(&data, 2).unwrap();
        assert_eq!(entry.pot_id, 2);
        assert_eq!(entry.start_time, 1_600_000_000);
        assert_eq!(entry.end_time, 1_600_604_800);
        assert_eq!(entry.winner.to_string().to_lowercase(), format!("0x{BOB}"));
        assert_eq!(entry.final_amount_formatted, "4.2");
    }

    #[test]
    fn test_decode_pending_single_word() {
        let data = format!("0x{}", uint_word(1_000_000_000_000_000));
        assert_eq!(decode_pending(&data).unwrap(), U256::from(1_000_000_000_000_000u128));
        assert!(decode_pending("0x").is_err());
    }

    #[test]
    fn test_decode_leaderboard() {
        // head: users at byte 64, amounts at byte 64 + 3*32 = 160
        let data = format!(
            "0x{}{}{}{}{}{}{}{}",
            uint_word(64),
            uint_word(160),
            uint_word(2), // users.length
            addr_word(ALICE),
            addr_word(BOB),
            uint_word(2), // amounts.length
            uint_word(2_000_000_000_000_000_000),
            uint_word(1_000_000_000_000_000_000),
        );

        let board = decode_leaderboard(&data, 5).unwrap();
        assert_eq!(board.pot_id, 5);
        assert_eq!(board.participant_count, 2);
        assert_eq!(board.entries[0].amount_formatted, "2");
        assert_eq!(board.entries[1].amount_formatted, "1");
        assert_eq!(
            board.entries[0].address.to_string().to_lowercase(),
            format!("0x{ALICE}")
        );
    }

    #[test]
    fn test_decode_leaderboard_pads_missing_amounts() {
        // amounts array shorter than users array
        let data = format!(
            "0x{}{}{}{}{}{}{}",
            uint_word(64),
            uint_word(160),
            uint_word(2),
            addr_word(ALICE),
            addr_word(BOB),
            uint_word(1),
            uint_word(2_000_000_000_000_000_000),
        );

        let board = decode_leaderboard(&data, 5).unwrap();
        assert_eq!(board.entries[1].amount_wei, U256::ZERO);
        assert_eq!(board.entries[1].amount_formatted, "0");
    }

    #[test]
    fn test_decode_leaderboard_rejects_truncated_array() {
        let data = format!(
            "0x{}{}{}{}",
            uint_word(64),
            uint_word(128),
            uint_word(9), // declared length far past the data
            addr_word(ALICE),
        );
        assert!(matches!(
            decode_leaderboard(&data, 1),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_leaderboard_empty() {
        let data = format!("0x{}{}{}{}", uint_word(64), uint_word(96), uint_word(0), uint_word(0));
        let board = decode_leaderboard(&data, 1).unwrap();
        assert!(board.entries.is_empty());
        assert_eq!(board.participant_count, 0);
    }
}
