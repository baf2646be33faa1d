//! Detection pipeline scenarios over fully serialised transactions

use atomic_swap_watch::detection::{
    analyse_raw_transaction, analyse_transaction_hex, classify_script, is_htlc_shaped,
    ScriptShape,
};
use atomic_swap_watch::types::SwapStep;
use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::common::fixtures::*;

#[test]
fn test_redeem_with_preimage_then_script() {
    let script = htlc_script();
    let raw = raw_transaction(&[vec![preimage(), script.clone()]], &[150_000]);

    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Redeem);
    assert_eq!(verdict.classification.script(), Some(script.as_slice()));
    assert_eq!(verdict.txid, txid_of(&raw));
}

#[test]
fn test_refund_with_script_only() {
    let script = htlc_script();
    let raw = raw_transaction(&[vec![script.clone()]], &[150_000]);

    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Refund);
    assert_eq!(verdict.classification.script(), Some(script.as_slice()));
}

#[test]
fn test_full_refund_witness_is_refund() {
    let raw = raw_transaction(&[refund_witness()], &[99_000]);
    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Refund);
}

#[test]
fn test_full_redeem_witness_is_redeem() {
    let raw = raw_transaction(&[redeem_witness()], &[99_000]);
    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Redeem);
}

#[test]
fn test_hash160_sized_item_counts_as_preimage() {
    let raw = raw_transaction(&[vec![signature(), vec![0x99; 20], csv_htlc_script()]], &[1]);
    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Redeem);
}

#[test]
fn test_short_script_below_floor_is_unknown() {
    let script = short_htlc_script();
    assert!(is_htlc_shaped(&script));

    let raw = raw_transaction(&[vec![preimage(), script]], &[10_000]);
    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Unknown);
    assert!(verdict.classification.matched.is_none());
}

#[test]
fn test_no_witness_anywhere_is_unknown() {
    let raw = raw_transaction(&[vec![], vec![]], &[1_000, 2_000]);
    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Unknown);
    assert!(verdict.classification.script().is_none());
    assert_eq!(verdict.amount.sats, 3_000);
}

#[test]
fn test_ordinary_spends_are_unknown() {
    let raw = raw_transaction(
        &[p2wpkh_witness(), vec![signature(), plain_script()]],
        &[5_000],
    );
    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Unknown);
}

#[test]
fn test_lowest_index_htlc_input_decides() {
    // Input 0 is an ordinary spend, input 1 refunds, input 2 redeems.
    let raw = raw_transaction(
        &[p2wpkh_witness(), refund_witness(), redeem_witness()],
        &[10_000],
    );

    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Refund);
    let matched = verdict.classification.matched.unwrap();
    assert_eq!(matched.input_index, 1);
    assert_eq!(matched.script, htlc_script());
}

#[test]
fn test_preimage_on_other_input_is_ignored() {
    let raw = raw_transaction(
        &[vec![htlc_script()], vec![preimage(), vec![0x02; 33]]],
        &[10_000],
    );
    let verdict = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(verdict.step(), SwapStep::Refund);
}

#[test]
fn test_lock_is_never_produced() {
    let fixtures = [
        raw_transaction(&[redeem_witness()], &[1]),
        raw_transaction(&[refund_witness()], &[1]),
        raw_transaction(&[vec![]], &[1]),
        raw_transaction(&[p2wpkh_witness()], &[1]),
    ];
    for raw in fixtures {
        assert_ne!(analyse_raw_transaction(&raw).unwrap().step(), SwapStep::Lock);
    }
}

#[test]
fn test_classification_is_idempotent() {
    let raw = raw_transaction(&[p2wpkh_witness(), redeem_witness()], &[42, 58]);
    let first = analyse_raw_transaction(&raw).unwrap();
    let second = analyse_raw_transaction(&raw).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_hex_and_bytes_agree() {
    let witnesses = [redeem_witness()];
    let raw = raw_transaction(&witnesses, &[7]);
    let hex = transaction_hex(&witnesses, &[7]);

    assert_eq!(
        analyse_raw_transaction(&raw).unwrap(),
        analyse_transaction_hex(&hex).unwrap()
    );
}

#[test]
fn test_amount_is_exact_decimal() {
    let cases = [
        (vec![0u64], "0"),
        (vec![1], "0.00000001"),
        (vec![60_000_000, 40_000_000], "1"),
        (vec![u64::MAX], "184467440737.09551615"),
    ];

    for (values, expected) in cases {
        let raw = raw_transaction(&[redeem_witness()], &values);
        let verdict = analyse_raw_transaction(&raw).unwrap();
        assert_eq!(
            verdict.amount.to_btc(),
            BigDecimal::from_str(expected).unwrap(),
            "outputs {:?}",
            values
        );
    }
}

#[test]
fn test_amount_overflow_is_malformed() {
    let raw = raw_transaction(&[redeem_witness()], &[u64::MAX, 1]);
    assert!(analyse_raw_transaction(&raw).is_err());
}

#[test]
fn test_script_opcode_order_is_irrelevant() {
    assert_eq!(classify_script(&htlc_script()), ScriptShape::Shaped);
    assert_eq!(classify_script(&csv_htlc_script()), ScriptShape::Shaped);
    assert_eq!(classify_script(&plain_script()), ScriptShape::NotShaped);
}

#[test]
fn test_truncated_push_in_script_is_not_shaped() {
    let mut script = htlc_script();
    // PUSHDATA1 claiming 200 bytes that are not there
    script.extend_from_slice(&[0x4c, 0xc8, 0x00]);
    assert_eq!(classify_script(&script), ScriptShape::NotShaped);

    let raw = raw_transaction(&[vec![preimage(), script]], &[1]);
    assert_eq!(analyse_raw_transaction(&raw).unwrap().step(), SwapStep::Unknown);
}
