//! Common Test Utilities
//!
//! Fixture builders for swap transactions and scratch databases shared by the
//! unit and integration suites.

#![allow(dead_code)]

use bitcoin::absolute::LockTime;
use bitcoin::consensus::encode;
use bitcoin::hashes::Hash;
use bitcoin::opcodes::all::{
    OP_CHECKSIG, OP_CLTV, OP_CSV, OP_DROP, OP_ELSE, OP_ENDIF, OP_EQUALVERIFY, OP_HASH160, OP_IF,
    OP_SHA256,
};
use bitcoin::script::Builder;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness};

/// Scratch database helpers
pub mod database {
    use atomic_swap_watch::database::Database;
    use tempfile::TempDir;

    /// File-backed test database removed when dropped
    pub struct TestDatabase {
        pub db: Database,
        dir: TempDir,
    }

    impl TestDatabase {
        pub fn new(test_name: &str) -> anyhow::Result<Self> {
            let dir = tempfile::Builder::new().prefix(test_name).tempdir()?;
            let db = Database::open(&dir.path().join("bot.db"))?;
            Ok(TestDatabase { db, dir })
        }

        pub fn path(&self) -> std::path::PathBuf {
            self.dir.path().join("bot.db")
        }

        pub fn database_mut(&mut self) -> &mut Database {
            &mut self.db
        }
    }
}

/// Transaction fixtures
pub mod fixtures {
    use super::*;

    /// Two-branch HTLC: hash-lock claim or CLTV timeout reclaim (> 40 bytes)
    pub fn htlc_script() -> Vec<u8> {
        Builder::new()
            .push_opcode(OP_IF)
            .push_opcode(OP_SHA256)
            .push_slice([0x5au8; 32])
            .push_opcode(OP_EQUALVERIFY)
            .push_slice([0x02u8; 33])
            .push_opcode(OP_ELSE)
            .push_int(800_000)
            .push_opcode(OP_CLTV)
            .push_opcode(OP_DROP)
            .push_slice([0x03u8; 33])
            .push_opcode(OP_ENDIF)
            .push_opcode(OP_CHECKSIG)
            .into_script()
            .into_bytes()
    }

    /// Same shape with HASH160 and a relative timelock, opcodes out of usual order
    pub fn csv_htlc_script() -> Vec<u8> {
        Builder::new()
            .push_int(144)
            .push_opcode(OP_CSV)
            .push_opcode(OP_DROP)
            .push_slice([0x04u8; 33])
            .push_opcode(OP_HASH160)
            .push_slice([0x6bu8; 20])
            .push_opcode(OP_EQUALVERIFY)
            .push_opcode(OP_CHECKSIG)
            .into_script()
            .into_bytes()
    }

    /// Plain pay-to-pubkey witness script: long enough, but no hash lock or timelock
    pub fn plain_script() -> Vec<u8> {
        Builder::new()
            .push_slice([0x02u8; 33])
            .push_opcode(OP_CHECKSIG)
            .push_slice([0x03u8; 33])
            .push_opcode(OP_CHECKSIG)
            .into_script()
            .into_bytes()
    }

    /// 30-byte script carrying all three HTLC opcode classes
    pub fn short_htlc_script() -> Vec<u8> {
        let mut script = vec![OP_SHA256.to_u8(), 0x14];
        script.extend_from_slice(&[0x77; 20]);
        script.push(OP_EQUALVERIFY.to_u8());
        script.push(0x05);
        script.extend_from_slice(&[0x01; 5]);
        script.push(OP_CLTV.to_u8());
        assert_eq!(script.len(), 30);
        script
    }

    /// A DER-ish signature placeholder (neither 20 nor 32 bytes)
    pub fn signature() -> Vec<u8> {
        vec![0x30; 71]
    }

    pub fn preimage() -> Vec<u8> {
        vec![0xab; 32]
    }

    /// Transaction with one input per witness stack and the given output values
    pub fn build_transaction(witnesses: &[Vec<Vec<u8>>], values: &[u64]) -> Transaction {
        let input = witnesses
            .iter()
            .enumerate()
            .map(|(vout, witness)| TxIn {
                previous_output: OutPoint {
                    txid: Txid::all_zeros(),
                    vout: vout as u32,
                },
                script_sig: ScriptBuf::new(),
                sequence: Sequence::ENABLE_LOCKTIME_NO_RBF,
                witness: Witness::from_slice(witness),
            })
            .collect();

        let output = values
            .iter()
            .map(|value| TxOut {
                value: Amount::from_sat(*value),
                script_pubkey: ScriptBuf::new(),
            })
            .collect();

        Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input,
            output,
        }
    }

    pub fn raw_transaction(witnesses: &[Vec<Vec<u8>>], values: &[u64]) -> Vec<u8> {
        encode::serialize(&build_transaction(witnesses, values))
    }

    pub fn transaction_hex(witnesses: &[Vec<Vec<u8>>], values: &[u64]) -> String {
        hex::encode(raw_transaction(witnesses, values))
    }

    pub fn txid_of(raw: &[u8]) -> String {
        let tx: Transaction = encode::deserialize(raw).expect("fixture decodes");
        tx.compute_txid().to_string()
    }

    /// Claim path: signature, preimage, selector, script
    pub fn redeem_witness() -> Vec<Vec<u8>> {
        vec![signature(), preimage(), vec![0x01], htlc_script()]
    }

    /// Timeout path: signature, empty selector, script
    pub fn refund_witness() -> Vec<Vec<u8>> {
        vec![signature(), vec![], htlc_script()]
    }

    /// Ordinary P2WPKH spend: signature and 33-byte pubkey
    pub fn p2wpkh_witness() -> Vec<Vec<u8>> {
        vec![signature(), vec![0x02; 33]]
    }
}
