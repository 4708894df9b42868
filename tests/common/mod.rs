//! Call-counting collaborators for pipeline tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use confidential_sender::blockchain::{
    BlockchainError, BlockchainResult, ChainId, Dialer, LedgerSession, SignedTransaction,
};
use confidential_sender::envelope::{
    EnvelopeCipher, EnvelopeError, EnvelopeProvider, EnvelopeResult,
};
use confidential_sender::pipeline::{RawTransferRequest, TransactionSender};

/// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_SENDER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const TEST_RECIPIENT: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

pub const TEST_CHAIN_ID: u64 = 0x5aff;
pub const PENDING_NONCE: u64 = 42;
pub const SUGGESTED_GAS_PRICE: u128 = 100_000_000_000;

/// How many times each collaborator method ran.
#[derive(Debug, Default)]
pub struct Calls {
    pub dial: AtomicU32,
    pub pending_nonce: AtomicU32,
    pub network_id: AtomicU32,
    pub suggest_gas_price: AtomicU32,
    pub send_transaction: AtomicU32,
    pub new_cipher: AtomicU32,
    pub encrypt: AtomicU32,
}

pub fn count(counter: &AtomicU32) -> u32 {
    counter.load(Ordering::SeqCst)
}

fn bump(counter: &AtomicU32) {
    counter.fetch_add(1, Ordering::SeqCst);
}

fn rpc_down(method: &str) -> BlockchainError {
    BlockchainError::Rpc(format!("{method}: connection refused"))
}

/// Scripted node behavior. `None` makes the call fail.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub dial_ok: bool,
    pub nonce: Option<u64>,
    pub chain_id: Option<u64>,
    pub gas_price: Option<u128>,
    pub accept: bool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            dial_ok: true,
            nonce: Some(PENDING_NONCE),
            chain_id: Some(TEST_CHAIN_ID),
            gas_price: Some(SUGGESTED_GAS_PRICE),
            accept: true,
        }
    }
}

pub struct MockDialer {
    ledger: Ledger,
    calls: Arc<Calls>,
    sent: Arc<Mutex<Vec<SignedTransaction>>>,
}

pub struct MockSession {
    ledger: Ledger,
    calls: Arc<Calls>,
    sent: Arc<Mutex<Vec<SignedTransaction>>>,
}

impl Dialer for MockDialer {
    type Session = MockSession;

    async fn dial(&self, url: &str) -> BlockchainResult<MockSession> {
        bump(&self.calls.dial);
        if !self.ledger.dial_ok {
            return Err(BlockchainError::InvalidUrl {
                url: url.to_string(),
                reason: "unreachable".to_string(),
            });
        }
        Ok(MockSession {
            ledger: self.ledger.clone(),
            calls: self.calls.clone(),
            sent: self.sent.clone(),
        })
    }
}

impl LedgerSession for MockSession {
    async fn pending_nonce(&self, _address: Address) -> BlockchainResult<u64> {
        bump(&self.calls.pending_nonce);
        self.ledger.nonce.ok_or_else(|| rpc_down("eth_getTransactionCount"))
    }

    async fn network_id(&self) -> BlockchainResult<ChainId> {
        bump(&self.calls.network_id);
        self.ledger
            .chain_id
            .map(ChainId)
            .ok_or_else(|| rpc_down("net_version"))
    }

    async fn suggest_gas_price(&self) -> BlockchainResult<u128> {
        bump(&self.calls.suggest_gas_price);
        self.ledger.gas_price.ok_or_else(|| rpc_down("eth_gasPrice"))
    }

    async fn send_transaction(&self, tx: &SignedTransaction) -> BlockchainResult<()> {
        bump(&self.calls.send_transaction);
        if !self.ledger.accept {
            return Err(BlockchainError::Rpc("nonce too low".to_string()));
        }
        self.sent.lock().unwrap().push(tx.clone());
        Ok(())
    }
}

/// How the envelope collaborator reacts to `new_cipher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeMode {
    Working,
    FailConstruct,
    /// Panics if the pipeline touches the envelope at all.
    Forbidden,
}

pub struct MockEnvelope {
    mode: EnvelopeMode,
    calls: Arc<Calls>,
    chain_ids: Arc<Mutex<Vec<ChainId>>>,
    plaintexts: Arc<Mutex<Vec<Vec<u8>>>>,
}

pub struct MockCipher {
    calls: Arc<Calls>,
    plaintexts: Arc<Mutex<Vec<Vec<u8>>>>,
}

/// Deterministic stand-in for envelope ciphertext.
pub fn mock_seal(plaintext: &[u8]) -> Vec<u8> {
    let mut out = b"sealed:".to_vec();
    out.extend(plaintext.iter().map(|b| b ^ 0xff));
    out
}

impl EnvelopeCipher for MockCipher {
    fn encrypt_encode(&self, plaintext: &[u8]) -> EnvelopeResult<Vec<u8>> {
        bump(&self.calls.encrypt);
        self.plaintexts.lock().unwrap().push(plaintext.to_vec());
        Ok(mock_seal(plaintext))
    }
}

impl EnvelopeProvider for MockEnvelope {
    type Cipher = MockCipher;

    async fn new_cipher(&self, chain_id: ChainId) -> EnvelopeResult<MockCipher> {
        bump(&self.calls.new_cipher);
        self.chain_ids.lock().unwrap().push(chain_id);
        match self.mode {
            EnvelopeMode::Forbidden => panic!("envelope must not be used for this call"),
            EnvelopeMode::FailConstruct => Err(EnvelopeError::UnknownNetwork(chain_id)),
            EnvelopeMode::Working => Ok(MockCipher {
                calls: self.calls.clone(),
                plaintexts: self.plaintexts.clone(),
            }),
        }
    }
}

/// A sender wired to mocks, plus handles to inspect what happened.
pub struct Harness {
    pub sender: TransactionSender<MockDialer, MockEnvelope>,
    pub calls: Arc<Calls>,
    pub sent: Arc<Mutex<Vec<SignedTransaction>>>,
    pub cipher_chain_ids: Arc<Mutex<Vec<ChainId>>>,
    pub plaintexts: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Harness {
    pub fn new(ledger: Ledger, mode: EnvelopeMode) -> Self {
        let calls = Arc::new(Calls::default());
        let sent = Arc::new(Mutex::new(Vec::new()));
        let cipher_chain_ids = Arc::new(Mutex::new(Vec::new()));
        let plaintexts = Arc::new(Mutex::new(Vec::new()));

        let dialer = MockDialer {
            ledger,
            calls: calls.clone(),
            sent: sent.clone(),
        };
        let envelope = MockEnvelope {
            mode,
            calls: calls.clone(),
            chain_ids: cipher_chain_ids.clone(),
            plaintexts: plaintexts.clone(),
        };

        Self {
            sender: TransactionSender::new(dialer, envelope),
            calls,
            sent,
            cipher_chain_ids,
            plaintexts,
        }
    }

    /// The single broadcast transaction.
    pub fn only_sent(&self) -> SignedTransaction {
        let sent = self.sent.lock().unwrap();
        assert_eq!(sent.len(), 1, "expected exactly one broadcast");
        sent[0].clone()
    }

    /// No collaborator method ran more than once.
    pub fn assert_each_called_at_most_once(&self) {
        let calls = &self.calls;
        for (name, counter) in [
            ("dial", &calls.dial),
            ("pending_nonce", &calls.pending_nonce),
            ("network_id", &calls.network_id),
            ("suggest_gas_price", &calls.suggest_gas_price),
            ("send_transaction", &calls.send_transaction),
            ("new_cipher", &calls.new_cipher),
            ("encrypt", &calls.encrypt),
        ] {
            assert!(count(counter) <= 1, "{name} called {} times", count(counter));
        }
    }
}

/// value=1 gwei, gas limit 21000, no payload, 10 gwei, nonce 5.
pub fn transfer_request() -> RawTransferRequest {
    RawTransferRequest {
        private_key: TEST_PRIVATE_KEY.to_string(),
        from: TEST_SENDER.to_string(),
        to: TEST_RECIPIENT.to_string(),
        rpc_url: "http://localhost:8545".to_string(),
        value_gwei: 1,
        gas_limit: 21_000,
        payload_hex: String::new(),
        gas_price_gwei: 10,
        nonce: 5,
    }
}
