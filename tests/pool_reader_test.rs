//! End-to-end pool read aggregation against a scripted transport

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use pairlens::domain::abi::RawWord;
use pairlens::infrastructure::explorer::{CallError, EthCallTransport, PoolReader};

const POOL: &str = "0x8ad599c3A0ff1De082011EFDDc58f1908eb6e6D8";

const SEL_FEE: &str = "0xddca3f43";
const SEL_TOKEN0: &str = "0x0dfe1681";
const SEL_TOKEN1: &str = "0xd21220a7";
const SEL_LIQUIDITY: &str = "0x1a686502";
const SEL_TICK_SPACING: &str = "0xd0c93a7c";
const SEL_SLOT0: &str = "0x3850c7bd";

const TOKEN0_ADDR: &str = "A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
const TOKEN1_ADDR: &str = "C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

/// Canned transport: a word per selector, plus a set of selectors that fail.
struct ScriptedTransport {
    words: HashMap<&'static str, String>,
    failing: HashSet<&'static str>,
}

impl ScriptedTransport {
    fn healthy() -> Self {
        let mut words = HashMap::new();
        // fee() = 3000 (0xbb8)
        words.insert(SEL_FEE, format!("0x{:0>64}", "bb8"));
        words.insert(SEL_TOKEN0, format!("0x{:0>64}", TOKEN0_ADDR));
        words.insert(SEL_TOKEN1, format!("0x{:0>64}", TOKEN1_ADDR));
        // liquidity() = 1,000,000,000 (0x3b9aca00)
        words.insert(SEL_LIQUIDITY, format!("0x{:0>64}", "3b9aca00"));
        // tickSpacing() = 60 (0x3c)
        words.insert(SEL_TICK_SPACING, format!("0x{:0>64}", "3c"));
        // slot0: 40-nibble body whose value is sqrtPriceX96 = 2^96
        let sqrt_price_hex = format!("1{}", "0".repeat(24));
        words.insert(SEL_SLOT0, format!("0x{:0>40}", sqrt_price_hex));
        Self {
            words,
            failing: HashSet::new(),
        }
    }

    fn with_failure(mut self, selector: &'static str) -> Self {
        self.failing.insert(selector);
        self
    }

    fn all_failing() -> Self {
        let mut scripted = Self::healthy();
        scripted.failing = scripted.words.keys().copied().collect();
        scripted
    }
}

#[async_trait]
impl EthCallTransport for ScriptedTransport {
    async fn eth_call(&self, _to: &str, selector: &str) -> Result<RawWord, CallError> {
        if self.failing.contains(selector) {
            return Err(CallError::Transport("simulated transport error".into()));
        }
        self.words
            .get(selector)
            .map(|hex| RawWord::new(hex.clone()))
            .ok_or(CallError::EmptyResult)
    }
}

fn reader(transport: ScriptedTransport) -> PoolReader {
    PoolReader::new(Arc::new(transport)).with_call_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_healthy_pool_assembles_full_record() {
    let info = reader(ScriptedTransport::healthy())
        .fetch_pool_info(POOL)
        .await
        .expect("should assemble record");

    assert_eq!(info.fee, "3000");
    assert_eq!(info.fee_percentage, 0.3);
    assert_eq!(info.token0, format!("0x{TOKEN0_ADDR}"));
    assert_eq!(info.token1, format!("0x{TOKEN1_ADDR}"));
    assert_eq!(info.liquidity, "1000000000");
    assert_eq!(info.tick_spacing, "60");
    // 2^96
    assert_eq!(info.sqrt_price_x96, "79228162514264337593543950336");
}

#[tokio::test]
async fn test_single_failure_defaults_that_field_to_zero() {
    let info = reader(ScriptedTransport::healthy().with_failure(SEL_LIQUIDITY))
        .fetch_pool_info(POOL)
        .await
        .expect("one failed call must not sink the record");

    assert_eq!(info.liquidity, "0");
    // Everything else still decodes.
    assert_eq!(info.fee, "3000");
    assert_eq!(info.tick_spacing, "60");
    assert_eq!(info.token0, format!("0x{TOKEN0_ADDR}"));
}

#[tokio::test]
async fn test_failed_address_call_yields_zero_address() {
    let info = reader(ScriptedTransport::healthy().with_failure(SEL_TOKEN1))
        .fetch_pool_info(POOL)
        .await
        .unwrap();

    assert_eq!(info.token1, format!("0x{}", "0".repeat(40)));
}

#[tokio::test]
async fn test_negative_tick_spacing() {
    let mut transport = ScriptedTransport::healthy();
    // low 24 bits 0xfffffe = -2 in two's complement
    transport
        .words
        .insert(SEL_TICK_SPACING, format!("0x{:0>64}", "fffffe"));

    let info = reader(transport).fetch_pool_info(POOL).await.unwrap();
    assert_eq!(info.tick_spacing, "-2");
}

#[tokio::test]
async fn test_all_calls_failing_is_a_single_error() {
    let err = reader(ScriptedTransport::all_failing())
        .fetch_pool_info(POOL)
        .await
        .expect_err("fully unreachable pool must error");

    assert!(err
        .to_string()
        .contains("unable to retrieve contract information"));
}
