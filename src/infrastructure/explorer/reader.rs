//! Sequential pool read aggregation

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::transport::EthCallTransport;
use crate::domain::abi::{
    decode_address, decode_int24, decode_uint, decode_uint24, decode_word, slice_word, RawWord,
    UintWidth,
};
use crate::domain::pool::PoolContractInfo;

/// Function selectors for the pool read set.
const SELECTOR_FEE: &str = "0xddca3f43"; // fee()
const SELECTOR_TOKEN0: &str = "0x0dfe1681"; // token0()
const SELECTOR_TOKEN1: &str = "0xd21220a7"; // token1()
const SELECTOR_LIQUIDITY: &str = "0x1a686502"; // liquidity()
const SELECTOR_TICK_SPACING: &str = "0xd0c93a7c"; // tickSpacing()
const SELECTOR_SLOT0: &str = "0x3850c7bd"; // slot0()

const READ_SET: [&str; 6] = [
    SELECTOR_FEE,
    SELECTOR_TOKEN0,
    SELECTOR_TOKEN1,
    SELECTOR_LIQUIDITY,
    SELECTOR_TICK_SPACING,
    SELECTOR_SLOT0,
];

/// Fee comes back in hundredths of a basis point. This scaling constant is
/// specific to the pool contract's fee encoding and must not be reused for
/// anything else.
const FEE_SCALE: f64 = 10_000.0;

/// The free explorer tier allows 5 calls/sec; 250ms between calls keeps the
/// sequence at 4/sec.
const INTER_CALL_DELAY: Duration = Duration::from_millis(250);

/// Nibble range of the sqrt price within the slot state return: the first
/// 160 bits of the body as returned, unpadded.
const SQRT_PRICE_NIBBLES: usize = 40;

/// Issues the fixed six-call read set against one pool contract and
/// assembles the decoded fields into a [`PoolContractInfo`].
pub struct PoolReader {
    transport: Arc<dyn EthCallTransport>,
    call_delay: Duration,
}

impl PoolReader {
    pub fn new(transport: Arc<dyn EthCallTransport>) -> Self {
        Self {
            transport,
            call_delay: INTER_CALL_DELAY,
        }
    }

    /// Override the inter-call delay. Tests use zero.
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = delay;
        self
    }

    /// Read the six pool parameters and assemble them into one record.
    ///
    /// Calls run strictly one after another to stay under the provider's
    /// rate ceiling. A failed call is substituted with the zero word and
    /// decoding proceeds, so a partially unreachable pool still yields a
    /// complete record; "unavailable" and "actually zero" are therefore
    /// indistinguishable in the result. Only when every call fails does
    /// this return an error.
    pub async fn fetch_pool_info(&self, pool_address: &str) -> Result<PoolContractInfo> {
        let mut words: Vec<RawWord> = Vec::with_capacity(READ_SET.len());
        let mut failures = 0usize;

        for (index, selector) in READ_SET.into_iter().enumerate() {
            if index > 0 && !self.call_delay.is_zero() {
                tokio::time::sleep(self.call_delay).await;
            }
            match self.transport.eth_call(pool_address, selector).await {
                Ok(word) => words.push(word),
                Err(err) => {
                    tracing::warn!(selector, %err, "pool read failed, substituting zero word");
                    failures += 1;
                    words.push(RawWord::zero());
                }
            }
        }

        if failures == READ_SET.len() {
            return Err(anyhow!(
                "unable to retrieve contract information for {pool_address}"
            ));
        }

        let fee = decode_uint24(&words[0]);
        let token0 = decode_address(&words[1]);
        let token1 = decode_address(&words[2]);
        let liquidity = decode_uint(&words[3], UintWidth::U128);
        let tick_spacing = decode_int24(&words[4]);
        let sqrt_price_x96 = decode_word(&slice_word(&words[5], 0, SQRT_PRICE_NIBBLES));

        Ok(PoolContractInfo {
            fee: fee.to_string(),
            fee_percentage: f64::from(fee) / FEE_SCALE,
            token0,
            token1,
            liquidity: liquidity.to_string(),
            tick_spacing: tick_spacing.to_string(),
            sqrt_price_x96: sqrt_price_x96.to_string(),
        })
    }
}
