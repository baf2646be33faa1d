use crate::types::{SwapAmount, SwapStep};
use crate::utils::currency::{format_btc, format_decimal};
use bigdecimal::BigDecimal;

/// Decimal places shown for the converted XMR amount
pub const XMR_DISPLAY_PLACES: u32 = 4;

/// Format an alert about a detected swap candidate
pub fn format_swap_message(
    txid: &str,
    amount: SwapAmount,
    xmr_amount: &BigDecimal,
    step: SwapStep,
    explorer_url: &str,
) -> String {
    format!(
        "BTC↔XMR atomic swap (candidate)\n\
         txid: {txid}\n\
         amount: {btc} BTC ≈ {xmr} XMR (current rate)\n\
         step: {step}\n\
         {explorer_url}{txid}",
        btc = format_btc(amount.sats),
        xmr = format_decimal(xmr_amount, XMR_DISPLAY_PLACES),
    )
}
