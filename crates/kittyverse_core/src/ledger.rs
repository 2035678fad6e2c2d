//! # Fee Ledger
//!
//! Breeding fees are pulled from the payer's fungible balance. The engine
//! never holds custody on its own: the payer first approves an allowance
//! for the engine, then the engine collects at most that allowance.
//!
//! The token contract itself lives outside this crate. [`TokenLedger`] is
//! the in-memory implementation used by the demo and the tests.

use alloy_primitives::{Address, U256};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Fungible balance interface the engine collects fees through.
pub trait FeeLedger: Send {
    /// Amount the engine may collect from `payer` right now:
    /// `min(balance, allowance granted to the engine)`.
    fn available(&self, payer: Address) -> U256;

    /// Moves `amount` from `payer` to the fee treasury.
    ///
    /// # Errors
    ///
    /// `InsufficientFee` if `available(payer) < amount`. Nothing moves.
    fn collect(&mut self, payer: Address, amount: U256) -> EngineResult<()>;

    /// Returns a previously collected `amount` to `payer`.
    fn refund(&mut self, payer: Address, amount: U256);
}

impl<L: FeeLedger + ?Sized> FeeLedger for Box<L> {
    fn available(&self, payer: Address) -> U256 {
        (**self).available(payer)
    }

    fn collect(&mut self, payer: Address, amount: U256) -> EngineResult<()> {
        (**self).collect(payer, amount)
    }

    fn refund(&mut self, payer: Address, amount: U256) {
        (**self).refund(payer, amount);
    }
}

/// In-memory ERC-20 style ledger: balances plus allowances toward the engine.
#[derive(Clone, Debug, Default)]
pub struct TokenLedger {
    balances: HashMap<Address, U256>,
    allowances: HashMap<Address, U256>,
    treasury: U256,
}

impl TokenLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits freshly minted tokens.
    pub fn mint(&mut self, to: Address, amount: U256) {
        let balance = self.balances.entry(to).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Sets the allowance `owner` grants the engine. Replaces, not adds.
    pub fn approve(&mut self, owner: Address, amount: U256) {
        self.allowances.insert(owner, amount);
    }

    /// Token balance.
    #[must_use]
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    /// Remaining allowance toward the engine.
    #[must_use]
    pub fn allowance(&self, owner: Address) -> U256 {
        self.allowances.get(&owner).copied().unwrap_or_default()
    }

    /// Fees collected and not refunded.
    #[must_use]
    pub const fn treasury(&self) -> U256 {
        self.treasury
    }
}

impl FeeLedger for TokenLedger {
    fn available(&self, payer: Address) -> U256 {
        self.balance_of(payer).min(self.allowance(payer))
    }

    fn collect(&mut self, payer: Address, amount: U256) -> EngineResult<()> {
        let available = self.available(payer);
        if available < amount {
            return Err(EngineError::InsufficientFee {
                required: amount,
                available,
            });
        }

        // available <= both, so neither subtraction can underflow
        self.balances.insert(payer, self.balance_of(payer) - amount);
        self.allowances.insert(payer, self.allowance(payer) - amount);
        self.treasury = self.treasury.saturating_add(amount);
        Ok(())
    }

    fn refund(&mut self, payer: Address, amount: U256) {
        self.treasury = self.treasury.saturating_sub(amount);
        self.mint(payer, amount);
        let allowance = self.allowances.entry(payer).or_default();
        *allowance = allowance.saturating_add(amount);
    }
}
