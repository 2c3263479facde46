use crate::domain::trader::Trader;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct TraderRecord<'a> {
    name: &'a str,
    company: &'a str,
    balance: String,
    occupied: u64,
    capacity: u32,
    bankrupt: bool,
}

impl<'a> TraderRecord<'a> {
    fn new(trader: &'a Trader, bankrupt: bool) -> Self {
        Self {
            name: &trader.name,
            company: &trader.company,
            balance: trader.account_balance.to_string(),
            occupied: trader.occupied_units(),
            capacity: trader.max_storage_capacity,
            bankrupt,
        }
    }
}

/// Writes the final state of traders as CSV.
pub struct TraderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TraderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Active traders first, then bankrupt ones, each in store order.
    pub fn write_traders(&mut self, active: &[Trader], bankrupt: &[Trader]) -> Result<()> {
        for trader in active {
            self.writer.serialize(TraderRecord::new(trader, false))?;
        }
        for trader in bankrupt {
            self.writer.serialize(TraderRecord::new(trader, true))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
