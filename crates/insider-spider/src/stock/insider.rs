use crate::stock::sec::filings::Filing;
use crate::stock::sec::form4::Transaction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Transaction code of an open-market purchase.
pub const BUY: &str = "P";

/// Transaction code of an open-market sale.
pub const SELL: &str = "S";

/// Per-issuer summary of insider transactions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerAggregate {
    pub issuer_symbol: String,
    /// Transactions with a known share count.
    pub n_transactions: u64,
    pub total_shares: f64,
    pub buys: f64,
    pub sells: f64,
}

/// Group transactions by issuer symbol, busiest issuers first.
///
/// Transactions without a share count still put their issuer on the list, but add nothing to
/// it. Share counts are summed in ascending order and ties on count and total shares are broken
/// by symbol, so the result does not depend on the order of `transactions`.
pub fn aggregate_by_issuer(transactions: &[Transaction]) -> Vec<IssuerAggregate> {
    let mut issuers: BTreeMap<&str, IssuerShares> = BTreeMap::new();
    for transaction in transactions {
        let shares = issuers
            .entry(transaction.issuer_symbol.as_str())
            .or_default();

        if let Some(count) = transaction.shares {
            shares.all.push(count);
            match transaction.transaction_code.as_str() {
                BUY => shares.buys.push(count),
                SELL => shares.sells.push(count),
                _ => (),
            }
        }
    }

    let mut issuers: Vec<IssuerAggregate> = issuers
        .into_iter()
        .map(|(symbol, shares)| IssuerAggregate {
            issuer_symbol: symbol.to_string(),
            n_transactions: shares.all.len() as u64,
            total_shares: sum_ordered(shares.all),
            buys: sum_ordered(shares.buys),
            sells: sum_ordered(shares.sells),
        })
        .collect();
    issuers.sort_by(|a, b| {
        b.n_transactions
            .cmp(&a.n_transactions)
            .then_with(|| b.total_shares.total_cmp(&a.total_shares))
            .then_with(|| a.issuer_symbol.cmp(&b.issuer_symbol))
    });
    issuers
}

// known share counts of one issuer, before summing
#[derive(Default)]
struct IssuerShares {
    all: Vec<f64>,
    buys: Vec<f64>,
    sells: Vec<f64>,
}

// float addition is not associative; a fixed order gives the same total for any input order
fn sum_ordered(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().fold(0.0, |total, value| total + value)
}

/// Average number of filings per day, over the days that had any.
pub fn weekly_baseline(filings: &[Filing]) -> f64 {
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for filing in filings {
        *per_day.entry(filing.date).or_default() += 1;
    }

    if per_day.is_empty() {
        return 0.0;
    }
    filings.len() as f64 / per_day.len() as f64
}
