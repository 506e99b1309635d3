use chrono::NaiveDate;
use insider_spider::stock::insider::{aggregate_by_issuer, weekly_baseline, IssuerAggregate};
use insider_spider::stock::sec::filings::Filing;
use insider_spider::stock::sec::form4::Transaction;
use insider_spider::stock::sec::index::FilingRecord;

fn transaction(symbol: &str, code: &str, shares: Option<f64>) -> Transaction {
    Transaction {
        issuer_symbol: symbol.to_string(),
        issuer_name: format!("{symbol} INC"),
        transaction_code: code.to_string(),
        shares,
        price: Some(1.0),
        date: NaiveDate::from_ymd_opt(2025, 1, 2),
        ownership: Some("D".to_string()),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        transaction("AAA", "P", Some(100.0)),
        transaction("BBB", "S", Some(500.0)),
        transaction("AAA", "S", Some(40.0)),
        transaction("CCC", "A", Some(500.0)),
        transaction("AAA", "M", None),
        transaction("DDD", "P", None),
        transaction("", "P", Some(7.0)),
    ]
}

#[test]
fn aggregates_per_issuer() {
    let issuers = aggregate_by_issuer(&sample());
    assert_eq!(
        issuers
            .iter()
            .map(|issuer| issuer.issuer_symbol.as_str())
            .collect::<Vec<_>>(),
        vec!["AAA", "BBB", "CCC", "", "DDD"]
    );
    assert_eq!(
        issuers[0],
        IssuerAggregate {
            issuer_symbol: "AAA".to_string(),
            n_transactions: 2,
            total_shares: 140.0,
            buys: 100.0,
            sells: 40.0,
        }
    );
    assert_eq!(issuers[1].sells, 500.0);
    assert_eq!(issuers[2].buys + issuers[2].sells, 0.0);
    assert_eq!(issuers[4].n_transactions, 0);
    assert_eq!(issuers[4].total_shares, 0.0);
}

#[test]
fn aggregation_ignores_row_order() {
    let forward = aggregate_by_issuer(&sample());

    let mut reversed = sample();
    reversed.reverse();
    assert_eq!(aggregate_by_issuer(&reversed), forward);

    let mut rotated = sample();
    rotated.rotate_left(3);
    assert_eq!(aggregate_by_issuer(&rotated), forward);
}

#[test]
fn fractional_shares_ignore_row_order() {
    // dividend reinvestment and withholding leave fractional share counts
    let fractional = vec![
        transaction("XYZ", "P", Some(0.1)),
        transaction("XYZ", "P", Some(0.2)),
        transaction("XYZ", "P", Some(0.3)),
        transaction("XYZ", "S", Some(0.7)),
        transaction("XYZ", "S", Some(1e16)),
        transaction("XYZ", "S", Some(1.0)),
    ];
    let forward = aggregate_by_issuer(&fractional);

    let mut reversed = fractional.clone();
    reversed.reverse();
    assert_eq!(aggregate_by_issuer(&reversed), forward);

    let mut shuffled = fractional.clone();
    shuffled.swap(0, 4);
    shuffled.swap(1, 5);
    assert_eq!(aggregate_by_issuer(&shuffled), forward);

    assert_eq!(forward[0].n_transactions, 6);
    assert!((forward[0].buys - 0.6).abs() < 1e-12);
}

#[test]
fn aggregates_serialize_camel_case() {
    let issuers = aggregate_by_issuer(&sample());
    let json = serde_json::to_value(&issuers[0]).unwrap();
    assert_eq!(json["issuerSymbol"], "AAA");
    assert_eq!(json["nTransactions"], 2);
    assert_eq!(json["totalShares"], 140.0);
    assert_eq!(json["buys"], 100.0);
    assert_eq!(json["sells"], 40.0);
}

#[test]
fn empty_inputs() {
    assert!(aggregate_by_issuer(&[]).is_empty());
    assert_eq!(weekly_baseline(&[]), 0.0);
}

#[test]
fn baseline_averages_days_with_filings() {
    let filing = |day: u32| {
        Filing::new(
            FilingRecord {
                cik: "1".to_string(),
                company_name: "A CORP".to_string(),
                form_type: "4".to_string(),
                date_filed: format!("202501{day:02}"),
                filename: format!("edgar/data/1/0000000001-25-0000{day:02}.txt"),
            },
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
        )
    };

    // 3 filings on the 2nd, 1 on the 3rd, nothing on the weekend
    let filings = vec![filing(2), filing(2), filing(3), filing(2)];
    assert_eq!(weekly_baseline(&filings), 2.0);
}
