use super::filings::Filing;
use crate::http::Spider;
use crate::stock::common::{parse_date, parse_number};
use crate::{tui, Result};
use chrono::NaiveDate;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// scrape
// ----------------------------------------------------------------------------

impl Spider {
    /// Fetch and parse a single Form 4 document.
    pub async fn form4(&self, url: &str) -> Result<Form4> {
        let body = self.get(url, self.config().document_delay).await?;
        parse_form4(&String::from_utf8_lossy(&body))
    }

    /// Parse the transactions of up to `max_filings` filings, in order.
    ///
    /// Filings whose document cannot be located, fetched or parsed are skipped and do not count
    /// towards `max_filings`.
    pub async fn transactions(
        &self,
        filings: &[Filing],
        max_filings: usize,
        tui: bool,
    ) -> Vec<Transaction> {
        let time = std::time::Instant::now();
        let pb = tui::progress_bar(filings.len().min(max_filings), "form 4 documents", tui);

        let mut parsed = 0;
        let mut transactions = Vec::new();
        for filing in filings {
            if parsed >= max_filings {
                debug!("reached the limit of {max_filings} form 4 documents");
                break;
            }

            let url = match self
                .locate_form4(&filing.record.cik, &filing.record.filename)
                .await
            {
                Ok(Some(url)) => url,
                Ok(None) => {
                    debug!("no form 4 document in {}", filing.record.filename);
                    continue;
                }
                Err(err) => {
                    warn!("skipping {}, error({err})", filing.record.filename);
                    continue;
                }
            };

            match self.form4(&url).await {
                Ok(form4) => {
                    transactions.extend(form4.transactions);
                    parsed += 1;
                    pb.inc(1);
                }
                Err(err) => warn!("skipping form 4 document at {url}, error({err})"),
            }
        }
        pb.finish_and_clear();

        info!(
            "parsed {parsed} form 4 documents into {} transactions, {}",
            transactions.len(),
            crate::time_elapsed(time)
        );
        transactions
    }
}

// de
// ----------------------------------------------------------------------------

// <ownershipDocument>
//     <issuer>
//         <issuerCik>0000320193</issuerCik>
//         <issuerName>Apple Inc.</issuerName>
//         <issuerTradingSymbol>AAPL</issuerTradingSymbol>
//     </issuer>
//     <nonDerivativeTable>
//         <nonDerivativeTransaction>
//             <transactionDate><value>2025-01-02</value></transactionDate>
//             <transactionCoding><transactionCode>S</transactionCode></transactionCoding>
//             <transactionAmounts>
//                 <transactionShares><value>1000</value></transactionShares>
//                 <transactionPricePerShare><value>243.85</value></transactionPricePerShare>
//             </transactionAmounts>
//             <ownershipNature>
//                 <directOrIndirectOwnership><value>D</value></directOrIndirectOwnership>
//             </ownershipNature>
//         </nonDerivativeTransaction>
//     </nonDerivativeTable>
// </ownershipDocument>

/// The issuer of a Form 4 and its non-derivative transactions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form4 {
    pub issuer_symbol: String,
    pub issuer_name: String,
    pub transactions: Vec<Transaction>,
}

/// A single non-derivative transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub issuer_symbol: String,
    pub issuer_name: String,
    /// `P` open-market purchase, `S` open-market sale, `A` grant, `M` option exercise, ...
    pub transaction_code: String,
    pub shares: Option<f64>,
    pub price: Option<f64>,
    pub date: Option<NaiveDate>,
    /// `D` direct or `I` indirect ownership.
    pub ownership: Option<String>,
}

/// Parse a Form 4 ownership document.
///
/// Elements are matched on their local name, so documents with or without a default namespace
/// both parse. Derivative transactions are ignored.
pub fn parse_form4(xml: &str) -> Result<Form4> {
    let doc = Document::parse(xml.trim_start_matches('\u{feff}'))?;
    let root = doc.root_element();

    let issuer_symbol = descendant_text(root, "issuerTradingSymbol");
    let issuer_name = descendant_text(root, "issuerName");

    let transactions = root
        .descendants()
        .filter(|node| is_element(node, "nonDerivativeTable"))
        .flat_map(|table| table.children())
        .filter(|node| is_element(node, "nonDerivativeTransaction"))
        .map(|node| Transaction {
            issuer_symbol: issuer_symbol.clone(),
            issuer_name: issuer_name.clone(),
            transaction_code: path_text(node, &["transactionCoding", "transactionCode"])
                .unwrap_or_default()
                .trim()
                .to_string(),
            shares: path_text(
                node,
                &["transactionAmounts", "transactionShares", "value"],
            )
            .and_then(parse_number),
            price: path_text(
                node,
                &["transactionAmounts", "transactionPricePerShare", "value"],
            )
            .and_then(parse_number),
            date: path_text(node, &["transactionDate", "value"]).and_then(parse_date),
            ownership: path_text(
                node,
                &["ownershipNature", "directOrIndirectOwnership", "value"],
            )
            .map(|ownership| ownership.trim().to_string()),
        })
        .collect();

    Ok(Form4 {
        issuer_symbol,
        issuer_name,
        transactions,
    })
}

fn is_element(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

// trimmed text of the first element called `name` anywhere below `node`
fn descendant_text(node: Node, name: &str) -> String {
    node.descendants()
        .find(|node| is_element(node, name))
        .and_then(|node| node.text())
        .unwrap_or_default()
        .trim()
        .to_string()
}

// text at a child path; an element that exists but is empty reads as ""
fn path_text<'a>(node: Node<'a, '_>, path: &[&str]) -> Option<&'a str> {
    let node = path.iter().try_fold(node, |node, name| {
        node.children().find(|child| is_element(child, name))
    })?;
    Some(node.text().unwrap_or_default())
}
