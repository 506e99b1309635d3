use crate::http::Spider;
use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, trace};

lazy_static! {
    // edgar/data/320193/0000320193-25-000123.txt
    static ref ACCESSION: Regex =
        Regex::new(r"edgar/data/(\d+)/(\d{10}-\d{2}-\d{6})\.txt").expect("accession regex");
    static ref ACCESSION_LOOSE: Regex =
        Regex::new(r"edgar/data/(\d+)/([0-9-]+)\.txt").expect("loose accession regex");
}

// accession
// ----------------------------------------------------------------------------

/// The filer CIK and dashless accession number behind an index `Filename`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accession {
    /// CIK as written in the filename (unpadded).
    pub cik: String,
    /// Accession number with the dashes removed, as used by the archive directories.
    pub number: String,
}

impl Accession {
    pub fn from_filename(filename: &str) -> Result<Self> {
        let captures = ACCESSION
            .captures(filename)
            .or_else(|| ACCESSION_LOOSE.captures(filename))
            .ok_or_else(|| Error::UnrecognisedFilename(filename.to_string()))?;

        Ok(Self {
            cik: captures[1].to_string(),
            number: captures[2].replace('-', ""),
        })
    }

    /// `{base}/Archives/edgar/data/{cik}/{accession}`
    pub fn directory_url(&self, base: &str) -> String {
        format!("{base}/Archives/edgar/data/{}/{}", self.cik, self.number)
    }
}

/// `{base}/Archives/edgar/data/{cik}/{accession}/index.json`, with the CIK's leading zeros
/// dropped.
pub fn directory_index_url(base: &str, cik: &str, accession: &str) -> Result<String> {
    let cik: u64 = cik
        .trim()
        .parse()
        .map_err(|_| Error::InvalidCik(cik.to_string()))?;
    Ok(format!(
        "{base}/Archives/edgar/data/{cik}/{accession}/index.json"
    ))
}

/// Whether a file in a filing directory is the Form 4 XML document.
///
/// Filers name it `form4.xml`, `<prefix>_form4.xml` or some other `*form4*.xml`.
pub fn is_form4_document(name: &str) -> bool {
    let name = name.to_lowercase();
    name == "form4.xml"
        || name.ends_with("_form4.xml")
        || (name.ends_with(".xml") && name.contains("form4"))
}

// scrape
// ----------------------------------------------------------------------------

impl Spider {
    /// Resolve the Form 4 XML document of a filing through its directory listing.
    ///
    /// An unrecognisable `filename` or `cik` is an error. A listing that cannot be fetched or
    /// decoded, or that holds no Form 4 document, is `Ok(None)`.
    pub async fn locate_form4(&self, cik: &str, filename: &str) -> Result<Option<String>> {
        let base = &self.config().base_url;
        let accession = Accession::from_filename(filename)?;
        let url = directory_index_url(base, cik, &accession.number)?;

        let listing: DirectoryListing = match self.get_json(&url, self.config().index_delay).await
        {
            Ok(listing) => listing,
            Err(err) => {
                debug!("no directory listing for {filename}, error({err})");
                return Ok(None);
            }
        };

        let located = listing
            .form4_document()
            .map(|name| format!("{}/{name}", accession.directory_url(base)));
        trace!("form 4 document for {filename}: {located:?}");
        Ok(located)
    }
}

// de
// ----------------------------------------------------------------------------

// {
//     "directory": {
//         "item": [
//             { "last-modified": "2025-01-02 16:05:22", "name": "wk-form4_1735.xml", "type": "text.gif", "size": "4521" },
//             ...
//         ],
//         "name": "/Archives/edgar/data/1000045/000100004525000001",
//         "parent-dir": "/Archives/edgar/data/1000045/"
//     }
// }
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryListing {
    #[serde(default)]
    pub directory: Directory,
}

#[derive(Debug, Default, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub item: Vec<DirectoryItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryItem {
    #[serde(default)]
    pub name: String,
}

impl DirectoryListing {
    /// Name of the first item that looks like the Form 4 document.
    pub fn form4_document(&self) -> Option<&str> {
        self.directory
            .item
            .iter()
            .map(|item| item.name.as_str())
            .find(|name| is_form4_document(name))
    }
}
