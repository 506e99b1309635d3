/// Filing directory listings (`index.json`) and locating the Form 4 document inside them.
pub mod directory;

/// Form 4 filings collected over a range of daily indexes.
pub mod filings;

/// Form 4 ownership documents and their non-derivative transactions.
pub mod form4;

/// Daily `master.YYYYMMDD.idx` files.
pub mod index;
