//! Reading the reviews dataset.

use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::models::ReviewRecord;

/// Dataset errors.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to open dataset: {0}")]
    Io(#[from] io::Error),

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Load review records from a CSV file.
///
/// Expects `text_index`, `medication`, `comment` and `rate` columns;
/// extra columns are ignored. Empty `medication`/`comment` cells read as
/// missing, which downstream stages treat as empty text.
pub fn load_reviews<P: AsRef<Path>>(path: P) -> DatasetResult<Vec<ReviewRecord>> {
    let file = File::open(path)?;
    read_reviews(file)
}

/// Read review records from any CSV source.
pub fn read_reviews<R: io::Read>(reader: R) -> DatasetResult<Vec<ReviewRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_reviews() {
        let data = "\
text_index,medication,comment,rate
1,Humira (adalimumab) for Crohn's Disease,Worked great,9
2,,No medication listed,3
";
        let records = read_reviews(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text_index, "1");
        assert_eq!(
            records[0].medication.as_deref(),
            Some("Humira (adalimumab) for Crohn's Disease")
        );
        assert_eq!(records[0].rate, 9);
        assert_eq!(records[1].medication, None);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let data = "\
text_index,medication,comment,rate,source
1,Humira for Crohn's Disease,Fine,7,scraper
";
        let records = read_reviews(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rate, 7);
    }

    #[test]
    fn test_malformed_rate_is_an_error() {
        let data = "\
text_index,medication,comment,rate
1,Humira,Fine,high
";
        assert!(matches!(
            read_reviews(data.as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(&path, "text_index,medication,comment,rate\n1,Humira,ok,5\n").unwrap();

        let records = load_reviews(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            load_reviews("does/not/exist.csv"),
            Err(DatasetError::Io(_))
        ));
    }
}
