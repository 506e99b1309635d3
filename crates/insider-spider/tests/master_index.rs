use insider_spider::stock::sec::index::{parse_master_index, FilingRecord};

const MASTER: &str = include_str!("files/master.20250102.idx");

#[test]
fn one_row_per_piped_line_after_delimiter() {
    let expected = MASTER
        .lines()
        .skip_while(|line| !line.starts_with("-----"))
        .skip(1)
        .filter(|line| line.contains('|'))
        .count();

    let rows = parse_master_index(MASTER).unwrap();
    assert_eq!(expected, 5);
    assert_eq!(rows.len(), expected);
}

#[test]
fn rows_keep_every_field() {
    let rows = parse_master_index(MASTER).unwrap();
    assert_eq!(
        rows[0],
        FilingRecord {
            cik: "1000045".to_string(),
            company_name: "NICHOLAS FINANCIAL INC".to_string(),
            form_type: "4".to_string(),
            date_filed: "20250102".to_string(),
            filename: "edgar/data/1000045/0001000045-25-000001.txt".to_string(),
        }
    );
    assert_eq!(
        rows.iter().map(|row| row.form_type.as_str()).collect::<Vec<_>>(),
        vec!["4", "4/A", "10-K", "4", "8-K"]
    );
}

#[test]
fn crlf_line_endings() {
    let rows = parse_master_index(&MASTER.replace('\n', "\r\n")).unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(
        rows[4].filename,
        "edgar/data/1000049/0001000049-25-000001.txt"
    );
}

#[test]
fn records_serialize_with_index_column_names() {
    let rows = parse_master_index(MASTER).unwrap();
    let json = serde_json::to_value(&rows[1]).unwrap();
    assert_eq!(json["CIK"], "1000046");
    assert_eq!(json["Company Name"], "ACME WIDGETS CORP");
    assert_eq!(json["Form Type"], "4/A");
    assert_eq!(json["Date Filed"], "20250102");
    assert_eq!(
        json["Filename"],
        "edgar/data/1000046/0001000046-25-000002.txt"
    );
}
