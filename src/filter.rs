use crate::error::StatementError;
use crate::query::Query;
use crate::schema::Schema;
use crate::transaction::TransactionRow;

use csv::ReaderBuilder;
use serde::Serialize;
use tracing::warn;

/// Rows that survived a search, in source order, plus how many malformed
/// rows were left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub rows: Vec<TransactionRow>,
    pub skipped: usize,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends `other` after the rows already held.
    pub fn extend(&mut self, other: ResultSet) {
        self.rows.extend(other.rows);
        self.skipped += other.skipped;
    }

    pub fn chart(&self) -> ChartSeries {
        aggregate_for_chart(&self.rows)
    }
}

/// Parses statement text and keeps the rows matching `query`.
///
/// A header lacking any schema column fails the whole text. Rows that cannot
/// be read or parsed are skipped with a warning and counted in
/// [`ResultSet::skipped`].
pub fn filter_transactions(
    csv_text: &str,
    query: &Query,
    schema: &Schema,
) -> Result<ResultSet, StatementError> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = rdr.headers()?.clone();
    let columns = schema.resolve(&headers)?;

    let mut result = ResultSet::default();

    for (index, record) in rdr.records().enumerate() {
        // header is line 1
        let line = index + 2;

        let row = record
            .map_err(StatementError::from)
            .and_then(|record| columns.extract(&record)?.parse(schema));

        match row {
            Ok(row) => {
                if query.matches(&row) {
                    result.rows.push(row);
                }
            }
            Err(e) => {
                warn!(line, error = %e, "Skipping malformed statement row");
                result.skipped += 1;
            }
        }
    }

    Ok(result)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub debit: Vec<String>,
    pub credit: Vec<String>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One chart point per row: no sorting, grouping or summing by date.
pub fn aggregate_for_chart(rows: &[TransactionRow]) -> ChartSeries {
    let mut series = ChartSeries {
        labels: Vec::with_capacity(rows.len()),
        debit: Vec::with_capacity(rows.len()),
        credit: Vec::with_capacity(rows.len()),
    };

    for row in rows {
        series.labels.push(row.raw_date.clone());
        series.debit.push(row.debit.clone());
        series.credit.push(row.credit.clone());
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const STATEMENT: &str = "Date,Description,Debit,Credit,Balance\n01/02/2023,Coffee Shop,150,,5000\n15/03/2023,Salary,,50000,55000";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn query(keyword: &str, start: NaiveDate, end: NaiveDate) -> Query {
        Query::new(keyword, start, end).unwrap()
    }

    #[test]
    fn test_keyword_over_full_year() {
        let q = query("coffee", ymd(2023, 1, 1), ymd(2023, 12, 31));
        let result = filter_transactions(STATEMENT, &q, &Schema::default()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.rows[0].description, "Coffee Shop");
        assert_eq!(result.rows[0].debit, "150");
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_empty_keyword_over_march() {
        let q = query("", ymd(2023, 3, 1), ymd(2023, 3, 31));
        let result = filter_transactions(STATEMENT, &q, &Schema::default()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.rows[0].description, "Salary");
        assert_eq!(result.rows[0].credit, "50000");
    }

    #[test]
    fn test_empty_keyword_returns_whole_range_in_order() {
        let q = query("", ymd(2023, 1, 1), ymd(2023, 12, 31));
        let result = filter_transactions(STATEMENT, &q, &Schema::default()).unwrap();

        let descriptions: Vec<_> = result.rows.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Coffee Shop", "Salary"]);
    }

    #[test]
    fn test_source_order_kept_when_dates_unsorted() {
        let text = "Date,Description,Debit,Credit,Balance\n\
                    20/05/2023,Late,1,,10\n\
                    02/05/2023,Early,1,,9\n";
        let q = query("", ymd(2023, 5, 1), ymd(2023, 5, 31));
        let result = filter_transactions(text, &q, &Schema::default()).unwrap();

        assert_eq!(result.rows[0].description, "Late");
        assert_eq!(result.rows[1].description, "Early");
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let text = "Date,Description,Debit,Credit\n01/02/2023,Coffee,150,\n";
        let q = query("", ymd(2023, 1, 1), ymd(2023, 12, 31));

        match filter_transactions(text, &q, &Schema::default()) {
            Err(StatementError::MissingColumn { column, .. }) => assert_eq!(column, "Balance"),
            _ => panic!("Expected MissingColumn error"),
        }
    }

    #[test]
    fn test_empty_text_has_no_header() {
        let q = query("", ymd(2023, 1, 1), ymd(2023, 12, 31));
        assert!(matches!(
            filter_transactions("", &q, &Schema::default()),
            Err(StatementError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_header_only() {
        let q = query("", ymd(2023, 1, 1), ymd(2023, 12, 31));
        let result =
            filter_transactions("Date,Description,Debit,Credit,Balance\n", &q, &Schema::default())
                .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let text = "Date,Description,Debit,Credit,Balance\n\
                    01/02/2023,Coffee Shop,150,,5000\n\
                    2023-02-02,Bad date,10,,4990\n\
                    03/02/2023,Short row\n\
                    05/02/2023,Coffee again,20,,4960\n";
        let q = query("", ymd(2023, 1, 1), ymd(2023, 12, 31));
        let result = filter_transactions(text, &q, &Schema::default()).unwrap();

        let descriptions: Vec<_> = result.rows.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Coffee Shop", "Coffee again"]);
        assert_eq!(result.skipped, 2);
    }

    #[test]
    fn test_non_numeric_amounts_do_not_exclude_rows() {
        let text = "Date,Description,Debit,Credit,Balance\n\
                    01/02/2023,Coffee Shop,150 Dr,,5000\n\
                    02/02/2023,Coffee Bar,-,,4850\n\
                    03/02/2023,Coffee Cart,N/A,,N/A\n";
        let q = query("coffee", ymd(2023, 1, 1), ymd(2023, 12, 31));
        let result = filter_transactions(text, &q, &Schema::default()).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.rows[0].debit, "150 Dr");
        assert_eq!(result.rows[1].debit, "-");
        assert_eq!(result.rows[2].balance, "N/A");
    }

    #[test]
    fn test_blank_lines_ignored() {
        let text = "Date,Description,Debit,Credit,Balance\n\n01/02/2023,Coffee Shop,150,,5000\n\n";
        let q = query("", ymd(2023, 1, 1), ymd(2023, 12, 31));
        let result = filter_transactions(text, &q, &Schema::default()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_quoted_description_with_comma() {
        let text = "Date,Description,Debit,Credit,Balance\n01/02/2023,\"Cafe, Coffee Day\",150,,5000\n";
        let q = query("coffee day", ymd(2023, 1, 1), ymd(2023, 12, 31));
        let result = filter_transactions(text, &q, &Schema::default()).unwrap();

        assert_eq!(result.rows[0].description, "Cafe, Coffee Day");
    }

    #[test]
    fn test_aggregate_keeps_one_point_per_row() {
        let text = "Date,Description,Debit,Credit,Balance\n\
                    01/02/2023,Coffee,150 Dr,,5000\n\
                    01/02/2023,Tea,50,,4950\n\
                    15/03/2023,Salary,,50000,54950\n";
        let q = query("", ymd(2023, 1, 1), ymd(2023, 12, 31));
        let result = filter_transactions(text, &q, &Schema::default()).unwrap();
        let chart = result.chart();

        assert_eq!(chart.len(), result.len());
        assert_eq!(chart.debit.len(), result.len());
        assert_eq!(chart.credit.len(), result.len());
        assert_eq!(chart.labels, vec!["01/02/2023", "01/02/2023", "15/03/2023"]);
        assert_eq!(chart.debit, vec!["150 Dr", "50", ""]);
        assert_eq!(chart.credit, vec!["", "", "50000"]);
    }

    #[test]
    fn test_aggregate_empty() {
        let chart = aggregate_for_chart(&[]);
        assert!(chart.is_empty());
        assert!(chart.debit.is_empty());
        assert!(chart.credit.is_empty());
    }
}
