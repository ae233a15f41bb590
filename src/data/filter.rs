use std::collections::BTreeSet;
use std::path::Path;

use super::loader::LoadError;
use super::model::{CellValue, Record, Table};

// ---------------------------------------------------------------------------
// Column layout: which headers carry year / region / population
// ---------------------------------------------------------------------------

/// Column positions resolved against one table's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub year: usize,
    pub region: usize,
    pub value: usize,
}

impl ColumnLayout {
    /// Find the named columns in `table`. A missing column is a parse error
    /// for the file at `path`.
    pub fn resolve(
        table: &Table,
        path: &Path,
        year: &str,
        region: &str,
        value: &str,
    ) -> Result<Self, LoadError> {
        let find = |name: &str| {
            table.column_index(name).ok_or_else(|| {
                LoadError::parse(
                    path,
                    format!("missing column '{name}' (found {:?})", table.headers),
                )
            })
        };
        Ok(ColumnLayout {
            year: find(year)?,
            region: find(region)?,
            value: find(value)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Year selection
// ---------------------------------------------------------------------------

/// Every distinct value of the year column, most recent first.
pub fn distinct_years(table: &Table, year_col: usize) -> Vec<CellValue> {
    let years: BTreeSet<&CellValue> = table
        .rows
        .iter()
        .filter_map(|r| r.get(year_col))
        .collect();
    years.into_iter().rev().cloned().collect()
}

/// Rows of a table whose year equals the selected one, in source order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a Table,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Positions of the matching rows in the source table.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| &table.rows[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Select the rows for one year. A year that never occurs yields an empty
/// view; the table itself is never touched.
pub fn filter_by_year<'a>(table: &'a Table, year_col: usize, year: &CellValue) -> FilteredView<'a> {
    let indices = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.get(year_col) == Some(year))
        .map(|(i, _)| i)
        .collect();
    FilteredView { table, indices }
}

// ---------------------------------------------------------------------------
// Chart series: region → population, aggregate row removed
// ---------------------------------------------------------------------------

/// One bar of the regional chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub region: String,
    /// `None` when the population cell is empty or not numeric.
    pub value: Option<f64>,
}

/// Bars in the row order of the filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of the present values.
    pub fn total(&self) -> f64 {
        self.points.iter().filter_map(|p| p.value).sum()
    }

    #[cfg(test)]
    pub fn get(&self, region: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.region == region)
            .and_then(|p| p.value)
    }
}

/// Whether a region field is the aggregate ("total") marker. Exact,
/// case-sensitive match on the field text, so numeric codes like `00` work.
pub fn is_total_row(region: &str, total_label: &str) -> bool {
    region == total_label
}

/// Build the regional chart from a year's rows, skipping the total row.
pub fn chart_series(view: &FilteredView<'_>, layout: &ColumnLayout, total_label: &str) -> ChartSeries {
    let points = view
        .records()
        .filter_map(|r| {
            let region = r.text(layout.region)?;
            if is_total_row(region, total_label) {
                return None;
            }
            Some(ChartPoint {
                region: region.to_string(),
                value: r.get(layout.value).and_then(CellValue::as_f64),
            })
        })
        .collect();
    ChartSeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_table;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LAYOUT: ColumnLayout = ColumnLayout {
        year: 0,
        region: 1,
        value: 2,
    };

    fn row(year: i64, region: &str, value: i64) -> Record {
        Record::from_raw(vec![year.to_string(), region.to_string(), value.to_string()])
    }

    fn load(content: &str) -> anyhow::Result<Table> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        Ok(load_table(tmp.path())?)
    }

    fn table(rows: Vec<Record>) -> Table {
        Table::new(
            vec!["년도".into(), "지역".into(), "경제활동인구 (천명)".into()],
            rows,
        )
    }

    fn scenario() -> Table {
        table(vec![
            row(2021, "서울", 100),
            row(2021, "계", 500),
            row(2020, "서울", 90),
        ])
    }

    #[test]
    fn test_concrete_scenario() {
        let t = scenario();

        let years = distinct_years(&t, LAYOUT.year);
        assert_eq!(years, vec![CellValue::Integer(2021), CellValue::Integer(2020)]);

        let view = filter_by_year(&t, LAYOUT.year, &CellValue::Integer(2021));
        assert_eq!(view.indices(), &[0, 1]);
        let records: Vec<_> = view.records().cloned().collect();
        assert_eq!(records, vec![t.rows[0].clone(), t.rows[1].clone()]);

        let chart = chart_series(&view, &LAYOUT, "계");
        assert_eq!(
            chart.points,
            vec![ChartPoint {
                region: "서울".into(),
                value: Some(100.0)
            }]
        );
        assert_eq!(chart.get("계"), None);
    }

    #[test]
    fn test_distinct_years_descending_regardless_of_order() {
        let t = table(vec![
            row(2019, "부산", 1),
            row(2022, "부산", 2),
            row(2019, "서울", 3),
            row(2020, "부산", 4),
            row(2022, "서울", 5),
        ]);
        let years = distinct_years(&t, LAYOUT.year);
        assert_eq!(
            years,
            vec![
                CellValue::Integer(2022),
                CellValue::Integer(2020),
                CellValue::Integer(2019)
            ]
        );
        assert!(years.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_text_years_sort_lexicographically_descending() {
        let t = Table::new(
            vec!["년도".into()],
            ["2020년", "2022년", "2021년", "2022년"]
                .iter()
                .map(|y| Record::from_raw(vec![y.to_string()]))
                .collect(),
        );
        let years: Vec<String> = distinct_years(&t, 0).iter().map(|y| y.to_string()).collect();
        assert_eq!(years, vec!["2022년", "2021년", "2020년"]);
    }

    #[test]
    fn test_filter_partitions_the_table() {
        let t = table(vec![
            row(2021, "서울", 100),
            row(2020, "부산", 40),
            row(2021, "계", 500),
            row(2019, "서울", 80),
            row(2021, "부산", 45),
        ]);
        let t_before = t.clone();

        for year in distinct_years(&t, LAYOUT.year) {
            let view = filter_by_year(&t, LAYOUT.year, &year);
            assert!(view.records().all(|r| r.cells[LAYOUT.year] == year));
            let others = t
                .rows
                .iter()
                .filter(|r| r.cells[LAYOUT.year] != year)
                .count();
            assert_eq!(view.len() + others, t.len());
        }
        assert_eq!(t, t_before);
    }

    #[test]
    fn test_nan_years_are_text_and_partition_holds() -> anyhow::Result<()> {
        let t = load("년도,지역,v\nNaN,서울,1\nNaN,계,2\n2021,서울,3\n")?;

        let years = distinct_years(&t, LAYOUT.year);
        assert_eq!(
            years,
            vec![CellValue::Text("NaN".into()), CellValue::Integer(2021)]
        );
        let covered: usize = years
            .iter()
            .map(|y| filter_by_year(&t, LAYOUT.year, y).len())
            .sum();
        assert_eq!(covered, t.len());
        assert_eq!(filter_by_year(&t, LAYOUT.year, &years[0]).indices(), &[0, 1]);
        Ok(())
    }

    #[test]
    fn test_mixed_integer_and_float_years_descend_numerically() -> anyhow::Result<()> {
        let t = load("년도,지역,v\n2020.5,서울,1\n2021,서울,2\n2020,서울,3\n")?;
        let years: Vec<String> = distinct_years(&t, LAYOUT.year)
            .iter()
            .map(|y| y.to_string())
            .collect();
        assert_eq!(years, vec!["2021", "2020.5", "2020"]);
        Ok(())
    }

    #[test]
    fn test_numeric_total_code_is_excluded() -> anyhow::Result<()> {
        let t = load("년도,지역,v\n2021,00,500\n2021,11,100\n2021,007,7\n")?;
        let view = filter_by_year(&t, LAYOUT.year, &CellValue::Integer(2021));
        let chart = chart_series(&view, &LAYOUT, "00");

        let regions: Vec<&str> = chart.points.iter().map(|p| p.region.as_str()).collect();
        assert_eq!(regions, vec!["11", "007"]);
        assert_eq!(chart.get("11"), Some(100.0));
        Ok(())
    }

    #[test]
    fn test_unknown_year_yields_empty_view() {
        let t = scenario();
        let view = filter_by_year(&t, LAYOUT.year, &CellValue::Integer(1999));
        assert!(view.is_empty());
        assert!(chart_series(&view, &LAYOUT, "계").is_empty());
    }

    #[test]
    fn test_chart_size_excludes_only_total_rows() {
        let t = table(vec![
            row(2021, "서울", 100),
            row(2021, "계", 500),
            row(2021, "부산", 50),
            row(2021, "계", 600),
            row(2021, "총계", 700),
        ]);
        let view = filter_by_year(&t, LAYOUT.year, &CellValue::Integer(2021));
        let chart = chart_series(&view, &LAYOUT, "계");

        let totals = view
            .records()
            .filter(|r| is_total_row(&r.raw[LAYOUT.region], "계"))
            .count();
        assert_eq!(chart.len(), view.len() - totals);
        assert!(chart.points.iter().all(|p| p.region != "계"));
        // Only the configured label counts as the aggregate marker.
        assert_eq!(chart.get("총계"), Some(700.0));

        let regions: Vec<&str> = chart.points.iter().map(|p| p.region.as_str()).collect();
        assert_eq!(regions, vec!["서울", "부산", "총계"]);
        assert_eq!(chart.total(), 850.0);
    }

    #[test]
    fn test_non_numeric_population_is_kept_as_gap() {
        let t = Table::new(
            vec!["년도".into(), "지역".into(), "경제활동인구 (천명)".into()],
            vec![Record::from_raw(vec!["2021".into(), "세종".into(), "-".into()])],
        );
        let view = filter_by_year(&t, 0, &CellValue::Integer(2021));
        let chart = chart_series(&view, &LAYOUT, "계");
        assert_eq!(chart.len(), 1);
        assert_eq!(chart.points[0].value, None);
    }

    #[test]
    fn test_resolve_reports_missing_column() {
        let t = scenario();
        let path = Path::new("data.csv");
        let layout = ColumnLayout::resolve(&t, path, "년도", "지역", "경제활동인구 (천명)").unwrap();
        assert_eq!(layout, LAYOUT);

        let err = ColumnLayout::resolve(&t, path, "연도", "지역", "경제활동인구 (천명)").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("연도"));
        assert!(err.to_string().contains("data.csv"));
    }
}
