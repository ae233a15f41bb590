use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single field of a CSV row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, guessed from the raw CSV text.
/// Year columns are collected into a `BTreeSet`, so `CellValue` must be `Ord`,
/// and `==` is defined through `cmp` so both always agree.
#[derive(Debug, Clone)]
pub enum CellValue {
    Integer(i64),
    /// Always finite: `NaN` / `inf` stay text.
    Float(f64),
    Text(String),
    /// Empty field.
    Null,
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    /// Null < numbers < text. Integers and floats share one numeric scale;
    /// at equal magnitude an integer sorts before a float.
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Text(a), Text(b)) => a.cmp(b),
            (Text(_), _) => Ordering::Greater,
            (_, Text(_)) => Ordering::Less,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw field: integer, then finite float, then text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => CellValue::Float(f),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// Numeric view of the cell. Text with thousands separators
    /// (`"1,234.5"`) is accepted since spreadsheet exports often carry them.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Text(s) => s
                .trim()
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
            CellValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record / Table
// ---------------------------------------------------------------------------

/// One row of the source file. `raw` is the field text exactly as read and
/// is what gets shown and exported; `cells` holds the guessed values used
/// for ordering and arithmetic. Both are in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub raw: Vec<String>,
    pub cells: Vec<CellValue>,
}

impl Record {
    pub fn from_raw(raw: Vec<String>) -> Self {
        let cells = raw.iter().map(|s| CellValue::parse(s)).collect();
        Record { raw, cells }
    }

    pub fn get(&self, column: usize) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Field text as it appeared in the file.
    pub fn text(&self, column: usize) -> Option<&str> {
        self.raw.get(column).map(String::as_str)
    }
}

/// The loaded file: header names and rows, both in source order.
/// Every record has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Self {
        debug_assert!(rows.iter().all(|r| r.raw.len() == headers.len()));
        Table { headers, rows }
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn parse_guesses_types() {
        assert_eq!(CellValue::parse("2021"), CellValue::Integer(2021));
        assert_eq!(CellValue::parse(" 12.5 "), CellValue::Float(12.5));
        assert_eq!(CellValue::parse("서울"), CellValue::Text("서울".into()));
        assert_eq!(CellValue::parse(""), CellValue::Null);
    }

    #[test]
    fn non_finite_numbers_stay_text() {
        assert_eq!(CellValue::parse("NaN"), CellValue::Text("NaN".into()));
        assert_eq!(CellValue::parse("inf"), CellValue::Text("inf".into()));
        assert_eq!(CellValue::parse("-infinity").as_f64(), None);
    }

    #[test]
    fn equality_agrees_with_ordering() {
        let values = [
            CellValue::Float(0.0),
            CellValue::Float(-0.0),
            CellValue::Integer(0),
            CellValue::Text("NaN".into()),
            CellValue::Null,
        ];
        for a in &values {
            assert_eq!(a, a);
            for b in &values {
                assert_eq!(a == b, a.cmp(b) == Ordering::Equal);
            }
        }
        let set: BTreeSet<CellValue> = values.iter().chain(values.iter()).cloned().collect();
        assert_eq!(set.len(), values.len());
    }

    #[test]
    fn integers_order_numerically_not_lexically() {
        let set: BTreeSet<CellValue> = [9, 10, 100]
            .into_iter()
            .map(CellValue::Integer)
            .collect();
        let sorted: Vec<_> = set.into_iter().collect();
        assert_eq!(
            sorted,
            vec![
                CellValue::Integer(9),
                CellValue::Integer(10),
                CellValue::Integer(100)
            ]
        );
    }

    #[test]
    fn integers_and_floats_share_one_scale() {
        assert!(CellValue::Integer(2021) > CellValue::Float(2020.5));
        assert!(CellValue::Float(2021.5) > CellValue::Integer(2021));
        assert!(CellValue::Integer(2021) < CellValue::Float(2021.0));
        assert_ne!(CellValue::Integer(2021), CellValue::Float(2021.0));
    }

    #[test]
    fn record_keeps_raw_text() {
        let record = Record::from_raw(vec!["007".into(), "1.50".into(), "1e3".into()]);
        assert_eq!(record.text(0), Some("007"));
        assert_eq!(record.text(1), Some("1.50"));
        assert_eq!(record.text(2), Some("1e3"));
        assert_eq!(record.get(0), Some(&CellValue::Integer(7)));
        assert_eq!(record.get(2), Some(&CellValue::Float(1000.0)));
    }

    #[test]
    fn as_f64_accepts_thousands_separators() {
        assert_eq!(CellValue::Text("1,234".into()).as_f64(), Some(1234.0));
        assert_eq!(CellValue::Integer(7).as_f64(), Some(7.0));
        assert_eq!(CellValue::Text("n/a".into()).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }
}
