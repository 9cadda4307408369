//! Page database rows.
//!
//! A page database is a list of rows, each an ordered map of column name to
//! value. Rows don't share a schema; the table view shows the union of all
//! column names.

use indexmap::IndexSet;

use folio_storage::DatabaseRow;

/// Build a row from submitted fields.
///
/// Fields whose value is blank are dropped and the remaining values are
/// trimmed. `new_column` adds one more cell when its name is not blank.
///
/// # Example
///
/// ```
/// use folio_site::build_row;
///
/// let row = build_row([("Name", " Ada "), ("Notes", "")], Some(("Born", "1815")));
/// assert_eq!(row.len(), 2);
/// assert_eq!(row["Name"], "Ada");
/// assert_eq!(row["Born"], "1815");
/// ```
pub fn build_row<I, K, V>(fields: I, new_column: Option<(&str, &str)>) -> DatabaseRow
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut row: DatabaseRow = fields
        .into_iter()
        .filter_map(|(name, value)| {
            let value = value.as_ref().trim();
            (!value.is_empty()).then(|| (name.as_ref().to_owned(), value.to_owned()))
        })
        .collect();

    if let Some((name, value)) = new_column {
        let name = name.trim();
        if !name.is_empty() {
            row.insert(name.to_owned(), value.trim().to_owned());
        }
    }

    row
}

/// Union of the column names of `rows`, in first-seen order.
pub fn columns(rows: &[DatabaseRow]) -> Vec<&str> {
    rows.iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect::<IndexSet<&str>>()
        .into_iter()
        .collect()
}
