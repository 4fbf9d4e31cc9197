//! `listing-id families` command.

use crate::family::FAMILIES;

/// Render the family catalog as a table.
#[must_use]
pub fn render() -> String {
    let key_width = FAMILIES.iter().map(|f| f.key.len()).max().unwrap_or(3).max(3);
    let prefix_width = FAMILIES.iter().map(|f| f.prefix.len()).max().unwrap_or(6).max(6);
    let collection_width = FAMILIES.iter().map(|f| f.collection.len()).max().unwrap_or(10).max(10);

    let mut out = format!(
        "{:<key_width$}  {:<prefix_width$}  {:>5}  {:<collection_width$}  DESCRIPTION\n",
        "KEY", "PREFIX", "WIDTH", "COLLECTION",
    );
    out.push_str(&format!(
        "{:-<key_width$}  {:-<prefix_width$}  {:->5}  {:-<collection_width$}  {:-<11}\n",
        "", "", "", "", "",
    ));
    for f in FAMILIES {
        out.push_str(&format!(
            "{:<key_width$}  {:<prefix_width$}  {:>5}  {:<collection_width$}  {}\n",
            f.key, f.prefix, f.width, f.collection, f.description,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_family() {
        let table = render();
        assert!(table.starts_with("KEY"));
        assert_eq!(table.lines().count(), FAMILIES.len() + 2);
        assert!(table.contains("RA-COMLECS"));
        assert!(table.lines().any(|l| l.starts_with("property-selection") && l.contains("    2  ")));
    }
}
