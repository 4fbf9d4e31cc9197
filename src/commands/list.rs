//! `listing-id list` command.

use std::sync::Arc;

use crate::context::ServiceContext;
use crate::ports::record_store::{compare_sequence, prefix_pattern};
use crate::store::FileRecordStore;

use super::resolve_family;

/// Render the stored listings of a family in sequence order.
///
/// Records of sibling families sharing the collection are left out.
///
/// # Errors
///
/// Returns an error for an unknown family or an unreadable collection.
pub fn run(ctx: &ServiceContext, family_key: &str) -> Result<String, String> {
    let family = resolve_family(family_key)?;
    let store = FileRecordStore::new(Arc::clone(&ctx.fs), ctx.store_root(), family.collection);
    let pattern = prefix_pattern(family.prefix).map_err(|e| e.to_string())?;

    let mut records: Vec<_> = store
        .load()
        .map_err(|e| e.to_string())?
        .into_iter()
        .filter(|r| pattern.is_match(&r.property_id))
        .collect();
    if records.is_empty() {
        return Ok(format!("No {} listings in {}\n", family.key, store.path().display()));
    }
    records.sort_by(|a, b| compare_sequence(family.prefix, &a.property_id, &b.property_id));

    let id_width = records.iter().map(|r| r.property_id.len()).max().unwrap_or(0).max(11);
    let mut out = format!("{:<id_width$}  {:<20}  FIELDS\n", "PROPERTY ID", "CREATED");
    for record in &records {
        let fields: Vec<String> = record.fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
        out.push_str(&format!(
            "{:<id_width$}  {:<20}  {}\n",
            record.property_id,
            record.created_at.format("%Y-%m-%dT%H:%M:%SZ"),
            fields.join(" "),
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::allocator::AllocatorSettings;
    use crate::ports::{ListingRecord, RecordStore};

    fn record(id: &str, family: &str) -> ListingRecord {
        let mut fields = BTreeMap::new();
        fields.insert("city".to_string(), "Pune".to_string());
        ListingRecord {
            property_id: id.to_string(),
            family: family.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap(),
            fields,
        }
    }

    #[tokio::test]
    async fn lists_only_the_family_in_numeric_order() {
        let root = std::env::temp_dir().join("listing_id_cmd_list");
        let _ = std::fs::remove_dir_all(&root);
        let ctx = ServiceContext::live(&root, AllocatorSettings::default());

        let store = ctx.record_store("commercial_lease");
        store.insert(record("RA-COMLESH10000", "commercial-lease-shop")).await.unwrap();
        store.insert(record("RA-COMLESH9999", "commercial-lease-shop")).await.unwrap();
        store.insert(record("RA-COMLEOS0001", "commercial-lease-office-space")).await.unwrap();

        let out = run(&ctx, "commercial-lease-shop").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("RA-COMLESH9999 "));
        assert!(lines[2].starts_with("RA-COMLESH10000"));
        assert!(lines[1].contains("2024-06-15T10:00:00Z"));
        assert!(lines[1].ends_with("city=Pune"));
        assert!(!out.contains("RA-COMLEOS"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn empty_family_says_so() {
        let root = std::env::temp_dir().join("listing_id_cmd_list_empty");
        let ctx = ServiceContext::live(&root, AllocatorSettings::default());
        let out = run(&ctx, "property-selection").unwrap();
        assert!(out.starts_with("No property-selection listings"));
    }
}
