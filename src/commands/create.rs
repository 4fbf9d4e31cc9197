//! `listing-id create` command.

use std::collections::BTreeMap;

use tracing::info;

use crate::context::ServiceContext;
use crate::ports::ListingRecord;

use super::resolve_family;

/// Allocate an identifier for `family_key`, store a listing under it, and
/// return the identifier followed by a newline.
///
/// # Errors
///
/// Returns an error for an unknown family, or if the record cannot be
/// stored (including when another writer took the identifier first).
pub async fn run(
    ctx: &ServiceContext,
    family_key: &str,
    fields: &[(String, String)],
) -> Result<String, String> {
    let family = resolve_family(family_key)?;
    let scheme = family.scheme().map_err(|e| format!("Family {family_key}: {e}"))?;

    let store = ctx.record_store(family.collection);
    let property_id = ctx.allocator(store.as_ref()).allocate(&scheme).await;

    let record = ListingRecord {
        property_id: property_id.clone(),
        family: family.key.to_string(),
        created_at: ctx.clock.now(),
        fields: fields.iter().cloned().collect::<BTreeMap<_, _>>(),
    };
    store
        .insert(record)
        .await
        .map_err(|e| format!("Failed to store {property_id}: {e}"))?;

    info!(property_id = %property_id, family = family.key, "created listing");
    Ok(format!("{property_id}\n"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::allocator::AllocatorSettings;
    use crate::store::FileRecordStore;

    #[tokio::test]
    async fn consecutive_creates_get_consecutive_ids() {
        let root = std::env::temp_dir().join("listing_id_cmd_create");
        let _ = std::fs::remove_dir_all(&root);
        let ctx = ServiceContext::live(&root, AllocatorSettings::default());

        let fields = vec![("city".to_string(), "Nagpur".to_string())];
        assert_eq!(run(&ctx, "residential-rent-pg", &fields).await.unwrap(), "RA-RESREPG0001\n");
        assert_eq!(run(&ctx, "residential-rent-pg", &[]).await.unwrap(), "RA-RESREPG0002\n");
        // A sibling family in the same collection keeps its own sequence.
        assert_eq!(run(&ctx, "residential-rent-apartment", &[]).await.unwrap(), "RA-RESREAP0001\n");

        let records = FileRecordStore::new(Arc::clone(&ctx.fs), &root, "residential_rent").load().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].family, "residential-rent-pg");
        assert_eq!(records[0].fields.get("city").map(String::as_str), Some("Nagpur"));
        assert!(records[1].fields.is_empty());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn unknown_family_is_an_error() {
        let ctx = ServiceContext::live(&std::env::temp_dir(), AllocatorSettings::default());
        let err = run(&ctx, "castle", &[]).await.unwrap_err();
        assert!(err.contains("Unknown listing family"));
    }
}
