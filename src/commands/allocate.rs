//! `listing-id allocate` command.

use tracing::info;

use crate::allocator::IdScheme;
use crate::cli::AllocateArgs;
use crate::context::ServiceContext;
use crate::family::ListingFamily;

use super::resolve_family;

/// Where an identifier is allocated: its scheme and the collection scanned
/// for existing identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Prefix and padding.
    pub scheme: IdScheme,
    /// Collection holding identifiers with this prefix.
    pub collection: String,
}

/// Resolve the allocation target from either a family key or an ad-hoc
/// prefix.
///
/// # Errors
///
/// Returns an error for an unknown family, an invalid prefix or width, or
/// an ad-hoc prefix with no collection to scan.
pub fn resolve_target(args: &AllocateArgs) -> Result<Target, String> {
    if let Some(key) = &args.family {
        let family = resolve_family(key)?;
        let scheme = family.scheme().map_err(|e| format!("Family {key}: {e}"))?;
        return Ok(Target { scheme, collection: family.collection.to_string() });
    }

    let Some(prefix) = &args.prefix else {
        return Err("Either a family or --prefix is required".to_string());
    };
    let owner = ListingFamily::by_prefix(prefix);
    let width = args.width.or(owner.map(|f| f.width)).unwrap_or(IdScheme::DEFAULT_WIDTH);
    let scheme = IdScheme::new(prefix.as_str())
        .and_then(|s| s.with_width(width))
        .map_err(|e| format!("Invalid prefix {prefix:?}: {e}"))?;
    let collection = match (&args.collection, owner) {
        (Some(collection), _) => collection.clone(),
        (None, Some(family)) => family.collection.to_string(),
        (None, None) => {
            return Err(format!("Prefix {prefix:?} belongs to no family; pass --collection"));
        }
    };
    Ok(Target { scheme, collection })
}

/// Run `allocate` and return the identifier followed by a newline.
///
/// # Errors
///
/// Returns an error if the target cannot be resolved. Store trouble never
/// fails the command; the allocator falls back to a timestamp identifier.
pub async fn run(ctx: &ServiceContext, args: &AllocateArgs) -> Result<String, String> {
    let target = resolve_target(args)?;
    let store = ctx.record_store(&target.collection);
    let id = ctx.allocator(store.as_ref()).allocate(&target.scheme).await;
    info!(property_id = %id, collection = %target.collection, "allocated identifier");
    Ok(format!("{id}\n"))
}
