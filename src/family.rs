//! Listing families: which prefix, padding, and collection each kind of
//! property listing uses.
//!
//! Prefixes spell `RA-<CATEGORY><LISTING><TYPE>`: `COM`/`RES` for the
//! category, `LE`/`SE`/`RE` for lease, sell, and rent, then a two-letter
//! property type. Families that share a collection are kept apart by their
//! prefix alone.

use crate::allocator::{IdScheme, SchemeError};

/// One kind of listing and how its identifiers are spelled and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingFamily {
    /// Stable key used on the command line and in stored records.
    pub key: &'static str,
    /// Identifier prefix.
    pub prefix: &'static str,
    /// Sequence padding width.
    pub width: usize,
    /// Collection the family's records are stored in.
    pub collection: &'static str,
    /// Short human-readable label.
    pub description: &'static str,
}

const fn family(
    key: &'static str,
    prefix: &'static str,
    width: usize,
    collection: &'static str,
    description: &'static str,
) -> ListingFamily {
    ListingFamily { key, prefix, width, collection, description }
}

/// Every family the platform allocates identifiers for.
pub const FAMILIES: &[ListingFamily] = &[
    family("commercial-lease-office-space", "RA-COMLEOS", 4, "commercial_lease", "Office space for lease"),
    family("commercial-lease-shop", "RA-COMLESH", 4, "commercial_lease", "Shop for lease"),
    family("commercial-lease-showroom", "RA-COMLESR", 4, "commercial_lease", "Showroom for lease"),
    family("commercial-lease-warehouse", "RA-COMLEWH", 4, "commercial_lease", "Warehouse for lease"),
    family("commercial-lease-shed", "RA-COMLESD", 4, "commercial_lease", "Shed for lease"),
    family("commercial-lease-covered-space", "RA-COMLECS", 4, "commercial_lease", "Covered space for lease"),
    family("commercial-sell-office-space", "RA-COMSEOS", 4, "commercial_sell", "Office space for sale"),
    family("commercial-sell-shop", "RA-COMSESH", 4, "commercial_sell", "Shop for sale"),
    family("commercial-sell-showroom", "RA-COMSESR", 4, "commercial_sell", "Showroom for sale"),
    family("commercial-sell-warehouse", "RA-COMSEWH", 4, "commercial_sell", "Warehouse for sale"),
    family("commercial-sell-shed", "RA-COMSESD", 4, "commercial_sell", "Shed for sale"),
    family("commercial-sell-covered-space", "RA-COMSECS", 4, "commercial_sell", "Covered space for sale"),
    family("residential-rent-pg", "RA-RESREPG", 4, "residential_rent", "Paying-guest accommodation"),
    family("residential-rent-apartment", "RA-RESREAP", 4, "residential_rent", "Apartment for rent"),
    family("residential-sell-apartment", "RA-RESSEAP", 4, "residential_sell", "Apartment for sale"),
    // Shortlists keep the two-digit numbering they have always had.
    family("property-selection", "RA-PS", 2, "property_selection", "Curated property selection"),
];

impl ListingFamily {
    /// Looks a family up by its key.
    #[must_use]
    pub fn by_key(key: &str) -> Option<&'static ListingFamily> {
        FAMILIES.iter().find(|f| f.key == key)
    }

    /// Looks a family up by its exact prefix.
    #[must_use]
    pub fn by_prefix(prefix: &str) -> Option<&'static ListingFamily> {
        FAMILIES.iter().find(|f| f.prefix == prefix)
    }

    /// The identifier scheme for this family.
    ///
    /// # Errors
    ///
    /// Returns an error only if the catalog entry itself is invalid.
    pub fn scheme(&self) -> Result<IdScheme, SchemeError> {
        IdScheme::new(self.prefix)?.with_width(self.width)
    }
}
