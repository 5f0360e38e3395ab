use sheetsync_core::ProductRecord;

/// A record excluded from the valid set, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRecord {
    pub record: ProductRecord,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub valid: Vec<ProductRecord>,
    pub invalid: Vec<InvalidRecord>,
}

/// Splits records into valid and invalid sets.
///
/// A record needs a handle. A primary row additionally needs a price; variant
/// rows are not price-checked. Order is preserved within each set.
#[must_use]
pub fn validate_products(records: Vec<ProductRecord>) -> Validation {
    let mut validation = Validation::default();
    for record in records {
        match rejection_reason(&record) {
            Some(reason) => validation.invalid.push(InvalidRecord {
                record,
                reason: reason.to_string(),
            }),
            None => validation.valid.push(record),
        }
    }
    validation
}

fn rejection_reason(record: &ProductRecord) -> Option<&'static str> {
    if record.handle.trim().is_empty() {
        return Some("handle required");
    }
    if record.is_primary() && record.variant_price.trim().is_empty() {
        return Some("price required");
    }
    None
}
