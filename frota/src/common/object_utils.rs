use crate::errors::{ErrorKind, FrotaError, FrotaResult};

/// Separator between an entity name and the key of a keyed repository.
pub const KEY_OBJ_SEPARATOR: &str = "+";

const RESERVED_COLLECTION_PREFIX: &str = "system.";

/// Builds the collection name for an entity, optionally scoped by a key.
///
/// `repository_name("Loan", None)` is `"Loan"`;
/// `repository_name("Loan", Some("archive"))` is `"Loan+archive"`.
pub fn repository_name(entity_name: &str, key: Option<&str>) -> FrotaResult<String> {
    if entity_name.contains(KEY_OBJ_SEPARATOR) {
        log::error!("{} is not a valid entity name", entity_name);
        return Err(FrotaError::new(
            &format!("{} is not a valid entity name", entity_name),
            ErrorKind::ValidationError,
        ));
    }

    let name = match key {
        Some(k) => {
            if k.is_empty() {
                log::error!("Repository key for {} cannot be empty", entity_name);
                return Err(FrotaError::new(
                    "Repository key cannot be empty",
                    ErrorKind::ValidationError,
                ));
            }
            let mut result = String::with_capacity(entity_name.len() + 1 + k.len());
            result.push_str(entity_name);
            result.push_str(KEY_OBJ_SEPARATOR);
            result.push_str(k);
            result
        }
        None => entity_name.to_string(),
    };

    validate_collection_name(&name)?;
    Ok(name)
}

/// Checks that a collection name is acceptable to the document store.
pub fn validate_collection_name(name: &str) -> FrotaResult<()> {
    if name.trim().is_empty() {
        log::error!("Collection name cannot be empty");
        return Err(FrotaError::new(
            "Collection name cannot be empty",
            ErrorKind::ValidationError,
        ));
    }

    if name.contains('$') || name.contains('\0') {
        log::error!("{} is not a valid collection name", name);
        return Err(FrotaError::new(
            &format!("{} is not a valid collection name", name),
            ErrorKind::ValidationError,
        ));
    }

    if name.starts_with(RESERVED_COLLECTION_PREFIX) {
        log::error!("Collection name {} uses a reserved prefix", name);
        return Err(FrotaError::new(
            &format!("Collection name {} uses a reserved prefix", name),
            ErrorKind::ValidationError,
        ));
    }
    Ok(())
}
