use mercato_shared::ids::{ProductId, SupplierId};
use tracing::debug;

use crate::product::{Product, ProductDraft};
use crate::repository::{CatalogStore, StoreError};

/// How many times creation re-allocates an identifier after the storage
/// uniqueness constraint fires before giving up.
const MAX_ID_ATTEMPTS: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum SlugError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("could not allocate an identifier for {name:?} after {attempts} conflicts")]
    Exhausted { name: String, attempts: u32 },
}

/// Reduce a product name to slug form: lower-case, Latin accents folded to
/// ASCII, anything else collapsed to single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}

fn candidate(supplier_id: &SupplierId, slug: &str, suffix: u32) -> ProductId {
    if suffix == 0 {
        ProductId::from(format!("{}::{}", supplier_id, slug))
    } else {
        ProductId::from(format!("{}::{}_{}", supplier_id, slug, suffix))
    }
}

/// First identifier of form `<supplier_id>::<slug>[_<n>]` not currently
/// taken in the datastore.
///
/// Best-effort: the check-then-use sequence is not atomic across writers,
/// so the storage uniqueness constraint stays authoritative and
/// [`create_product`] re-allocates on conflict.
pub async fn allocate_product_id(
    store: &dyn CatalogStore,
    supplier_id: &SupplierId,
    name: &str,
) -> Result<ProductId, StoreError> {
    let slug = slugify(name);
    let mut suffix = 0;
    loop {
        let id = candidate(supplier_id, &slug, suffix);
        if store.find_product(&id).await?.is_none() {
            if suffix > 0 {
                debug!(%id, suffix, "base identifier taken, suffixed");
            }
            return Ok(id);
        }
        suffix += 1;
    }
}

/// Assign an identity to the draft and persist it.
///
/// Runs once per product, at creation; identity is never recomputed on
/// update. A [`StoreError::Duplicate`] from the insert means another writer
/// raced us to the same identifier: allocation is retried with the fresh
/// datastore state, a bounded number of times.
pub async fn create_product(
    store: &dyn CatalogStore,
    draft: ProductDraft,
) -> Result<Product, SlugError> {
    for attempt in 0..MAX_ID_ATTEMPTS {
        let id = allocate_product_id(store, &draft.supplier_id, &draft.name).await?;
        let product = draft.clone().into_product(id);
        match store.insert_product(&product).await {
            Ok(()) => return Ok(product),
            Err(StoreError::Duplicate(id)) => {
                debug!(%id, attempt, "identifier raced by concurrent creation, reallocating");
            }
            Err(other) => return Err(other.into()),
        }
    }
    Err(SlugError::Exhausted {
        name: draft.name,
        attempts: MAX_ID_ATTEMPTS,
    })
}
