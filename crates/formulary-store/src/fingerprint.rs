//! Content fingerprints for fetched resources.
//!
//! A fingerprint is the lowercase hex SHA-256 of the raw body bytes, exactly
//! as the store returned them. Two fetches of the same resource are
//! structurally identical exactly when their fingerprints match, which is
//! what makes a redundant concurrent fetch harmless.

use chrono::Utc;
use sha2::{Digest, Sha256};

use formulary_contracts::resource::{FetchedResource, ResourceKind};

/// Compute the SHA-256 fingerprint of `body`.
///
/// Returns a lowercase 64-character hex string.
pub fn fingerprint(body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body);
    hex::encode(hasher.finalize())
}

/// Wrap a raw body as a `FetchedResource`, fingerprinted and stamped now.
pub fn fetched(kind: ResourceKind, body: Vec<u8>) -> FetchedResource {
    FetchedResource {
        kind,
        fingerprint: fingerprint(&body),
        body,
        fetched_at: Utc::now(),
    }
}

/// Return true if the stored fingerprint still matches the body.
pub fn verify_fingerprint(resource: &FetchedResource) -> bool {
    resource.fingerprint == fingerprint(&resource.body)
}
