//! Admin access check.
//!
//! A single shared credential gates the results and editing views. This is
//! an access-control boundary, not an account system.

use flowpoll_store::JsonStore;
use flowpoll_types::Error;

/// Check a password against the stored admin secret.
///
/// Returns `false` when no admin record exists; an unset store must never
/// grant access.
pub fn verify_admin(store: &JsonStore, password: &str) -> Result<bool, Error> {
    match store.admin()? {
        Some(record) => Ok(record.secret == password),
        None => {
            log::warn!("admin verification attempted but no admin record is configured");
            Ok(false)
        }
    }
}
