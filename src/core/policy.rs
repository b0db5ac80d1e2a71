//! Authorization policy for ledger mutations.
//!
//! The store takes the policy as an explicit constructor parameter so it can
//! be swapped or tested independently of storage. Recording transactions and
//! reading one's own summary require no authorization; every mutation of an
//! existing row goes through the policy.

use crate::errors::{Error, Result};

/// Decides which requester may mutate recorded transactions.
pub trait AuthorizationPolicy: Send + Sync {
    /// Returns `Ok(())` when `requester_id` may edit or delete recorded
    /// transactions, `Error::Unauthorized` otherwise.
    fn authorize_mutation(&self, requester_id: i64) -> Result<()>;
}

/// Production policy: a single configured administrator may edit any user's
/// transactions.
#[derive(Debug, Clone, Copy)]
pub struct AdminOnly {
    admin_user_id: i64,
}

impl AdminOnly {
    /// Creates a policy recognizing `admin_user_id` as the administrator.
    #[must_use]
    pub const fn new(admin_user_id: i64) -> Self {
        Self { admin_user_id }
    }
}

impl AuthorizationPolicy for AdminOnly {
    fn authorize_mutation(&self, requester_id: i64) -> Result<()> {
        if requester_id == self.admin_user_id {
            Ok(())
        } else {
            Err(Error::Unauthorized {
                user_id: requester_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_is_authorized() {
        let policy = AdminOnly::new(42);
        assert!(policy.authorize_mutation(42).is_ok());
    }

    #[test]
    fn test_everyone_else_is_rejected() {
        let policy = AdminOnly::new(42);
        let result = policy.authorize_mutation(7);
        assert!(matches!(result, Err(Error::Unauthorized { user_id: 7 })));
    }
}
