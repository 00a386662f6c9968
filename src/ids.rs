//! Opaque identifier generation
//!
//! Every persisted row is keyed by an opaque string of the form
//! `<PREFIX>-<32 uppercase hex>`. The prefix names the entity kind; the hex
//! part is a random UUID, so uniqueness is probabilistic but treated as a
//! hard invariant by callers.

use uuid::Uuid;

/// Entity kinds with their identifier prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Book,
    Loan,
    Fine,
    Request,
    Notification,
    History,
    Wishlist,
}

impl EntityKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::User => "USR",
            EntityKind::Book => "BK",
            EntityKind::Loan => "ISS",
            EntityKind::Fine => "FIN",
            EntityKind::Request => "REQ",
            EntityKind::Notification => "NTF",
            EntityKind::History => "HST",
            EntityKind::Wishlist => "WSH",
        }
    }
}

/// Capability supplying unique identifiers per entity kind.
pub trait IdGenerator: Send + Sync {
    fn generate(&self, kind: EntityKind) -> String;
}

/// Default generator backed by random UUIDs.
#[derive(Debug, Clone, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self, kind: EntityKind) -> String {
        format!(
            "{}-{}",
            kind.prefix(),
            Uuid::new_v4().simple().to_string().to_uppercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_carry_the_entity_prefix() {
        let ids = UuidIdGenerator;
        assert!(ids.generate(EntityKind::User).starts_with("USR-"));
        assert!(ids.generate(EntityKind::Book).starts_with("BK-"));
        assert!(ids.generate(EntityKind::Loan).starts_with("ISS-"));
    }

    #[test]
    fn generated_ids_do_not_collide() {
        let ids = UuidIdGenerator;
        let generated: HashSet<String> =
            (0..1000).map(|_| ids.generate(EntityKind::Fine)).collect();
        assert_eq!(generated.len(), 1000);
    }
}
