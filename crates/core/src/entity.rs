//! Records with a stable identity, such as invoices keyed by their number.

use core::fmt::{Debug, Display};
use core::hash::Hash;

/// A record that sources look up by id.
pub trait Entity {
    /// Identifier shown to users (`INV-2023-001`) and used for lookups.
    type Id: Clone + Eq + Hash + Debug + Display;

    fn id(&self) -> &Self::Id;

    /// True when this record carries `id`.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ticket {
        number: String,
    }

    impl Entity for Ticket {
        type Id = String;

        fn id(&self) -> &String {
            &self.number
        }
    }

    #[test]
    fn has_id_compares_identifiers() {
        let ticket = Ticket {
            number: "T-7".to_string(),
        };
        assert!(ticket.has_id(&"T-7".to_string()));
        assert!(!ticket.has_id(&"T-8".to_string()));
    }
}
