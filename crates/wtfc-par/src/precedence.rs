//! The mutable operator-precedence table (`spec.md` §3).
//!
//! Shared (via `Rc<RefCell<_>>`) across a driver and every nested driver it
//! spawns for `import`, since an `op` declaration in an imported file must
//! affect parsing back in the importer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type PrecedenceTableHandle = Rc<RefCell<PrecedenceTable>>;

/// Entries `<= 0` mean "not an operator" (`spec.md` §3).
pub struct PrecedenceTable {
    priorities: HashMap<u8, i32>,
}

impl PrecedenceTable {
    pub fn new() -> Self {
        let mut priorities = HashMap::new();
        priorities.insert(b'=', 2);
        priorities.insert(b'<', 10);
        priorities.insert(b'+', 20);
        priorities.insert(b'-', 20);
        priorities.insert(b'*', 40);
        priorities.insert(b'/', 40);
        Self { priorities }
    }

    pub fn shared() -> PrecedenceTableHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Returns the precedence of `op`, or `None` if it is not a registered
    /// operator.
    pub fn get(&self, op: u8) -> Option<i32> {
        self.priorities.get(&op).copied().filter(|p| *p > 0)
    }

    pub fn set(&mut self, op: u8, precedence: i32) {
        self.priorities.insert(op, precedence);
    }
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_spec() {
        let table = PrecedenceTable::new();
        assert_eq!(table.get(b'='), Some(2));
        assert_eq!(table.get(b'<'), Some(10));
        assert_eq!(table.get(b'+'), Some(20));
        assert_eq!(table.get(b'-'), Some(20));
        assert_eq!(table.get(b'*'), Some(40));
        assert_eq!(table.get(b'/'), Some(40));
        assert_eq!(table.get(b':'), None);
    }

    #[test]
    fn installing_an_operator_makes_it_visible() {
        let mut table = PrecedenceTable::new();
        table.set(b':', 5);
        assert_eq!(table.get(b':'), Some(5));
    }

    #[test]
    fn non_positive_precedence_is_not_an_operator() {
        let mut table = PrecedenceTable::new();
        table.set(b':', 0);
        assert_eq!(table.get(b':'), None);
    }
}
