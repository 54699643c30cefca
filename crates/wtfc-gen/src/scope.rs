//! The `NamedValues` symbol table (`spec.md` §3): variable name to
//! stack-slot reference, cleared per function and lexically shadowed by
//! `for` and `var`.

use std::collections::HashMap;

use inkwell::values::PointerValue;

#[derive(Default)]
pub struct NamedValues<'ctx> {
    slots: HashMap<String, PointerValue<'ctx>>,
}

impl<'ctx> NamedValues<'ctx> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn get(&self, name: &str) -> Option<PointerValue<'ctx>> {
        self.slots.get(name).copied()
    }

    /// Binds `name` to `slot`, returning whatever was previously bound so the
    /// caller can restore it on scope exit (`for`-loop shadowing).
    pub fn bind(&mut self, name: impl Into<String>, slot: PointerValue<'ctx>) -> Option<PointerValue<'ctx>> {
        self.slots.insert(name.into(), slot)
    }

    /// Restores a shadowed binding, or removes the name entirely if there was
    /// none.
    pub fn restore(&mut self, name: &str, previous: Option<PointerValue<'ctx>>) {
        match previous {
            Some(slot) => {
                self.slots.insert(name.to_string(), slot);
            }
            None => {
                self.slots.remove(name);
            }
        }
    }
}
