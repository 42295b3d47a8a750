use std::cell::Cell;

use crate::values::Value;

/// The four indexed slot families a script can read and assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFamily {
    Var,
    FVar,
    SysVar,
    SysFVar,
}

impl SlotFamily {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "var" => Some(SlotFamily::Var),
            "fvar" => Some(SlotFamily::FVar),
            "sysvar" => Some(SlotFamily::SysVar),
            "sysfvar" => Some(SlotFamily::SysFVar),
            _ => None,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, SlotFamily::FVar | SlotFamily::SysFVar)
    }
}

/// Per-character variable storage.
///
/// Writes go through `&self` so assignments made while a redirected
/// combatant is borrowed stay legal; they are visible to the next read.
#[derive(Debug, Clone)]
pub struct VariableBank {
    vars: Vec<Cell<i32>>,
    fvars: Vec<Cell<f64>>,
    sysvars: Vec<Cell<i32>>,
    sysfvars: Vec<Cell<f64>>,
}

impl Default for VariableBank {
    fn default() -> Self {
        Self::new(60, 40, 5, 5)
    }
}

impl VariableBank {
    pub fn new(vars: usize, fvars: usize, sysvars: usize, sysfvars: usize) -> Self {
        Self {
            vars: vec![Cell::new(0); vars],
            fvars: vec![Cell::new(0.0); fvars],
            sysvars: vec![Cell::new(0); sysvars],
            sysfvars: vec![Cell::new(0.0); sysfvars],
        }
    }

    /// Reads a slot; `None` if the index is out of range.
    pub fn get(&self, family: SlotFamily, index: i32) -> Option<Value> {
        let index = usize::try_from(index).ok()?;
        match family {
            SlotFamily::Var => self.vars.get(index).map(|c| Value::Integer(c.get())),
            SlotFamily::FVar => self.fvars.get(index).map(|c| Value::Float(c.get())),
            SlotFamily::SysVar => self.sysvars.get(index).map(|c| Value::Integer(c.get())),
            SlotFamily::SysFVar => self.sysfvars.get(index).map(|c| Value::Float(c.get())),
        }
    }

    /// Stores `value` coerced to the family's type and returns what was
    /// written; `None` if the index is out of range.
    pub fn set(&self, family: SlotFamily, index: i32, value: &Value) -> Option<Value> {
        let index = usize::try_from(index).ok()?;
        match family {
            SlotFamily::Var | SlotFamily::SysVar => {
                let slots = if family == SlotFamily::Var { &self.vars } else { &self.sysvars };
                let v = value.to_int();
                slots.get(index)?.set(v);
                Some(Value::Integer(v))
            }
            SlotFamily::FVar | SlotFamily::SysFVar => {
                let slots = if family == SlotFamily::FVar { &self.fvars } else { &self.sysfvars };
                let v = value.to_float();
                slots.get(index)?.set(v);
                Some(Value::Float(v))
            }
        }
    }
}
