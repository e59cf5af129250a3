use serde::Serialize;

use super::board::format_thousands;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub name: String,
    pub earnings: i64,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), earnings: 0 }
    }

    /// Add `amount` to earnings; negative amounts are penalties.
    pub fn award_money(&mut self, amount: i64) {
        self.earnings += amount;
    }

    pub fn earnings_label(&self) -> String {
        if self.earnings < 0 {
            format!("{} has -${}", self.name, format_thousands(-self.earnings))
        } else {
            format!("{} has ${}", self.name, format_thousands(self.earnings))
        }
    }
}
