//! Compare two rationals.

use clap::Args;
use framecode_core::Rational;
use std::cmp::Ordering;

/// Compare two rationals by value.
#[derive(Args, Debug)]
pub struct CmdCompare {
    /// Left-hand rational (num/den).
    #[arg(allow_hyphen_values = true)]
    pub a: Rational,

    /// Right-hand rational (num/den).
    #[arg(allow_hyphen_values = true)]
    pub b: Rational,
}

impl CmdCompare {
    /// Relation between the two operands, `"undefined"` for `0/0`.
    pub fn relation(&self) -> &'static str {
        match self.a.compare(&self.b) {
            Some(Ordering::Less) => "<",
            Some(Ordering::Equal) => "=",
            Some(Ordering::Greater) => ">",
            None => "undefined",
        }
    }

    /// Execute the compare command.
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let relation = self.relation();

        if json {
            let output = serde_json::json!({
                "a": self.a,
                "b": self.b,
                "relation": relation,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{} {} {}", self.a, relation, self.b);
        }
        Ok(())
    }
}
