//! Reduce a fraction, optionally under a bound.

use clap::Args;
use framecode_core::{reduce, Rational};
use serde::Serialize;

/// Result of a reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reduction {
    /// Reduced fraction.
    pub rational: Rational,
    /// Whether the reduction is exact.
    pub exact: bool,
}

/// Reduce a fraction to lowest terms.
#[derive(Args, Debug)]
pub struct CmdReduce {
    /// Numerator.
    #[arg(allow_hyphen_values = true)]
    pub num: i64,

    /// Denominator.
    #[arg(allow_hyphen_values = true)]
    pub den: i64,

    /// Largest allowed numerator or denominator.
    #[arg(long, default_value_t = i64::MAX)]
    pub max: i64,
}

impl CmdReduce {
    /// Compute the reduction.
    pub fn reduce(&self) -> Reduction {
        let (rational, exact) = reduce(self.num, self.den, self.max);
        Reduction { rational, exact }
    }

    /// Execute the reduce command.
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let reduction = self.reduce();

        if json {
            println!("{}", serde_json::to_string_pretty(&reduction)?);
        } else {
            let kind = if reduction.exact { "exact" } else { "approximate" };
            println!("{} ({})", reduction.rational, kind);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    #[command(name = "test")]
    struct TestCli {
        #[command(flatten)]
        cmd: CmdReduce,
    }

    #[test]
    fn test_reduce_unbounded() {
        let cli = TestCli::try_parse_from(["test", "123442143", "213432"]).unwrap();
        assert_eq!(
            cli.cmd.reduce(),
            Reduction {
                rational: Rational::new(41147381, 71144),
                exact: true,
            }
        );
    }

    #[test]
    fn test_reduce_bounded_negative() {
        let cli =
            TestCli::try_parse_from(["test", "-31415926", "10000000", "--max", "1000"]).unwrap();
        assert_eq!(
            cli.cmd.reduce(),
            Reduction {
                rational: Rational::new(-355, 113),
                exact: false,
            }
        );
    }
}
