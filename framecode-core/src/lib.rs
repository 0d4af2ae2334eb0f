//! # Framecode Core
//!
//! Exact rational arithmetic used to describe frame rates such as
//! `30000/1001` without the loss of a decimal `29.97`.
//!
//! - Comparison by cross-multiplication, with `0/0` as an undefined value
//! - Reduction to a bounded denominator via continued fractions
//! - Pure multiply, divide, add and subtract

pub mod error;
pub mod rational;

pub use error::{Error, Result};
pub use rational::{
    add_q, cmp_q, div_q, gcd, inv_q, mul_q, reduce, sub_q, Rational, FPS_23_976, FPS_24, FPS_25,
    FPS_29_97, FPS_30, FPS_48, FPS_50, FPS_59_94, FPS_60,
};
