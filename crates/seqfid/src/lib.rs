#![doc = include_str!("../README.md")]

mod error;
mod fid;
mod range;
mod rpc;
mod seq;

pub use crate::error::*;
pub use crate::fid::*;
pub use crate::range::*;
pub use crate::rpc::*;
pub use crate::seq::*;
