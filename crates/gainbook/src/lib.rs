//! Capital gains CLI.
//!
//! This crate provides the `gainbook` command, which reads acquisition and
//! disposal lots from CSV files, matches them with a lot selection method and
//! prints realized gains grouped by holding period.
//!
//! # Example Usage
//!
//! ```bash
//! gainbook FIFO acquisitions.csv disposals.csv
//! gainbook HIFO acquisitions.csv disposals.csv --format json --strict
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod report;
