//! Serializable shapes of the scan reports.

pub mod dto;
