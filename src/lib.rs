//! IPv4 host normalization and approximate CIDR summarization.
//!
//! Inputs are IPv4 literals or hostnames. Hostnames go through a
//! [`Resolve`] implementation, the platform resolver by default, and only
//! IPv4 records are kept. [`AddressList::approx`] folds the hosts of every
//! `/24` network into a single block.
//!
//! ```
//! use ipcs::AddressList;
//!
//! let list = AddressList::parse(&["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.1.9"]);
//! let blocks: Vec<String> = list.approx().iter().map(|b| b.to_string()).collect();
//! assert_eq!(vec!["10.0.0.0/30", "10.0.1.9/32"], blocks);
//! ```

pub mod addr;
pub mod cidr;
mod error;
pub mod list;

pub use addr::{
    int_to_ip, ip_to_int, is_ipv4, parse_address, parse_address_with, Address, Resolve,
    SystemResolver,
};
pub use cidr::{approximate, Approximation, CidrBlock};
pub use error::{Error, Result};
pub use list::AddressList;
