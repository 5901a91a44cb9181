//! IPv4 hosts: literal parsing, integer conversion and hostname resolution.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use log::debug;
use regex::Captures;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::io;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use std::str::FromStr;

lazy_static! {
    static ref DOTTED_QUAD: Regex = Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$"
    )
    .expect("Not possible");
}

fn parse_literal(s: &str) -> Option<u32> {
    fn octet(ind: usize, v: &Captures<'_>) -> Option<u32> {
        v.get(ind)?.as_str().parse::<u32>().ok()
    }

    let v = DOTTED_QUAD.captures(s)?;
    Some((octet(1, &v)? << 24) + (octet(2, &v)? << 16) + (octet(3, &v)? << 8) + octet(4, &v)?)
}

/// Returns true if `s` is an IPv4 literal.
pub fn is_ipv4(s: &str) -> bool {
    parse_literal(s).is_some()
}

/// Big-endian integer value of an IPv4 literal.
pub fn ip_to_int(s: &str) -> Option<u32> {
    parse_literal(s)
}

/// Dotted-quad form of `n`.
pub fn int_to_ip(n: u32) -> String {
    Ipv4Addr::from(n).to_string()
}

/// Contiguous network mask of `len` leading bits. Lengths above 32 saturate.
pub fn prefix_mask(len: u8) -> u32 {
    if len == 0 {
        0
    } else if len >= 32 {
        u32::MAX
    } else {
        u32::MAX << (32 - len)
    }
}

/// Name lookup used for inputs that are not IPv4 literals.
pub trait Resolve {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>>;
}

/// Delegates to the platform resolver. Blocks with the platform's timeouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        Ok((host, 0).to_socket_addrs()?.map(|a| a.ip()).collect())
    }
}

impl<F> Resolve for F
where
    F: Fn(&str) -> io::Result<Vec<IpAddr>>,
{
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        self(host)
    }
}

/// An IPv4 host, optionally remembering the name it was resolved from.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Address {
    ip: u32,
    host: Option<String>,
}

impl Address {
    pub fn from_int(ip: u32) -> Self {
        Address { ip, host: None }
    }

    /// Parses a dotted-quad literal. `None` for anything else, including
    /// IPv6 literals and surrounding whitespace.
    pub fn from_literal(s: &str) -> Option<Self> {
        parse_literal(s).map(Address::from_int)
    }

    pub fn to_int(&self) -> u32 {
        self.ip
    }

    pub fn octets(&self) -> [u8; 4] {
        self.ip.to_be_bytes()
    }

    /// The hostname this address was resolved from, if any.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Network address of this host under a `prefix_len` bit mask.
    pub fn mask(&self, prefix_len: u8) -> Address {
        Address::from_int(self.ip & prefix_mask(prefix_len))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Ipv4Addr::from(self.ip))
    }
}

impl FromStr for Address {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Address::from_literal(s).ok_or_else(|| Error::InvalidAddress(s.to_owned()))
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address::from_int(u32::from(ip))
    }
}

impl From<&Address> for Ipv4Addr {
    fn from(addr: &Address) -> Self {
        Ipv4Addr::from(addr.ip)
    }
}

/// Parses an IPv4 literal or resolves a hostname with the platform resolver.
pub fn parse_address(target: &str) -> Result<Address> {
    parse_address_with(target, &SystemResolver)
}

/// Like [`parse_address`], resolving names through `resolver`.
///
/// The first IPv4 record wins; IPv6 records are ignored.
pub fn parse_address_with<R: Resolve + ?Sized>(target: &str, resolver: &R) -> Result<Address> {
    let target = target.trim();
    if let Some(ip) = parse_literal(target) {
        return Ok(Address::from_int(ip));
    }

    let records = resolver.lookup(target).map_err(|source| Error::Resolution {
        target: target.to_owned(),
        source,
    })?;
    for record in records {
        if let IpAddr::V4(v4) = record {
            debug!("resolved {} to {}", target, v4);
            return Ok(Address {
                ip: u32::from(v4),
                host: Some(target.to_owned()),
            });
        }
    }
    Err(Error::NotFound {
        target: target.to_owned(),
    })
}
