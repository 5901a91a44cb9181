use crate::addr::{parse_address_with, Address, Resolve, SystemResolver};
use crate::cidr::{approximate, Approximation, CidrBlock};
use crate::error::Error;
use log::debug;
use std::fmt::{Display, Formatter};

/// An ordered collection of hosts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AddressList {
    inner: Vec<Address>,
}

impl AddressList {
    pub fn new() -> Self {
        AddressList { inner: Vec::new() }
    }

    /// Parses every input, silently skipping the ones that do not resolve.
    pub fn parse<S: AsRef<str>>(inputs: &[S]) -> Self {
        AddressList::parse_with(inputs, &SystemResolver)
    }

    pub fn parse_with<S, R>(inputs: &[S], resolver: &R) -> Self
    where
        S: AsRef<str>,
        R: Resolve + ?Sized,
    {
        let (list, skipped) = AddressList::parse_report_with(inputs, resolver);
        for (input, e) in skipped {
            debug!("skipping {:?}: {}", input, e);
        }
        list
    }

    /// Parses every input, returning the skipped inputs alongside their errors.
    pub fn parse_report<S: AsRef<str>>(inputs: &[S]) -> (Self, Vec<(String, Error)>) {
        AddressList::parse_report_with(inputs, &SystemResolver)
    }

    pub fn parse_report_with<S, R>(inputs: &[S], resolver: &R) -> (Self, Vec<(String, Error)>)
    where
        S: AsRef<str>,
        R: Resolve + ?Sized,
    {
        let mut list = AddressList::new();
        let mut skipped = Vec::new();
        for input in inputs {
            let input = input.as_ref();
            match parse_address_with(input, resolver) {
                Ok(ip) => list.push(ip),
                Err(e) => skipped.push((input.to_owned(), e)),
            }
        }
        (list, skipped)
    }

    pub fn push(&mut self, ip: Address) {
        self.inner.push(ip);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether the entry at `i` orders before the entry at `j`.
    /// False when either index is out of range.
    pub fn less(&self, i: usize, j: usize) -> bool {
        match (self.inner.get(i), self.inner.get(j)) {
            (Some(a), Some(b)) => a.to_int() < b.to_int(),
            _ => false,
        }
    }

    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.inner.swap(i, j);
    }

    /// Sorts ascending by integer value, keeping the order of equal hosts.
    pub fn sort(&mut self) {
        self.inner.sort_by_key(Address::to_int);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.inner.iter()
    }

    pub fn strings(&self) -> Vec<String> {
        self.inner.iter().map(|ip| ip.to_string()).collect()
    }

    pub fn approx(&self) -> Vec<CidrBlock> {
        self.approx_with(Approximation::default())
    }

    pub fn approx_with(&self, mode: Approximation) -> Vec<CidrBlock> {
        approximate(self.inner.iter(), mode)
    }
}

impl Display for AddressList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for ip in self.inner.iter() {
            writeln!(f, "{}", ip)?;
        }
        Ok(())
    }
}

impl std::iter::FromIterator<Address> for AddressList {
    fn from_iter<T: IntoIterator<Item = Address>>(iter: T) -> Self {
        AddressList {
            inner: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AddressList {
    type Item = Address;
    type IntoIter = std::vec::IntoIter<Address>;
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
