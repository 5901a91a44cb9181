use crate::addr::{prefix_mask, Address};
use log::trace;
use std::collections::BTreeMap;
use std::fmt::{Display, Error, Formatter};

/// Prefix length shared by every member of a group.
pub const GROUP_PREFIX: u8 = 24;

/// A network: base address and prefix length (32 is a single host).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CidrBlock {
    base: Address,
    prefix_len: u8,
}

impl CidrBlock {
    /// Builds a block, clearing the host bits of `base`. Lengths above 32 saturate.
    pub fn new(base: &Address, prefix_len: u8) -> Self {
        let prefix_len = prefix_len.min(32);
        CidrBlock {
            base: base.mask(prefix_len),
            prefix_len,
        }
    }

    fn host(ip: &Address) -> Self {
        CidrBlock {
            base: Address::from_int(ip.to_int()),
            prefix_len: 32,
        }
    }

    pub fn base(&self) -> &Address {
        &self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn first(&self) -> Address {
        self.base.mask(self.prefix_len)
    }

    pub fn last(&self) -> Address {
        Address::from_int(self.first().to_int() | !prefix_mask(self.prefix_len))
    }

    pub fn contains(&self, ip: &Address) -> bool {
        let mask = prefix_mask(self.prefix_len);
        self.base.to_int() & mask == ip.to_int() & mask
    }
}

impl Display for CidrBlock {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

/// How a `/24` group's block absorbs another member.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Approximation {
    /// Narrow to the common prefix of the block and the new address.
    /// The block always covers every member seen so far.
    CommonPrefix,
    /// Compare only the last octet of the block base and the new address,
    /// from the top bit down, and cut at the first differing bit. May
    /// narrow a block that was already wider.
    BitScan,
}

impl Default for Approximation {
    fn default() -> Self {
        Approximation::CommonPrefix
    }
}

impl Approximation {
    fn absorb(self, block: &mut CidrBlock, ip: &Address) {
        match self {
            Approximation::CommonPrefix => {
                let common = (block.base.to_int() ^ ip.to_int()).leading_zeros() as u8;
                let prefix_len = block.prefix_len.min(common);
                *block = CidrBlock::new(&block.base, prefix_len);
            }
            Approximation::BitScan => {
                let now = block.base.octets()[3];
                let new = ip.octets()[3];
                let mut base_net = 0u8;
                for i in (1..=8u8).rev() {
                    let bit = 1u8 << (i - 1);
                    if now & bit != 0 && new & bit != 0 {
                        base_net += bit;
                    }
                    if (now ^ new) & bit != 0 {
                        block.prefix_len = 32 - i;
                        let net = block.base.to_int() & !0xFF;
                        block.base = Address::from_int(net | u32::from(base_net));
                        break;
                    }
                }
            }
        }
    }
}

/// Summarizes `addresses` into one block per `/24` group, ordered by group.
pub fn approximate<'a, I>(addresses: I, mode: Approximation) -> Vec<CidrBlock>
where
    I: IntoIterator<Item = &'a Address>,
{
    let mut groups: BTreeMap<u32, CidrBlock> = BTreeMap::new();
    for ip in addresses {
        let key = ip.mask(GROUP_PREFIX).to_int();
        match groups.get_mut(&key) {
            Some(block) => {
                mode.absorb(block, ip);
                trace!("{} -> {}", ip, block);
            }
            None => {
                trace!("{} starts group {}", ip, ip.mask(GROUP_PREFIX));
                groups.insert(key, CidrBlock::host(ip));
            }
        }
    }
    groups.into_iter().map(|(_, v)| v).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn addrs(v: &[&str]) -> Vec<Address> {
        v.iter().map(|s| Address::from_literal(s).unwrap()).collect()
    }

    fn render(blocks: &[CidrBlock]) -> Vec<String> {
        blocks.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn some_tests() {
        let b = CidrBlock::new(&Address::from_int(0x0A00_0107), 30);
        assert_eq!("10.0.1.4/30", b.to_string());
        assert_eq!("10.0.1.4", b.first().to_string());
        assert_eq!("10.0.1.7", b.last().to_string());
        assert!(b.contains(&Address::from_int(0x0A00_0105)));
        assert!(!b.contains(&Address::from_int(0x0A00_0108)));
        assert_eq!("0.0.0.0/0", CidrBlock::new(&Address::from_int(u32::MAX), 0).to_string());
        assert_eq!("255.255.255.255", CidrBlock::new(&Address::from_int(0), 0).last().to_string());
    }

    #[test]
    fn single_group() {
        let ips = addrs(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
        for mode in [Approximation::CommonPrefix, Approximation::BitScan].iter() {
            assert_eq!(vec!["10.0.0.0/30"], render(&approximate(&ips, *mode)));
        }
        let ips = addrs(&["10.0.0.5"]);
        assert_eq!(vec!["10.0.0.5/32"], render(&approximate(&ips, Approximation::default())));
    }

    #[test]
    fn groups_never_merge() {
        let ips = addrs(&["10.0.1.1", "10.0.0.1", "10.0.0.129"]);
        assert_eq!(
            vec!["10.0.0.0/24", "10.0.1.1/32"],
            render(&approximate(&ips, Approximation::CommonPrefix))
        );
        let ips = addrs(&["10.0.0.1", "10.0.1.1"]);
        assert_eq!(2, approximate(&ips, Approximation::BitScan).len());
    }

    #[test]
    fn identical_hosts_stay_single() {
        let ips = addrs(&["10.0.0.7", "10.0.0.7"]);
        for mode in [Approximation::CommonPrefix, Approximation::BitScan].iter() {
            assert_eq!(vec!["10.0.0.7/32"], render(&approximate(&ips, *mode)));
        }
    }

    #[test]
    fn bit_scan_can_narrow() {
        let ips = addrs(&["10.0.0.0", "10.0.0.128", "10.0.0.1"]);
        assert_eq!(
            vec!["10.0.0.0/24"],
            render(&approximate(&ips, Approximation::CommonPrefix))
        );
        assert_eq!(vec!["10.0.0.0/31"], render(&approximate(&ips, Approximation::BitScan)));

        let ips = addrs(&["10.0.0.6", "10.0.0.7", "10.0.0.13"]);
        assert_eq!(vec!["10.0.0.0/28"], render(&approximate(&ips, Approximation::BitScan)));
    }

    #[quickcheck]
    fn common_prefix_covers_all(xs: Vec<u32>) -> bool {
        let ips: Vec<Address> = xs.into_iter().map(Address::from_int).collect();
        let blocks = approximate(&ips, Approximation::CommonPrefix);
        blocks.iter().all(|b| b.prefix_len() >= GROUP_PREFIX && b.first() == *b.base())
            && ips.iter().all(|ip| blocks.iter().filter(|b| b.contains(ip)).count() == 1)
    }

    #[quickcheck]
    fn one_block_per_group(xs: Vec<u32>) -> bool {
        let ips: Vec<Address> = xs.into_iter().map(Address::from_int).collect();
        let mut keys: Vec<u32> = ips.iter().map(|ip| ip.to_int() >> 8).collect();
        keys.sort_unstable();
        keys.dedup();
        let blocks = approximate(&ips, Approximation::BitScan);
        blocks.len() == keys.len()
            && blocks
                .iter()
                .zip(keys.iter())
                .all(|(b, k)| b.base().to_int() >> 8 == *k)
    }
}
