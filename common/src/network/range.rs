use std::net::Ipv4Addr;

/// An inclusive span of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Iterates every address from start to end inclusive, in ascending order.
    ///
    /// A reversed range (start > end) yields nothing. That mirrors the
    /// underlying integer range semantics and is surfaced to the operator as
    /// a zero-address sweep rather than an error.
    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> usize {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if start > end {
            0
        } else {
            (end - start) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
