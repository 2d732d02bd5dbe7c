/// Identifies one navigation, in the order navigations started.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavTicket(pub u64);

/// Hands out monotonically increasing tickets so that a response belonging
/// to a superseded navigation can be recognized and dropped.
#[derive(Debug, Default)]
pub struct NavigationSequence {
    latest: u64,
}

impl NavigationSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> NavTicket {
        self.latest += 1;
        NavTicket(self.latest)
    }

    pub fn latest(&self) -> Option<NavTicket> {
        (self.latest > 0).then_some(NavTicket(self.latest))
    }

    pub fn is_current(&self, ticket: NavTicket) -> bool {
        self.latest() == Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let mut seq = NavigationSequence::new();
        assert_eq!(seq.latest(), None);

        let first = seq.begin();
        assert!(seq.is_current(first));

        let second = seq.begin();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert_eq!(seq.latest(), Some(second));
    }
}
