use std::time::Duration;

/// Interval between two DNS probes.
pub const PROBE_INTERVAL: Duration = Duration::from_secs(5);

/// Probed when the configured URL has no usable host.
pub const DEFAULT_PROBE_HOST: &str = "www.youtube.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityTransition {
    /// offline → online. The only edge that triggers a reload.
    Restored,
    /// online → offline.
    Lost,
    Unchanged,
}

/// Edge detector over successive probe results. Starts online so the first
/// successful probe after launch does not reload.
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    is_online: bool,
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        Self { is_online: true }
    }
}

impl ConnectivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_online(&self) -> bool {
        self.is_online
    }

    pub fn observe(&mut self, reachable: bool) -> ConnectivityTransition {
        let transition = match (self.is_online, reachable) {
            (false, true) => ConnectivityTransition::Restored,
            (true, false) => ConnectivityTransition::Lost,
            _ => ConnectivityTransition::Unchanged,
        };
        self.is_online = reachable;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_offline_to_online_is_restored() {
        let mut tracker = ConnectivityTracker::new();
        let observed: Vec<_> = [true, false, false, true, true, false, true]
            .into_iter()
            .map(|reachable| tracker.observe(reachable))
            .collect();

        assert_eq!(
            observed,
            vec![
                ConnectivityTransition::Unchanged,
                ConnectivityTransition::Lost,
                ConnectivityTransition::Unchanged,
                ConnectivityTransition::Restored,
                ConnectivityTransition::Unchanged,
                ConnectivityTransition::Lost,
                ConnectivityTransition::Restored,
            ]
        );
    }

    #[test]
    fn reload_fires_once_per_recovery() {
        let cases: &[(&[bool], &[usize])] = &[
            (&[true, true, false, false, true], &[4]),
            (&[true, true, true], &[]),
            (&[false, true, false, true], &[1, 3]),
        ];

        for (results, expected) in cases {
            let mut tracker = ConnectivityTracker::new();
            let restored: Vec<usize> = results
                .iter()
                .enumerate()
                .filter(|(_, reachable)| {
                    tracker.observe(**reachable) == ConnectivityTransition::Restored
                })
                .map(|(index, _)| index)
                .collect();
            assert_eq!(restored, expected.to_vec(), "results: {results:?}");
        }
    }

    #[test]
    fn starts_online() {
        assert!(ConnectivityTracker::new().is_online());
    }
}
