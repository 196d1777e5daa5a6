use crate::DANGER_LEVEL;

/// Edge-triggered low-battery alert.
///
/// Fires once when a sample drops to the danger level and stays silent until a
/// sample climbs back above it. One instance is shared by every device the
/// monitor sees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlertEdge {
    armed: bool,
}

impl AlertEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the alert has fired and is waiting for a recovery.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feeds one percentage sample, returning true when the alert should fire.
    pub fn observe(&mut self, percentage: u8) -> bool {
        match (self.armed, percentage <= DANGER_LEVEL) {
            (false, true) => {
                self.armed = true;
                true
            }
            (true, false) => {
                self.armed = false;
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_low_episode() {
        let mut edge = AlertEdge::new();
        let fired: Vec<bool> = [10, 10, 4, 4, 10]
            .into_iter()
            .map(|p| edge.observe(p))
            .collect();

        assert_eq!(fired, vec![false, false, true, false, false]);
        assert!(!edge.is_armed());
    }

    #[test]
    fn rearms_after_recovery() {
        let mut edge = AlertEdge::new();
        assert!(edge.observe(5));
        assert!(edge.is_armed());
        assert!(!edge.observe(0));
        assert!(!edge.observe(6));
        assert!(!edge.is_armed());
        assert!(edge.observe(2));
    }

    #[test]
    fn stays_quiet_above_danger_level() {
        let mut edge = AlertEdge::new();
        for p in [100, 50, 6] {
            assert!(!edge.observe(p));
        }
        assert!(!edge.is_armed());
    }
}
