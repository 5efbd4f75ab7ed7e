use chrono::{DateTime, Utc};

use crate::predict::types::{PassPhase, PassWindow};

/// Place `now` relative to a pass window. Pure: identical inputs always
/// yield the identical phase and delta.
pub fn classify(window: &PassWindow, now: DateTime<Utc>) -> PassPhase {
    if !window.ever_up || !window.ever_down {
        return PassPhase::NoData;
    }

    match (window.rise, window.set) {
        (Some(rise), Some(set)) if rise.time < set.time => {
            if now < rise.time {
                PassPhase::UpcomingRise {
                    until_rise: rise.time - now,
                }
            } else if now < set.time {
                PassPhase::InProgress {
                    until_set: set.time - now,
                }
            } else {
                PassPhase::JustSet {
                    since_set: now - set.time,
                }
            }
        }
        // Either the window was computed mid-pass (set before rise) or only
        // a set edge exists; both mean the target was up when the search
        // began.
        (_, Some(set)) => {
            if now < set.time {
                PassPhase::InProgress {
                    until_set: set.time - now,
                }
            } else {
                PassPhase::JustSet {
                    since_set: now - set.time,
                }
            }
        }
        _ => PassPhase::NoData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::types::PassEdge;
    use chrono::{Duration, TimeZone, Utc};

    fn edge(minute: i64) -> PassEdge {
        PassEdge {
            time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute),
            azimuth_deg: 180.0,
        }
    }

    fn t(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute)
    }

    fn window(rise: Option<PassEdge>, set: Option<PassEdge>) -> PassWindow {
        PassWindow {
            rise,
            set,
            ever_up: true,
            ever_down: true,
        }
    }

    #[test]
    fn no_data_when_threshold_never_crossed_both_ways() {
        let mut w = window(Some(edge(10)), Some(edge(20)));
        w.ever_down = false;
        assert_eq!(classify(&w, t(0)), PassPhase::NoData);
        w.ever_down = true;
        w.ever_up = false;
        assert_eq!(classify(&w, t(0)), PassPhase::NoData);
    }

    #[test]
    fn upcoming_then_in_progress_then_just_set() {
        let w = window(Some(edge(10)), Some(edge(20)));
        assert_eq!(
            classify(&w, t(4)),
            PassPhase::UpcomingRise {
                until_rise: Duration::minutes(6)
            }
        );
        assert_eq!(
            classify(&w, t(12)),
            PassPhase::InProgress {
                until_set: Duration::minutes(8)
            }
        );
        assert_eq!(
            classify(&w, t(25)),
            PassPhase::JustSet {
                since_set: Duration::minutes(5)
            }
        );
    }

    #[test]
    fn rise_instant_counts_as_in_progress() {
        let w = window(Some(edge(10)), Some(edge(20)));
        assert_eq!(
            classify(&w, t(10)),
            PassPhase::InProgress {
                until_set: Duration::minutes(10)
            }
        );
    }

    #[test]
    fn set_before_rise_means_pass_underway() {
        // Window computed mid-pass: the set comes first, the next rise later.
        let w = window(Some(edge(40)), Some(edge(5)));
        assert_eq!(
            classify(&w, t(2)),
            PassPhase::InProgress {
                until_set: Duration::minutes(3)
            }
        );
        assert_eq!(
            classify(&w, t(9)),
            PassPhase::JustSet {
                since_set: Duration::minutes(4)
            }
        );
    }

    #[test]
    fn set_without_rise_still_classifies() {
        let w = window(None, Some(edge(5)));
        assert_eq!(
            classify(&w, t(0)),
            PassPhase::InProgress {
                until_set: Duration::minutes(5)
            }
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let w = window(Some(edge(10)), Some(edge(20)));
        let now = t(12);
        assert_eq!(classify(&w, now), classify(&w, now));
    }
}
