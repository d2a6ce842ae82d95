use super::*;

#[test]
fn observer_when_supported_and_motion_allowed() {
    let caps = Capabilities { intersection_observer: true, reduced_motion: false };
    assert_eq!(caps.strategy(), Strategy::Observer);
}

#[test]
fn polling_when_observer_missing() {
    let caps = Capabilities { intersection_observer: false, reduced_motion: false };
    assert_eq!(caps.strategy(), Strategy::Polling);
}

#[test]
fn polling_when_reduced_motion_preferred() {
    let caps = Capabilities { intersection_observer: true, reduced_motion: true };
    assert_eq!(caps.strategy(), Strategy::Polling);
}

#[test]
fn default_capabilities_poll() {
    assert_eq!(Capabilities::default().strategy(), Strategy::Polling);
}
