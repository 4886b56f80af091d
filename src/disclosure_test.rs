use super::*;

#[test]
fn starts_closed_with_plus() {
    let state = Disclosure::default();
    assert!(!state.is_open());
    assert_eq!(state.icon(), "fa-plus");
    assert_eq!(state.stale_icon(), "fa-minus");
}

#[test]
fn toggle_opens_and_swaps_icon() {
    let mut state = Disclosure::default();
    assert!(state.toggle());
    assert_eq!(state.icon(), "fa-minus");
    assert_eq!(state.stale_icon(), "fa-plus");
}

#[test]
fn second_toggle_closes() {
    let mut state = Disclosure::new(true);
    assert!(!state.toggle());
    assert_eq!(state.icon(), "fa-plus");
}

#[test]
fn icons_never_match() {
    for open in [false, true] {
        let state = Disclosure::new(open);
        assert_ne!(state.icon(), state.stale_icon());
    }
}
