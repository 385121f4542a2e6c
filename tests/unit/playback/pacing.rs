use super::*;

#[test]
fn unpaced_never_waits() {
    let mut p = Pacer::new(Fps::integer(10).unwrap(), Pacing::Unpaced);
    assert_eq!(p.next_wait(), Duration::ZERO);
    assert_eq!(p.next_wait(), Duration::ZERO);
}

#[test]
fn realtime_waits_one_frame_from_previous_deadline() {
    let mut p = Pacer::new(Fps::integer(10).unwrap(), Pacing::Realtime);
    let t0 = Instant::now();
    assert_eq!(p.next_wait_at(t0), Duration::from_millis(100));
    // 30ms later the next deadline is t0 + 200ms.
    let t1 = t0 + Duration::from_millis(30);
    assert_eq!(p.next_wait_at(t1), Duration::from_millis(170));
}

#[test]
fn late_ticks_reanchor_at_now() {
    let mut p = Pacer::new(Fps::integer(10).unwrap(), Pacing::Realtime);
    let t0 = Instant::now();
    p.next_wait_at(t0);
    let late = t0 + Duration::from_secs(5);
    assert_eq!(p.next_wait_at(late), Duration::from_millis(100));
}

#[test]
fn reset_drops_deadline() {
    let mut p = Pacer::new(Fps::integer(4).unwrap(), Pacing::Realtime);
    let t0 = Instant::now();
    p.next_wait_at(t0);
    p.reset();
    let t1 = t0 + Duration::from_millis(10);
    assert_eq!(p.next_wait_at(t1), Duration::from_millis(250));
}
