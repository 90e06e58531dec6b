use corrie::sync::Latch;
use corrie::task::{self, JoinSet};

use std::sync::Arc;

#[test]
fn try_wait_is_false_until_count_reaches_zero() {
    let latch = Latch::new(3);
    assert!(!latch.try_wait());

    latch.count_down(1);
    assert!(!latch.try_wait());

    latch.count_down(2);
    assert!(latch.try_wait());
}

#[test]
fn try_wait_true_once_already_past_zero() {
    let latch = Latch::new(1);
    latch.count_down(5);
    assert!(latch.try_wait());
}

#[corrie::test]
async fn wait_releases_every_waiter_exactly_once() {
    let latch = Arc::new(Latch::new(3));
    let mut set = JoinSet::new();

    for _ in 0..3 {
        let latch = latch.clone();
        set.spawn(async move {
            latch.wait().await;
        });
    }

    let trigger = latch.clone();
    task::spawn(async move {
        trigger.count_down(1);
        trigger.count_down(1);
        trigger.count_down(1);
    });

    set.join_all().await;
    assert!(latch.try_wait());
}

#[corrie::test]
async fn latch_and_joinset_combination_does_not_deadlock() {
    let latch = Arc::new(Latch::new(1));
    let mut set = JoinSet::new();

    let waiter_latch = latch.clone();
    set.spawn(async move {
        waiter_latch.arrive_and_wait(0).await;
    });

    latch.count_down(1);
    set.join_all().await;

    assert!(set.is_empty());
}
