use corrie::RuntimeBuilder;
use corrie::task;

#[test]
fn block_on_returns_inner_future_output() {
    let runtime = RuntimeBuilder::new().build();
    let output = runtime.block_on(async { 1 + 1 });
    assert_eq!(output, 2);
}

#[corrie::test]
async fn spawned_task_completes() {
    let handle = task::spawn(async { "done" });
    assert_eq!(handle.await, "done");
}
