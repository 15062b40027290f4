/*!
 * Kernel Scenario Tests
 * Scheduling, allocation and destroy scenarios against the public API
 */

use pretty_assertions::assert_eq;
use prm_kernel::{ErrorKind, Kernel, KernelError, ProcessState, Units};

fn available(kernel: &Kernel, resource: &str) -> Units {
    kernel.resource_info(resource).unwrap().available
}

fn state(kernel: &Kernel, name: &str) -> ProcessState {
    let pid = kernel.find(name).unwrap();
    kernel.process(pid).unwrap().state
}

#[test]
fn test_init_leaves_only_init_running() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();
    kernel.init().unwrap();

    let status = kernel.status();
    assert_eq!(status.processes.len(), 1);
    assert_eq!(status.processes[0].name, "init");
    assert_eq!(status.processes[0].state, "running");
    assert_eq!(status.running, "init");
}

#[test]
fn test_high_priority_preempts() {
    let mut kernel = Kernel::new();
    kernel.create("a", 2).unwrap();
    kernel.create("b", 1).unwrap();
    assert_eq!(kernel.running_name(), "a");
    assert_eq!(state(&kernel, "b"), ProcessState::Ready);
}

#[test]
fn test_new_high_process_preempts_low_parent() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();
    kernel.create("b", 2).unwrap();
    assert_eq!(kernel.running_name(), "b");
    assert_eq!(state(&kernel, "a"), ProcessState::Ready);
}

#[test]
fn test_duplicate_name_is_conflict() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();
    kernel.create("b", 2).unwrap();

    let before = kernel.status();
    let err = kernel.create("a", 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), "duplicate process name: a");
    assert_eq!(kernel.status(), before);
}

#[test]
fn test_destroy_missing_process_twice() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();
    let before = kernel.status();

    for _ in 0..2 {
        let err = kernel.destroy("q").unwrap_err();
        assert_eq!(err, KernelError::ProcessNotFound("q".into()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(kernel.status(), before);
    }
}

#[test]
fn test_destroy_init_is_permission_error() {
    let mut kernel = Kernel::new();
    let err = kernel.destroy("init").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Permission);
}

#[test]
fn test_request_release_round_trip() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();
    let before = available(&kernel, "R2");

    kernel.request("R2", 2).unwrap();
    kernel.release("R2", 2).unwrap();

    assert_eq!(available(&kernel, "R2"), before);
    assert!(kernel.process_info("a").unwrap().holdings.is_empty());
}

#[test]
fn test_destroy_returns_held_units() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();
    kernel.request("R1", 1).unwrap();
    assert_eq!(available(&kernel, "R1"), 0);

    kernel.destroy("a").unwrap();
    assert_eq!(available(&kernel, "R1"), 1);
    assert_eq!(kernel.running_name(), "init");
    assert!(kernel.check_invariants().is_ok());
}

#[test]
fn test_timeout_with_only_init() {
    let mut kernel = Kernel::new();
    let before = kernel.status();
    kernel.timeout().unwrap();
    assert_eq!(kernel.running_name(), "init");
    assert_eq!(kernel.status(), before);
}

#[test]
fn test_head_of_line_blocking() {
    let mut kernel = Kernel::new();
    kernel.create("h", 1).unwrap();
    kernel.request("R3", 3).unwrap();

    kernel.create("a", 2).unwrap();
    kernel.request("R3", 3).unwrap();
    kernel.create("b", 2).unwrap();
    kernel.request("R3", 1).unwrap();
    assert_eq!(kernel.running_name(), "h");

    // Two units free: enough for b, not for a at the head
    kernel.release("R3", 2).unwrap();
    assert_eq!(available(&kernel, "R3"), 2);
    assert!(matches!(state(&kernel, "a"), ProcessState::Blocked { .. }));
    assert!(matches!(state(&kernel, "b"), ProcessState::Blocked { .. }));
    assert_eq!(kernel.running_name(), "h");

    kernel.release("R3", 1).unwrap();
    assert_eq!(kernel.running_name(), "a");
    assert_eq!(available(&kernel, "R3"), 0);
    assert!(matches!(state(&kernel, "b"), ProcessState::Blocked { .. }));

    kernel.release("R3", 3).unwrap();
    assert_eq!(state(&kernel, "b"), ProcessState::Ready);
    assert_eq!(available(&kernel, "R3"), 2);
    assert_eq!(kernel.running_name(), "a");
    assert!(kernel.check_invariants().is_ok());
}

#[test]
fn test_cascade_serves_several_waiters() {
    let mut kernel = Kernel::new();
    kernel.create("h", 1).unwrap();
    kernel.request("R4", 4).unwrap();

    for name in ["w1", "w2", "w3"] {
        kernel.create(name, 2).unwrap();
        kernel.request("R4", 1).unwrap();
    }
    kernel.create("big", 2).unwrap();
    kernel.request("R4", 2).unwrap();
    assert_eq!(kernel.running_name(), "h");

    kernel.release("R4", 4).unwrap();
    // w1..w3 take 3 units, big needs 2 with 1 left
    assert_eq!(kernel.running_name(), "w1");
    assert_eq!(available(&kernel, "R4"), 1);
    assert_eq!(
        kernel.resource_info("R4").unwrap().waiting[0].process,
        "big"
    );

    let high = &kernel.status().ready[0];
    assert_eq!(high.processes, vec!["w1", "w2", "w3"]);
}

#[test]
fn test_destroy_wakes_waiter_outside_subtree() {
    let mut kernel = Kernel::new();
    kernel.create("q", 1).unwrap();
    kernel.request("R1", 1).unwrap();
    kernel.create("p", 2).unwrap();
    kernel.request("R2", 2).unwrap();
    kernel.request("R1", 1).unwrap();
    assert_eq!(kernel.running_name(), "q");

    kernel.request("R2", 1).unwrap();
    assert_eq!(kernel.running_name(), "init");

    // p's cancelled R1 wait grants nothing; its R2 units go to q, its parent
    kernel.destroy("p").unwrap();
    assert_eq!(kernel.running_name(), "q");
    assert_eq!(available(&kernel, "R1"), 0);
    assert_eq!(available(&kernel, "R2"), 1);
    assert_eq!(
        kernel.process_info("q").unwrap().holdings,
        vec![("R1".to_string(), 1), ("R2".to_string(), 1)]
    );
    assert!(kernel.check_invariants().is_ok());
}

#[test]
fn test_destroy_cancels_pending_requests() {
    let mut kernel = Kernel::new();
    kernel.create("p", 1).unwrap();
    kernel.request("R2", 2).unwrap();
    kernel.create("c", 1).unwrap();
    kernel.timeout().unwrap();
    assert_eq!(kernel.running_name(), "c");
    kernel.request("R2", 1).unwrap();
    assert_eq!(kernel.running_name(), "p");

    kernel.destroy("c").unwrap();
    assert!(kernel.resource_info("R2").unwrap().waiting.is_empty());
    assert_eq!(available(&kernel, "R2"), 0);

    kernel.create("w", 2).unwrap();
    kernel.request("R2", 2).unwrap();
    assert_eq!(kernel.running_name(), "p");

    // w is torn down before p frees R2, so nobody is woken
    kernel.destroy("p").unwrap();
    assert_eq!(available(&kernel, "R2"), 2);
    assert_eq!(kernel.process_count(), 1);
    assert_eq!(kernel.stats().wakeups, 0);
    assert!(kernel.check_invariants().is_ok());
}

#[test]
fn test_destroy_wakes_parent_inside_subtree() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();
    kernel.create("c", 1).unwrap();
    kernel.timeout().unwrap();
    assert_eq!(kernel.running_name(), "c");
    kernel.request("R1", 1).unwrap();
    kernel.timeout().unwrap();
    assert_eq!(kernel.running_name(), "a");
    kernel.request("R1", 1).unwrap();
    assert_eq!(kernel.running_name(), "c");

    // c is torn down first and hands R1 to a, which is then torn down too
    kernel.destroy("a").unwrap();
    assert_eq!(kernel.running_name(), "init");
    assert_eq!(available(&kernel, "R1"), 1);
    assert_eq!(kernel.process_count(), 1);
    assert!(kernel.check_invariants().is_ok());
}

#[test]
fn test_failed_operations_leave_state_unchanged() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();
    kernel.request("R3", 2).unwrap();
    let before = kernel.status();

    let failures: Vec<KernelError> = vec![
        kernel.create("b", 7).unwrap_err(),
        kernel.request("R1", 2).unwrap_err(),
        kernel.request("nope", 1).unwrap_err(),
        kernel.release("R4", 1).unwrap_err(),
        kernel.release("R3", 3).unwrap_err(),
        kernel.destroy("zz").unwrap_err(),
    ];

    let kinds: Vec<ErrorKind> = failures.iter().map(KernelError::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::Validation,
            ErrorKind::Validation,
            ErrorKind::NotFound,
            ErrorKind::State,
            ErrorKind::Validation,
            ErrorKind::NotFound,
        ]
    );
    assert_eq!(kernel.status(), before);
}

#[test]
fn test_holder_blocks_on_its_own_resource() {
    let mut kernel = Kernel::new();
    kernel.create("a", 1).unwrap();
    kernel.create("b", 1).unwrap();
    kernel.request("R3", 2).unwrap();

    // a holds 2 of 3 and asks for 2 more: accepted, and it can never be served
    kernel.request("R3", 2).unwrap();
    assert!(matches!(state(&kernel, "a"), ProcessState::Blocked { .. }));
    assert_eq!(kernel.running_name(), "b");
    assert_eq!(available(&kernel, "R3"), 1);
    assert!(kernel.check_invariants().is_ok());

    // A sibling may still take the free unit; returning it does not wake a
    kernel.request("R3", 1).unwrap();
    assert_eq!(available(&kernel, "R3"), 0);
    kernel.release("R3", 1).unwrap();
    kernel.timeout().unwrap();

    assert!(matches!(state(&kernel, "a"), ProcessState::Blocked { .. }));
    assert_eq!(kernel.running_name(), "b");
    assert_eq!(kernel.resource_info("R3").unwrap().waiting[0].units, 2);
    assert_eq!(kernel.process_info("a").unwrap().holdings, vec![("R3".to_string(), 2)]);
    assert!(kernel.check_invariants().is_ok());
}
