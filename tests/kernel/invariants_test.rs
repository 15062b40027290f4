/*!
 * Kernel Invariant Tests
 * Random operation sequences must never break the global invariants
 */

use proptest::prelude::*;
use prm_kernel::{Kernel, Units};

#[derive(Debug, Clone)]
enum Op {
    Create(u8, u8),
    Destroy(u8),
    Request(u8, Units),
    Release(u8, Units),
    Timeout,
    Init,
}

const NAMES: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "init"];
const RESOURCES: [&str; 5] = ["R1", "R2", "R3", "R4", "R5"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..8, 0u8..4).prop_map(|(n, p)| Op::Create(n, p)),
        2 => (0u8..8).prop_map(Op::Destroy),
        4 => (0u8..5, 0u32..5).prop_map(|(r, u)| Op::Request(r, u)),
        3 => (0u8..5, 0u32..5).prop_map(|(r, u)| Op::Release(r, u)),
        3 => Just(Op::Timeout),
        1 => Just(Op::Init),
    ]
}

fn apply(kernel: &mut Kernel, op: &Op) -> bool {
    let result = match *op {
        Op::Create(n, p) => kernel.create(NAMES[n as usize], p),
        Op::Destroy(n) => kernel.destroy(NAMES[n as usize]),
        Op::Request(r, u) => kernel.request(RESOURCES[r as usize], u),
        Op::Release(r, u) => kernel.release(RESOURCES[r as usize], u),
        Op::Timeout => kernel.timeout(),
        Op::Init => kernel.init(),
    };
    result.is_ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 1..80)) {
        let mut kernel = Kernel::new();
        for op in &ops {
            let before = kernel.status();
            let ok = apply(&mut kernel, op);

            if let Err(err) = kernel.check_invariants() {
                return Err(TestCaseError::fail(format!("after {op:?}: {err}")));
            }
            if !ok {
                prop_assert_eq!(&kernel.status(), &before, "failed {:?} changed state", op);
            }
        }
    }

    #[test]
    fn prop_init_always_survives(ops in prop::collection::vec(op(), 1..60)) {
        let mut kernel = Kernel::new();
        for op in &ops {
            apply(&mut kernel, op);
            prop_assert!(kernel.find("init").is_some());
            prop_assert!(kernel.process_count() >= 1);
        }
    }

    #[test]
    fn prop_destroy_everything_restores_pool(ops in prop::collection::vec(op(), 1..60)) {
        let mut kernel = Kernel::new();
        for op in &ops {
            apply(&mut kernel, op);
        }

        // Init's own holdings survive; everyone else's come back
        let init = kernel.process(kernel.init_pid()).cloned();
        for name in &NAMES[..7] {
            let _ = kernel.destroy(name);
        }
        prop_assert_eq!(kernel.process_count(), 1);
        prop_assert_eq!(kernel.running_name(), "init");

        if let Some(init) = init {
            for rcb in kernel.resources().iter() {
                prop_assert_eq!(rcb.available() + init.held(rcb.id()), rcb.max());
            }
        }
        prop_assert!(kernel.check_invariants().is_ok());
    }
}
