//! Model-based property tests for the admission queue.
//!
//! These tests generate random join/leave sequences and verify that the
//! proxy behaves identically to a plain reference model, and that the FIFO
//! invariants hold after every single step:
//!
//! - each session appears in the queue at most once
//! - at most one session holds write access at any time
//! - the holder is always the earliest-joined session still present

use proptest::prelude::*;
use roster_core::{AccessAction, AccessProxy, Record, RecordFields, SessionId};

const RECORD: u64 = 1;
const SESSIONS: u64 = 6;

#[derive(Debug, Clone)]
enum Op {
    Join(SessionId),
    Leave(SessionId),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![(0..SESSIONS).prop_map(Op::Join), (0..SESSIONS).prop_map(Op::Leave)]
}

proptest! {
    #[test]
    fn proxy_matches_reference_model(ops in proptest::collection::vec(op_strategy(), 1..64)) {
        let mut proxy = AccessProxy::new(Record::new(RECORD, RecordFields::default()));
        let mut model: Vec<SessionId> = Vec::new();

        for op in ops {
            match op {
                Op::Join(session) => {
                    let result = proxy.join(session);
                    if model.first() == Some(&session) {
                        // Rejoin while head: no-op
                        prop_assert_eq!(result.unwrap(), vec![]);
                    } else if model.contains(&session) {
                        // Rejoin behind the head: violation, no mutation
                        prop_assert!(result.is_err());
                    } else {
                        model.push(session);
                        let expected = if model.len() == 1 {
                            vec![AccessAction::NotifyAcquired { session, record: RECORD }]
                        } else {
                            vec![]
                        };
                        prop_assert_eq!(result.unwrap(), expected);
                    }
                },
                Op::Leave(session) => {
                    let actions = proxy.leave(session);
                    match model.iter().position(|&queued| queued == session) {
                        Some(0) if model.len() > 1 => {
                            let successor = model[1];
                            prop_assert_eq!(
                                actions,
                                vec![AccessAction::NotifyAcquired {
                                    session: successor,
                                    record: RECORD,
                                }]
                            );
                            model.remove(0);
                        },
                        Some(position) => {
                            prop_assert_eq!(actions, vec![]);
                            model.remove(position);
                        },
                        None => prop_assert_eq!(actions, vec![]),
                    }
                },
            }

            // Invariants hold after every step
            prop_assert_eq!(proxy.waiting(), model.as_slice());
            let holders = (0..SESSIONS).filter(|&session| proxy.has_access(session)).count();
            prop_assert!(holders <= 1);
            if let Some(&head) = model.first() {
                prop_assert!(proxy.has_access(head));
            }
        }
    }
}
