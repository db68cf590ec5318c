#![cfg(feature = "serde")]

use ai_core::Status;
use ai_tools::{TraceEvent, TraceKind, TraceLog};

#[test]
fn trace_log_json_roundtrip() {
    let log = TraceLog {
        events: vec![
            TraceEvent::new(0, TraceKind::GraphPaused),
            TraceEvent::node_status(1, 3, Status::Running),
            TraceEvent::new(2, TraceKind::InfiniteLoop).with_node(4),
        ],
    };

    let json = serde_json::to_string(&log).expect("serialize");
    let roundtrip: TraceLog = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, log);
}
