//! Call stack tracking through the host entry points
//!
//! Each test replays the track events a host would deliver for a small nested
//! program and checks the resulting tracked stack.

use super::test_utils::*;
use serde_json::json;

fn empty_values(count: usize) -> serde_json::Value {
    serde_json::Value::Array(vec![json!({}); count])
}

mod empty_call_stack {
    use super::*;

    #[test]
    fn test_fill_call_stack_on_depth_1() {
        let host = Host::new();
        host.call(&[(ANON, 3)], 0, true);

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 3, "first_tracked_line": 3 }
                ],
                "p_values": [{}]
            })
        );
    }

    #[test]
    fn test_fill_call_stack_on_depth_3() {
        let host = Host::new();
        host.call(&[(ANON, 15), (PROC1, 11), (PROC2, 6)], 0, true);

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 15, "first_tracked_line": null },
                    { "unit": PROC1, "line": 11, "first_tracked_line": null },
                    { "unit": PROC2, "line": 6, "first_tracked_line": 6 }
                ],
                "p_values": empty_values(3)
            })
        );
    }

    #[test]
    fn test_fill_call_stack_on_depth_3_hide_one_level() {
        let host = Host::new();
        host.call(&[(ANON, 15), (PROC1, 11), (PROC2, 6)], 1, true);

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 15, "first_tracked_line": null },
                    { "unit": PROC1, "line": 11, "first_tracked_line": 11 }
                ],
                "p_values": empty_values(2)
            })
        );
    }

    #[test]
    fn test_hide_more_levels_than_there_are_in_the_stack() {
        let host = Host::new();
        host.call(&[(ANON, 15), (PROC1, 11), (PROC2, 6)], 10, true);

        assert_eq!(host.call_stack(), json!({ "p_calls": [], "p_values": [] }));
    }

    #[test]
    fn test_hide_exactly_the_stack_depth_clears_previous_state() {
        let host = Host::new();
        host.call(&[(ANON, 3)], 0, true);
        host.call(&[(ANON, 4), (PROC1, 6)], 2, true);

        assert_eq!(host.call_stack(), json!({ "p_calls": [], "p_values": [] }));
    }
}

mod stack_matches_till_the_actual_height {
    use super::*;

    fn tracked_height_3(reset_last: bool) {
        let host = Host::new();
        host.call(&[(ANON, 17)], 0, true);
        host.call(&[(ANON, 18), (PROC1, 12)], 0, true);
        host.call(&[(ANON, 18), (PROC1, 13), (PROC2, 6)], 0, true);
        host.call(&[(ANON, 18), (PROC1, 13), (PROC2, 7)], 0, reset_last);

        let expected_top = if reset_last { 7 } else { 6 };
        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 18, "first_tracked_line": 17 },
                    { "unit": PROC1, "line": 13, "first_tracked_line": 12 },
                    { "unit": PROC2, "line": 7, "first_tracked_line": expected_top }
                ],
                "p_values": empty_values(3)
            })
        );
    }

    #[test]
    fn test_saved_height_3_tracked_height_3_two_calls_reset_top() {
        tracked_height_3(true);
    }

    #[test]
    fn test_saved_height_3_tracked_height_3_two_calls_dont_reset_top() {
        tracked_height_3(false);
    }

    fn tracked_depth_1(reset_last: bool) {
        let host = Host::new();
        host.call(&[(ANON, 16), (PROC1, 12), (PROC2, 6)], 0, true);
        host.call(&[(ANON, 16), (PROC1, 12), (PROC2, 7)], 0, reset_last);

        let expected_top = if reset_last { 7 } else { 6 };
        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 16, "first_tracked_line": null },
                    { "unit": PROC1, "line": 12, "first_tracked_line": null },
                    { "unit": PROC2, "line": 7, "first_tracked_line": expected_top }
                ],
                "p_values": empty_values(3)
            })
        );
    }

    #[test]
    fn test_saved_height_3_tracked_depth_1_two_calls_reset_top() {
        tracked_depth_1(true);
    }

    #[test]
    fn test_saved_height_3_tracked_depth_1_two_calls_dont_reset_top() {
        tracked_depth_1(false);
    }

    #[test]
    fn test_two_calls_on_the_same_line_dont_reset_top() {
        let host = Host::new();
        host.call(&[(ANON, 15), (PROC1, 11), (PROC2, 6)], 0, true);
        host.call(&[(ANON, 15), (PROC1, 11), (PROC2, 6)], 0, false);

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 15, "first_tracked_line": null },
                    { "unit": PROC1, "line": 11, "first_tracked_line": null },
                    { "unit": PROC2, "line": 6, "first_tracked_line": 6 }
                ],
                "p_values": empty_values(3)
            })
        );
    }

    #[test]
    fn test_tracked_height_1_two_calls_reset_top() {
        let host = Host::new();
        host.call(&[(ANON, 16)], 0, true);
        host.call(&[(ANON, 17), (PROC1, 12), (PROC2, 6)], 0, true);
        host.call(&[(ANON, 17), (PROC1, 12), (PROC2, 7)], 0, true);

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 17, "first_tracked_line": 16 },
                    { "unit": PROC1, "line": 12, "first_tracked_line": null },
                    { "unit": PROC2, "line": 7, "first_tracked_line": 7 }
                ],
                "p_values": empty_values(3)
            })
        );
    }

    fn saved_height_4(reset_first: bool) {
        let host = Host::new();
        host.call(&[(ANON, 21), (PROC1, 17), (PROC2, 11), (PROC3, 6)], 0, reset_first);
        host.call(&[(ANON, 21), (PROC1, 17), (PROC2, 12)], 0, true);

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 21, "first_tracked_line": null },
                    { "unit": PROC1, "line": 17, "first_tracked_line": null },
                    { "unit": PROC2, "line": 12, "first_tracked_line": 12 }
                ],
                "p_values": empty_values(3)
            })
        );
    }

    #[test]
    fn test_saved_height_4_actual_height_3_one_call_reset_top() {
        saved_height_4(true);
    }

    #[test]
    fn test_saved_height_4_actual_height_3_one_call_dont_reset_top() {
        saved_height_4(false);
    }
}

mod unit_doesnt_match_below_the_actual_height {
    use super::*;

    #[test]
    fn test_tracked_height_4_branch_on_level_3_on_the_same_line() {
        let host = Host::new();
        host.call(&[(ANON, 32)], 0, true);
        host.call(&[(ANON, 33), (PROC1, 27)], 0, true);
        host.call(&[(ANON, 33), (PROC1, 28), (PROC2, 21)], 0, true);
        host.call(&[(ANON, 33), (PROC1, 28), (PROC2, 22), (PROC3, 16)], 0, true);
        host.call(
            &[(ANON, 33), (PROC1, 28), (PROC2, 22), (PROC4, 11), (PROC5, 6)],
            0,
            true,
        );

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 33, "first_tracked_line": 32 },
                    { "unit": PROC1, "line": 28, "first_tracked_line": 27 },
                    { "unit": PROC2, "line": 22, "first_tracked_line": 21 },
                    { "unit": PROC4, "line": 11, "first_tracked_line": null },
                    { "unit": PROC5, "line": 6, "first_tracked_line": 6 }
                ],
                "p_values": empty_values(5)
            })
        );
    }

    #[test]
    fn test_tracked_height_1_branch_on_level_3_on_the_same_line() {
        let host = Host::new();
        host.call(&[(ANON, 30)], 0, true);
        host.call(&[(ANON, 31), (PROC1, 26), (PROC2, 21), (PROC3, 16)], 0, true);
        host.call(
            &[(ANON, 31), (PROC1, 26), (PROC2, 21), (PROC4, 11), (PROC5, 6)],
            0,
            true,
        );

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 31, "first_tracked_line": 30 },
                    { "unit": PROC1, "line": 26, "first_tracked_line": null },
                    { "unit": PROC2, "line": 21, "first_tracked_line": null },
                    { "unit": PROC4, "line": 11, "first_tracked_line": null },
                    { "unit": PROC5, "line": 6, "first_tracked_line": 6 }
                ],
                "p_values": empty_values(5)
            })
        );
    }
}

mod line_doesnt_match_below_the_actual_height {
    use super::*;

    #[test]
    fn test_tracked_height_4_branch_on_level_3() {
        let host = Host::new();
        host.call(&[(ANON, 33)], 0, true);
        host.call(&[(ANON, 34), (PROC1, 28)], 0, true);
        host.call(&[(ANON, 34), (PROC1, 29), (PROC2, 21)], 0, true);
        host.call(&[(ANON, 34), (PROC1, 29), (PROC2, 22), (PROC3, 16)], 0, true);
        host.call(
            &[(ANON, 34), (PROC1, 29), (PROC2, 23), (PROC4, 11), (PROC5, 6)],
            0,
            true,
        );

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 34, "first_tracked_line": 33 },
                    { "unit": PROC1, "line": 29, "first_tracked_line": 28 },
                    { "unit": PROC2, "line": 23, "first_tracked_line": 21 },
                    { "unit": PROC4, "line": 11, "first_tracked_line": null },
                    { "unit": PROC5, "line": 6, "first_tracked_line": 6 }
                ],
                "p_values": empty_values(5)
            })
        );
    }

    #[test]
    fn test_tracked_height_1_branch_on_level_3() {
        let host = Host::new();
        host.call(&[(ANON, 31)], 0, true);
        host.call(&[(ANON, 32), (PROC1, 27), (PROC2, 21), (PROC3, 16)], 0, true);
        host.call(
            &[(ANON, 32), (PROC1, 27), (PROC2, 22), (PROC4, 11), (PROC5, 6)],
            0,
            true,
        );

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 32, "first_tracked_line": 31 },
                    { "unit": PROC1, "line": 27, "first_tracked_line": null },
                    { "unit": PROC2, "line": 22, "first_tracked_line": null },
                    { "unit": PROC4, "line": 11, "first_tracked_line": null },
                    { "unit": PROC5, "line": 6, "first_tracked_line": 6 }
                ],
                "p_values": empty_values(5)
            })
        );
    }

    #[test]
    fn test_moved_caller_keeps_its_values() {
        let host = Host::new();
        host.value(&[(ANON, 5), (PROC1, 3)], "inner", 1, 0);
        host.value(&[(ANON, 5)], "outer", 2, 0);
        host.call(&[(ANON, 6), (PROC1, 3)], 0, true);

        assert_eq!(
            host.call_stack()["p_values"],
            json!([{ "outer": "N2" }, {}])
        );
    }
}

mod default_arguments {
    use super::*;

    #[test]
    fn test_default_call_resets_the_top() {
        let host = Host::new();
        host.call_default(&[(ANON, 11)]);
        host.call_default(&[(ANON, 12), (PROC1, 6)]);
        host.call_default(&[(ANON, 12), (PROC1, 7)]);

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 12, "first_tracked_line": 11 },
                    { "unit": PROC1, "line": 7, "first_tracked_line": 7 }
                ],
                "p_values": empty_values(2)
            })
        );
    }

    #[test]
    fn test_hide_one_level_of_the_stack() {
        let host = Host::new();
        host.call_default(&[(ANON, 10)]);
        host.call(&[(ANON, 11), (PROC1, 6)], 1, true);

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 11, "first_tracked_line": 11 }
                ],
                "p_values": empty_values(1)
            })
        );
    }

    #[test]
    fn test_null_reset_flag_resets_the_top() {
        let host = Host::new();
        host.call_default(&[(ANON, 10)]);
        host.try_call(&[(ANON, 11), (PROC1, 6)], Some(1), None).unwrap();

        assert_eq!(
            host.call_stack(),
            json!({
                "p_calls": [
                    { "unit": ANON, "line": 11, "first_tracked_line": 11 }
                ],
                "p_values": empty_values(1)
            })
        );
    }
}

mod argument_validation {
    use super::*;
    use framelog::TrackError;

    #[test]
    fn test_null_hide_depth_is_rejected() {
        let host = Host::new();
        let err = host.try_call(&[(ANON, 3)], None, Some(true)).unwrap_err();
        assert!(matches!(err, TrackError::InvalidArgument(_)));
    }

    #[test]
    fn test_negative_hide_depth_is_rejected_without_mutation() {
        let host = Host::new();
        host.call(&[(ANON, 3)], 0, true);
        let before = host.call_stack();

        let err = host.try_call(&[(ANON, 4), (PROC1, 2)], Some(-1), Some(true)).unwrap_err();

        assert!(matches!(err, TrackError::InvalidArgument(_)));
        assert_eq!(host.call_stack(), before);
    }

    #[test]
    fn test_reset_empties_the_session() {
        let host = Host::new();
        host.call(&[(ANON, 15), (PROC1, 11)], 0, true);
        host.reset();

        assert_eq!(host.call_stack(), json!({ "p_calls": [], "p_values": [] }));
    }
}
