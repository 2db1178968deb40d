//! Integration tests for the framelog tracking core

mod call_stack_tracking;
