//! End-to-end tests for the Ring bridge
//!
//! These tests drive full runs through the scripted VM double: the hook is
//! registered, `see` is rebound, the program prints, and the captured
//! output is checked.

mod harness;
mod capacity;
mod lifecycle;
mod printing;
