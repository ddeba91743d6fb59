//! trybuild compile-time tests for registration_macros

#[test]
fn trybuild_service_registration() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/ok_registration.rs");
    t.compile_fail("tests/trybuild/fail_unknown_capability.rs");
    t.compile_fail("tests/trybuild/fail_duplicate_capability.rs");
}
