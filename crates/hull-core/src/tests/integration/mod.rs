pub mod resolve_flow_tests;
