//! Integration tests for the Plugworks host and the example plugin.

mod helpers;

mod lifecycle_test;
mod request_test;
mod settings_test;
