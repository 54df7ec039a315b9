//! Integration tests for the settings store, prompt rendering, and CLI

mod cli_contracts;
mod reconciliation;
mod support;
