//! Property-based tests for trail ordering and reconciliation stability
