//! Property-based tests for the record/form round trip.
