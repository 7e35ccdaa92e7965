//! Property-based tests for encoding and decoding.
