//! Shared instruction-stream fixtures for tests.
