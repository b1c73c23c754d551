//! Workspace-level integration tests for fibdev (see `tests/`).
