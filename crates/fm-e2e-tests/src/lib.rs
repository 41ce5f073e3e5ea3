//! End-to-end tests for the FeedMe bot live under `tests/`.
