// End-to-end tests for the Mythika backend API
//
// Each test serves the real router on an ephemeral port, backed by its own
// in-memory story store, so tests run in parallel without sharing state.
// The Postgres repository is covered separately by an ignored test that
// needs Docker for testcontainers.

mod helpers;
mod test_narrators;
mod test_pg_repository;
mod test_schedule;
mod test_stories;
