//! ECS integration tests: the store contract across all three strategies
//! and the systems run against real entities.
