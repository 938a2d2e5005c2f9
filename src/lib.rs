//! # Repoherd Library
//!
//! Core functionality for the `repoherd` command-line tool: inventorying the
//! repositories cloned under a single root, cross-referencing them against
//! GitHub, and reconciling the two sides.
//!
//! ## Core Concepts
//!
//! - **Filter Predicate (`filter`)**: a stateless evaluator that narrows a
//!   repository set by boolean dimensions and an include glob. The same
//!   `FilterConfig` is applied to both data sources.
//! - **Local Inventory Scanner (`scanner`)**: walks `root/<owner>/<name>`,
//!   keeps only git-controlled directories, and derives per-repository
//!   metadata (branch, dirty flag, divergence, manifest fields) concurrently.
//! - **Remote Catalog Fetcher (`forge`)**: pages through the GitHub listing
//!   endpoints for an owner, terminating on the first short page, then
//!   filters the accumulated set once.
//! - **Reconciliation (`reconcile`)**: per-repository clone, publish and sync
//!   flows that issue the minimal set of mutating calls needed to converge
//!   local and remote state.
//! - **Batch Execution (`batch`)**: fans an action out over a repository set
//!   with settle-all semantics and a deterministic failures-first report.
//!
//! The HTTP transport (`forge::HttpOperations`) and the subprocess primitive
//! (`git::GitOperations`) are traits with process-backed default
//! implementations, so every network- or git-touching flow can be exercised
//! against mocks.

pub mod batch;
pub mod config;
pub mod error;
pub mod filter;
pub mod forge;
pub mod git;
pub mod model;
pub mod output;
pub mod reconcile;
pub mod scanner;
