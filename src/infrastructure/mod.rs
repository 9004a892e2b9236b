//! Adapters: the C# front end, solution loading, configuration and the
//! scan thread pool.

pub mod concurrency;
pub mod config;
pub mod csharp;
pub mod solution_loader;

pub use concurrency::{init_thread_pool, run_with_cancellation, CancellationToken};
pub use config::Config;
pub use csharp::CSharpParser;
pub use solution_loader::SolutionLoader;
